use thiserror::Error;

/// Title used when the caller does not supply one.
pub const DEFAULT_TITLE: &str = "Uploaded Session";

/// Fatal input errors. Everything else inside the engine degrades to
/// dropped steps rather than failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("transcript is not valid UTF-8 text (invalid byte at offset {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },
}

/// Raw transcript payload plus an optional display title.
///
/// Consumed exactly once by [`TranscriptInput::decode`].
#[derive(Debug, Clone, Default)]
pub struct TranscriptInput {
    payload: Vec<u8>,
    title: Option<String>,
}

impl TranscriptInput {
    pub fn from_bytes(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            title: None,
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_bytes(text.into().into_bytes())
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Decode the payload as UTF-8, returning `(text, title)`.
    pub fn decode(self) -> Result<(String, String), DecodeError> {
        let title = self.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let text = String::from_utf8(self.payload).map_err(|e| DecodeError::InvalidUtf8 {
            valid_up_to: e.utf8_error().valid_up_to(),
        })?;
        Ok((text, title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_defaults_title() {
        let (text, title) = TranscriptInput::from_text("# User\nhi").decode().unwrap();
        assert_eq!(text, "# User\nhi");
        assert_eq!(title, DEFAULT_TITLE);
    }

    #[test]
    fn test_decode_keeps_title() {
        let (_, title) = TranscriptInput::from_bytes(b"x".to_vec())
            .with_title("session.md")
            .decode()
            .unwrap();
        assert_eq!(title, "session.md");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let err = TranscriptInput::from_bytes(vec![b'o', b'k', 0xff, 0xfe])
            .decode()
            .unwrap_err();
        assert_eq!(err, DecodeError::InvalidUtf8 { valid_up_to: 2 });
        assert!(err.to_string().contains("offset 2"));
    }
}
