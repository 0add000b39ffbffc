pub mod classify;
pub mod extract;
pub mod jsonl;
pub mod markdown;
pub mod sequence;
pub mod sniff;

use agextract_core::{DecodeError, ParsedSession, TranscriptInput};

pub use classify::classify_step;
pub use jsonl::JsonlPipeline;
pub use markdown::MarkdownPipeline;
pub use sequence::SequenceBuilder;
pub use sniff::{detect_format, TranscriptFormat};

/// Trait for turning one transcript encoding into ordered steps
pub trait StepPipeline: Send + Sync {
    /// Encoding handled by this pipeline
    fn format(&self) -> TranscriptFormat;

    /// Emit every step found in `content` into `seq`
    fn run(&self, content: &str, seq: &mut SequenceBuilder);
}

/// Get the pipeline for a format
pub fn pipeline_for(format: TranscriptFormat) -> &'static dyn StepPipeline {
    match format {
        TranscriptFormat::JsonLines => &JsonlPipeline,
        TranscriptFormat::Markdown => &MarkdownPipeline,
    }
}

/// Parse decoded transcript text, detecting its format from the first
/// non-blank line.
pub fn parse(content: &str, title: &str) -> ParsedSession {
    parse_as(detect_format(content), content, title)
}

/// Parse decoded transcript text with an explicit format, skipping detection.
pub fn parse_as(format: TranscriptFormat, content: &str, title: &str) -> ParsedSession {
    let mut seq = SequenceBuilder::new();
    pipeline_for(format).run(content, &mut seq);
    tracing::debug!("Parsed {} transcript into {} steps", format, seq.len());
    seq.finish(title)
}

/// Decode `bytes` as UTF-8 and parse them. Decoding failure is the only error.
pub fn parse_bytes(bytes: &[u8], title: &str) -> Result<ParsedSession, DecodeError> {
    let content = std::str::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })?;
    Ok(parse(content, title))
}

/// Consume a [`TranscriptInput`] and parse it.
pub fn parse_input(input: TranscriptInput) -> Result<ParsedSession, DecodeError> {
    let (content, title) = input.decode()?;
    Ok(parse(&content, &title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agextract_core::{Role, StepType, DEFAULT_TITLE};

    #[test]
    fn test_pipeline_for_matches_format() {
        for format in [TranscriptFormat::JsonLines, TranscriptFormat::Markdown] {
            assert_eq!(pipeline_for(format).format(), format);
        }
    }

    #[test]
    fn test_parse_dispatches_on_first_line() {
        let session = parse(r#"{"type":"user","message":"hi"}"#, "t");
        assert_eq!(session.steps[0].role, Role::User);
        assert_eq!(session.steps[0].content, "hi");

        let session = parse("# Agent\nhello", "t");
        assert_eq!(session.steps[0].role, Role::Agent);
    }

    #[test]
    fn test_parse_as_overrides_detection() {
        let content = "{\"type\":\"user\",\"message\":\"hi\"}\n# Agent\nhello";
        let session = parse_as(TranscriptFormat::Markdown, content, "t");
        assert_eq!(session.steps.len(), 1);
        assert_eq!(session.steps[0].content, "hello");
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let err = parse_bytes(&[b'#', b' ', 0xc3, 0x28], "t").unwrap_err();
        assert_eq!(err, DecodeError::InvalidUtf8 { valid_up_to: 2 });
    }

    #[test]
    fn test_parse_input_uses_default_title() {
        let session = parse_input(TranscriptInput::from_text("# User\nhi")).unwrap();
        assert_eq!(session.title, DEFAULT_TITLE);
        assert_eq!(session.file_count, 1);
        assert_eq!(session.steps[0].step_type, StepType::Prompt);
    }
}
