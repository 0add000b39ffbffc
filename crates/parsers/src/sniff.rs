use std::fmt;
use std::str::FromStr;

/// Transcript encodings the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptFormat {
    JsonLines,
    Markdown,
}

impl TranscriptFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JsonLines => "jsonl",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranscriptFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jsonl" | "json-lines" | "jsonlines" => Ok(Self::JsonLines),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(format!("unsupported transcript format: {other}")),
        }
    }
}

/// Decide which pipeline handles `content`.
///
/// Only the first non-blank line is inspected: if it is a JSON object the
/// whole document is treated as JSON-Lines. A prose document that happens to
/// open with a JSON object line is misclassified; that is accepted.
pub fn detect_format(content: &str) -> TranscriptFormat {
    let Some(first_line) = content.lines().map(str::trim).find(|line| !line.is_empty()) else {
        return TranscriptFormat::Markdown;
    };
    if !first_line.starts_with('{') {
        return TranscriptFormat::Markdown;
    }
    match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(first_line) {
        Ok(_) => TranscriptFormat::JsonLines,
        Err(e) => {
            tracing::debug!("first line looks like JSON but does not parse: {}", e);
            TranscriptFormat::Markdown
        }
    }
}
