//! Flattening of JSON-Lines record payloads into plain text.
//!
//! The `message`/`content` fields change shape between exporters (plain
//! string, list of typed blocks, nested mapping). [`Payload::resolve`] picks
//! the shape once and [`Payload::into_text`] renders it, so the truncation
//! limits below live in exactly one place.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Max chars of JSON-encoded `tool_use` input.
pub const TOOL_INPUT_LIMIT: usize = 500;
/// Max chars of a `tool_result` block's content.
pub const TOOL_RESULT_LIMIT: usize = 1000;
/// Max chars of a JSON-encoded top-level `content` fallback.
pub const FALLBACK_CONTENT_LIMIT: usize = 2000;

// ── Raw block deserialization ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawContentBlock {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(rename = "tool_use")]
    ToolUse {
        #[serde(default)]
        name: Value,
        #[serde(default = "empty_input")]
        input: Value,
    },
    #[serde(rename = "tool_result")]
    ToolResult {
        #[serde(default)]
        content: Value,
    },
    // Unknown block kinds contribute nothing
    #[serde(other)]
    Other,
}

fn empty_input() -> Value {
    Value::Object(Map::new())
}

impl RawContentBlock {
    fn render(self) -> Option<String> {
        match self {
            Self::Text { text } => Some(text),
            Self::ToolUse { name, input } => Some(format!(
                "Tool: {} — {}",
                value_to_text(&name),
                truncate_chars(&input.to_string(), TOOL_INPUT_LIMIT)
            )),
            Self::ToolResult { content } => {
                let text = value_to_text(&content);
                Some(truncate_chars(&text, TOOL_RESULT_LIMIT).to_string())
            }
            Self::Other => None,
        }
    }
}

// ── Payload resolution ──────────────────────────────────────────────────────

/// The payload shape of one record, resolved in priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<'a> {
    /// `message.content`, `message` or top-level `content` as a plain string
    Text(&'a str),
    /// `message.content` as a list of typed blocks
    Blocks(&'a [Value]),
    /// Top-level `content` as a list or mapping
    Structured(&'a Value),
    Empty,
}

impl<'a> Payload<'a> {
    pub fn resolve(record: &'a Map<String, Value>) -> Self {
        match record.get("message") {
            Some(Value::Object(message)) => match message.get("content") {
                Some(Value::String(text)) => return Self::Text(text),
                Some(Value::Array(blocks)) => return Self::Blocks(blocks),
                _ => {}
            },
            Some(Value::String(text)) => return Self::Text(text),
            _ => {}
        }

        match record.get("content") {
            Some(Value::String(text)) => Self::Text(text),
            Some(value @ (Value::Array(_) | Value::Object(_))) => Self::Structured(value),
            _ => Self::Empty,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text.to_string(),
            Self::Blocks(blocks) => blocks
                .iter()
                .filter(|block| block.is_object())
                .filter_map(|block| RawContentBlock::deserialize(block).ok())
                .filter_map(RawContentBlock::render)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Structured(value) => {
                truncate_chars(&value.to_string(), FALLBACK_CONTENT_LIMIT).to_string()
            }
            Self::Empty => String::new(),
        }
    }
}

/// Extract the flat text of one JSON-Lines record.
pub fn extract_content(record: &Map<String, Value>) -> String {
    Payload::resolve(record).into_text()
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Cut `text` to at most `limit` chars, respecting char boundaries.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
