use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parsed session: the root value handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSession {
    /// Display title supplied by the caller (usually the upload's file name)
    pub title: String,
    /// Number of source documents; a single-document parse always reports 1
    pub file_count: u32,
    /// Steps in emission order
    pub steps: Vec<StepRecord>,
}

impl ParsedSession {
    pub const SINGLE_FILE: u32 = 1;

    pub fn new(title: impl Into<String>, steps: Vec<StepRecord>) -> Self {
        Self {
            title: title.into(),
            file_count: Self::SINGLE_FILE,
            steps,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// One discrete unit of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub role: Role,
    pub step_type: StepType,
    /// Trimmed, never empty
    pub content: String,
    /// 1-based position in the session
    pub order: u32,
}

/// Who produced a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
    System,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "agent" => Ok(Self::Agent),
            "system" => Ok(Self::System),
            _ => Err(UnknownLabel {
                kind: "role",
                value: s.to_string(),
            }),
        }
    }
}

/// Semantic kind of a step's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    Prompt,
    ToolCall,
    Diff,
    Thought,
    Text,
}

impl StepType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::ToolCall => "tool_call",
            Self::Diff => "diff",
            Self::Thought => "thought",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prompt" => Ok(Self::Prompt),
            "tool_call" => Ok(Self::ToolCall),
            "diff" => Ok(Self::Diff),
            "thought" => Ok(Self::Thought),
            "text" => Ok(Self::Text),
            _ => Err(UnknownLabel {
                kind: "step type",
                value: s.to_string(),
            }),
        }
    }
}

/// Returned when a role or step type label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_record_serializes_with_wire_labels() {
        let step = StepRecord {
            role: Role::Agent,
            step_type: StepType::ToolCall,
            content: "*Edited file.py*".to_string(),
            order: 3,
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["role"], "agent");
        assert_eq!(json["step_type"], "tool_call");
        assert_eq!(json["order"], 3);
    }

    #[test]
    fn test_parsed_session_new_is_single_file() {
        let session = ParsedSession::new("notes.md", Vec::new());
        assert_eq!(session.file_count, 1);
        assert!(session.is_empty());
    }

    #[test]
    fn test_labels_round_trip_through_from_str() {
        for role in [Role::User, Role::Agent, Role::System] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        for step_type in [
            StepType::Prompt,
            StepType::ToolCall,
            StepType::Diff,
            StepType::Thought,
            StepType::Text,
        ] {
            assert_eq!(step_type.to_string().parse::<StepType>().unwrap(), step_type);
        }
    }

    #[test]
    fn test_unknown_label_error() {
        let err = "narrator".parse::<Role>().unwrap_err();
        assert_eq!(err.to_string(), "unknown role: narrator");
    }
}
