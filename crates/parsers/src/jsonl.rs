use crate::extract::extract_content;
use crate::sequence::SequenceBuilder;
use crate::sniff::TranscriptFormat;
use crate::StepPipeline;
use agextract_core::{Role, StepType};
use serde_json::{Map, Value};

/// Line-oriented event log pipeline.
///
/// The record's declared `type` is authoritative for role and step type;
/// content sniffing is never applied here.
pub struct JsonlPipeline;

impl StepPipeline for JsonlPipeline {
    fn format(&self) -> TranscriptFormat {
        TranscriptFormat::JsonLines
    }

    fn run(&self, content: &str, seq: &mut SequenceBuilder) {
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let record: Map<String, Value> = match serde_json::from_str(line) {
                Ok(record) => record,
                Err(e) => {
                    tracing::debug!("Skipping unparseable JSONL line {}: {}", idx + 1, e);
                    continue;
                }
            };

            let kind = record.get("type").and_then(Value::as_str).unwrap_or_default();
            let Some((role, step_type)) = record_kind(kind) else {
                tracing::debug!("Skipping JSONL line {} with unsupported type {:?}", idx + 1, kind);
                continue;
            };

            let text = extract_content(&record);
            if seq.push(role, step_type, &text).is_none() {
                tracing::trace!("JSONL line {} has no content", idx + 1);
            }
        }
    }
}

/// Map a record's declared message kind to its role and step type.
pub fn record_kind(kind: &str) -> Option<(Role, StepType)> {
    match kind {
        "human" | "user" => Some((Role::User, StepType::Prompt)),
        "assistant" | "agent" => Some((Role::Agent, StepType::Text)),
        "tool_use" | "tool_call" => Some((Role::Agent, StepType::ToolCall)),
        "tool_result" => Some((Role::System, StepType::Text)),
        _ => None,
    }
}
