//! Content-sniffing step classification for buffered Markdown blocks.
//!
//! Rules are checked in order and the first match wins; two rules can match
//! the same block, so the order is part of the contract.

use agextract_core::{Role, StepType};

const DIFF_FENCE: &str = "```diff";
const CONFLICT_MARKER: &str = "<<<<<<<";
const TOOL_CALL_LABEL: &str = "Tool Call";
const FUNCTION_CALLS_TAG: &str = "<function_calls>";

/// Infer the step type of a flushed block from its role and trimmed content.
pub fn classify_step(role: Role, content: &str) -> StepType {
    if content.contains(DIFF_FENCE) || content.contains(CONFLICT_MARKER) {
        return StepType::Diff;
    }
    if content.contains(TOOL_CALL_LABEL) || content.contains(FUNCTION_CALLS_TAG) {
        return StepType::ToolCall;
    }
    // Tool-style lines that reached the buffer instead of the fast path
    if content.starts_with('*') && content.ends_with('*') {
        return StepType::ToolCall;
    }
    match role {
        Role::User => StepType::Prompt,
        Role::Agent | Role::System => StepType::Text,
    }
}
