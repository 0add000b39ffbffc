use crate::{ParsedSession, Role, StepRecord, StepType};
use serde::Serialize;

/// Per-session step counters.
///
/// Pure function of the step list; the caller may persist these next to the
/// session for dashboard aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepStats {
    pub step_count: u64,
    pub user_steps: u64,
    pub agent_steps: u64,
    pub system_steps: u64,
    pub prompt_count: u64,
    pub tool_call_count: u64,
    pub diff_count: u64,
    pub thought_count: u64,
    pub text_count: u64,
}

impl StepStats {
    fn add_step(&mut self, step: &StepRecord) {
        self.step_count += 1;
        match step.role {
            Role::User => self.user_steps += 1,
            Role::Agent => self.agent_steps += 1,
            Role::System => self.system_steps += 1,
        }
        match step.step_type {
            StepType::Prompt => self.prompt_count += 1,
            StepType::ToolCall => self.tool_call_count += 1,
            StepType::Diff => self.diff_count += 1,
            StepType::Thought => self.thought_count += 1,
            StepType::Text => self.text_count += 1,
        }
    }
}

/// Count steps by role and by type.
pub fn compute(steps: &[StepRecord]) -> StepStats {
    let mut stats = StepStats::default();
    for step in steps {
        stats.add_step(step);
    }
    stats
}

impl ParsedSession {
    pub fn stats(&self) -> StepStats {
        compute(&self.steps)
    }
}
