use crate::{Role, StepRecord, StepType};

/// Step record with an explicit order.
pub fn step(order: u32, role: Role, step_type: StepType, content: &str) -> StepRecord {
    StepRecord {
        role,
        step_type,
        content: content.to_string(),
        order,
    }
}

/// Compact `(order, role, step_type, content)` view for assertions.
pub fn summarize(steps: &[StepRecord]) -> Vec<(u32, Role, StepType, &str)> {
    steps
        .iter()
        .map(|s| (s.order, s.role, s.step_type, s.content.as_str()))
        .collect()
}

/// Assert the ordering and content invariants every parse must uphold.
pub fn assert_well_formed(steps: &[StepRecord]) {
    for (i, step) in steps.iter().enumerate() {
        assert_eq!(step.order as usize, i + 1, "order gap at index {i}");
        assert!(!step.content.is_empty(), "empty content at index {i}");
        assert_eq!(
            step.content.trim(),
            step.content,
            "untrimmed content at index {i}"
        );
    }
}
