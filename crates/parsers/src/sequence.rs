use agextract_core::{ParsedSession, Role, StepRecord, StepType};

/// Assigns contiguous 1-based order numbers to emitted steps.
///
/// Content is trimmed on the way in; anything that trims to nothing is
/// dropped without consuming a number. One builder per parse call.
#[derive(Debug)]
pub struct SequenceBuilder {
    next_order: u32,
    steps: Vec<StepRecord>,
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self {
            next_order: 1,
            steps: Vec::new(),
        }
    }

    /// Append a step, returning the order it was given.
    pub fn push(&mut self, role: Role, step_type: StepType, content: &str) -> Option<u32> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        let order = self.next_order;
        self.steps.push(StepRecord {
            role,
            step_type,
            content: content.to_string(),
            order,
        });
        self.next_order += 1;
        Some(order)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn finish(self, title: &str) -> ParsedSession {
        ParsedSession::new(title, self.steps)
    }
}
