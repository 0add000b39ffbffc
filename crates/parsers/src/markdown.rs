//! Speaker segmentation for free-form Markdown transcripts.
//!
//! The scanner is a small state machine: it is either idle (no speaker seen
//! yet) or buffering text for the current speaker. Each input line is turned
//! into a [`LineEvent`] and applied to the state. The pending buffer is
//! flushed into a step whenever the speaker changes, a standalone tool-event
//! line appears, or the input ends.

use crate::classify::classify_step;
use crate::sequence::SequenceBuilder;
use crate::sniff::TranscriptFormat;
use crate::StepPipeline;
use agextract_core::{Role, StepType};
use regex::Regex;
use std::sync::LazyLock;

static USER_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(#+\s*)?(User|Human)(\s*Input)?:?").unwrap());

static AGENT_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(#+\s*)?(Agent|Assistant|AI):?").unwrap());

/// Who the scanner is currently attributing text to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Speaking(Role),
}

/// What a single line means to the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent<'a> {
    /// Speaker heading or label; carries no text of its own
    RoleSwitch(Role),
    /// Standalone `*...*` line, trimmed
    ToolEvent(&'a str),
    /// Anything else, untrimmed
    Plain(&'a str),
}

/// Classify one raw line. Role headings take priority over tool lines.
pub fn classify_line(line: &str) -> LineEvent<'_> {
    if USER_HEADING_RE.is_match(line) {
        return LineEvent::RoleSwitch(Role::User);
    }
    if AGENT_HEADING_RE.is_match(line) {
        return LineEvent::RoleSwitch(Role::Agent);
    }
    let trimmed = line.trim();
    if is_tool_event_line(trimmed) {
        LineEvent::ToolEvent(trimmed)
    } else {
        LineEvent::Plain(line)
    }
}

fn is_tool_event_line(trimmed: &str) -> bool {
    trimmed.starts_with('*') && trimmed.ends_with('*') && trimmed.chars().count() > 2
}

/// Line-by-line speaker state machine.
#[derive(Debug)]
pub struct MarkdownScanner<'a> {
    state: ScanState,
    buffer: Vec<&'a str>,
}

impl Default for MarkdownScanner<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> MarkdownScanner<'a> {
    pub fn new() -> Self {
        Self {
            state: ScanState::Idle,
            buffer: Vec::new(),
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn pending_lines(&self) -> usize {
        self.buffer.len()
    }

    pub fn feed(&mut self, line: &'a str, seq: &mut SequenceBuilder) {
        match classify_line(line) {
            LineEvent::RoleSwitch(role) => {
                self.flush(seq);
                self.state = ScanState::Speaking(role);
            }
            LineEvent::ToolEvent(text) => {
                self.flush(seq);
                seq.push(Role::Agent, StepType::ToolCall, text);
                self.state = ScanState::Speaking(Role::Agent);
            }
            LineEvent::Plain(text) => match self.state {
                ScanState::Speaking(_) => self.buffer.push(text),
                ScanState::Idle => tracing::trace!("Dropping line before first speaker"),
            },
        }
    }

    /// Flush whatever is still pending at end of input.
    pub fn finish(mut self, seq: &mut SequenceBuilder) {
        self.flush(seq);
    }

    fn flush(&mut self, seq: &mut SequenceBuilder) {
        if self.buffer.is_empty() {
            return;
        }
        let block = self.buffer.join("\n");
        self.buffer.clear();

        let ScanState::Speaking(role) = self.state else {
            return;
        };
        let content = block.trim();
        if content.is_empty() {
            tracing::trace!("Dropping blank {} block", role);
            return;
        }
        seq.push(role, classify_step(role, content), content);
    }
}

/// Free-form Markdown transcript pipeline.
pub struct MarkdownPipeline;

impl StepPipeline for MarkdownPipeline {
    fn format(&self) -> TranscriptFormat {
        TranscriptFormat::Markdown
    }

    fn run(&self, content: &str, seq: &mut SequenceBuilder) {
        let mut scanner = MarkdownScanner::new();
        for line in content.split('\n') {
            scanner.feed(line, seq);
        }
        scanner.finish(seq);
    }
}
