use agextract_core::{ParsedSession, StepStats};
use agextract_parsers::extract::truncate_chars;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const TEXT_PREVIEW_CHARS: usize = 60;

/// Output format for parsed sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact JSON document
    #[default]
    Json,
    /// Indented JSON document
    Pretty,
    /// One line per step
    Text,
}

/// Render a session in the requested format. Output always ends with a newline.
pub fn render_session(session: &ParsedSession, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut body = serde_json::to_string(session).context("serialize session")?;
            body.push('\n');
            Ok(body)
        }
        OutputFormat::Pretty => {
            let mut body = serde_json::to_string_pretty(session).context("serialize session")?;
            body.push('\n');
            Ok(body)
        }
        OutputFormat::Text => Ok(render_text(session)),
    }
}

fn render_text(session: &ParsedSession) -> String {
    let mut out = format!("{} ({} steps)\n", session.title, session.steps.len());
    for step in &session.steps {
        let first_line = step.content.lines().next().unwrap_or_default();
        let preview = truncate_chars(first_line, TEXT_PREVIEW_CHARS);
        let ellipsis = if preview.len() < step.content.len() { "..." } else { "" };
        out.push_str(&format!(
            "[{}] {} ({}): {}{}\n",
            step.order, step.role, step.step_type, preview, ellipsis
        ));
    }
    out
}

/// Human-readable stats block for stderr.
pub fn render_stats(stats: &StepStats) -> String {
    format!(
        "steps: {}\n  user: {}  agent: {}  system: {}\n  prompt: {}  tool_call: {}  diff: {}  thought: {}  text: {}\n",
        stats.step_count,
        stats.user_steps,
        stats.agent_steps,
        stats.system_steps,
        stats.prompt_count,
        stats.tool_call_count,
        stats.diff_count,
        stats.thought_count,
        stats.text_count,
    )
}
