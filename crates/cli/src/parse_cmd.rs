use crate::config::CliConfig;
use crate::output::{render_session, render_stats, OutputFormat};
use agextract_core::{ParsedSession, Role, StepType, TranscriptInput, DEFAULT_TITLE};
use agextract_parsers::{detect_format, parse_as, parse_input, TranscriptFormat};
use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};

const STDIN_PATH: &str = "-";

/// Transcript format selection for `parse`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FormatHint {
    /// Detect from the first non-blank line
    #[default]
    Auto,
    Jsonl,
    Markdown,
}

impl FormatHint {
    fn forced(self) -> Option<TranscriptFormat> {
        match self {
            Self::Auto => None,
            Self::Jsonl => Some(TranscriptFormat::JsonLines),
            Self::Markdown => Some(TranscriptFormat::Markdown),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ParseArgs {
    /// Transcript file path (`-` reads stdin).
    pub file: PathBuf,
    /// Session title (defaults to the file name).
    #[arg(long)]
    pub title: Option<String>,
    /// Transcript format.
    #[arg(long, value_enum, default_value_t = FormatHint::Auto)]
    pub format: FormatHint,
    /// Output format (defaults to the configured one).
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,
    /// Keep only steps with this role (repeatable: user, agent, system).
    #[arg(long = "role", value_name = "ROLE")]
    pub roles: Vec<Role>,
    /// Keep only steps of this type (repeatable: prompt, tool_call, diff, thought, text).
    #[arg(long = "type", value_name = "TYPE")]
    pub step_types: Vec<StepType>,
    /// Print step counts of the whole session to stderr.
    #[arg(long)]
    pub stats: bool,
    /// Optional output file path (default stdout).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: ParseArgs, config: &CliConfig) -> Result<()> {
    let bytes = read_input(&args.file, config.parse.max_input_bytes)?;
    let title = args
        .title
        .clone()
        .unwrap_or_else(|| default_title(&args.file, config));
    let input = TranscriptInput::from_bytes(bytes).with_title(title);

    let mut session = match args.format.forced() {
        None => parse_input(input),
        Some(format) => input
            .decode()
            .map(|(content, title)| parse_as(format, &content, &title)),
    }
    .with_context(|| format!("failed to parse {}", args.file.display()))?;

    if args.stats {
        eprint!("{}", render_stats(&session.stats()));
    }
    retain_matching(&mut session, &args.roles, &args.step_types);

    let format = args.output.unwrap_or(config.output.format);
    let rendered = render_session(&session, format)?;
    if let Some(path) = args.out {
        std::fs::write(&path, rendered).with_context(|| format!("write {}", path.display()))?;
    } else {
        print!("{rendered}");
    }
    Ok(())
}

/// Drop steps outside the requested roles and types. Kept steps keep their
/// original order numbers.
fn retain_matching(session: &mut ParsedSession, roles: &[Role], step_types: &[StepType]) {
    if roles.is_empty() && step_types.is_empty() {
        return;
    }
    let before = session.steps.len();
    session.steps.retain(|step| {
        (roles.is_empty() || roles.contains(&step.role))
            && (step_types.is_empty() || step_types.contains(&step.step_type))
    });
    tracing::debug!("Step filter kept {} of {} steps", session.steps.len(), before);
}

/// Print the format the engine would pick for a file.
pub fn run_detect(file: &Path, config: &CliConfig) -> Result<()> {
    let bytes = read_input(file, config.parse.max_input_bytes)?;
    let (content, _) = TranscriptInput::from_bytes(bytes)
        .decode()
        .with_context(|| format!("failed to decode {}", file.display()))?;
    println!("{}", detect_format(&content));
    Ok(())
}

fn default_title(file: &Path, config: &CliConfig) -> String {
    if file.as_os_str() != STDIN_PATH {
        if let Some(name) = file.file_name().and_then(|value| value.to_str()) {
            return name.to_string();
        }
    }
    config
        .parse
        .default_title
        .clone()
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

/// Read the whole input, refusing anything over `max_bytes`.
fn read_input(file: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    if file.as_os_str() == STDIN_PATH {
        let mut bytes = Vec::new();
        std::io::stdin()
            .take(max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .context("failed to read stdin")?;
        if bytes.len() as u64 > max_bytes {
            bail!("stdin is larger than max_input_bytes ({max_bytes})");
        }
        return Ok(bytes);
    }

    let size = std::fs::metadata(file)
        .with_context(|| format!("failed to read {}", file.display()))?
        .len();
    if size > max_bytes {
        bail!(
            "{} is {size} bytes, larger than max_input_bytes ({max_bytes})",
            file.display()
        );
    }
    std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseConfig;
    use agextract_core::testing::{step, summarize};

    #[test]
    fn test_default_title_prefers_file_name() {
        let config = CliConfig::default();
        assert_eq!(default_title(Path::new("/tmp/chat.md"), &config), "chat.md");
    }

    #[test]
    fn test_default_title_for_stdin() {
        let mut config = CliConfig::default();
        assert_eq!(default_title(Path::new("-"), &config), DEFAULT_TITLE);
        config.parse = ParseConfig {
            default_title: Some("Pasted".to_string()),
            ..ParseConfig::default()
        };
        assert_eq!(default_title(Path::new("-"), &config), "Pasted");
    }

    #[test]
    fn test_read_input_enforces_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.md");
        std::fs::write(&path, "0123456789").unwrap();
        assert_eq!(read_input(&path, 10).unwrap().len(), 10);
        let err = read_input(&path, 9).unwrap_err();
        assert!(err.to_string().contains("larger than max_input_bytes"));
    }

    fn rocket_session() -> ParsedSession {
        ParsedSession::new(
            "rocket.md",
            vec![
                step(1, Role::User, StepType::Prompt, "Build me a rocket."),
                step(2, Role::Agent, StepType::ToolCall, "*Edited rocket.py*"),
                step(3, Role::Agent, StepType::Diff, "```diff\n+launch()\n```"),
                step(4, Role::System, StepType::Text, "exit 0"),
            ],
        )
    }

    #[test]
    fn test_retain_matching_without_filters_keeps_everything() {
        let mut session = rocket_session();
        retain_matching(&mut session, &[], &[]);
        assert_eq!(session, rocket_session());
    }

    #[test]
    fn test_retain_matching_by_role_keeps_order_numbers() {
        let mut session = rocket_session();
        retain_matching(&mut session, &[Role::Agent], &[]);
        let orders: Vec<u32> = session.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![2, 3]);
    }

    #[test]
    fn test_retain_matching_role_and_type_intersect() {
        let mut session = rocket_session();
        retain_matching(
            &mut session,
            &[Role::Agent, Role::System],
            &[StepType::Diff, StepType::Text],
        );
        assert_eq!(
            summarize(&session.steps),
            vec![
                (3, Role::Agent, StepType::Diff, "```diff\n+launch()\n```"),
                (4, Role::System, StepType::Text, "exit 0"),
            ]
        );
    }

    #[test]
    fn test_filter_flags_parse_labels() {
        use clap::Parser;

        #[derive(Parser)]
        struct Harness {
            #[command(flatten)]
            args: ParseArgs,
        }

        let harness = Harness::try_parse_from([
            "agextract", "t.md", "--role", "agent", "--role", "user", "--type", "tool_call",
        ])
        .unwrap();
        assert_eq!(harness.args.roles, vec![Role::Agent, Role::User]);
        assert_eq!(harness.args.step_types, vec![StepType::ToolCall]);

        let err = Harness::try_parse_from(["agextract", "t.md", "--role", "narrator"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("unknown role: narrator"));
    }

    #[test]
    fn test_format_hint_forced() {
        assert_eq!(FormatHint::Auto.forced(), None);
        assert_eq!(FormatHint::Jsonl.forced(), Some(TranscriptFormat::JsonLines));
        assert_eq!(FormatHint::Markdown.forced(), Some(TranscriptFormat::Markdown));
    }
}
