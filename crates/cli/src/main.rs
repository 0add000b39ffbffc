mod config;
mod output;
mod parse_cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agextract",
    version,
    about = "agextract CLI - normalize AI coding session transcripts into steps"
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a JSON-Lines or Markdown transcript into ordered steps
    Parse(parse_cmd::ParseArgs),

    /// Print the detected transcript format of a file
    Detect {
        /// Transcript file path (`-` reads stdin)
        file: PathBuf,
    },

    /// Show the effective configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let result = match cli.command {
        Commands::Parse(args) => {
            config::load_config().and_then(|config| parse_cmd::run(args, &config))
        }
        Commands::Detect { file } => {
            config::load_config().and_then(|config| parse_cmd::run_detect(&file, &config))
        }
        Commands::Config => config::show_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
