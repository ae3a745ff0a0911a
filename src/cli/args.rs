//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Navigation and content tooling for the estudio site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: estudio.toml)
    #[arg(short = 'C', long, global = true, default_value = "estudio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan the asset tree and write the image manifest
    #[command(visible_alias = "m")]
    Manifest {
        /// Output file (default: `assets.manifest` from the config)
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Replay a navigation session and print where it lands
    #[command(visible_alias = "r")]
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,
    },

    /// Check content and assets for unreachable or missing entries
    #[command(visible_alias = "v")]
    Validate {
        /// Treat validation failures as warnings instead of errors
        #[arg(long, short = 'w')]
        warn_only: bool,
    },

    /// Validate a contact request and print its WhatsApp link
    #[command(visible_alias = "c")]
    Contact {
        /// Visitor name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Project description
        #[arg(short, long, default_value = "")]
        message: String,

        /// Only report errors of the given fields, as shown while typing
        #[arg(long)]
        check: bool,
    },
}

/// Resolve command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Href the session starts on
    #[arg(short, long, default_value = "/")]
    pub from: String,

    /// Navigation steps, in order:
    /// `back`, `forward`, `hash:<anchor>` (fragment link), `load:<url>` or
    /// `error:<url>` (image events), or an href to click
    #[arg(value_name = "STEP")]
    pub steps: Vec<String>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}
