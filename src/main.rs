//! estudio - navigation and content tooling for an interior-design studio site.

#![allow(dead_code)]

mod asset;
mod cli;
mod config;
mod contact;
mod content;
mod core;
mod logger;
mod router;
mod utils;
mod view;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    let config = SiteConfig::load(&cwd, &cli.config)
        .with_context(|| format!("failed to load `{}`", cli.config.display()))?;
    debug!("config"; "root `{}`", config.get_root().display());

    let result = match &cli.command {
        Commands::Manifest { output } => cli::manifest::write_manifest(&config, output.as_deref()),
        Commands::Resolve { args } => cli::resolve::resolve_session(&config, args),
        Commands::Validate { warn_only } => cli::validate::validate_site(&config, *warn_only),
        Commands::Contact {
            name,
            message,
            check,
        } => cli::contact::contact_link(&config, name, message, *check),
    };

    let warnings = logger::WARNINGS.count();
    if warnings > 0 {
        log!("warning"; "finished with {}", utils::plural_count(warnings, "warning"));
    }
    result
}
