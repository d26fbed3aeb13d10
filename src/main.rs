//! `license-rules` — evaluate declared package licenses against compliance rules.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load the policy config and build a validated rule set.
//! 3. Load the packages file.
//! 4. Evaluate every package; an evaluation failure halts the run.
//! 5. Render the requested report.
//! 6. Exit `0`, or `1` when a verdict reaches the `--fail-on` level.

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, OutputFormat};
use license_rules::config::load_config;
use license_rules::input::load_packages;
use license_rules::models::{PackageVerdict, VerdictStatus};
use license_rules::report;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let project = policy_dir(cli.packages.as_deref());
    let config = load_config(project, cli.config.as_deref())?;
    let mut rule_set = config
        .rule_set()
        .context("invalid policy configuration")?;
    if let Some(precedence) = &cli.precedence {
        rule_set = rule_set.with_precedence(precedence.into());
    }

    if cli.list_rules {
        report::terminal::render_rules(&rule_set);
        return Ok(());
    }

    let Some(packages_path) = cli.packages.as_deref() else {
        anyhow::bail!("no packages file given");
    };
    let packages = load_packages(packages_path)?;

    if !cli.quiet && matches!(cli.format, OutputFormat::Terminal) {
        eprintln!(
            "  {} {} packages against {} rules ({})",
            "→".cyan(),
            packages.len(),
            rule_set.len(),
            rule_set.precedence()
        );
    }

    let results = rule_set
        .evaluate_all(&packages)
        .context("rule set failed to produce a verdict")?;

    match cli.format {
        OutputFormat::Terminal => {
            report::terminal::render(&results, packages_path, cli.verbose, cli.quiet);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    if fails(&results, cli.fail_on.threshold()) {
        std::process::exit(1);
    }

    Ok(())
}

/// Directory searched for `.license-rules/config.toml`: the packages file's
/// parent, else the current directory.
fn policy_dir(packages: Option<&Path>) -> &Path {
    packages
        .and_then(Path::parent)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// `true` when any verdict is at least as severe as `threshold`.
fn fails(results: &[PackageVerdict], threshold: VerdictStatus) -> bool {
    results.iter().any(|r| r.status >= threshold)
}
