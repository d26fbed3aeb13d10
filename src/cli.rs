use std::path::PathBuf;

use clap::Parser;

use license_rules::models::VerdictStatus;
use license_rules::rules::Precedence;

#[derive(Parser, Debug)]
#[command(
    name = "license-rules",
    about = "Evaluate declared package licenses against compliance rules",
    version
)]
pub struct Cli {
    /// Packages file (JSON array or TOML `[[package]]` list)
    #[arg(required_unless_present = "list_rules")]
    pub packages: Option<PathBuf>,

    /// Policy config file [default: .license-rules/config.toml in the packages file's directory (cwd when no packages file is given), fallback ~/.config/license-rules/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Override the policy's rule precedence
    #[arg(long, value_name = "MODE")]
    pub precedence: Option<PrecedenceArg>,

    /// Lowest verdict that makes the run exit with code 1
    #[arg(long, default_value = "rejected", value_name = "LEVEL")]
    pub fail_on: FailOn,

    /// Print the effective rule set and exit
    #[arg(long)]
    pub list_rules: bool,

    /// Show all packages (not just review/rejected)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum PrecedenceArg {
    FirstMatch,
    MostSevere,
}

impl From<&PrecedenceArg> for Precedence {
    fn from(arg: &PrecedenceArg) -> Self {
        match arg {
            PrecedenceArg::FirstMatch => Precedence::FirstMatch,
            PrecedenceArg::MostSevere => Precedence::MostSevere,
        }
    }
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum FailOn {
    Rejected,
    Review,
}

impl FailOn {
    pub fn threshold(&self) -> VerdictStatus {
        match self {
            FailOn::Rejected => VerdictStatus::Rejected,
            FailOn::Review => VerdictStatus::NeedsReview,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packages_required_without_list_rules() {
        assert!(Cli::try_parse_from(["license-rules"]).is_err());
        assert!(Cli::try_parse_from(["license-rules", "--list-rules"]).is_ok());
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "license-rules",
            "packages.json",
            "--format",
            "json",
            "--precedence",
            "most-severe",
            "--fail-on",
            "review",
        ])
        .unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(
            cli.precedence.as_ref().map(Precedence::from),
            Some(Precedence::MostSevere)
        );
        assert_eq!(cli.fail_on.threshold(), VerdictStatus::NeedsReview);
    }
}
