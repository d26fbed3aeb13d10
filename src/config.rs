use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::error::ConfigurationError;
use crate::models::{Verdict, VerdictStatus};
use crate::rules::matcher::LicenseMatcher;
use crate::rules::reference::reference_rules;
use crate::rules::{Precedence, Rule, RuleSet};

/// Root configuration structure, deserialized from `.license-rules/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Compliance rules and how they combine.
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct PolicyConfig {
    /// Defaults to `first-match`.
    #[serde(default)]
    pub precedence: Precedence,
    /// Ordered rules; the last one must set `always = true`.
    /// When empty, the built-in reference rules apply.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// One rule as declared in the policy file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub name: String,
    pub status: VerdictStatus,
    #[serde(default)]
    pub message: Option<String>,
    /// Exact license identifiers.
    #[serde(default)]
    pub any_of: Vec<String>,
    #[serde(default)]
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub contains_ignore_case: Vec<String>,
    /// Regular expressions tested against each declared license.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Match every package (catch-all).
    #[serde(default)]
    pub always: bool,
}

impl RuleConfig {
    /// Build the runtime [`Rule`], compiling patterns.
    pub fn to_rule(&self) -> Result<Rule, ConfigurationError> {
        let patterns = self
            .patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ConfigurationError::InvalidPattern {
                rule: self.name.clone(),
                source,
            })?;

        let mut matcher = LicenseMatcher::new()
            .any_of(self.any_of.iter().cloned())
            .prefixes(self.prefixes.iter().cloned())
            .contains_ignore_case(self.contains_ignore_case.iter().cloned())
            .patterns(patterns);
        if self.always {
            matcher = matcher.always();
        }
        if matcher.is_empty() {
            return Err(ConfigurationError::NoCriteria(self.name.clone()));
        }

        let verdict = Verdict::new(self.status, self.message.clone());
        Ok(Rule::new(self.name.clone(), matcher, verdict))
    }
}

impl Config {
    /// Build and validate the effective rule set.
    pub fn rule_set(&self) -> Result<RuleSet, ConfigurationError> {
        let rules = if self.policy.rules.is_empty() {
            reference_rules()
        } else {
            self.policy
                .rules
                .iter()
                .map(RuleConfig::to_rule)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(RuleSet::new(rules)?.with_precedence(self.policy.precedence))
    }
}

/// Load the policy configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.license-rules/config.toml`
/// 3. `~/.config/license-rules/config.toml`
/// 4. Built-in [`Config::default`] (reference rules, first match)
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".license-rules").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("license-rules")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    tracing::debug!("no policy file found, using reference rules");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading policy file {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("parsing policy file {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        rules = config.policy.rules.len(),
        "loaded policy file"
    );
    Ok(config)
}
