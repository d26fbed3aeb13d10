//! Error types for rule-set construction and evaluation.
//!
//! Configuration problems are caught when a [`RuleSet`](crate::rules::RuleSet)
//! is built, before any package is evaluated. Evaluation itself can only fail
//! when a rule list has no matching catch-all.

use thiserror::Error;

/// A rule set that cannot guarantee exactly one verdict per package.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// No rules were supplied.
    #[error("rule set is empty; at least a catch-all rule is required")]
    EmptyRuleSet,

    /// Two rules share the same name.
    #[error("duplicate rule name `{0}`")]
    DuplicateRule(String),

    /// The last rule does not match every package.
    #[error("last rule `{last}` is not a catch-all; some packages would receive no verdict")]
    MissingCatchAll { last: String },

    /// A catch-all appears before the end, so later rules can never run.
    #[error("catch-all rule `{rule}` at position {index} makes the rules after it unreachable")]
    UnreachableRules { rule: String, index: usize },

    /// A configured rule has no match criteria and is not a catch-all.
    #[error("rule `{0}` declares no match criteria")]
    NoCriteria(String),

    /// A configured regular expression does not compile.
    #[error("rule `{rule}` has an invalid pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure while evaluating a single package.
#[derive(Error, Debug)]
pub enum EvaluationError {
    /// No rule matched; the rule list lacks a working catch-all.
    #[error("no rule matched package `{package}`")]
    NoRuleMatched { package: String },
}
