//! Ordered rule evaluation.
//!
//! A [`Rule`] pairs a [`Predicate`] with an [`Action`]. Rules run in
//! declaration order against one [`Package`] at a time; the first rule whose
//! predicate matches produces the [`Verdict`] and evaluation stops.
//!
//! - [`matcher`] — data-driven predicate over declared license identifiers.
//! - [`reference`] — the five built-in compliance rules.

pub mod matcher;
pub mod reference;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, EvaluationError};
use crate::models::{Package, PackageVerdict, Verdict, VerdictStatus};

/// Decides whether a rule applies to a package.
pub trait Predicate: Send + Sync {
    fn matches(&self, package: &Package) -> bool;

    /// `true` only for predicates that match every package.
    fn is_catch_all(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        "custom predicate".to_string()
    }
}

impl<F> Predicate for F
where
    F: Fn(&Package) -> bool + Send + Sync,
{
    fn matches(&self, package: &Package) -> bool {
        self(package)
    }
}

/// Predicate that matches every package.
#[derive(Debug, Clone, Copy, Default)]
pub struct Always;

impl Predicate for Always {
    fn matches(&self, _package: &Package) -> bool {
        true
    }

    fn is_catch_all(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "always".to_string()
    }
}

/// Produces the verdict for a package whose rule matched.
pub trait Action: Send + Sync {
    fn apply(&self, package: &Package) -> Verdict;

    fn describe(&self) -> String {
        "custom action".to_string()
    }
}

impl<F> Action for F
where
    F: Fn(&Package) -> Verdict + Send + Sync,
{
    fn apply(&self, package: &Package) -> Verdict {
        self(package)
    }
}

/// A fixed verdict is the most common action.
impl Action for Verdict {
    fn apply(&self, _package: &Package) -> Verdict {
        self.clone()
    }

    fn describe(&self) -> String {
        match &self.message {
            Some(message) => format!("{}: {}", self.status, message),
            None => self.status.to_string(),
        }
    }
}

/// A named predicate/action pair.
pub struct Rule {
    name: String,
    predicate: Box<dyn Predicate>,
    action: Box<dyn Action>,
}

impl Rule {
    pub fn new<P, A>(name: impl Into<String>, predicate: P, action: A) -> Self
    where
        P: Predicate + 'static,
        A: Action + 'static,
    {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
            action: Box::new(action),
        }
    }

    /// A rule that matches every package; must be last in a [`RuleSet`].
    pub fn catch_all<A>(name: impl Into<String>, action: A) -> Self
    where
        A: Action + 'static,
    {
        Self::new(name, Always, action)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, package: &Package) -> bool {
        self.predicate.matches(package)
    }

    pub fn is_catch_all(&self) -> bool {
        self.predicate.is_catch_all()
    }

    pub fn apply(&self, package: &Package) -> Verdict {
        self.action.apply(package)
    }

    pub fn describe_predicate(&self) -> String {
        self.predicate.describe()
    }

    pub fn describe_action(&self) -> String {
        self.action.describe()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("predicate", &self.predicate.describe())
            .field("action", &self.action.describe())
            .finish()
    }
}

/// How a verdict is chosen when several rules match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Precedence {
    /// The earliest matching rule wins.
    #[default]
    FirstMatch,
    /// The most severe verdict among matching rules wins; declaration order
    /// breaks ties and the catch-all applies only when nothing else matched.
    MostSevere,
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precedence::FirstMatch => write!(f, "first-match"),
            Precedence::MostSevere => write!(f, "most-severe"),
        }
    }
}

/// The verdict for a package together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision<'a> {
    pub rule: &'a str,
    pub verdict: Verdict,
}

/// A validated, immutable list of rules ending in a catch-all.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
    precedence: Precedence,
}

impl RuleSet {
    /// Validate `rules` so that every package receives exactly one verdict.
    pub fn new(rules: Vec<Rule>) -> Result<Self, ConfigurationError> {
        if rules.is_empty() {
            return Err(ConfigurationError::EmptyRuleSet);
        }

        let mut seen = HashSet::new();
        for (index, rule) in rules.iter().enumerate() {
            if !seen.insert(rule.name()) {
                return Err(ConfigurationError::DuplicateRule(rule.name().to_string()));
            }
            if rule.is_catch_all() && index + 1 < rules.len() {
                return Err(ConfigurationError::UnreachableRules {
                    rule: rule.name().to_string(),
                    index,
                });
            }
        }

        if let Some(last) = rules.last().filter(|r| !r.is_catch_all()) {
            return Err(ConfigurationError::MissingCatchAll {
                last: last.name().to_string(),
            });
        }

        tracing::debug!(rules = rules.len(), "rule set validated");
        Ok(Self {
            rules,
            precedence: Precedence::FirstMatch,
        })
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate `package` and report which rule decided it.
    pub fn decide(&self, package: &Package) -> Result<Decision<'_>, EvaluationError> {
        let decision = match self.precedence {
            Precedence::FirstMatch => first_match(package, &self.rules),
            Precedence::MostSevere => most_severe(package, &self.rules),
        }?;

        tracing::debug!(
            package = %package.id(),
            rule = decision.rule,
            status = %decision.verdict.status,
            "rule matched"
        );
        Ok(decision)
    }

    pub fn evaluate(&self, package: &Package) -> Result<Verdict, EvaluationError> {
        self.decide(package).map(|d| d.verdict)
    }

    /// Evaluate every package, stopping at the first integrity failure.
    pub fn evaluate_all(&self, packages: &[Package]) -> Result<Vec<PackageVerdict>, EvaluationError> {
        packages
            .iter()
            .map(|package| {
                let Decision { rule, verdict } = self.decide(package)?;
                Ok(PackageVerdict {
                    id: package.id().to_string(),
                    declared_licenses: package.declared_licenses().clone(),
                    rule: rule.to_string(),
                    status: verdict.status,
                    message: verdict.message,
                })
            })
            .collect()
    }
}

/// Evaluate `package` against an unvalidated rule list, first match wins.
///
/// Fails with [`EvaluationError::NoRuleMatched`] when the list has no
/// matching rule; prefer [`RuleSet`], which rejects such lists up front.
pub fn evaluate(package: &Package, rules: &[Rule]) -> Result<Verdict, EvaluationError> {
    first_match(package, rules).map(|d| d.verdict)
}

fn first_match<'a>(package: &Package, rules: &'a [Rule]) -> Result<Decision<'a>, EvaluationError> {
    rules
        .iter()
        .find(|rule| rule.matches(package))
        .map(|rule| Decision {
            rule: rule.name(),
            verdict: rule.apply(package),
        })
        .ok_or_else(|| EvaluationError::NoRuleMatched {
            package: package.id().to_string(),
        })
}

fn most_severe<'a>(package: &Package, rules: &'a [Rule]) -> Result<Decision<'a>, EvaluationError> {
    let mut best: Option<Decision<'a>> = None;

    for rule in rules.iter().filter(|r| !r.is_catch_all()) {
        if !rule.matches(package) {
            continue;
        }
        let verdict = rule.apply(package);
        // Strictly greater keeps the earlier rule on ties.
        if best.as_ref().map_or(true, |b| verdict.status > b.verdict.status) {
            let rejected = verdict.status == VerdictStatus::Rejected;
            best = Some(Decision {
                rule: rule.name(),
                verdict,
            });
            if rejected {
                break;
            }
        }
    }

    match best {
        Some(decision) => Ok(decision),
        None => first_match(package, rules),
    }
}
