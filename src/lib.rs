//! `license-rules` — evaluate a package's declared licenses against an ordered
//! compliance rule set.
//!
//! Every package runs through the rules of a [`RuleSet`] in declaration order;
//! the first rule whose predicate matches supplies the [`Verdict`]. A rule set
//! is validated when built, so evaluation always yields exactly one verdict.
//!
//! ```
//! use license_rules::{reference_rule_set, Package, VerdictStatus};
//!
//! let rules = reference_rule_set().unwrap();
//! let verdict = rules.evaluate(&Package::new("crate:serde", ["MIT", "Apache-2.0"])).unwrap();
//! assert_eq!(verdict.status, VerdictStatus::Allowed);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod report;
pub mod rules;

pub use error::{ConfigurationError, EvaluationError};
pub use models::{Package, PackageVerdict, Verdict, VerdictStatus};
pub use rules::matcher::LicenseMatcher;
pub use rules::reference::{reference_rule_set, reference_rules};
pub use rules::{evaluate, Action, Always, Decision, Precedence, Predicate, Rule, RuleSet};
