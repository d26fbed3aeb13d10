//! The built-in compliance rules, used when no policy file declares its own.
//!
//! Each rule is available on its own so it can be combined into custom rule
//! sets; [`reference_rule_set`] assembles all five in their canonical order.

use super::matcher::LicenseMatcher;
use super::{Rule, RuleSet};
use crate::error::ConfigurationError;
use crate::models::Verdict;

pub const PERMISSIVE_LICENSES: &[&str] = &[
    "MIT",
    "Apache-2.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "ISC",
    "Unlicense",
];

pub const COPYLEFT_LICENSES: &[&str] = &[
    "GPL-2.0-only",
    "GPL-2.0-or-later",
    "GPL-3.0-only",
    "GPL-3.0-or-later",
    "LGPL-2.1-only",
    "LGPL-2.1-or-later",
    "LGPL-3.0-only",
    "LGPL-3.0-or-later",
    "MPL-2.0",
    "EPL-1.0",
    "EPL-2.0",
];

pub const PROPRIETARY_LICENSES: &[&str] = &["Proprietary", "Commercial", "LicenseRef-proprietary"];

pub const PERMISSIVE_RULE: &str = "Allow permissive licenses";
pub const COPYLEFT_RULE: &str = "Flag copyleft licenses for review";
pub const PROPRIETARY_RULE: &str = "Reject proprietary licenses";
pub const UNKNOWN_RULE: &str = "Flag unknown licenses for review";
pub const DEFAULT_RULE: &str = "Default - needs review";

pub const COPYLEFT_MESSAGE: &str = "Contains copyleft license - requires legal review";
pub const PROPRIETARY_MESSAGE: &str = "Contains proprietary license - not allowed";
pub const UNKNOWN_MESSAGE: &str = "Contains unknown license - investigation required";
pub const DEFAULT_MESSAGE: &str = "No specific rule matched - manual review required";

pub fn permissive_allow_list() -> Rule {
    Rule::new(
        PERMISSIVE_RULE,
        LicenseMatcher::new().any_of(PERMISSIVE_LICENSES.iter().copied()),
        Verdict::allowed(),
    )
}

pub fn copyleft_review() -> Rule {
    Rule::new(
        COPYLEFT_RULE,
        LicenseMatcher::new().any_of(COPYLEFT_LICENSES.iter().copied()),
        Verdict::needs_review(COPYLEFT_MESSAGE),
    )
}

pub fn proprietary_rejection() -> Rule {
    Rule::new(
        PROPRIETARY_RULE,
        LicenseMatcher::new()
            .any_of(PROPRIETARY_LICENSES.iter().copied())
            .contains_ignore_case(["proprietary"]),
        Verdict::rejected(PROPRIETARY_MESSAGE),
    )
}

pub fn unknown_review() -> Rule {
    Rule::new(
        UNKNOWN_RULE,
        LicenseMatcher::new()
            .any_of(["NOASSERTION"])
            .prefixes(["LicenseRef-unknown"]),
        Verdict::needs_review(UNKNOWN_MESSAGE),
    )
}

pub fn default_review() -> Rule {
    Rule::catch_all(DEFAULT_RULE, Verdict::needs_review(DEFAULT_MESSAGE))
}

pub fn reference_rules() -> Vec<Rule> {
    vec![
        permissive_allow_list(),
        copyleft_review(),
        proprietary_rejection(),
        unknown_review(),
        default_review(),
    ]
}

pub fn reference_rule_set() -> Result<RuleSet, ConfigurationError> {
    RuleSet::new(reference_rules())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Package, VerdictStatus};

    fn verdict_for(licenses: &[&str]) -> Verdict {
        let set = reference_rule_set().unwrap();
        set.evaluate(&Package::new("pkg", licenses.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_mit_allowed_without_message() {
        assert_eq!(verdict_for(&["MIT"]), Verdict::allowed());
    }

    #[test]
    fn test_permissive_precedes_copyleft() {
        assert_eq!(verdict_for(&["MIT", "GPL-3.0-only"]), Verdict::allowed());
    }

    #[test]
    fn test_copyleft_needs_review() {
        assert_eq!(
            verdict_for(&["GPL-2.0-only"]),
            Verdict::needs_review(COPYLEFT_MESSAGE)
        );
        assert_eq!(
            verdict_for(&["EPL-2.0"]).status,
            VerdictStatus::NeedsReview
        );
    }

    #[test]
    fn test_deprecated_gpl_ids_fall_to_default() {
        for id in ["GPL-2.0", "GPL-3.0", "LGPL-2.1", "LGPL-3.0"] {
            let set = reference_rule_set().unwrap();
            let decision = set.decide(&Package::new("p", [id])).unwrap();
            assert_eq!(decision.rule, DEFAULT_RULE, "{id}");
            assert_eq!(decision.verdict.message.as_deref(), Some(DEFAULT_MESSAGE));
        }
    }

    #[test]
    fn test_rule_names_in_order() {
        let names: Vec<String> = reference_rules()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(
            names,
            [PERMISSIVE_RULE, COPYLEFT_RULE, PROPRIETARY_RULE, UNKNOWN_RULE, DEFAULT_RULE]
        );
    }

    #[test]
    fn test_commercial_rejected() {
        assert_eq!(
            verdict_for(&["Commercial"]),
            Verdict::rejected(PROPRIETARY_MESSAGE)
        );
    }

    #[test]
    fn test_proprietary_substring_rejected() {
        assert_eq!(
            verdict_for(&["ACME-Proprietary-EULA"]).status,
            VerdictStatus::Rejected
        );
    }

    #[test]
    fn test_copyleft_precedes_proprietary() {
        assert_eq!(
            verdict_for(&["LGPL-2.1-only", "Proprietary"]),
            Verdict::needs_review(COPYLEFT_MESSAGE)
        );
    }

    #[test]
    fn test_unknown_prefix_needs_investigation() {
        assert_eq!(
            verdict_for(&["LicenseRef-unknown-xyz"]),
            Verdict::needs_review(UNKNOWN_MESSAGE)
        );
        assert_eq!(
            verdict_for(&["NOASSERTION"]),
            Verdict::needs_review(UNKNOWN_MESSAGE)
        );
    }

    #[test]
    fn test_unmatched_license_falls_to_default() {
        assert_eq!(
            verdict_for(&["WTFPL"]),
            Verdict::needs_review(DEFAULT_MESSAGE)
        );
        assert_eq!(verdict_for(&[]), Verdict::needs_review(DEFAULT_MESSAGE));
    }

    #[test]
    fn test_rules_are_usable_individually() {
        let rule = proprietary_rejection();
        assert!(rule.matches(&Package::new("p", ["LicenseRef-proprietary"])));
        assert!(!rule.matches(&Package::new("p", ["MIT"])));
        assert!(default_review().is_catch_all());
    }
}
