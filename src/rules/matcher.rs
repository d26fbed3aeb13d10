use std::collections::BTreeSet;

use regex::Regex;

use super::Predicate;
use crate::models::Package;

/// Matches a package when any declared license meets any configured criterion.
#[derive(Debug, Clone, Default)]
pub struct LicenseMatcher {
    any_of: BTreeSet<String>,
    prefixes: Vec<String>,
    /// Stored lowercased.
    contains_ignore_case: Vec<String>,
    patterns: Vec<Regex>,
    always: bool,
}

impl LicenseMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact license identifiers.
    pub fn any_of<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.any_of.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes.extend(prefixes.into_iter().map(Into::into));
        self
    }

    pub fn contains_ignore_case<I, S>(mut self, needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contains_ignore_case
            .extend(needles.into_iter().map(|n| n.into().to_lowercase()));
        self
    }

    pub fn patterns<I>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = Regex>,
    {
        self.patterns.extend(patterns);
        self
    }

    /// Turn this matcher into a catch-all.
    pub fn always(mut self) -> Self {
        self.always = true;
        self
    }

    /// `true` when no criterion is set and the matcher is not a catch-all,
    /// i.e. it can never match.
    pub fn is_empty(&self) -> bool {
        !self.always
            && self.any_of.is_empty()
            && self.prefixes.is_empty()
            && self.contains_ignore_case.is_empty()
            && self.patterns.is_empty()
    }

    /// Test a single license identifier against the criteria.
    pub fn matches_license(&self, license: &str) -> bool {
        if self.any_of.contains(license) {
            return true;
        }
        if self.prefixes.iter().any(|p| license.starts_with(p.as_str())) {
            return true;
        }
        if !self.contains_ignore_case.is_empty() {
            let lower = license.to_lowercase();
            if self
                .contains_ignore_case
                .iter()
                .any(|needle| lower.contains(needle.as_str()))
            {
                return true;
            }
        }
        self.patterns.iter().any(|re| re.is_match(license))
    }
}

impl Predicate for LicenseMatcher {
    fn matches(&self, package: &Package) -> bool {
        self.always
            || package
                .declared_licenses()
                .iter()
                .any(|license| self.matches_license(license))
    }

    fn is_catch_all(&self) -> bool {
        self.always
    }

    fn describe(&self) -> String {
        if self.always {
            return "always".to_string();
        }

        let mut parts = Vec::new();
        if !self.any_of.is_empty() {
            let ids: Vec<&str> = self.any_of.iter().map(String::as_str).collect();
            parts.push(format!("any of [{}]", ids.join(", ")));
        }
        if !self.prefixes.is_empty() {
            parts.push(format!("prefix [{}]", self.prefixes.join(", ")));
        }
        if !self.contains_ignore_case.is_empty() {
            parts.push(format!(
                "contains (ignore case) [{}]",
                self.contains_ignore_case.join(", ")
            ));
        }
        if !self.patterns.is_empty() {
            let res: Vec<&str> = self.patterns.iter().map(Regex::as_str).collect();
            parts.push(format!("pattern [{}]", res.join(", ")));
        }
        if parts.is_empty() {
            "never".to_string()
        } else {
            parts.join(" or ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let m = LicenseMatcher::new().any_of(["MIT", "ISC"]);
        assert!(m.matches(&Package::new("a", ["ISC"])));
        assert!(!m.matches(&Package::new("a", ["mit"])));
    }

    #[test]
    fn test_prefix_match() {
        let m = LicenseMatcher::new().prefixes(["LicenseRef-unknown"]);
        assert!(m.matches_license("LicenseRef-unknown-xyz"));
        assert!(m.matches_license("LicenseRef-unknown"));
        assert!(!m.matches_license("LicenseRef-Unknown-xyz"));
    }

    #[test]
    fn test_contains_ignore_case() {
        let m = LicenseMatcher::new().contains_ignore_case(["Proprietary"]);
        assert!(m.matches_license("ACME-PROPRIETARY-EULA"));
        assert!(m.matches_license("LicenseRef-proprietary-1"));
        assert!(!m.matches_license("MIT"));
    }

    #[test]
    fn test_pattern_match() {
        let m = LicenseMatcher::new().patterns([Regex::new(r"^GPL-[23]\.0").unwrap()]);
        assert!(m.matches_license("GPL-2.0-or-later"));
        assert!(!m.matches_license("LGPL-2.1-only"));
    }

    #[test]
    fn test_empty_licenses_only_match_always() {
        let pkg = Package::new("empty", Vec::<String>::new());
        assert!(!LicenseMatcher::new().any_of(["MIT"]).matches(&pkg));
        assert!(LicenseMatcher::new().always().matches(&pkg));
    }

    #[test]
    fn test_is_empty() {
        assert!(LicenseMatcher::new().is_empty());
        assert!(!LicenseMatcher::new().always().is_empty());
        assert!(!LicenseMatcher::new().prefixes(["x"]).is_empty());
    }

    #[test]
    fn test_describe() {
        let m = LicenseMatcher::new()
            .any_of(["NOASSERTION"])
            .prefixes(["LicenseRef-unknown"]);
        assert_eq!(
            m.describe(),
            "any of [NOASSERTION] or prefix [LicenseRef-unknown]"
        );
    }
}
