use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A package as seen by the rule evaluator: an opaque identifier plus the
/// licenses its own metadata declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    #[serde(default)]
    pub declared_licenses: BTreeSet<String>,
}

impl Package {
    pub fn new<I, S>(id: impl Into<String>, licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            declared_licenses: licenses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Deduplicated declared license identifiers, in sorted order.
    pub fn declared_licenses(&self) -> &BTreeSet<String> {
        &self.declared_licenses
    }
}

/// Compliance status, ordered by severity: `Allowed < NeedsReview < Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Allowed,
    NeedsReview,
    Rejected,
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictStatus::Allowed => write!(f, "allowed"),
            VerdictStatus::NeedsReview => write!(f, "needs review"),
            VerdictStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// The compliance decision produced for one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerdictStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Verdict {
    pub fn new(status: VerdictStatus, message: Option<String>) -> Self {
        Self { status, message }
    }

    pub fn allowed() -> Self {
        Self::new(VerdictStatus::Allowed, None)
    }

    pub fn needs_review(message: impl Into<String>) -> Self {
        Self::new(VerdictStatus::NeedsReview, Some(message.into()))
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(VerdictStatus::Rejected, Some(message.into()))
    }
}

/// One evaluated package, flattened for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct PackageVerdict {
    pub id: String,
    pub declared_licenses: BTreeSet<String>,
    pub rule: String,
    pub status: VerdictStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
