//! Diagnostic types handed back to the host framework

use crate::edits::FixEdit;
use crate::source::SourcePos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning - potential issue
    #[default]
    Warning,
    /// Error - definite problem
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One finding produced by the rule.
///
/// The host's reporting pipeline owns formatting and display; this value
/// carries everything it needs: the call-site position, a human-readable
/// message, and the ordered edit list (possibly empty when the rewrite had
/// to be withheld).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule that produced the finding
    pub rule_id: String,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Call-site position of the macro invocation
    pub position: SourcePos,
    /// Ordered, non-overlapping edits performing the rewrite
    #[serde(default)]
    pub edits: Vec<FixEdit>,
}

impl Finding {
    /// Create a finding with no edits attached
    pub fn new(rule_id: &str, severity: Severity, message: &str, position: SourcePos) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: message.to_string(),
            position,
            edits: Vec::new(),
        }
    }

    /// Attach the edit list
    pub fn with_edits(mut self, edits: Vec<FixEdit>) -> Self {
        self.edits = edits;
        self
    }

    /// Whether a rewrite is attached
    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }
}

/// Result of checking one candidate statement.
///
/// Every disqualification path resolves to one of these three variants;
/// nothing in the rule panics or returns an error to the host. Detection
/// and rewrite-ability are independent guarantees, hence the distinct
/// with/without-edits variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The candidate is not an always-false assertion
    NoMatch,
    /// The candidate matched but no safe rewrite could be constructed
    MatchWithoutEdits(Finding),
    /// The candidate matched and a complete rewrite is attached
    MatchWithEdits(Finding),
}

impl Outcome {
    /// The finding, if the candidate matched
    pub fn finding(&self) -> Option<&Finding> {
        match self {
            Outcome::NoMatch => None,
            Outcome::MatchWithoutEdits(f) | Outcome::MatchWithEdits(f) => Some(f),
        }
    }

    /// Consume the outcome, yielding the finding if any
    pub fn into_finding(self) -> Option<Finding> {
        match self {
            Outcome::NoMatch => None,
            Outcome::MatchWithoutEdits(f) | Outcome::MatchWithEdits(f) => Some(f),
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Outcome::NoMatch)
    }

    /// Whether a complete rewrite is attached
    pub fn has_edits(&self) -> bool {
        matches!(self, Outcome::MatchWithEdits(_))
    }
}
