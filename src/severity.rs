use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Checkstyle severity, ordered `ignore < info < warning < error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ignore,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Ignore => "ignore",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Severity::Ignore),
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!(
                "unknown severity: {other} (expected: ignore, info, warning, error)"
            )),
        }
    }
}

/// Minimum-severity check: a finding with severity `other` passes a filter of
/// `base` iff this returns true. An unset `base` means "no filter" and an
/// unset `other` means "no upper bound"; both pass everything.
pub fn less_or_equal(base: Option<Severity>, other: Option<Severity>) -> bool {
    match (base, other) {
        (None, _) | (_, None) => true,
        (Some(base), Some(other)) => base <= other,
    }
}
