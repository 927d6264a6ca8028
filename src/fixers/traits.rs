use serde::{Deserialize, Serialize};

/// Outcome of trying to fix one issue against the current content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixAttempt {
    Applied { content: String, description: String },
    Skipped { reason: String },
}

impl FixAttempt {
    pub fn skipped(reason: impl Into<String>) -> Self {
        FixAttempt::Skipped {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixKind {
    /// A transform registered for the issue's rule id.
    PatternFix,
    /// A keyword-driven fallback for rules with no registered transform.
    GenericFix,
}

impl FixKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixKind::PatternFix => "pattern_fix",
            FixKind::GenericFix => "generic_fix",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFix {
    #[serde(rename = "type")]
    pub kind: FixKind,
    pub rule_id: String,
    pub description: String,
    pub line_number: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applied_fix_wire_format() {
        let fix = AppliedFix {
            kind: FixKind::PatternFix,
            rule_id: "ts-prefer-const".to_string(),
            description: "Applied pattern fix for ts-prefer-const".to_string(),
            line_number: 3,
        };
        let value = serde_json::to_value(&fix).unwrap();
        assert_eq!(value["type"], "pattern_fix");
        assert_eq!(value["rule_id"], "ts-prefer-const");
        assert_eq!(value["line_number"], 3);
    }
}
