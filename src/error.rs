use thiserror::Error;

/// Raised while registering rules or suggestion templates. Analysis and
/// fixing never fail; a bad registration is an authoring mistake and is
/// reported immediately.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("{kind} is missing required fields: {}", .missing.join(", "))]
    MissingFields {
        kind: &'static str,
        missing: Vec<&'static str>,
    },

    #[error("rule {rule_id} has an invalid pattern: {source}")]
    InvalidPattern {
        rule_id: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule {rule_id} has an invalid {field}: {value}")]
    InvalidField {
        rule_id: String,
        field: &'static str,
        value: String,
    },
}
