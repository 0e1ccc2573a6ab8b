/// No embedding convention yielded a structurally valid payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "no menu payload found (tried: {}; rejected {candidates_rejected} candidate(s))",
    .conventions_tried.join(", ")
)]
pub struct NotFoundError {
    pub conventions_tried: Vec<&'static str>,
    pub candidates_rejected: usize,
}

/// Why one schema variant did not accept a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct VariantMismatch(pub String);

impl VariantMismatch {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// The payload matched none of the known schema variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("payload matches no known menu schema ({})", format_attempts(.attempted))]
pub struct SchemaError {
    /// Every variant tried, in order, with its mismatch reason.
    pub attempted: Vec<(&'static str, VariantMismatch)>,
}

fn format_attempts(attempted: &[(&'static str, VariantMismatch)]) -> String {
    if attempted.is_empty() {
        return "no variants registered".to_owned();
    }
    attempted
        .iter()
        .map(|(name, reason)| format!("{name}: {reason}"))
        .collect::<Vec<_>>()
        .join("; ")
}
