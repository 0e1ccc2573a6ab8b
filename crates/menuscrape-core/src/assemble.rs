use std::path::PathBuf;

use crate::record::MenuRecord;
use crate::sink::{MenuSink, SinkError};

#[derive(Debug, Clone, PartialEq)]
pub struct Assembled {
    pub records: Vec<MenuRecord>,
    /// Set only when an artifact was written.
    pub saved_to: Option<PathBuf>,
}

/// Hands back `records` unchanged, persisting them first when `save` is set.
///
/// Nothing is written for an empty set.
///
/// # Errors
///
/// Returns [`SinkError::Unconfigured`] when saving a non-empty set without a
/// sink, or the sink's own error.
pub fn assemble(
    records: Vec<MenuRecord>,
    save: bool,
    sink: Option<&dyn MenuSink>,
) -> Result<Assembled, SinkError> {
    if !save || records.is_empty() {
        return Ok(Assembled {
            records,
            saved_to: None,
        });
    }

    let sink = sink.ok_or(SinkError::Unconfigured)?;
    let path = sink.save(&records)?;
    tracing::info!(path = %path.display(), records = records.len(), "menu saved");
    Ok(Assembled {
        records,
        saved_to: Some(path),
    })
}
