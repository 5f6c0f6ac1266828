//! Errors raised at the ingestion boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("malformed post at {location}: missing required field `{field}`")]
    MalformedPost {
        location: String,
        field: &'static str,
    },

    #[error("invalid analysis payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl IngestError {
    pub(crate) fn missing(list: &str, index: usize, field: &'static str) -> Self {
        IngestError::MalformedPost {
            location: format!("{list}[{index}]"),
            field,
        }
    }
}
