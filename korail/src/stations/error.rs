//! Station directory error types.

use crate::api::KorailError;

/// Errors from resolving station references.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// The reference is neither a station code nor an object with an `id`
    #[error("invalid station reference: {reason}")]
    InvalidReference { reason: String },

    /// No loaded station has this code
    #[error("unknown station: {id}")]
    UnknownStation { id: String },

    /// Fetching the station list failed
    #[error("failed to load stations: {0}")]
    Api(#[from] KorailError),
}

impl StationError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        StationError::InvalidReference {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StationError::UnknownStation { id: "9999".into() };
        assert_eq!(err.to_string(), "unknown station: 9999");

        let err = StationError::invalid("expected a string or an object with an id");
        assert_eq!(
            err.to_string(),
            "invalid station reference: expected a string or an object with an id"
        );
    }
}
