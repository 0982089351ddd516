//! Domain error types.
//!
//! These errors represent invariant violations when building domain
//! values. They are distinct from API/IO errors.

use super::InvalidTripId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A leg arrives before it departs
    #[error("invalid leg: arrival {arrival} is before departure {departure}")]
    ArrivalBeforeDeparture { departure: String, arrival: String },

    /// The trip id derived from a leg is invalid
    #[error(transparent)]
    InvalidTripId(#[from] InvalidTripId),

    /// Journey has no legs
    #[error("journey must have at least one leg")]
    EmptyJourney,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyJourney;
        assert_eq!(err.to_string(), "journey must have at least one leg");

        let err = DomainError::ArrivalBeforeDeparture {
            departure: "10:00".into(),
            arrival: "09:00".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid leg: arrival 09:00 is before departure 10:00"
        );
    }
}
