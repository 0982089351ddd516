//! Journey types.
//!
//! A `Journey` is one complete itinerary from origin to destination,
//! made of one or more train legs.

use serde::Serialize;

use super::identity::journey_identity;
use super::time::RailInstant;
use super::{DomainError, Leg, Station};

/// Currency Korail fares are quoted in.
pub const CURRENCY: &str = "KRW";

/// A fare for a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Price {
    pub amount: u64,
    pub currency: &'static str,
}

impl Price {
    /// A fare in won.
    pub fn krw(amount: u64) -> Self {
        Self {
            amount,
            currency: CURRENCY,
        }
    }
}

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - At least one leg
/// - `id` is derived from the ordered legs' identity fields, so two
///   journeys built from the same itinerary always compare equal by id
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "journey")]
pub struct Journey {
    id: String,
    legs: Vec<Leg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Price>,
}

impl Journey {
    /// Constructs a journey from its legs in travel order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty.
    pub fn new(legs: Vec<Leg>, price: Option<Price>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyJourney);
        }
        let id = journey_identity(legs.iter().map(Leg::key));
        Ok(Journey { id, legs, price })
    }

    /// Returns the journey's identity hash.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns the fare, if Korail quoted one.
    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref()
    }

    fn first_leg(&self) -> &Leg {
        // Safe: validated non-empty at construction
        &self.legs[0]
    }

    fn last_leg(&self) -> &Leg {
        &self.legs[self.legs.len() - 1]
    }

    /// Returns the origin station.
    pub fn origin(&self) -> &Station {
        self.first_leg().origin()
    }

    /// Returns the destination station.
    pub fn destination(&self) -> &Station {
        self.last_leg().destination()
    }

    /// Returns the departure time (from first leg).
    pub fn departure(&self) -> RailInstant {
        self.first_leg().departure()
    }

    /// Returns the arrival time (from last leg).
    pub fn arrival(&self) -> RailInstant {
        self.last_leg().arrival()
    }

    /// Returns the number of changes (legs - 1).
    pub fn transfers(&self) -> usize {
        self.legs.len() - 1
    }

    /// Returns true if this is a direct journey (no changes).
    pub fn is_direct(&self) -> bool {
        self.legs.len() == 1
    }
}
