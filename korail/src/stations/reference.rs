//! Caller-supplied station references.

use serde_json::Value;

use crate::domain::{Station, StationId};

use super::error::StationError;

/// A reference to a station: either a bare code or anything carrying an id.
///
/// Building a reference never fails for typed inputs; an empty code is
/// rejected when the reference is resolved. Untyped JSON input goes
/// through `TryFrom<&Value>`, which accepts a string or an object whose
/// `id` is a string.
///
/// # Examples
///
/// ```
/// use korail::stations::StationRef;
///
/// let by_code = StationRef::from("0001");
/// let by_object = StationRef::try_from(&serde_json::json!({"id": "0020"})).unwrap();
/// assert_eq!(by_code.id(), "0001");
/// assert_eq!(by_object.id(), "0020");
///
/// assert!(StationRef::try_from(&serde_json::json!(42)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationRef {
    id: String,
}

impl StationRef {
    /// The referenced code, as given.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Validate the referenced code.
    pub fn station_id(&self) -> Result<StationId, StationError> {
        StationId::parse(&self.id).map_err(|e| StationError::invalid(e.to_string()))
    }
}

impl From<&str> for StationRef {
    fn from(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl From<String> for StationRef {
    fn from(id: String) -> Self {
        Self { id }
    }
}

impl From<&StationId> for StationRef {
    fn from(id: &StationId) -> Self {
        Self {
            id: id.as_str().to_string(),
        }
    }
}

impl From<&Station> for StationRef {
    fn from(station: &Station) -> Self {
        Self::from(&station.id)
    }
}

impl TryFrom<&Value> for StationRef {
    type Error = StationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(id) => Ok(Self::from(id.as_str())),
            Value::Object(fields) => match fields.get("id") {
                Some(Value::String(id)) => Ok(Self::from(id.as_str())),
                Some(other) => Err(StationError::invalid(format!(
                    "station id must be a string, got {other}"
                ))),
                None => Err(StationError::invalid("object has no id")),
            },
            other => Err(StationError::invalid(format!(
                "expected a station code or an object with an id, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_string_and_object() {
        let a = StationRef::try_from(&json!("0001")).unwrap();
        let b = StationRef::try_from(&json!({"id": "0001", "name": "서울"})).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_non_references() {
        for value in [json!(null), json!(1), json!(["0001"]), json!({"name": "서울"}), json!({"id": 1})] {
            assert!(
                matches!(
                    StationRef::try_from(&value),
                    Err(StationError::InvalidReference { .. })
                ),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn empty_code_fails_validation() {
        let r = StationRef::from("  ");
        assert!(matches!(
            r.station_id(),
            Err(StationError::InvalidReference { .. })
        ));
    }

    #[test]
    fn validated_code_is_trimmed() {
        let r = StationRef::from(" 0020 ".to_string());
        assert_eq!(r.station_id().unwrap().as_str(), "0020");
    }
}
