//! Symptom categories a user can pick when the robot misbehaves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A diagnosable malfunction category.
///
/// The unselected state is modeled as `Option<Symptom>::None` rather than a
/// variant, so every `Symptom` value always has an advice bundle.
///
/// # Examples
///
/// ```
/// use block_doctor_core::Symptom;
///
/// let symptom: Symptom = "not-starting".parse().unwrap();
/// assert_eq!(symptom, Symptom::NotStarting);
/// assert_eq!(symptom.to_string(), "not-starting");
/// assert!("wheels".parse::<Symptom>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Symptom {
    /// Motor does not spin or spins too weakly.
    Motor,
    /// Robot drives the wrong way or turns in place.
    Direction,
    /// Program does not start running.
    NotStarting,
    /// Program does not stop.
    Stop,
    /// Sensor readings do not react.
    Sensor,
    /// Anything else; handled by free-text remote advice.
    Other,
}

impl Symptom {
    /// Every symptom in picker order.
    pub const ALL: [Symptom; 6] = [
        Symptom::Motor,
        Symptom::Direction,
        Symptom::NotStarting,
        Symptom::Stop,
        Symptom::Sensor,
        Symptom::Other,
    ];

    /// Wire name of this symptom.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Motor => "motor",
            Self::Direction => "direction",
            Self::NotStarting => "not-starting",
            Self::Stop => "stop",
            Self::Sensor => "sensor",
            Self::Other => "other",
        }
    }

    /// Returns `true` for symptoms that skip the built-in rules and go
    /// straight to free-text remote advice.
    pub fn routes_to_remote(self) -> bool {
        matches!(self, Self::Other)
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Symptom`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown symptom: {0}")]
pub struct ParseSymptomError(pub String);

impl FromStr for Symptom {
    type Err = ParseSymptomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|symptom| symptom.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseSymptomError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_display_matches_serde() {
        for symptom in Symptom::ALL {
            let json = serde_json::to_string(&symptom).unwrap();
            assert_eq!(json, format!("\"{symptom}\""));
            let back: Symptom = serde_json::from_str(&json).unwrap();
            assert_eq!(back, symptom);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(" MOTOR ".parse::<Symptom>(), Ok(Symptom::Motor));
        assert_eq!("Not-Starting".parse::<Symptom>(), Ok(Symptom::NotStarting));
    }

    #[test]
    fn test_parse_rejects_empty_and_unknown() {
        assert_eq!(
            "".parse::<Symptom>(),
            Err(ParseSymptomError(String::new()))
        );
        let err = "battery".parse::<Symptom>().unwrap_err();
        assert_eq!(err.to_string(), "unknown symptom: battery");
    }

    #[test]
    fn test_only_other_routes_to_remote() {
        let remote: Vec<_> = Symptom::ALL
            .into_iter()
            .filter(|s| s.routes_to_remote())
            .collect();
        assert_eq!(remote, vec![Symptom::Other]);
    }
}
