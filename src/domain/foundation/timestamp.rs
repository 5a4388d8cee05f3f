//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_ordered() {
        let earlier = Timestamp::now();
        let later = Timestamp::now();
        assert!(earlier <= later);
    }

    #[test]
    fn timestamp_serializes_to_rfc3339() {
        let ts = Timestamp::now();
        let json = serde_json::to_string(&ts).unwrap();
        let parsed: DateTime<Utc> = serde_json::from_str(&json).unwrap();
        assert_eq!(Timestamp(parsed), ts);
        assert!(json.contains('T') && json.ends_with("Z\""));
    }
}
