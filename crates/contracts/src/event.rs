//! ChatEvent - one parsed unit of ingested chat data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single chat message parsed from the protocol stream.
///
/// Immutable once created. Ownership moves through the pipeline
/// (queue -> accumulator -> sink); events are never aliased across stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Sender identifier, never empty
    pub origin: String,

    /// Message body, may be empty
    pub text: String,

    /// Wall-clock time assigned when the event was ingested
    pub occurred_at: DateTime<Utc>,
}

impl ChatEvent {
    /// Create an event stamped with the current time
    pub fn now(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            text: text.into(),
            occurred_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_now_stamps_current_time() {
        let before = Utc::now();
        let event = ChatEvent::now("alice", "hello");
        let after = Utc::now();

        assert_eq!(event.origin, "alice");
        assert_eq!(event.text, "hello");
        assert!(event.occurred_at >= before && event.occurred_at <= after);
    }

    #[test]
    fn event_roundtrips_through_json() {
        let event = ChatEvent::now("bob", "");
        let json = serde_json::to_string(&event).unwrap();
        let back: ChatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
