//! Event: a record of a change to the current layout snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, EventId};

/// UTC timestamp attached to every event.
pub type Timestamp = DateTime<Utc>;

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A new layout replaced the current snapshot.
    LayoutLoaded { rooms: usize, devices: usize },
    /// A field-level edit was applied to one device.
    DeviceUpdated { device_id: DeviceId },
    /// A command matched and its changes were published.
    CommandApplied {
        utterance: String,
        changed: Vec<DeviceId>,
    },
    /// A command matched nothing; the snapshot was kept.
    CommandIgnored { utterance: String },
}

/// A timestamped [`EventKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: EventId::new(),
            timestamp: Utc::now(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_stamp_event_with_current_time() {
        let before = Utc::now();
        let event = Event::new(EventKind::CommandIgnored {
            utterance: "hello".to_string(),
        });
        assert!(event.timestamp >= before);
        assert!(event.timestamp <= Utc::now());
    }

    #[test]
    fn should_serialize_kind_as_tagged_object() {
        let event = Event::new(EventKind::DeviceUpdated {
            device_id: DeviceId::from("lr-1"),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "device_updated");
        assert_eq!(json["device_id"], "lr-1");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let event = Event::new(EventKind::CommandApplied {
            utterance: "turn on kitchen switch".to_string(),
            changed: vec![DeviceId::from("k-1")],
        });
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
