//! Command interpreter: maps a free-text utterance onto device changes.
//!
//! Matching is deliberately simple: a device is targeted when the
//! lowercased utterance contains `"<room name> <device name>"` verbatim,
//! and each targeted device is then run through the ordered [`rules::RULES`].
//! Nothing here fails; an utterance that changes nothing is reported as
//! unmatched.

pub mod rules;

use crate::device::{Device, DeviceChanges};
use crate::id::DeviceId;
use crate::layout::HomeLayout;
use crate::room::Room;

use self::rules::RULES;

/// A normalized utterance. Only case is folded; punctuation and whitespace
/// are kept as spoken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command(String);

impl Command {
    #[must_use]
    pub fn new(utterance: &str) -> Self {
        Self(utterance.to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the utterance names `device` in `room`.
    #[must_use]
    pub fn targets(&self, room: &Room, device: &Device) -> bool {
        self.0.contains(&device_identifier(room, device))
    }
}

/// Matching key for a device: `"<room name> <device name>"`, lowercased.
#[must_use]
pub fn device_identifier(room: &Room, device: &Device) -> String {
    format!("{} {}", room.name, device.name).to_lowercase()
}

/// Outcome of interpreting one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    /// The layout after every fired rule was applied. Equal to the input
    /// when nothing matched.
    pub layout: HomeLayout,
    /// Devices that received at least one change, in layout order.
    pub changed: Vec<DeviceId>,
}

impl Interpretation {
    /// Whether any device was changed. Callers should only publish
    /// [`layout`](Self::layout) when this is `true`.
    #[must_use]
    pub fn matched(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Interpret `utterance` against `layout`, producing a new layout.
#[must_use]
pub fn interpret(utterance: &str, layout: &HomeLayout) -> Interpretation {
    let command = Command::new(utterance);
    let mut changed = Vec::new();

    let rooms = layout
        .rooms
        .iter()
        .map(|room| Room {
            name: room.name.clone(),
            grid_position: room.grid_position,
            grid_span: room.grid_span,
            devices: room
                .devices
                .iter()
                .map(|device| match changes_for(&command, room, device) {
                    Some(changes) => {
                        changed.push(device.id.clone());
                        device.apply(&changes)
                    }
                    None => device.clone(),
                })
                .collect(),
        })
        .collect();

    Interpretation {
        layout: HomeLayout::new(rooms),
        changed,
    }
}

fn changes_for(command: &Command, room: &Room, device: &Device) -> Option<DeviceChanges> {
    if !command.targets(room, device) {
        return None;
    }
    let mut changes = DeviceChanges::default();
    let mut fired = false;
    for rule in RULES {
        fired |= rule.evaluate(command, device, &mut changes);
    }
    fired.then_some(changes)
}
