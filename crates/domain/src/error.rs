//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! The command interpreter and the pure mutation API never produce errors;
//! these types cover inbound layout documents and the use-case layer.

use crate::id::DeviceId;

/// Top-level error for the aurahome core.
#[derive(Debug, thiserror::Error)]
pub enum HomeError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("no layout loaded")]
    NoLayout,

    #[error("malformed layout document")]
    Parse(#[from] serde_json::Error),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("duplicate room name {0:?}")]
    DuplicateRoomName(String),

    #[error("room {room:?}: grid column {col} is outside 1..=12")]
    ColumnOutOfRange { room: String, col: u32 },

    #[error("room {room:?}: grid row must be at least 1")]
    RowOutOfRange { room: String },

    #[error("room {room:?}: grid spans must be at least 1")]
    EmptySpan { room: String },

    #[error("device id must not be empty")]
    EmptyDeviceId,

    #[error("device name must not be empty (device {0})")]
    EmptyDeviceName(DeviceId),

    #[error("duplicate device id {0}")]
    DuplicateDeviceId(DeviceId),

    #[error("device {0}: brightness exceeds 100")]
    BrightnessOutOfRange(DeviceId),

    #[error("device {id}: {color:?} is not a hex color")]
    InvalidColor { id: DeviceId, color: String },

    #[error("device {0}: state must be \"on\" or \"off\"")]
    StateNotBinary(DeviceId),

    #[error("device {0}: brightness and color are only allowed on lights")]
    LightFieldOnNonLight(DeviceId),

    #[error("device {0} cannot be toggled")]
    NotToggleable(DeviceId),
}

/// A looked-up item does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
