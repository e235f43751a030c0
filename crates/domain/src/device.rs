//! Device: a controllable thing placed in a room.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;
use crate::palette::Brightness;

/// Closed set of supported device kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Light,
    Camera,
    Switch,
    Thermostat,
    Speaker,
    Tv,
}

impl DeviceType {
    /// Whether the device carries `brightness` and `color`.
    #[must_use]
    pub fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }

    /// Whether the device's state is restricted to `on`/`off`.
    ///
    /// Thermostats and tvs also carry set-points and channels.
    #[must_use]
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Light | Self::Switch | Self::Speaker | Self::Camera)
    }

    /// Whether the device exposes an on/off toggle.
    #[must_use]
    pub fn is_toggleable(self) -> bool {
        matches!(self, Self::Light | Self::Switch | Self::Speaker | Self::Tv)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Camera => "camera",
            Self::Switch => "switch",
            Self::Thermostat => "thermostat",
            Self::Speaker => "speaker",
            Self::Tv => "tv",
        })
    }
}

/// Binary power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Power {
    On,
    Off,
}

/// Current state of a device.
///
/// Serialized untagged: `"on"`/`"off"` for binary devices, a number for a
/// thermostat set-point, or free text (a tv channel, a temperature that
/// arrived as a string).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceState {
    Power(Power),
    Number(f64),
    Text(String),
}

impl DeviceState {
    pub const ON: Self = Self::Power(Power::On);
    pub const OFF: Self = Self::Power(Power::Off);

    #[must_use]
    pub fn is_on(&self) -> bool {
        matches!(self, Self::Power(Power::On))
    }

    #[must_use]
    pub fn is_off(&self) -> bool {
        matches!(self, Self::Power(Power::Off))
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::OFF
    }
}

impl From<Power> for DeviceState {
    fn from(power: Power) -> Self {
        Self::Power(power)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power(Power::On) => f.write_str("on"),
            Self::Power(Power::Off) => f.write_str("off"),
            Self::Number(n) => n.fmt(f),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A device inside a [`Room`](crate::room::Room).
///
/// `brightness` and `color` are only meaningful on lights and are absent
/// everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceType,
    #[serde(default)]
    pub state: DeviceState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<Brightness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Device {
    /// A non-light device in its default `off` state.
    #[must_use]
    pub fn new(id: impl Into<DeviceId>, name: impl Into<String>, kind: DeviceType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            state: DeviceState::default(),
            brightness: None,
            color: None,
        }
    }

    /// A light with explicit brightness and color.
    #[must_use]
    pub fn light(
        id: impl Into<DeviceId>,
        name: impl Into<String>,
        brightness: Brightness,
        color: impl Into<String>,
    ) -> Self {
        Self {
            brightness: Some(brightness),
            color: Some(color.into()),
            ..Self::new(id, name, DeviceType::Light)
        }
    }

    /// Builder-style state override.
    #[must_use]
    pub fn with_state(mut self, state: DeviceState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }

    /// State a manual toggle would produce: `on` becomes `off`, anything
    /// else becomes `on`.
    #[must_use]
    pub fn toggled_state(&self) -> DeviceState {
        if self.is_on() {
            DeviceState::OFF
        } else {
            DeviceState::ON
        }
    }

    /// Merge `changes` into a copy of this device.
    ///
    /// Fields absent from `changes` are kept. Light-only fields are ignored
    /// on non-light devices.
    #[must_use]
    pub fn apply(&self, changes: &DeviceChanges) -> Self {
        let mut next = self.clone();
        if let Some(state) = &changes.state {
            next.state = state.clone();
        }
        if self.kind.is_light() {
            if let Some(brightness) = changes.brightness {
                next.brightness = Some(brightness);
            }
            if let Some(color) = &changes.color {
                next.color = Some(color.clone());
            }
        }
        next
    }
}

/// Partial set of field overwrites for a single device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<DeviceState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<Brightness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl DeviceChanges {
    #[must_use]
    pub fn state(state: DeviceState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.brightness.is_none() && self.color.is_none()
    }
}
