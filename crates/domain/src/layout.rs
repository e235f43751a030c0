//! Home layout: the whole floor plan, and the field-level mutation API.
//!
//! A [`HomeLayout`] is an immutable snapshot: every operation here returns
//! a new value and leaves its input untouched.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceChanges, DeviceState};
use crate::error::{HomeError, ValidationError};
use crate::id::DeviceId;
use crate::palette::{self, Brightness};
use crate::room::Room;

/// The complete floor plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeLayout {
    pub rooms: Vec<Room>,
}

impl HomeLayout {
    #[must_use]
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// Parse a layout document as produced by the layout generator, then
    /// normalize and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Parse`] if the text is not a layout document
    /// (including a missing `rooms` array) and [`HomeError::Validation`] if
    /// an invariant fails after normalization.
    pub fn from_json(text: &str) -> Result<Self, HomeError> {
        let layout: Self = serde_json::from_str(text.trim())?;
        let layout = layout.normalized();
        layout.validate()?;
        Ok(layout)
    }

    /// Iterate over every device together with its owning room.
    pub fn devices(&self) -> impl Iterator<Item = (&Room, &Device)> {
        self.rooms
            .iter()
            .flat_map(|room| room.devices.iter().map(move |device| (room, device)))
    }

    #[must_use]
    pub fn find_device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices()
            .map(|(_, device)| device)
            .find(|device| &device.id == id)
    }

    #[must_use]
    pub fn device_count(&self) -> usize {
        self.rooms.iter().map(|room| room.devices.len()).sum()
    }

    /// Fill light defaults (full brightness, white) and strip light-only
    /// fields from every other device type.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for device in self.rooms.iter_mut().flat_map(|room| room.devices.iter_mut()) {
            if device.kind.is_light() {
                if device.brightness.is_none() {
                    device.brightness = Some(Brightness::default());
                }
                if device.color.is_none() {
                    device.color = Some(palette::DEFAULT_LIGHT_COLOR.to_string());
                }
            } else {
                device.brightness = None;
                device.color = None;
            }
        }
        self
    }

    /// Check every layout invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered, walking rooms and
    /// devices in order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut room_names = HashSet::new();
        let mut device_ids = HashSet::new();

        for room in &self.rooms {
            room.validate()?;
            if !room_names.insert(room.name.to_lowercase()) {
                return Err(ValidationError::DuplicateRoomName(room.name.clone()));
            }

            for device in &room.devices {
                validate_device(device)?;
                if !device_ids.insert(&device.id) {
                    return Err(ValidationError::DuplicateDeviceId(device.id.clone()));
                }
            }
        }
        Ok(())
    }

    /// Method form of [`update_device`].
    #[must_use]
    pub fn with_device_update(&self, id: &DeviceId, changes: &DeviceChanges) -> Self {
        update_device(self, id, changes)
    }
}

fn validate_device(device: &Device) -> Result<(), ValidationError> {
    if device.id.is_empty() {
        return Err(ValidationError::EmptyDeviceId);
    }
    if device.name.trim().is_empty() {
        return Err(ValidationError::EmptyDeviceName(device.id.clone()));
    }
    if device.kind.is_binary() && !matches!(device.state, DeviceState::Power(_)) {
        return Err(ValidationError::StateNotBinary(device.id.clone()));
    }
    if !device.kind.is_light() && (device.brightness.is_some() || device.color.is_some()) {
        return Err(ValidationError::LightFieldOnNonLight(device.id.clone()));
    }
    if device.brightness.is_some_and(|b| !b.is_in_range()) {
        return Err(ValidationError::BrightnessOutOfRange(device.id.clone()));
    }
    if let Some(color) = &device.color
        && !palette::is_hex_color(color)
    {
        return Err(ValidationError::InvalidColor {
            id: device.id.clone(),
            color: color.clone(),
        });
    }
    Ok(())
}

/// Produce a new layout in which the device `id` has `changes` merged in.
///
/// Fields absent from `changes` are left untouched. An unknown `id` yields a
/// layout equal to the input.
#[must_use]
pub fn update_device(layout: &HomeLayout, id: &DeviceId, changes: &DeviceChanges) -> HomeLayout {
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
                .map(|device| {
                    if &device.id == id {
                        device.apply(changes)
                    } else {
                        device.clone()
                    }
                })
                .collect(),
        })
        .collect();
    HomeLayout { rooms }
}
