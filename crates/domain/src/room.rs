//! Room: a named cell on the floor-plan grid holding devices.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::error::ValidationError;

/// Number of columns on the floor-plan grid.
pub const GRID_COLUMNS: u32 = 12;

/// Top-left placement of a room on the grid (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: u32,
    pub col: u32,
}

/// How many rows and columns a room occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpan {
    pub row_span: u32,
    pub col_span: u32,
}

impl Default for GridPosition {
    fn default() -> Self {
        Self { row: 1, col: 1 }
    }
}

impl Default for GridSpan {
    fn default() -> Self {
        Self {
            row_span: 1,
            col_span: 1,
        }
    }
}

/// A room and the devices placed in it.
///
/// Grid placement is presentational only; the interpreter matches on `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub name: String,
    #[serde(default)]
    pub grid_position: GridPosition,
    #[serde(default)]
    pub grid_span: GridSpan,
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl Room {
    /// A single-cell room at the top-left corner.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grid_position: GridPosition::default(),
            grid_span: GridSpan::default(),
            devices: Vec::new(),
        }
    }

    #[must_use]
    pub fn at(mut self, row: u32, col: u32) -> Self {
        self.grid_position = GridPosition { row, col };
        self
    }

    #[must_use]
    pub fn spanning(mut self, row_span: u32, col_span: u32) -> Self {
        self.grid_span = GridSpan { row_span, col_span };
        self
    }

    #[must_use]
    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.push(device);
        self
    }

    /// Check the room's own invariants (name and grid placement).
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyRoomName);
        }
        let GridPosition { row, col } = self.grid_position;
        if !(1..=GRID_COLUMNS).contains(&col) {
            return Err(ValidationError::ColumnOutOfRange {
                room: self.name.clone(),
                col,
            });
        }
        if row == 0 {
            return Err(ValidationError::RowOutOfRange {
                room: self.name.clone(),
            });
        }
        if self.grid_span.row_span == 0 || self.grid_span.col_span == 0 {
            return Err(ValidationError::EmptySpan {
                room: self.name.clone(),
            });
        }
        Ok(())
    }
}
