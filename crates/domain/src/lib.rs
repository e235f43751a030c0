//! # aurahome-domain
//!
//! Pure domain model for the aurahome smart-home dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions
//! - Define **Devices** (lights, switches, thermostats, … with a tagged state)
//! - Define **Rooms** (named cells on a 12-column floor-plan grid)
//! - Define the **Home layout** snapshot and its invariants
//! - Provide the **mutation API** (`update_device`) all device edits go through
//! - Provide the **command interpreter** turning an utterance into changes
//! - Define **Events** (records of snapshot changes)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! The current-snapshot holder lives in the `app` crate.

pub mod error;
pub mod id;
pub mod palette;

pub mod command;
pub mod device;
pub mod event;
pub mod layout;
pub mod room;
