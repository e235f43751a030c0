//! # aurahome-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `EventPublisher`: fan out layout events
//! - Define **driving/inbound** use-cases:
//!   - `LayoutService`: load the layout, edit devices, toggle, run commands
//! - Hold the **current layout snapshot** as the single source of truth and
//!   serialize every read-modify-write of it
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `aurahome-domain` only (plus `tokio::sync` for locks and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod ports;
pub mod services;
