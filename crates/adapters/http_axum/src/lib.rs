//! # aurahome-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** over the current layout snapshot
//!   (`/api/layout`, `/api/devices/{id}`, `/api/commands`)
//! - Stream layout events to the rendering layer as **server-sent events**
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `aurahome-app` (for the layout service and event bus) and
//! `aurahome-domain` (for request/response types). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
