//! Host integration.
//!
//! `cursor` is host-agnostic; `winit` adapts a winit window to the backend's
//! host event model.

mod cursor;
pub mod winit;

pub use cursor::{resolve_cursor, HostCursor};
