//! Draw-data submission.
//!
//! Turns one frame of GUI draw lists into scissored, indexed GL draws while
//! leaving the host's GL bindings as they were.

mod pipeline;
mod projection;

pub use pipeline::{render_draw_data, validate_draw_data};
pub use projection::ortho_projection;
