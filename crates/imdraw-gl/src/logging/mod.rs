//! Logging utilities.
//!
//! The crate only emits through the `log` facade. Hosts that want output call
//! [`init_logging`] once; embedders with their own logger simply skip it.

mod init;

pub use init::{init_logging, LoggingConfig};
