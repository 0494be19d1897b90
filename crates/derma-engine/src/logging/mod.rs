//! Logging utilities.
//!
//! Library code only uses the `log` facade. This module wires up `env_logger`
//! for hosts that want a ready-made backend.

mod init;

pub use init::{init_logging, LoggingConfig};
