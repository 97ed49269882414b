//! Adapters binding the content core to the outside world.

pub mod archive;
pub mod error;
pub mod telemetry;
