//! Output contracts for the external render layer.

pub mod views;
