//! Utilities shared by gantry binaries.

pub mod logging;
