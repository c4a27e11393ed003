//! # Rendering Module
//!
//! Plain-text presentation of game snapshots for the terminal binary.

pub mod display;

pub use display::*;
