//! Core types, constants and geodesy helpers

pub mod types;
pub mod constants;
pub mod geodesy;

pub use types::*;
pub use constants::*;
