//! Schema module - Configuration and data types for robot evolution.

mod direction;
mod evolution;
mod genome;
mod room;

pub use direction::*;
pub use evolution::*;
pub use genome::*;
pub use room::*;
