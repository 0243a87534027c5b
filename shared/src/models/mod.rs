//! Domain models for the Pantry Tracker

mod item;
mod stats;

pub use item::*;
pub use stats::*;
