//! Shared types and stock accounting logic for the Pantry Tracker
//!
//! This crate contains the pure domain core: unit handling, quantity
//! normalization, the stock classifier, and the month arithmetic used by
//! statistics and the snapshot job. It has no persistence or HTTP
//! dependencies so the accounting rules can be tested in isolation.

pub mod models;
pub mod stock;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
