//! HTTP request handlers

pub mod consumption;
pub mod health;
pub mod inventory;
pub mod item;
pub mod recipe;
pub mod statistics;
pub mod summary;

pub use consumption::*;
pub use health::*;
pub use inventory::*;
pub use item::*;
pub use recipe::*;
pub use statistics::*;
pub use summary::*;
