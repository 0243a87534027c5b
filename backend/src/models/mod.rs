//! Domain model types shared across services and handlers

pub use shared::models::*;
pub use shared::types::{Paginated, Pagination};
