//! Business logic services for the Pantry Tracker

pub mod consumption;
pub mod inventory;
pub mod item;
pub mod statistics;
pub mod summary;
pub mod user;

pub use consumption::ConsumptionService;
pub use inventory::InventoryService;
pub use item::ItemService;
pub use statistics::StatisticsService;
pub use summary::SummaryService;
pub use user::UserService;
