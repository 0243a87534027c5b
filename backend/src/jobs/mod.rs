//! Background jobs

pub mod snapshot;

pub use snapshot::run_snapshot_scheduler;
