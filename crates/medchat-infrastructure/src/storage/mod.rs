//! Storage layer for store snapshots.

mod atomic_json;
mod file_snapshot_repository;
mod memory_snapshot_repository;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use file_snapshot_repository::FileSnapshotRepository;
pub use memory_snapshot_repository::MemorySnapshotRepository;
