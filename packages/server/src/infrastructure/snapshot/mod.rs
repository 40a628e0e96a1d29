//! Snapshot store implementations.

pub mod png;

pub use png::PngSnapshotStore;
