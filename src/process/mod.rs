/*!
 * Process Module
 * Snapshot capture and live process-table access
 */

pub mod host;
pub mod source;
pub mod table;
pub mod types;

// Re-export for convenience
pub use host::HostSource;
pub use source::{SnapshotSource, StaticSource};
pub use table::ProcessTree;
pub use types::{AddressSpace, ProcessSnapshot, SnapshotError, SnapshotResult, TaskState};
