/*!
 * Virtual Filesystem
 * Filesystem abstraction and the task namespace built on it
 */

pub mod status;
pub mod task;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use status::{render_status, STATUS_FILE_CAPACITY};
pub use task::{BuildReport, TaskFs, MAX_TREE_DEPTH, WRITE_CHUNK_CAPACITY};
pub use traits::FileSystem;
pub use types::*;
