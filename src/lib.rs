/*!
 * Task Filesystem Crate
 *
 * Read/write virtual filesystem exposing a one-shot snapshot of the
 * host process tree. Activation captures the live process table once
 * and builds an in-memory namespace with one directory per process,
 * nested parent over child. Each directory holds a rendered status
 * file and a writable signal file that delivers signals back to the
 * live system.
 *
 * The snapshot never tracks the live system afterward; reads are
 * served from owned buffers until the next activation.
 */

pub mod core;
pub mod process;
pub mod signals;
pub mod vfs;

// Re-export commonly used types
pub use crate::core::{Pid, Signum};
pub use process::{HostSource, ProcessSnapshot, ProcessTree, SnapshotSource, TaskState};
pub use signals::{DispatchOutcome, Signal, SignalDispatcher};
pub use vfs::{BuildReport, FileSystem, TaskFs};
