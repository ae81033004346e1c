/*!
 * Signals Module
 * Signal numbering and control-file dispatch
 */

pub mod dispatch;
pub mod types;

// Re-export for convenience
pub use dispatch::{DispatchOutcome, IgnoreReason, SignalDispatcher};
pub use types::{Signal, SignalError, SignalResult};
