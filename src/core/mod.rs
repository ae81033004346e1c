/*!
 * Core Module
 * Shared primitives for the task filesystem
 */

pub mod types;

// Re-export for convenience
pub use types::*;
