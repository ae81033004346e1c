/*!
 * Core Types
 * Common identifier types used across the crate
 */

/// Process ID type
///
/// Matches the host's numeric pid space. The synthetic tree root uses 0.
pub type Pid = u32;

/// Raw signal number as written to a control file, before table lookup
pub type Signum = u32;
