/*!
 * Signal Dispatch
 * Turns control-file writes into signal deliveries
 */

use super::types::SignalError;
use crate::core::types::{Pid, Signum};
use crate::process::source::SnapshotSource;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Why a write was stored without any dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Owning directory name is not a decimal pid
    UnparseablePid,
    /// Payload does not start with a decimal signal number
    UnparseableSignum,
}

/// Result of one control-file write, for diagnostics
///
/// The filesystem reports write success independently of this outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum DispatchOutcome {
    /// Signal handed to the host for delivery
    Delivered { pid: Pid, signum: Signum },
    /// Pid no longer exists in the live table
    NotFound { pid: Pid },
    /// Host refused or failed the delivery
    Failed {
        pid: Pid,
        signum: Signum,
        error: SignalError,
    },
    /// Input failed weak validation; payload stored, nothing sent
    Ignored { reason: IgnoreReason },
}

impl DispatchOutcome {
    /// Whether a signal actually reached the host
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Validates write input and requests delivery from the live source
pub struct SignalDispatcher {
    source: Arc<dyn SnapshotSource>,
}

impl SignalDispatcher {
    #[must_use]
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self { source }
    }

    /// Dispatch one control-file write
    ///
    /// `directory_name` is the name of the directory owning the control
    /// file, i.e. the target pid; `payload` is the written text.
    /// Unparseable input is reported as `Ignored`, never as an error.
    pub fn dispatch(&self, directory_name: &str, payload: &[u8]) -> DispatchOutcome {
        let pid = match parse_decimal_prefix(directory_name.as_bytes()) {
            Some(pid) => pid,
            None => {
                debug!(
                    "signal write under non-pid directory {:?} stored without dispatch",
                    directory_name
                );
                return DispatchOutcome::Ignored {
                    reason: IgnoreReason::UnparseablePid,
                };
            }
        };
        let signum = match parse_decimal_prefix(payload) {
            Some(signum) => signum,
            None => {
                debug!(
                    "signal write for pid {} stored without dispatch: no decimal prefix",
                    pid
                );
                return DispatchOutcome::Ignored {
                    reason: IgnoreReason::UnparseableSignum,
                };
            }
        };

        if !self.source.resolve(pid) {
            warn!(
                "signal {} for pid {}: process not found in {}",
                signum,
                pid,
                self.source.name()
            );
            return DispatchOutcome::NotFound { pid };
        }

        match self.source.deliver(pid, signum) {
            Ok(()) => {
                debug!("delivered signal {} to pid {}", signum, pid);
                DispatchOutcome::Delivered { pid, signum }
            }
            Err(error) => {
                warn!("signal {} to pid {} failed: {}", signum, pid, error);
                DispatchOutcome::Failed { pid, signum, error }
            }
        }
    }
}

/// Parse a non-negative decimal prefix
///
/// Skips leading ASCII whitespace, then takes the longest run of ASCII
/// digits. An empty run or an overflowing value yields `None`.
#[must_use]
pub fn parse_decimal_prefix(input: &[u8]) -> Option<u32> {
    let start = input.iter().position(|b| !b.is_ascii_whitespace())?;
    let mut value: u32 = 0;
    let mut digits = 0usize;
    for &byte in &input[start..] {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value
            .checked_mul(10)?
            .checked_add(u32::from(byte - b'0'))?;
        digits += 1;
    }
    if digits == 0 {
        return None;
    }
    Some(value)
}
