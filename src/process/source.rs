/*!
 * Snapshot Sources
 * Boundary between the filesystem and the live process table
 */

use super::table::ProcessTree;
use super::types::SnapshotResult;
use crate::core::types::{Pid, Signum};
use crate::signals::types::{Signal, SignalError, SignalResult};
use log::debug;
use parking_lot::Mutex;
use std::collections::HashSet;

/// Live process-table access used by the filesystem
///
/// `capture` runs once per activation. `resolve` and `deliver` run at
/// dispatch time, so a signal aimed at a since-exited pid reports
/// "not found" instead of hitting the stale snapshot.
pub trait SnapshotSource: Send + Sync {
    /// Capture one point-in-time process tree
    fn capture(&self) -> SnapshotResult<ProcessTree>;

    /// Whether the pid exists in the live table right now
    fn resolve(&self, pid: Pid) -> bool;

    /// Deliver a signal to the pid right now
    fn deliver(&self, pid: Pid, signum: Signum) -> SignalResult<()>;

    /// Source name for logs
    fn name(&self) -> &str;
}

/// Fixed source backed by a hand-built tree
///
/// Deliveries are recorded instead of sent, which makes dispatch behavior
/// observable. Pids can be retired (an exit after capture) or denied
/// (a permission refusal from the host).
pub struct StaticSource {
    tree: ProcessTree,
    retired: Mutex<HashSet<Pid>>,
    denied: Mutex<HashSet<Pid>>,
    delivered: Mutex<Vec<(Pid, Signum)>>,
}

impl StaticSource {
    #[must_use]
    pub fn new(tree: ProcessTree) -> Self {
        Self {
            tree,
            retired: Mutex::new(HashSet::new()),
            denied: Mutex::new(HashSet::new()),
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Mark a pid as exited after capture
    pub fn retire(&self, pid: Pid) {
        self.retired.lock().insert(pid);
    }

    /// Make deliveries to a pid fail with a permission error
    pub fn deny(&self, pid: Pid) {
        self.denied.lock().insert(pid);
    }

    /// Deliveries recorded so far, in order
    #[must_use]
    pub fn delivered(&self) -> Vec<(Pid, Signum)> {
        self.delivered.lock().clone()
    }
}

impl SnapshotSource for StaticSource {
    fn capture(&self) -> SnapshotResult<ProcessTree> {
        Ok(self.tree.clone())
    }

    fn resolve(&self, pid: Pid) -> bool {
        self.tree.contains(pid) && !self.retired.lock().contains(&pid)
    }

    fn deliver(&self, pid: Pid, signum: Signum) -> SignalResult<()> {
        if !self.resolve(pid) {
            return Err(SignalError::ProcessNotFound(pid));
        }
        if self.denied.lock().contains(&pid) {
            return Err(SignalError::PermissionDenied(format!(
                "signaling pid {} refused",
                pid
            )));
        }
        // Signum 0 is the liveness probe and carries no signal
        if signum != 0 {
            Signal::from_number(signum)?;
        }
        self.delivered.lock().push((pid, signum));
        debug!("recorded signal {} for pid {}", signum, pid);
        Ok(())
    }

    fn name(&self) -> &str {
        "static"
    }
}
