/*!
 * Process Tree
 * Pid-indexed container for one captured snapshot
 */

use super::types::ProcessSnapshot;
use crate::core::types::Pid;
use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One captured process tree, indexed by pid
///
/// The shape is fixed at capture time. Parent and child links live in the
/// snapshots themselves; the tree only guarantees pid lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessTree {
    root: Pid,
    map: HashMap<Pid, ProcessSnapshot, RandomState>,
}

impl ProcessTree {
    /// Empty tree rooted at `root`
    #[must_use]
    pub fn new(root: Pid) -> Self {
        Self {
            root,
            map: HashMap::default(),
        }
    }

    /// Insert a snapshot, replacing any previous record for the pid
    pub fn insert(&mut self, snapshot: ProcessSnapshot) -> Option<ProcessSnapshot> {
        self.map.insert(snapshot.pid, snapshot)
    }

    #[inline]
    #[must_use]
    pub const fn root(&self) -> Pid {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn get(&self, pid: Pid) -> Option<&ProcessSnapshot> {
        self.map.get(&pid)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, pid: Pid) -> bool {
        self.map.contains_key(&pid)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate snapshots in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &ProcessSnapshot> {
        self.map.values()
    }

    /// Pids present in the tree, unspecified order
    pub fn pids(&self) -> impl Iterator<Item = Pid> + '_ {
        self.map.keys().copied()
    }
}
