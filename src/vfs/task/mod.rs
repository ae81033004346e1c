/*!
 * Task Filesystem
 * Synthetic namespace over one captured process tree
 */

mod builder;
mod dir_ops;
mod file_ops;
mod fs_ops;
mod node;

use ahash::RandomState;
use arc_swap::ArcSwap;
use log::info;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::types::{VfsError, VfsResult};
use crate::process::host::HostSource;
use crate::process::source::SnapshotSource;
use crate::signals::dispatch::SignalDispatcher;
use builder::{NamespaceBuilder, NodeTable};

pub use builder::{BuildReport, MAX_TREE_DEPTH};

/// Largest write a node accepts, exclusive: a payload of this many bytes
/// or more is rejected
pub const WRITE_CHUNK_CAPACITY: usize = 20;

/// Filesystem over one captured process tree
///
/// Empty until `activate` captures a snapshot and builds the whole
/// namespace in one pass. The finished node table is published with a
/// single atomic swap, so readers see either the previous tree or the
/// complete new one, never a partial build. The tree shape is immutable
/// afterward; only signal buffers mutate.
pub struct TaskFs {
    source: Arc<dyn SnapshotSource>,
    dispatcher: SignalDispatcher,
    nodes: ArcSwap<NodeTable>,
    report: RwLock<Option<BuildReport>>,
}

impl TaskFs {
    /// Filesystem over the given source
    #[must_use]
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self {
            dispatcher: SignalDispatcher::new(Arc::clone(&source)),
            source,
            nodes: ArcSwap::from_pointee(empty_table()),
            report: RwLock::new(None),
        }
    }

    /// Filesystem over the host process table
    #[must_use]
    pub fn host() -> Self {
        Self::new(Arc::new(HostSource::new()))
    }

    /// Capture a snapshot and build the namespace, replacing any
    /// previously built tree
    ///
    /// Skipped subtrees are tallied in the returned report, not escalated.
    /// A failed capture or a missing root record fails activation.
    pub fn activate(&self) -> VfsResult<BuildReport> {
        let tree = match self.source.capture() {
            Ok(tree) => tree,
            Err(e) => {
                return Err(VfsError::IoError(format!(
                    "snapshot capture via {}: {}",
                    self.source.name(),
                    e
                )))
            }
        };
        let (nodes, report) = NamespaceBuilder::new(&tree).build()?;
        self.nodes.store(Arc::new(nodes));
        *self.report.write() = Some(report);
        info!(
            "task namespace built from {}: {} processes, {} skipped, {} depth-pruned",
            self.source.name(),
            report.built,
            report.skipped,
            report.depth_pruned
        );
        Ok(report)
    }

    /// Drop the namespace, returning to the empty pre-activation state
    pub fn deactivate(&self) {
        self.nodes.store(Arc::new(empty_table()));
        *self.report.write() = None;
        info!("task namespace released");
    }

    /// Report from the most recent activation, if any
    #[must_use]
    pub fn last_report(&self) -> Option<BuildReport> {
        *self.report.read()
    }

    /// Normalize path (make absolute and clean)
    fn normalize(&self, path: &Path) -> PathBuf {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new("/").join(path)
        };
        PathBuf::from(path_clean::clean(&path))
    }
}

fn empty_table() -> NodeTable {
    NodeTable::with_hasher(RandomState::new())
}
