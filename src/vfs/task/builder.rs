/*!
 * Namespace Builder
 * One eager pre-order pass from snapshot tree to node table
 */

use ahash::RandomState;
use dashmap::DashMap;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::super::status::render_status;
use super::super::types::{FileType, VfsError, VfsResult};
use super::node::Node;
use crate::core::types::Pid;
use crate::process::table::ProcessTree;

/// Deepest directory nesting the builder will create
pub const MAX_TREE_DEPTH: usize = 64;

/// Name of the per-process control file
pub(in crate::vfs) const SIGNAL_FILE_NAME: &str = "signal";

/// Shared node storage keyed by normalized absolute path
pub(in crate::vfs) type NodeTable = DashMap<PathBuf, Node, RandomState>;

/// Build tally published after each activation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BuildReport {
    /// Process directories created
    pub built: usize,
    /// Subtrees skipped over missing or colliding records
    pub skipped: usize,
    /// Frames dropped at the depth bound
    pub depth_pruned: usize,
}

/// Walks one captured tree and materializes the namespace
///
/// Pre-order and iterative: an explicit frame stack replaces call-stack
/// recursion, so pathological nesting, or a cycle smuggled in through bad
/// child links, is cut off at the depth bound instead of overflowing.
/// Children are pushed in reverse so they pop in their recorded order.
pub(in crate::vfs) struct NamespaceBuilder<'a> {
    tree: &'a ProcessTree,
}

impl<'a> NamespaceBuilder<'a> {
    pub fn new(tree: &'a ProcessTree) -> Self {
        Self { tree }
    }

    /// Materialize the whole namespace
    ///
    /// A missing root snapshot fails the build. Any other missing or
    /// duplicate record skips that subtree only; siblings proceed and the
    /// skip is tallied.
    pub fn build(&self) -> VfsResult<(NodeTable, BuildReport)> {
        let root_pid = self.tree.root();
        if self.tree.get(root_pid).is_none() {
            return Err(VfsError::NotFound(format!("root process {}", root_pid)));
        }

        let nodes: NodeTable = DashMap::with_hasher(RandomState::new());
        nodes.insert(PathBuf::from("/"), Node::directory());

        let mut report = BuildReport::default();
        let mut stack: Vec<(Pid, PathBuf, usize)> = vec![(root_pid, PathBuf::from("/"), 0)];

        while let Some((pid, parent, depth)) = stack.pop() {
            if depth >= MAX_TREE_DEPTH {
                warn!("pruning pid {} at depth {}", pid, depth);
                report.depth_pruned += 1;
                continue;
            }
            let snapshot = match self.tree.get(pid) {
                Some(snapshot) => snapshot,
                None => {
                    warn!("no snapshot for pid {}, skipping subtree", pid);
                    report.skipped += 1;
                    continue;
                }
            };

            let name = pid.to_string();
            let dir = parent.join(&name);
            if nodes.contains_key(&dir) {
                warn!(
                    "duplicate entry for pid {} under {}, skipping subtree",
                    pid,
                    parent.display()
                );
                report.skipped += 1;
                continue;
            }

            nodes.insert(dir.clone(), Node::directory());
            link_child(&nodes, &parent, &name, FileType::Directory);

            let status_name = format!("{}.status", pid);
            nodes.insert(dir.join(&status_name), Node::status(render_status(snapshot)));
            link_child(&nodes, &dir, &status_name, FileType::File);

            nodes.insert(dir.join(SIGNAL_FILE_NAME), Node::signal());
            link_child(&nodes, &dir, SIGNAL_FILE_NAME, FileType::File);

            report.built += 1;

            for &child in snapshot.children.iter().rev() {
                stack.push((child, dir.clone(), depth + 1));
            }
        }

        Ok((nodes, report))
    }
}

/// Record `name` in the parent directory's child map
fn link_child(nodes: &NodeTable, parent: &Path, name: &str, file_type: FileType) {
    if let Some(mut entry) = nodes.get_mut(parent) {
        if let Node::Directory { children } = entry.value_mut() {
            children.insert(name.to_string(), file_type);
        }
    }
}
