/*!
 * Namespace Node Types
 * Internal representation of the synthetic tree
 */

use std::collections::BTreeMap;

use super::super::types::FileType;

/// Behavior tag for file nodes, matched in the read/write handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::vfs) enum FileRole {
    /// Fixed content rendered at build time
    Status,
    /// Mutable buffer holding the most recent write
    Signal,
}

/// Synthetic namespace node
///
/// Every file node owns its buffer outright. Nothing is shared across
/// nodes, so mutating one file can never disturb another's content.
#[derive(Debug, Clone)]
pub(in crate::vfs) enum Node {
    File { role: FileRole, data: Vec<u8> },
    Directory { children: BTreeMap<String, FileType> },
}

impl Node {
    /// Empty directory node
    pub fn directory() -> Self {
        Node::Directory {
            children: BTreeMap::new(),
        }
    }

    /// Status file node, content fixed from construction on
    pub fn status(content: String) -> Self {
        Node::File {
            role: FileRole::Status,
            data: content.into_bytes(),
        }
    }

    /// Empty signal control node
    pub fn signal() -> Self {
        Node::File {
            role: FileRole::Signal,
            data: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory { .. })
    }

    pub fn file_type(&self) -> FileType {
        match self {
            Node::File { .. } => FileType::File,
            Node::Directory { .. } => FileType::Directory,
        }
    }

    /// Content size in bytes, 0 for directories
    pub fn size(&self) -> u64 {
        match self {
            Node::File { data, .. } => data.len() as u64,
            Node::Directory { .. } => 0,
        }
    }
}
