/*!
 * Directory Operations Implementation
 * Listing, metadata and existence checks
 */

use std::path::Path;

use super::super::types::{Entry, Metadata, Permissions, VfsError, VfsResult};
use super::node::Node;
use super::TaskFs;

impl TaskFs {
    pub(super) fn exists_impl(&self, path: &Path) -> bool {
        let path = self.normalize(path);
        self.nodes.load().contains_key(&path)
    }

    pub(super) fn metadata_impl(&self, path: &Path) -> VfsResult<Metadata> {
        let path = self.normalize(path);
        let nodes = self.nodes.load();
        let entry = match nodes.get(&path) {
            Some(entry) => entry,
            None => return Err(VfsError::NotFound(path.display().to_string())),
        };
        let node = entry.value();
        Ok(Metadata {
            file_type: node.file_type(),
            size: node.size(),
            permissions: if node.is_dir() {
                Permissions::executable()
            } else {
                Permissions::readwrite()
            },
        })
    }

    pub(super) fn list_dir_impl(&self, path: &Path) -> VfsResult<Vec<Entry>> {
        let path = self.normalize(path);
        let nodes = self.nodes.load();
        let children = match nodes.get(&path) {
            Some(entry) => match entry.value() {
                Node::Directory { children } => children.clone(),
                Node::File { .. } => {
                    return Err(VfsError::NotADirectory(path.display().to_string()))
                }
            },
            None => return Err(VfsError::NotFound(path.display().to_string())),
        };

        Ok(children
            .into_iter()
            .map(|(name, file_type)| Entry::new(name, file_type))
            .collect())
    }
}
