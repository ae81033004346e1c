/*!
 * File Operations Implementation
 * Read and write handlers for namespace nodes
 */

use std::path::Path;

use super::super::types::{VfsError, VfsResult};
use super::node::{FileRole, Node};
use super::{TaskFs, WRITE_CHUNK_CAPACITY};
use log::debug;

impl TaskFs {
    pub(super) fn read_impl(&self, path: &Path) -> VfsResult<Vec<u8>> {
        let path = self.normalize(path);
        let nodes = self.nodes.load();
        let entry = match nodes.get(&path) {
            Some(entry) => entry,
            None => return Err(VfsError::NotFound(path.display().to_string())),
        };
        match entry.value() {
            Node::File { data, .. } => Ok(data.clone()),
            Node::Directory { .. } => Err(VfsError::IsADirectory(path.display().to_string())),
        }
    }

    pub(super) fn read_at_impl(
        &self,
        path: &Path,
        buf: &mut [u8],
        offset: u64,
    ) -> VfsResult<usize> {
        let path = self.normalize(path);
        let nodes = self.nodes.load();
        let entry = match nodes.get(&path) {
            Some(entry) => entry,
            None => return Err(VfsError::NotFound(path.display().to_string())),
        };
        match entry.value() {
            Node::Directory { .. } => Err(VfsError::IsADirectory(path.display().to_string())),
            Node::File { data, .. } => {
                // Reading at or past the end is end-of-content, not an error
                if offset >= data.len() as u64 {
                    return Ok(0);
                }
                let start = offset as usize;
                let count = buf.len().min(data.len() - start);
                buf[..count].copy_from_slice(&data[start..start + count]);
                Ok(count)
            }
        }
    }

    pub(super) fn write_at_impl(&self, path: &Path, data: &[u8], offset: u64) -> VfsResult<usize> {
        if offset != 0 {
            return Err(VfsError::InvalidArgument(format!(
                "write must start at offset 0, got {}",
                offset
            )));
        }
        if data.len() >= WRITE_CHUNK_CAPACITY {
            return Err(VfsError::InvalidArgument(format!(
                "write of {} bytes reaches the {} byte chunk limit",
                data.len(),
                WRITE_CHUNK_CAPACITY
            )));
        }

        let path = self.normalize(path);
        let nodes = self.nodes.load();
        let is_signal = {
            let mut entry = match nodes.get_mut(&path) {
                Some(entry) => entry,
                None => return Err(VfsError::NotFound(path.display().to_string())),
            };
            match entry.value_mut() {
                Node::Directory { .. } => {
                    return Err(VfsError::IsADirectory(path.display().to_string()))
                }
                Node::File { role, data: buffer } => {
                    buffer.clear();
                    buffer.extend_from_slice(data);
                    *role == FileRole::Signal
                }
            }
            // Shard guard drops here; dispatch never runs under it
        };

        if is_signal {
            if let Some(directory_name) = owning_directory(&path) {
                let outcome = self.dispatcher.dispatch(&directory_name, data);
                debug!("signal write on {}: {:?}", path.display(), outcome);
            }
        }

        Ok(data.len())
    }
}

/// Name of the directory owning `path`
fn owning_directory(path: &Path) -> Option<String> {
    path.parent()
        .and_then(|parent| parent.file_name())
        .map(|name| name.to_string_lossy().into_owned())
}
