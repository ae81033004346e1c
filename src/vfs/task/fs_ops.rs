/*!
 * FileSystem Trait Implementation
 * Routes the embedder-facing trait to node operations
 */

use std::path::Path;

use super::super::traits::FileSystem;
use super::super::types::*;
use super::TaskFs;

impl FileSystem for TaskFs {
    fn read(&self, path: &Path) -> VfsResult<Vec<u8>> {
        self.read_impl(path)
    }

    fn read_at(&self, path: &Path, buf: &mut [u8], offset: u64) -> VfsResult<usize> {
        self.read_at_impl(path, buf, offset)
    }

    fn write_at(&self, path: &Path, data: &[u8], offset: u64) -> VfsResult<usize> {
        self.write_at_impl(path, data, offset)
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn metadata(&self, path: &Path) -> VfsResult<Metadata> {
        self.metadata_impl(path)
    }

    fn list_dir(&self, path: &Path) -> VfsResult<Vec<Entry>> {
        self.list_dir_impl(path)
    }

    fn name(&self) -> &str {
        "taskfs"
    }

    fn readonly(&self) -> bool {
        false
    }
}
