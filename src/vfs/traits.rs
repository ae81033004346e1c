/*!
 * VFS Traits
 * Core filesystem abstraction traits
 */

use std::path::Path;

use super::types::*;

/// Virtual filesystem trait
///
/// Read and write carry the caller-supplied offset; implementations keep
/// no cursor between calls. Operations should be atomic where possible
/// and return appropriate errors on failure.
pub trait FileSystem: Send + Sync {
    /// Read entire file contents
    fn read(&self, path: &Path) -> VfsResult<Vec<u8>>;

    /// Read into `buf` starting at `offset`
    ///
    /// Returns the number of bytes copied; 0 means end of content, not an
    /// error.
    fn read_at(&self, path: &Path, buf: &mut [u8], offset: u64) -> VfsResult<usize>;

    /// Write `data` at `offset`, returning the number of bytes accepted
    fn write_at(&self, path: &Path, data: &[u8], offset: u64) -> VfsResult<usize>;

    /// Check if file/directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Get file metadata
    fn metadata(&self, path: &Path) -> VfsResult<Metadata>;

    /// List directory contents
    fn list_dir(&self, path: &Path) -> VfsResult<Vec<Entry>>;

    /// Get filesystem name/type
    fn name(&self) -> &str;

    /// Check if filesystem is read-only
    fn readonly(&self) -> bool {
        false
    }
}
