/*!
 * VFS Directory Entry
 * Represents entries in a directory listing
 */

use super::file_type::FileType;
use serde::{Deserialize, Serialize};

/// Directory entry
///
/// Names are produced by the namespace itself (decimal pids and the two
/// fixed file names), so no separate validation step is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    pub name: String,
    pub file_type: FileType,
}

impl Entry {
    /// Create a new directory entry
    #[must_use]
    pub fn new(name: String, file_type: FileType) -> Self {
        Self { name, file_type }
    }

    /// Create a file entry
    #[inline]
    #[must_use]
    pub fn file(name: String) -> Self {
        Self::new(name, FileType::File)
    }

    /// Create a directory entry
    #[inline]
    #[must_use]
    pub fn directory(name: String) -> Self {
        Self::new(name, FileType::Directory)
    }

    /// Check if this is a directory entry
    #[inline]
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.file_type, FileType::Directory)
    }

    /// Check if this is a file entry
    #[inline]
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.file_type, FileType::File)
    }
}
