/*!
 * VFS Metadata
 * Per-node metadata exposed at the trait boundary
 */

use super::file_type::FileType;
use super::permissions::Permissions;
use serde::{Deserialize, Serialize};

/// File metadata
///
/// The namespace is rebuilt from scratch on every activation, so nodes
/// carry no timestamps; type, size and permissions are the whole story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Metadata {
    pub file_type: FileType,
    pub size: u64,
    pub permissions: Permissions,
}

impl Metadata {
    /// Check if this is a directory
    #[inline]
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.file_type, FileType::Directory)
    }

    /// Check if this is a regular file
    #[inline]
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self.file_type, FileType::File)
    }
}
