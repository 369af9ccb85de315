//! Filesystems the node plugin can format a volume with

pub const FS_EXT3: &str = "ext3";
pub const FS_EXT4: &str = "ext4";
pub const FS_XFS: &str = "xfs";

pub const DEFAULT_FS_TYPE: &str = FS_EXT4;

pub const SUPPORTED_FILESYSTEMS: &[&str] = &[FS_EXT3, FS_EXT4, FS_XFS];

/// Check if a filesystem name is supported (exact, case-sensitive match)
pub fn is_valid_fs_type(fs_type: &str) -> bool {
    SUPPORTED_FILESYSTEMS.contains(&fs_type)
}
