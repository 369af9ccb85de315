//! Resolved Storage Class
//!
//! The validated outcome of resolving a storage class: everything the
//! controller needs for a create-volume call apart from the size.

use crate::error::{Error, Result};
use crate::registry::{InstanceType, SizeConstraint, VolumeType};
use crate::resolver::filesystem::{is_valid_fs_type, DEFAULT_FS_TYPE};
use crate::resolver::options::{OPTION_FS_TYPE, OPTION_REPLICA, OPTION_TAGS, OPTION_TYPE};
use serde::Serialize;
use std::collections::BTreeMap;

pub const SINGLE_REPLICA: u32 = 1;
pub const MULTI_REPLICA: u32 = 2;
pub const DEFAULT_REPLICA: u32 = MULTI_REPLICA;

/// Check if a replica count is supported by the backend
pub fn is_valid_replica(replica: i64) -> bool {
    replica == i64::from(SINGLE_REPLICA) || replica == i64::from(MULTI_REPLICA)
}

/// Validated storage class configuration.
///
/// Fields are private so a value can only exist in a valid state: the
/// volume type is registered, the filesystem is supported and the replica
/// count is 1 or 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageClassConfig {
    volume_type: VolumeType,
    fs_type: String,
    replica: u32,
    tags: Vec<String>,
}

impl StorageClassConfig {
    /// Default configuration for a volume type
    pub fn for_volume_type(volume_type: VolumeType) -> Result<Self> {
        if !volume_type.is_valid() {
            return Err(Error::UnsupportedVolumeType {
                code: volume_type.code(),
            });
        }
        Ok(Self {
            volume_type,
            fs_type: DEFAULT_FS_TYPE.to_string(),
            replica: DEFAULT_REPLICA,
            tags: Vec::new(),
        })
    }

    pub fn volume_type(&self) -> VolumeType {
        self.volume_type
    }

    pub fn fs_type(&self) -> &str {
        &self.fs_type
    }

    pub fn replica(&self) -> u32 {
        self.replica
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Size granularity of the resolved volume type
    pub fn size_constraint(&self) -> Option<SizeConstraint> {
        self.volume_type.size_constraint()
    }

    /// Check if volumes of this class can attach to an instance type
    pub fn is_attachable_to(&self, instance: InstanceType) -> bool {
        self.volume_type.is_attachable_to(instance)
    }

    /// Render the semantic fields back into storage class parameters.
    ///
    /// Resolving the returned map yields a configuration equal to `self`.
    pub fn to_parameters(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert(OPTION_TYPE.to_string(), self.volume_type.code().to_string());
        params.insert(OPTION_FS_TYPE.to_string(), self.fs_type.clone());
        params.insert(OPTION_REPLICA.to_string(), self.replica.to_string());
        if !self.tags.is_empty() {
            params.insert(OPTION_TAGS.to_string(), self.tags.join(","));
        }
        params
    }

    pub(crate) fn set_fs_type(&mut self, fs_type: &str) -> Result<()> {
        if !is_valid_fs_type(fs_type) {
            return Err(Error::UnsupportedFilesystem {
                fs_type: fs_type.to_string(),
            });
        }
        self.fs_type = fs_type.to_string();
        Ok(())
    }

    pub(crate) fn set_replica(&mut self, replica: i64) -> Result<()> {
        if !is_valid_replica(replica) {
            return Err(Error::UnsupportedReplica { replica });
        }
        self.replica = replica as u32;
        Ok(())
    }

    pub(crate) fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }
}
