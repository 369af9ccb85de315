//! Storage Class Resolver
//!
//! Turns a storage class parameter map plus optional node topology into a
//! [`StorageClassConfig`]. Recognized keys:
//!
//! | Key | Value | Default |
//! |-----------|----------------------------------|------------------------------------|
//! | `type` | integer volume type code | topology preference, then default |
//! | `fsType` | `ext3`, `ext4` or `xfs` | `ext4` (also for an empty value) |
//! | `replica` | `1` or `2` | `2` |
//! | `tags` | comma separated tag ids | none |
//!
//! Each key is validated on its own, so the result never depends on map
//! iteration order. Resolution is all-or-nothing.

pub mod capacity;
pub mod filesystem;
pub mod options;
pub mod storage_class;

pub use capacity::*;
pub use filesystem::*;
pub use options::*;
pub use storage_class::*;

use crate::domain::topology::Topology;
use crate::error::{Error, Result};
use crate::registry::{preferred_volume_type, VolumeType};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// =============================================================================
// Resolver Configuration
// =============================================================================

/// Defaults applied when a storage class leaves a key unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverConfig {
    /// Volume type used when neither the class nor the topology picks one
    pub default_volume_type: VolumeType,
    /// Filesystem used when `fsType` is unset or empty
    pub default_fs_type: String,
    /// Replica count used when `replica` is unset
    pub default_replica: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_volume_type: VolumeType::STANDARD,
            default_fs_type: DEFAULT_FS_TYPE.to_string(),
            default_replica: DEFAULT_REPLICA,
        }
    }
}

impl ResolverConfig {
    /// Check that every default would itself pass validation
    pub fn validate(&self) -> Result<()> {
        if !self.default_volume_type.is_valid() {
            return Err(Error::Configuration(format!(
                "default volume type {} is not registered",
                self.default_volume_type.code()
            )));
        }
        if !is_valid_fs_type(&self.default_fs_type) {
            return Err(Error::Configuration(format!(
                "default filesystem {:?} is not supported",
                self.default_fs_type
            )));
        }
        if !is_valid_replica(i64::from(self.default_replica)) {
            return Err(Error::Configuration(format!(
                "default replica {} is not supported",
                self.default_replica
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves storage class parameters against the type registry
#[derive(Debug, Clone, Default)]
pub struct StorageClassResolver {
    config: ResolverConfig,
}

impl StorageClassResolver {
    /// Create a resolver with the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with custom defaults
    pub fn with_config(config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve storage class parameters into a validated configuration
    pub fn resolve<I, K, V>(
        &self,
        options: I,
        topology: Option<&Topology>,
    ) -> Result<StorageClassConfig>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let raw = RawOptions::collect(options)?;

        let volume_type = match raw.get(OptionKey::VolumeType) {
            Some(value) => {
                let code = parse_int(OptionKey::VolumeType, value)?;
                VolumeType(code)
            }
            None => self.default_volume_type(topology),
        };

        let mut sc = StorageClassConfig::for_volume_type(volume_type)?;
        sc.set_fs_type(&self.config.default_fs_type)?;
        sc.set_replica(i64::from(self.config.default_replica))?;

        match raw.get(OptionKey::FsType) {
            Some(fs_type) if !fs_type.is_empty() => sc.set_fs_type(fs_type)?,
            _ => {}
        }

        if let Some(value) = raw.get(OptionKey::Replica) {
            sc.set_replica(parse_int(OptionKey::Replica, value)?)?;
        }

        if let Some(value) = raw.get(OptionKey::Tags) {
            sc.set_tags(parse_tags(value));
        }

        debug!(
            volume_type = %sc.volume_type(),
            fs_type = sc.fs_type(),
            replica = sc.replica(),
            tags = sc.tags().len(),
            "Resolved storage class"
        );

        Ok(sc)
    }

    /// Volume type for a class without an explicit `type`
    fn default_volume_type(&self, topology: Option<&Topology>) -> VolumeType {
        let default = self.config.default_volume_type;
        let Some(topology) = topology else {
            return default;
        };

        match preferred_volume_type(topology.instance_type()) {
            Some(preferred) => preferred,
            None => {
                info!(
                    instance_type = topology.instance_type().code(),
                    fallback = %default,
                    "No preferred volume type for instance type, falling back to default"
                );
                default
            }
        }
    }
}

/// Resolve with the built-in defaults
pub fn resolve<I, K, V>(options: I, topology: Option<&Topology>) -> Result<StorageClassConfig>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    StorageClassResolver::new().resolve(options, topology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InstanceType;
    use assert_matches::assert_matches;
    use std::collections::{BTreeMap, HashMap};

    fn opts(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_empty() {
        let sc = resolve(&opts(&[]), None).unwrap();
        assert_eq!(sc.volume_type(), VolumeType::STANDARD);
        assert_eq!(sc.fs_type(), DEFAULT_FS_TYPE);
        assert_eq!(sc.replica(), 2);
        assert!(sc.tags().is_empty());
    }

    #[test]
    fn test_resolve_full() {
        let options = opts(&[
            ("type", "100"),
            ("fsType", "ext4"),
            ("replica", "1"),
            ("tags", "a, b ,c"),
        ]);
        let sc = resolve(&options, None).unwrap();
        assert_eq!(sc.volume_type(), VolumeType::STANDARD);
        assert_eq!(sc.fs_type(), "ext4");
        assert_eq!(sc.replica(), 1);
        assert_eq!(sc.tags(), ["a", "b", "c"]);
    }

    #[test]
    fn test_resolve_case_insensitive_keys() {
        let options = opts(&[("TYPE", "5"), ("FSTYPE", "xfs"), ("Replica", "1"), ("Tags", "t1")]);
        let sc = resolve(&options, None).unwrap();
        assert_eq!(sc.volume_type(), VolumeType::NEONSAN);
        assert_eq!(sc.fs_type(), "xfs");
        assert_eq!(sc.replica(), 1);
        assert_eq!(sc.tags(), ["t1"]);
    }

    #[test]
    fn test_resolve_values_case_sensitive() {
        assert_matches!(
            resolve(&opts(&[("fsType", "XFS")]), None),
            Err(Error::UnsupportedFilesystem { fs_type }) if fs_type == "XFS"
        );
    }

    #[test]
    fn test_resolve_unknown_keys_ignored() {
        let options = opts(&[("maxSize", "5000"), ("stepSize", "10"), ("encrypted", "yes")]);
        assert_eq!(resolve(&options, None).unwrap(), resolve(&opts(&[]), None).unwrap());
    }

    #[test]
    fn test_resolve_unsupported_volume_type() {
        assert_matches!(
            resolve(&opts(&[("type", "9999")]), None),
            Err(Error::UnsupportedVolumeType { code: 9999 })
        );
        assert_matches!(
            resolve(&opts(&[("type", "-1")]), None),
            Err(Error::UnsupportedVolumeType { code: -1 })
        );
    }

    #[test]
    fn test_resolve_malformed_volume_type() {
        let err = resolve(&opts(&[("type", "Standard")]), None).unwrap_err();
        assert_matches!(&err, Error::MalformedOption { option, value, .. }
            if option == "type" && value == "Standard");
        assert_eq!(err.option(), Some("type"));
    }

    #[test]
    fn test_resolve_explicit_type_beats_topology() {
        let topology = Topology::new(InstanceType::PREMIUM);
        let sc = resolve(&opts(&[("type", "2")]), Some(&topology)).unwrap();
        assert_eq!(sc.volume_type(), VolumeType::HIGH_CAPACITY);
    }

    #[test]
    fn test_resolve_filesystem() {
        let sc = resolve(&opts(&[("fsType", "")]), None).unwrap();
        assert_eq!(sc.fs_type(), DEFAULT_FS_TYPE);

        let sc = resolve(&opts(&[("fsType", "ext3")]), None).unwrap();
        assert_eq!(sc.fs_type(), "ext3");

        assert_matches!(
            resolve(&opts(&[("fsType", "btrfs")]), None),
            Err(Error::UnsupportedFilesystem { .. })
        );
    }

    #[test]
    fn test_resolve_replica() {
        assert_matches!(
            resolve(&opts(&[("replica", "3")]), None),
            Err(Error::UnsupportedReplica { replica: 3 })
        );
        assert_matches!(
            resolve(&opts(&[("replica", "0")]), None),
            Err(Error::UnsupportedReplica { replica: 0 })
        );
        assert_matches!(
            resolve(&opts(&[("replica", "one")]), None),
            Err(Error::MalformedOption { .. })
        );
        assert_matches!(
            resolve(&opts(&[("replica", "")]), None),
            Err(Error::MalformedOption { .. })
        );
        assert_eq!(resolve(&opts(&[("replica", "2")]), None).unwrap().replica(), 2);
    }

    #[test]
    fn test_resolve_tags() {
        let sc = resolve(&opts(&[("tags", "")]), None).unwrap();
        assert!(sc.tags().is_empty());

        let sc = resolve(&opts(&[("tags", "tag-b, tag-a, tag-b")]), None).unwrap();
        assert_eq!(sc.tags(), ["tag-b", "tag-a", "tag-b"]);
    }

    #[test]
    fn test_resolve_topology_preference() {
        let cases = [
            (InstanceType::HIGH_PERFORMANCE, VolumeType::HIGH_PERFORMANCE),
            (InstanceType::SUPER_HIGH_PERFORMANCE, VolumeType::SUPER_HIGH_PERFORMANCE),
            (InstanceType::SUPER_HIGH_PERFORMANCE_SAN, VolumeType::NEONSAN),
            (InstanceType::STANDARD, VolumeType::STANDARD),
            (InstanceType::ENTERPRISE2, VolumeType::SSD_ENTERPRISE),
        ];
        for (instance, expected) in cases {
            let topology = Topology::new(instance);
            let sc = resolve(&opts(&[]), Some(&topology)).unwrap();
            assert_eq!(sc.volume_type(), expected, "{instance}");
        }
    }

    #[test]
    fn test_resolve_unregistered_topology_falls_back() {
        let topology = Topology::new(InstanceType(12345));
        let sc = resolve(&opts(&[]), Some(&topology)).unwrap();
        assert_eq!(sc.volume_type(), VolumeType::STANDARD);

        let sc = resolve(&opts(&[("fsType", "xfs")]), Some(&topology)).unwrap();
        assert_eq!(sc.volume_type(), VolumeType::STANDARD);
        assert_eq!(sc.fs_type(), "xfs");
    }

    #[test]
    fn test_resolve_is_all_or_nothing() {
        let options = opts(&[("type", "100"), ("fsType", "xfs"), ("replica", "7")]);
        assert!(resolve(&options, None).is_err());
    }

    #[test]
    fn test_resolve_order_independent() {
        let pairs = [
            ("tags", "x,y"),
            ("replica", "1"),
            ("fsType", "xfs"),
            ("type", "200"),
            ("unknown", "z"),
        ];
        let forward = resolve(pairs, None).unwrap();
        let mut reversed = pairs;
        reversed.reverse();
        assert_eq!(resolve(reversed, None).unwrap(), forward);
    }

    #[test]
    fn test_resolve_idempotent_and_roundtrip() {
        let options = opts(&[("type", "6"), ("replica", "1"), ("tags", "a,,b")]);
        let first = resolve(&options, None).unwrap();
        let second = resolve(&options, None).unwrap();
        assert_eq!(first, second);

        let params: BTreeMap<String, String> = first.to_parameters();
        assert_eq!(resolve(&params, None).unwrap(), first);
    }

    #[test]
    fn test_custom_config() {
        let resolver = StorageClassResolver::with_config(ResolverConfig {
            default_volume_type: VolumeType::NEONSAN_HDD,
            default_fs_type: "xfs".to_string(),
            default_replica: 1,
        })
        .unwrap();

        let sc = resolver.resolve(&opts(&[]), None).unwrap();
        assert_eq!(sc.volume_type(), VolumeType::NEONSAN_HDD);
        assert_eq!(sc.fs_type(), "xfs");
        assert_eq!(sc.replica(), 1);

        let unknown = Topology::new(InstanceType(999));
        let sc = resolver.resolve(&opts(&[("fsType", "")]), Some(&unknown)).unwrap();
        assert_eq!(sc.volume_type(), VolumeType::NEONSAN_HDD);
        assert_eq!(sc.fs_type(), "xfs");
    }

    #[test]
    fn test_config_validation() {
        let bad_type = ResolverConfig {
            default_volume_type: VolumeType(1),
            ..Default::default()
        };
        assert_matches!(
            StorageClassResolver::with_config(bad_type),
            Err(Error::Configuration(_))
        );

        let bad_fs = ResolverConfig {
            default_fs_type: String::new(),
            ..Default::default()
        };
        assert_matches!(bad_fs.validate(), Err(Error::Configuration(_)));

        let bad_replica = ResolverConfig {
            default_replica: 3,
            ..Default::default()
        };
        assert_matches!(bad_replica.validate(), Err(Error::Configuration(_)));

        assert!(ResolverConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: ResolverConfig =
            serde_yaml::from_str("defaultVolumeType: 100\ndefaultFsType: xfs\n").unwrap();
        assert_eq!(config.default_volume_type, VolumeType::STANDARD);
        assert_eq!(config.default_fs_type, "xfs");
        assert_eq!(config.default_replica, DEFAULT_REPLICA);
    }
}
