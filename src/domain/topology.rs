//! Node Topology
//!
//! The plugin advertises each node's zone and instance class as CSI
//! topology segments. The resolver only needs the instance type, but the
//! whole descriptor round-trips through the segment map.

use crate::error::{Error, Result};
use crate::registry::InstanceType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Segment key holding the instance type name
pub const TOPOLOGY_INSTANCE_TYPE_KEY: &str = "topology.disk.csi.qingcloud.com/instance-type";

/// Segment key holding the zone
pub const TOPOLOGY_ZONE_KEY: &str = "topology.disk.csi.qingcloud.com/zone";

/// Where a volume is going to be attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    /// Instance class of the consuming node
    pub instance_type: InstanceType,
    /// Availability zone, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl Topology {
    pub fn new(instance_type: InstanceType) -> Self {
        Self {
            instance_type,
            zone: None,
        }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn instance_type(&self) -> InstanceType {
        self.instance_type
    }

    /// Decode a topology from CSI segments.
    ///
    /// The instance type segment is required and must carry a registered
    /// name; the zone segment is optional.
    pub fn from_segments(segments: &BTreeMap<String, String>) -> Result<Self> {
        let name = segments.get(TOPOLOGY_INSTANCE_TYPE_KEY).ok_or_else(|| {
            Error::Configuration(format!("topology missing {}", TOPOLOGY_INSTANCE_TYPE_KEY))
        })?;
        let instance_type = InstanceType::from_name(name).ok_or_else(|| {
            Error::Configuration(format!("unknown instance type {:?} in topology", name))
        })?;

        Ok(Self {
            instance_type,
            zone: segments.get(TOPOLOGY_ZONE_KEY).cloned(),
        })
    }

    /// Encode as CSI segments. Unregistered instance types are left out.
    pub fn to_segments(&self) -> BTreeMap<String, String> {
        let mut segments = BTreeMap::new();
        if self.instance_type.is_valid() {
            segments.insert(
                TOPOLOGY_INSTANCE_TYPE_KEY.to_string(),
                self.instance_type.name().to_string(),
            );
        }
        if let Some(zone) = &self.zone {
            segments.insert(TOPOLOGY_ZONE_KEY.to_string(), zone.clone());
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_segments_roundtrip() {
        let topology = Topology::new(InstanceType::ENTERPRISE1).with_zone("pek3a");
        let segments = topology.to_segments();

        assert_eq!(
            segments.get(TOPOLOGY_INSTANCE_TYPE_KEY).map(String::as_str),
            Some("Enterprise1")
        );
        assert_eq!(Topology::from_segments(&segments).unwrap(), topology);
    }

    #[test]
    fn test_from_segments_without_zone() {
        let mut segments = BTreeMap::new();
        segments.insert(TOPOLOGY_INSTANCE_TYPE_KEY.to_string(), "Standard".to_string());

        let topology = Topology::from_segments(&segments).unwrap();
        assert_eq!(topology.instance_type(), InstanceType::STANDARD);
        assert_eq!(topology.zone, None);

        segments.insert(TOPOLOGY_INSTANCE_TYPE_KEY.to_string(), "enterprise2".to_string());
        let topology = Topology::from_segments(&segments).unwrap();
        assert_eq!(topology.instance_type(), InstanceType::ENTERPRISE2);
    }

    #[test]
    fn test_from_segments_rejects_missing_or_unknown() {
        let mut segments = BTreeMap::new();
        segments.insert(TOPOLOGY_ZONE_KEY.to_string(), "sh1a".to_string());
        assert_matches!(
            Topology::from_segments(&segments),
            Err(Error::Configuration(_))
        );

        segments.insert(TOPOLOGY_INSTANCE_TYPE_KEY.to_string(), "Mainframe".to_string());
        assert_matches!(
            Topology::from_segments(&segments),
            Err(Error::Configuration(_))
        );
    }

    #[test]
    fn test_unregistered_instance_not_encoded() {
        let segments = Topology::new(InstanceType(999)).with_zone("gd2").to_segments();
        assert_eq!(segments.len(), 1);
        assert!(segments.contains_key(TOPOLOGY_ZONE_KEY));
    }
}
