//! Volume Types
//!
//! The block storage media offered by the cloud, each with its own display
//! name and size granularity. A code is valid only if it has a row in
//! [`VOLUME_TYPES`]; there is no range check.

use crate::domain::capacity::GIB;
use crate::registry::instance::InstanceType;
use serde::{Deserialize, Serialize};

// =============================================================================
// Volume Type
// =============================================================================

/// Numeric volume type code as used by the cloud's create-volume API
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolumeType(pub i64);

impl VolumeType {
    pub const HIGH_PERFORMANCE: VolumeType = VolumeType(0);
    pub const HIGH_CAPACITY: VolumeType = VolumeType(2);
    pub const SUPER_HIGH_PERFORMANCE: VolumeType = VolumeType(3);
    pub const NEONSAN: VolumeType = VolumeType(5);
    pub const NEONSAN_HDD: VolumeType = VolumeType(6);
    pub const STANDARD: VolumeType = VolumeType(100);
    pub const SSD_ENTERPRISE: VolumeType = VolumeType(200);

    /// Raw numeric code
    pub fn code(self) -> i64 {
        self.0
    }

    /// Check if the code has a registry entry
    pub fn is_valid(self) -> bool {
        self.spec().is_some()
    }

    /// Display name, or an empty string for an unregistered code
    pub fn name(self) -> &'static str {
        self.spec().map(|s| s.name).unwrap_or("")
    }

    /// Size granularity and upper bound
    pub fn size_constraint(self) -> Option<SizeConstraint> {
        self.spec().map(|s| s.size)
    }

    /// Instance types this volume type may be attached to
    pub fn compatible_instance_types(self) -> &'static [InstanceType] {
        self.spec().map(|s| s.attachable_to).unwrap_or(&[])
    }

    /// Check if a volume of this type can be attached to an instance type
    pub fn is_attachable_to(self, instance: InstanceType) -> bool {
        self.compatible_instance_types().contains(&instance)
    }

    /// Look up a registered volume type by display name (case-insensitive)
    pub fn from_name(name: &str) -> Option<VolumeType> {
        VOLUME_TYPES
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.volume_type)
    }

    pub(crate) fn spec(self) -> Option<&'static VolumeTypeSpec> {
        VOLUME_TYPES.iter().find(|s| s.volume_type == self)
    }
}

impl std::fmt::Display for VolumeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.spec() {
            Some(spec) => write!(f, "{}", spec.name),
            None => write!(f, "Unknown({})", self.0),
        }
    }
}

/// Accepts a registered name or a registered numeric code
impl std::str::FromStr for VolumeType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(t) = VolumeType::from_name(s) {
            return Ok(t);
        }
        let code: i64 = s
            .trim()
            .parse()
            .map_err(|e| crate::error::Error::malformed("type", s, e))?;
        let t = VolumeType(code);
        if !t.is_valid() {
            return Err(crate::error::Error::UnsupportedVolumeType { code });
        }
        Ok(t)
    }
}

// =============================================================================
// Size Constraint
// =============================================================================

/// Size granularity of a volume type, in GB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeConstraint {
    /// Smallest increment a volume can grow by
    pub step_gb: u32,
    /// Largest volume the cloud will create
    pub max_gb: u32,
}

impl SizeConstraint {
    pub fn step_bytes(&self) -> i64 {
        i64::from(self.step_gb) * GIB
    }

    pub fn max_bytes(&self) -> i64 {
        i64::from(self.max_gb) * GIB
    }
}

// =============================================================================
// Volume Type Table
// =============================================================================

/// One row of the volume type table
#[derive(Debug)]
pub(crate) struct VolumeTypeSpec {
    pub volume_type: VolumeType,
    pub name: &'static str,
    pub size: SizeConstraint,
    pub attachable_to: &'static [InstanceType],
}

const fn size(step_gb: u32, max_gb: u32) -> SizeConstraint {
    SizeConstraint { step_gb, max_gb }
}

use InstanceType as I;

// https://docs.qingcloud.com/product/api/action/volume/create_volumes.html
pub(crate) static VOLUME_TYPES: &[VolumeTypeSpec] = &[
    VolumeTypeSpec {
        volume_type: VolumeType::HIGH_PERFORMANCE,
        name: "HighPerformance",
        size: size(10, 2000),
        attachable_to: &[I::HIGH_PERFORMANCE, I::STANDARD],
    },
    VolumeTypeSpec {
        volume_type: VolumeType::HIGH_CAPACITY,
        name: "HighCapacity",
        size: size(50, 5000),
        attachable_to: &[
            I::HIGH_PERFORMANCE,
            I::SUPER_HIGH_PERFORMANCE,
            I::STANDARD,
            I::ENTERPRISE1,
            I::ENTERPRISE2,
            I::ENTERPRISE_COMPUTE3,
            I::PREMIUM,
        ],
    },
    VolumeTypeSpec {
        volume_type: VolumeType::SUPER_HIGH_PERFORMANCE,
        name: "SuperHighPerformance",
        size: size(10, 2000),
        attachable_to: &[
            I::SUPER_HIGH_PERFORMANCE,
            I::ENTERPRISE1,
            I::ENTERPRISE2,
            I::ENTERPRISE_COMPUTE3,
            I::PREMIUM,
        ],
    },
    VolumeTypeSpec {
        volume_type: VolumeType::NEONSAN,
        name: "NeonSAN",
        size: size(100, 50000),
        attachable_to: &[
            I::HIGH_PERFORMANCE,
            I::SUPER_HIGH_PERFORMANCE,
            I::SUPER_HIGH_PERFORMANCE_SAN,
            I::STANDARD,
            I::ENTERPRISE1,
            I::ENTERPRISE2,
            I::ENTERPRISE_COMPUTE3,
            I::PREMIUM,
        ],
    },
    VolumeTypeSpec {
        volume_type: VolumeType::NEONSAN_HDD,
        name: "NeonSANHDD",
        size: size(100, 50000),
        attachable_to: &[
            I::HIGH_PERFORMANCE,
            I::SUPER_HIGH_PERFORMANCE,
            I::HIGH_PERFORMANCE_SAN,
            I::STANDARD,
            I::ENTERPRISE1,
            I::ENTERPRISE2,
            I::ENTERPRISE_COMPUTE3,
            I::PREMIUM,
        ],
    },
    VolumeTypeSpec {
        volume_type: VolumeType::STANDARD,
        name: "Standard",
        size: size(10, 2000),
        attachable_to: &[I::HIGH_PERFORMANCE, I::STANDARD],
    },
    VolumeTypeSpec {
        volume_type: VolumeType::SSD_ENTERPRISE,
        name: "SSDEnterprise",
        size: size(10, 2000),
        attachable_to: &[
            I::SUPER_HIGH_PERFORMANCE,
            I::ENTERPRISE1,
            I::ENTERPRISE2,
            I::ENTERPRISE_COMPUTE3,
            I::PREMIUM,
        ],
    },
];

/// All registered volume types, in table order
pub fn registered_volume_types() -> impl Iterator<Item = VolumeType> {
    VOLUME_TYPES.iter().map(|s| s.volume_type)
}
