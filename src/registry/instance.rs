//! Instance Types
//!
//! Compute instance classes a volume can be attached to. Node topology
//! reports the instance type by name, so the table maps both ways.

use serde::{Deserialize, Serialize};

/// Numeric instance class code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceType(pub i64);

impl InstanceType {
    pub const HIGH_PERFORMANCE: InstanceType = InstanceType(0);
    pub const SUPER_HIGH_PERFORMANCE: InstanceType = InstanceType(1);
    pub const SUPER_HIGH_PERFORMANCE_SAN: InstanceType = InstanceType(6);
    pub const HIGH_PERFORMANCE_SAN: InstanceType = InstanceType(7);
    pub const STANDARD: InstanceType = InstanceType(101);
    pub const ENTERPRISE1: InstanceType = InstanceType(201);
    pub const ENTERPRISE2: InstanceType = InstanceType(202);
    pub const ENTERPRISE_COMPUTE3: InstanceType = InstanceType(203);
    pub const PREMIUM: InstanceType = InstanceType(301);

    pub fn code(self) -> i64 {
        self.0
    }

    /// Check if the code has a registry entry
    pub fn is_valid(self) -> bool {
        INSTANCE_TYPES.iter().any(|(t, _)| *t == self)
    }

    /// Display name, or an empty string for an unregistered code
    pub fn name(self) -> &'static str {
        INSTANCE_TYPES
            .iter()
            .find(|(t, _)| *t == self)
            .map(|(_, name)| *name)
            .unwrap_or("")
    }

    /// Look up an instance type by registered name (case-insensitive)
    pub fn from_name(name: &str) -> Option<InstanceType> {
        INSTANCE_TYPES
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(t, _)| *t)
    }
}

impl std::fmt::Display for InstanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            "" => write!(f, "Unknown({})", self.0),
            name => write!(f, "{}", name),
        }
    }
}

/// Accepts a registered name or any integer code.
///
/// Unregistered codes are allowed through: a node may run on an instance
/// class newer than this table, and the resolver falls back for those.
impl std::str::FromStr for InstanceType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(t) = InstanceType::from_name(s) {
            return Ok(t);
        }
        s.trim()
            .parse()
            .map(InstanceType)
            .map_err(|_| crate::error::Error::Configuration(format!("unknown instance type {:?}", s)))
    }
}

use InstanceType as I;

pub(crate) static INSTANCE_TYPES: &[(InstanceType, &str)] = &[
    (I::HIGH_PERFORMANCE, "HighPerformance"),
    (I::SUPER_HIGH_PERFORMANCE, "SuperHighPerformance"),
    (I::SUPER_HIGH_PERFORMANCE_SAN, "SuperHighPerformanceSAN"),
    (I::HIGH_PERFORMANCE_SAN, "HighPerformanceSAN"),
    (I::STANDARD, "Standard"),
    (I::ENTERPRISE1, "Enterprise1"),
    (I::ENTERPRISE2, "Enterprise2"),
    (I::ENTERPRISE_COMPUTE3, "EnterpriseCompute3"),
    (I::PREMIUM, "Premium"),
];

/// All registered instance types, in table order
pub fn registered_instance_types() -> impl Iterator<Item = InstanceType> {
    INSTANCE_TYPES.iter().map(|(t, _)| *t)
}
