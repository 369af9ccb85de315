//! Compatibility Matrix
//!
//! Which volume types attach to which instance types, and which volume type
//! each instance type prefers when a storage class leaves `type` unset.

use crate::registry::instance::InstanceType;
use crate::registry::volume::{VolumeType, VOLUME_TYPES};
use serde::Serialize;

use InstanceType as I;
use VolumeType as V;

/// Instance type to preferred volume type
pub(crate) static ATTACH_PREFERRED: &[(InstanceType, VolumeType)] = &[
    (I::HIGH_PERFORMANCE, V::HIGH_PERFORMANCE),
    (I::SUPER_HIGH_PERFORMANCE, V::SUPER_HIGH_PERFORMANCE),
    (I::SUPER_HIGH_PERFORMANCE_SAN, V::NEONSAN),
    (I::HIGH_PERFORMANCE_SAN, V::NEONSAN),
    (I::STANDARD, V::STANDARD),
    (I::ENTERPRISE1, V::SSD_ENTERPRISE),
    (I::ENTERPRISE2, V::SSD_ENTERPRISE),
    (I::ENTERPRISE_COMPUTE3, V::SSD_ENTERPRISE),
    (I::PREMIUM, V::SSD_ENTERPRISE),
];

/// Preferred volume type for an instance type.
///
/// `None` tells the caller to fall back to its global default.
pub fn preferred_volume_type(instance: InstanceType) -> Option<VolumeType> {
    ATTACH_PREFERRED
        .iter()
        .find(|(i, _)| *i == instance)
        .map(|(_, v)| *v)
}

/// Volume types that may be attached to an instance type, in table order
pub fn attachable_volume_types(instance: InstanceType) -> Vec<VolumeType> {
    VOLUME_TYPES
        .iter()
        .filter(|s| s.attachable_to.contains(&instance))
        .map(|s| s.volume_type)
        .collect()
}

// =============================================================================
// Matrix Snapshot
// =============================================================================

/// Flattened view of one volume type row, for display and export
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixEntry {
    pub volume_type: VolumeType,
    pub name: &'static str,
    pub step_gb: u32,
    pub max_gb: u32,
    pub compatible_instance_types: Vec<&'static str>,
}

/// Snapshot of the whole volume table
pub fn matrix() -> Vec<MatrixEntry> {
    VOLUME_TYPES
        .iter()
        .map(|s| MatrixEntry {
            volume_type: s.volume_type,
            name: s.name,
            step_gb: s.size.step_gb,
            max_gb: s.size.max_gb,
            compatible_instance_types: s.attachable_to.iter().map(|i| i.name()).collect(),
        })
        .collect()
}
