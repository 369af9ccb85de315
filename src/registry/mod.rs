//! Type Registry
//!
//! Static tables describing the cloud's volume types, instance types and the
//! attach matrix between them. The tables are `static` data: adding a new
//! type is a new row, never a new branch, and they can be read from any
//! number of threads without synchronization.

pub mod compatibility;
pub mod instance;
pub mod volume;

pub use compatibility::*;
pub use instance::*;
pub use volume::*;

/// Check if a volume type code is registered
pub fn is_valid_volume_type(v: VolumeType) -> bool {
    v.is_valid()
}

/// Check if an instance type code is registered
pub fn is_valid_instance_type(i: InstanceType) -> bool {
    i.is_valid()
}

/// Display name of a volume type; empty when unregistered
pub fn volume_type_name(v: VolumeType) -> &'static str {
    v.name()
}

/// Instance types a volume type may attach to.
///
/// An empty slice is a legitimate answer for a registered type (nothing may
/// attach) as well as the answer for an unregistered one.
pub fn compatible_instance_types(v: VolumeType) -> &'static [InstanceType] {
    v.compatible_instance_types()
}

/// Check if a volume type may attach to an instance type
pub fn is_attachable(v: VolumeType, i: InstanceType) -> bool {
    v.is_attachable_to(i)
}

/// Step and max size of a volume type; `None` when unregistered
pub fn size_constraint(v: VolumeType) -> Option<SizeConstraint> {
    v.size_constraint()
}
