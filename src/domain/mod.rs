//! Domain layer - Values supplied by the provisioning service
//!
//! Topology and capacity are produced outside the resolver (node discovery
//! and the CreateVolume request); these types are what it consumes.

pub mod capacity;
pub mod topology;

pub use capacity::*;
pub use topology::*;
