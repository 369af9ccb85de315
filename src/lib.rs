//! Storage Class Resolver - Block storage provisioning rules
//!
//! Resolves storage class parameters and node topology into a validated
//! volume configuration for a cloud block-storage CSI plugin, and answers
//! which volume types may attach to which instance types.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                     Provisioning service (CSI controller)                    │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │   parameters {type, fsType, replica, tags}        topology {instance type}   │
//! │                    │                                       │                 │
//! │                    └───────────────────┬───────────────────┘                 │
//! │                                        ▼                                     │
//! │                        ┌───────────────────────────────┐                     │
//! │                        │     Storage Class Resolver    │                     │
//! │                        └───────────────┬───────────────┘                     │
//! │                                        │                                     │
//! │                        ┌───────────────┴───────────────┐                     │
//! │                        │         Type Registry         │                     │
//! │                        │  volume / instance / matrix   │                     │
//! │                        └───────────────────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: Static volume type, instance type and attach tables
//! - [`resolver`]: Storage class resolution and required size computation
//! - [`domain`]: Topology and capacity values supplied by the caller
//! - [`manifest`]: Reading parameters from StorageClass manifests
//! - [`error`]: Error types and handling

pub mod domain;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod resolver;

// Re-export commonly used types
pub use domain::{CapacityRange, Topology, GIB};

pub use error::{Error, Result};

pub use registry::{
    attachable_volume_types, compatible_instance_types, is_attachable, is_valid_instance_type,
    is_valid_volume_type, preferred_volume_type, size_constraint, volume_type_name,
    InstanceType, SizeConstraint, VolumeType,
};

pub use resolver::{
    required_bytes, resolve, ResolverConfig, StorageClassConfig, StorageClassResolver,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
