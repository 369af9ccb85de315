//! Capacity Range
//!
//! Mirrors the CSI `CapacityRange` message: a zero bound means "unset".

use serde::{Deserialize, Serialize};

pub const KIB: i64 = 1 << 10;
pub const MIB: i64 = 1 << 20;
pub const GIB: i64 = 1 << 30;

/// Requested capacity bounds of a create-volume call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityRange {
    /// Volume must be at least this large
    #[serde(default)]
    pub required_bytes: i64,
    /// Volume must not exceed this size
    #[serde(default)]
    pub limit_bytes: i64,
}

impl CapacityRange {
    pub fn new(required_bytes: i64, limit_bytes: i64) -> Self {
        Self {
            required_bytes,
            limit_bytes,
        }
    }

    pub fn required(required_bytes: i64) -> Self {
        Self::new(required_bytes, 0)
    }
}
