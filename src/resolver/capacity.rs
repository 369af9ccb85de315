//! Required Volume Size
//!
//! Collapses a capacity range into the byte count to request. Step rounding
//! and the per-type maximum are applied by the caller.

use crate::domain::capacity::CapacityRange;
use crate::error::{Error, Result};

/// Byte count to request for a capacity range.
///
/// Without a range the result is 0 and the caller applies its own minimum.
/// A required size above a positive limit is an error, never clamped.
pub fn required_bytes(range: Option<&CapacityRange>) -> Result<i64> {
    let Some(range) = range else {
        return Ok(0);
    };

    let required = range.required_bytes.max(0);
    if range.limit_bytes > 0 && required > range.limit_bytes {
        return Err(Error::CapacityRangeInvalid {
            required,
            limit: range.limit_bytes,
        });
    }
    Ok(required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capacity::GIB;
    use assert_matches::assert_matches;

    #[test]
    fn test_no_range() {
        assert_eq!(required_bytes(None).unwrap(), 0);
    }

    #[test]
    fn test_required_only() {
        let range = CapacityRange::required(10 * GIB);
        assert_eq!(required_bytes(Some(&range)).unwrap(), 10 * GIB);
    }

    #[test]
    fn test_within_limit() {
        let range = CapacityRange::new(10 * GIB, 20 * GIB);
        assert_eq!(required_bytes(Some(&range)).unwrap(), 10 * GIB);

        let exact = CapacityRange::new(20 * GIB, 20 * GIB);
        assert_eq!(required_bytes(Some(&exact)).unwrap(), 20 * GIB);
    }

    #[test]
    fn test_required_exceeds_limit() {
        let range = CapacityRange::new(10 * GIB, 5 * GIB);
        assert_matches!(
            required_bytes(Some(&range)),
            Err(Error::CapacityRangeInvalid { required, limit })
                if required == 10 * GIB && limit == 5 * GIB
        );
    }

    #[test]
    fn test_zero_and_negative_bounds() {
        assert_eq!(required_bytes(Some(&CapacityRange::new(0, 0))).unwrap(), 0);
        assert_eq!(required_bytes(Some(&CapacityRange::new(-5, 0))).unwrap(), 0);
        assert_eq!(required_bytes(Some(&CapacityRange::new(0, 5 * GIB))).unwrap(), 0);
        // A non-positive limit means no limit
        assert_eq!(
            required_bytes(Some(&CapacityRange::new(10 * GIB, -1))).unwrap(),
            10 * GIB
        );
    }
}
