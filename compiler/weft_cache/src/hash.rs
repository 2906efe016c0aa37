//! FNV-1a hashing over UTF-16 code units.

use crate::CodeUnit;

/// Parameters of the 32-bit FNV-1a hash.
///
/// Each code unit is folded in whole (`hash = (hash ^ unit) * prime`), not
/// byte by byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FnvParams {
    pub offset_basis: u32,
    pub prime: u32,
}

impl FnvParams {
    /// The standard 32-bit FNV-1a constants.
    pub const STANDARD: FnvParams = FnvParams {
        offset_basis: 0x811C_9DC5,
        prime: 0x0100_0193,
    };

    /// Hash a span of code units.
    #[inline]
    pub fn hash(&self, units: &[CodeUnit]) -> u32 {
        let mut hash = self.offset_basis;
        for &unit in units {
            hash = (hash ^ u32::from(unit)).wrapping_mul(self.prime);
        }
        hash
    }
}

impl Default for FnvParams {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_span_is_offset_basis() {
        assert_eq!(FnvParams::STANDARD.hash(&[]), 0x811C_9DC5);
    }

    #[test]
    fn single_ascii_unit_matches_reference() {
        // FNV-1a of the single byte 'a' is 0xE40C292C; ASCII code units fold identically.
        assert_eq!(FnvParams::STANDARD.hash(&[u16::from(b'a')]), 0xE40C_292C);
    }

    #[test]
    fn custom_params_change_hash() {
        let custom = FnvParams {
            offset_basis: 1,
            prime: 3,
        };
        assert_eq!(custom.hash(&[2]), 9);
    }
}
