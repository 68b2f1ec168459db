//! Random 256-bit identifiers.
//!
//! Token ids are drawn from an [`EntropySource`]. The default source is the
//! operating system CSPRNG; tests can inject a deterministic source without
//! touching the production path.

use alloy_primitives::U256;
use rand::RngCore;

use crate::error::EntropyError;

/// Provider of cryptographically secure random bytes.
///
/// Implementations must either fill `dest` completely or fail. Falling back
/// to a weaker generator is not allowed.
pub trait EntropySource: Send + Sync {
    /// Fill `dest` with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

/// Entropy from the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        RngCore::try_fill_bytes(&mut rand::rngs::OsRng, dest)
            .map_err(|e| EntropyError(e.to_string()))
    }
}

/// Draw a uniformly distributed `uint256` from the OS CSPRNG.
///
/// # Example
///
/// ```
/// let a = relay_kit::random_uint256().unwrap();
/// let b = relay_kit::random_uint256().unwrap();
/// assert_ne!(a, b);
/// ```
pub fn random_uint256() -> Result<U256, EntropyError> {
    random_uint256_from(&OsEntropy)
}

/// Draw a `uint256` from the given source.
///
/// Exactly 32 bytes are drawn; byte `i` contributes `byte[i] * 256^i`.
pub fn random_uint256_from(source: &(impl EntropySource + ?Sized)) -> Result<U256, EntropyError> {
    let mut bytes = [0u8; 32];
    source.fill_bytes(&mut bytes)?;
    Ok(U256::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FixedEntropy([u8; 32]);

    impl EntropySource for FixedEntropy {
        fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
            dest.copy_from_slice(&self.0[..dest.len()]);
            Ok(())
        }
    }

    struct Unavailable;

    impl EntropySource for Unavailable {
        fn fill_bytes(&self, _dest: &mut [u8]) -> Result<(), EntropyError> {
            Err(EntropyError("device not present".into()))
        }
    }

    #[test]
    fn test_little_endian_composition() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x2a;
        bytes[1] = 0x01;
        let value = random_uint256_from(&FixedEntropy(bytes)).unwrap();
        assert_eq!(value, U256::from(0x012au64));
    }

    #[test]
    fn test_last_byte_is_most_significant() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x80;
        let value = random_uint256_from(&FixedEntropy(bytes)).unwrap();
        assert_eq!(value, U256::from(1u8) << 255usize);
    }

    #[test]
    fn test_all_ones_is_max() {
        let value = random_uint256_from(&FixedEntropy([0xff; 32])).unwrap();
        assert_eq!(value, U256::MAX);
    }

    #[test]
    fn test_unavailable_source_fails() {
        let err = random_uint256_from(&Unavailable).unwrap_err();
        assert_eq!(err, EntropyError("device not present".into()));
    }

    #[test]
    fn test_no_repeats_in_sample() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let value = random_uint256().unwrap();
            assert!(seen.insert(value), "duplicate draw: {value}");
        }
    }

    #[test]
    fn test_byte_distribution_is_unbiased() {
        const DRAWS: usize = 10_000;
        let mut counts = [[0u32; 256]; 32];

        for _ in 0..DRAWS {
            let bytes: [u8; 32] = random_uint256().unwrap().to_le_bytes();
            for (position, byte) in bytes.iter().enumerate() {
                counts[position][*byte as usize] += 1;
            }
        }

        // 255 degrees of freedom: mean 255, sd ~22.6. 420 is > 7 sd out.
        let expected = DRAWS as f64 / 256.0;
        for (position, bins) in counts.iter().enumerate() {
            let chi_square: f64 = bins
                .iter()
                .map(|&observed| {
                    let diff = observed as f64 - expected;
                    diff * diff / expected
                })
                .sum();
            assert!(
                chi_square < 420.0,
                "byte {position} looks biased: chi-square {chi_square:.1}"
            );
        }
    }
}
