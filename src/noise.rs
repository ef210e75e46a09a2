//! Deterministic pseudo-noise for synthetic readings.
//!
//! Fallback data must be stable: the same coordinate and site label always
//! produce the same synthetic values, so repeated refresh cycles and tests
//! see identical output. Values are derived from a SHA-256 digest of the
//! inputs instead of a random number generator.

use sha2::{Digest, Sha256};

/// Deterministic value in `[0, 1)` derived from a seed string.
pub fn unit_noise(seed: &str) -> f64 {
    let digest = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    // 53 bits of mantissa keeps the quotient exactly representable.
    let value = u64::from_be_bytes(bytes) >> 11;
    value as f64 / (1u64 << 53) as f64
}

/// Deterministic value in `[min, max)` derived from a seed string.
pub fn range_noise(seed: &str, min: f64, max: f64) -> f64 {
    min + unit_noise(seed) * (max - min)
}

/// Seed string for a coordinate, quantized to a ~100 m grid cell.
///
/// Quantizing keeps jittery GPS inputs from producing different synthetic
/// sites on every refresh.
pub fn coordinate_seed(label: &str, lat: f64, lon: f64) -> String {
    format!("{}:{:.3}:{:.3}", label, lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_noise_is_stable() {
        assert_eq!(unit_noise("pm25:9.931:76.267"), unit_noise("pm25:9.931:76.267"));
    }

    #[test]
    fn test_unit_noise_in_range() {
        for seed in ["a", "b", "c", "Central Station", "Green Park:9.911:76.257"] {
            let value = unit_noise(seed);
            assert!((0.0..1.0).contains(&value), "{} -> {}", seed, value);
        }
    }

    #[test]
    fn test_range_noise_bounds() {
        let value = range_noise("no2:10.006:76.352", 10.0, 40.0);
        assert!((10.0..40.0).contains(&value));
    }

    #[test]
    fn test_coordinate_seed_quantizes() {
        assert_eq!(
            coordinate_seed("pm25", 9.93121, 76.26734),
            coordinate_seed("pm25", 9.93118, 76.26738)
        );
    }
}
