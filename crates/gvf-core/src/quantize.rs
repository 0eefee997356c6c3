//! Signed 16-bit normalized (SNORM16) quantization.
//!
//! Values are clamped to `[-1, 1]` before packing. Long runs in SNORM16
//! storage accumulate this rounding and clamping; the loss is accepted,
//! not corrected.

/// Scale between the normalized range and `i16`.
pub const SNORM16_SCALE: f32 = 32767.0;

/// Largest round-trip error for a value inside `[-1, 1]`.
pub const SNORM16_MAX_ERROR: f32 = 0.5 / SNORM16_SCALE;

/// Pack an `f32` into SNORM16, clamping to `[-1, 1]`.
///
/// NaN packs to zero.
pub fn encode_snorm16(value: f32) -> i16 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(-1.0, 1.0) * SNORM16_SCALE).round() as i16
}

/// Unpack SNORM16 into `f32`. `i16::MIN` maps to `-1.0` like `-32767`.
pub fn decode_snorm16(value: i16) -> f32 {
    (value as f32 / SNORM16_SCALE).max(-1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn endpoints() {
        assert_eq!(encode_snorm16(1.0), 32767);
        assert_eq!(encode_snorm16(-1.0), -32767);
        assert_eq!(encode_snorm16(0.0), 0);
        assert_eq!(decode_snorm16(i16::MIN), -1.0);
        assert_eq!(decode_snorm16(32767), 1.0);
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(encode_snorm16(3.5), 32767);
        assert_eq!(encode_snorm16(-7.0), -32767);
        assert_eq!(encode_snorm16(f32::INFINITY), 32767);
        assert_eq!(encode_snorm16(f32::NAN), 0);
    }

    #[test]
    fn max_error_is_below_two_to_minus_fifteen() {
        assert!(SNORM16_MAX_ERROR < 2f32.powi(-15));
    }

    proptest! {
        #[test]
        fn round_trip_within_half_step(v in -1.0f32..=1.0) {
            let back = decode_snorm16(encode_snorm16(v));
            prop_assert!((back - v).abs() <= SNORM16_MAX_ERROR + 1e-6);
        }
    }
}
