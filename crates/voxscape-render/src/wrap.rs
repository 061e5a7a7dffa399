//! Toroidal addressing for power-of-two sized maps.

/// Map a continuous coordinate onto `[0, modulus]`, wrapping around.
///
/// `modulus` must be `size - 1` for a power-of-two `size`. The coordinate is
/// floored and masked in two's complement, so negative values wrap from the
/// far edge and the mapping is periodic with period `modulus + 1`.
///
/// Non-finite inputs still produce an in-range index: NaN maps to 0 and the
/// infinities saturate before masking.
#[inline]
pub fn wrap_index(v: f32, modulus: u32) -> u32 {
    (v.floor() as i64 as u32) & modulus
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_values() -> impl Iterator<Item = f32> {
        // Quarter steps are exact in f32 across this range.
        (-4096..4096).map(|i| i as f32 * 0.25)
    }

    #[test]
    fn test_positive_values_mask() {
        assert_eq!(wrap_index(0.0, 7), 0);
        assert_eq!(wrap_index(3.9, 7), 3);
        assert_eq!(wrap_index(8.0, 7), 0);
        assert_eq!(wrap_index(13.5, 7), 5);
    }

    #[test]
    fn test_negative_values_wrap_from_far_edge() {
        assert_eq!(wrap_index(-0.5, 7), 7);
        assert_eq!(wrap_index(-1.0, 7), 7);
        assert_eq!(wrap_index(-1.5, 7), 6);
        assert_eq!(wrap_index(-8.5, 7), 7);
    }

    #[test]
    fn test_periodicity() {
        for k in 0..8 {
            let modulus = (1u32 << k) - 1;
            let period = (modulus + 1) as f32;
            for v in sample_values() {
                assert_eq!(
                    wrap_index(v, modulus),
                    wrap_index(v + period, modulus),
                    "period broken at v={v}, modulus={modulus}"
                );
            }
        }
    }

    #[test]
    fn test_range() {
        for modulus in [0, 1, 3, 255, 1023] {
            for v in sample_values() {
                assert!(wrap_index(v, modulus) <= modulus);
            }
        }
    }

    #[test]
    fn test_non_finite_inputs_stay_in_range() {
        for v in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, f32::MAX, f32::MIN] {
            assert!(wrap_index(v, 63) <= 63, "out of range for {v}");
        }
        assert_eq!(wrap_index(f32::NAN, 63), 0);
    }

    #[test]
    fn test_unit_size_map_always_zero() {
        for v in sample_values() {
            assert_eq!(wrap_index(v, 0), 0);
        }
    }
}
