/// Base of the exponential ease used for the pulse animation.
pub const DEFAULT_BASE: f32 = 10.0;

/// Clamped exponential ease: `0` for `x <= 0`, `1` for `x >= 1`, otherwise
/// `(base^x - 1) / (base - 1)`. Strictly increasing on `(0, 1)`.
///
/// `base` must be greater than 1; at `base == 1` the expression is `0/0`.
pub fn exponential_ease(x: f32, base: f32) -> f32 {
    debug_assert!(base > 1.0, "ease base must be greater than 1");

    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    (base.powf(x) - 1.0) / (base - 1.0)
}

/// Maps unbounded wall-clock seconds to a pulse intensity in `[0, 1)`,
/// periodic with period 1.
pub fn time_to_intensity(t: f32, base: f32) -> f32 {
    exponential_ease(t.rem_euclid(1.0), base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_clamps_outside_unit_interval() {
        assert_eq!(exponential_ease(0.0, DEFAULT_BASE), 0.0);
        assert_eq!(exponential_ease(-3.5, DEFAULT_BASE), 0.0);
        assert_eq!(exponential_ease(1.0, DEFAULT_BASE), 1.0);
        assert_eq!(exponential_ease(42.0, DEFAULT_BASE), 1.0);
    }

    #[test]
    fn ease_is_strictly_increasing_and_bounded_on_open_interval() {
        let mut prev = 0.0;

        for i in 1..100 {
            let x = i as f32 / 100.0;
            let y = exponential_ease(x, DEFAULT_BASE);

            assert!(y > prev, "not increasing at x = {x}");
            assert!(y > 0.0 && y < 1.0, "out of bounds at x = {x}");

            prev = y;
        }
    }

    #[test]
    fn ease_matches_closed_form() {
        // (10^0.5 - 1) / 9 = 0.240253...
        let expected = (10.0_f32.sqrt() - 1.0) / 9.0;
        assert!((exponential_ease(0.5, 10.0) - expected).abs() < 1e-6);
        assert!((expected - 0.2403).abs() < 1e-4);
    }

    #[test]
    fn intensity_is_periodic_with_period_one() {
        for t in [0.0, 0.25, 0.5, 0.75] {
            let reference = time_to_intensity(t, DEFAULT_BASE);

            for n in 1..4 {
                assert_eq!(time_to_intensity(t + n as f32, DEFAULT_BASE), reference);
            }
        }
    }

    #[test]
    #[should_panic(expected = "ease base must be greater than 1")]
    fn degenerate_base_is_rejected() {
        exponential_ease(0.5, 1.0);
    }

    #[test]
    fn negative_time_wraps_into_unit_interval() {
        // -0.75 wraps to 0.25
        assert_eq!(
            time_to_intensity(-0.75, DEFAULT_BASE),
            time_to_intensity(0.25, DEFAULT_BASE)
        );
    }
}
