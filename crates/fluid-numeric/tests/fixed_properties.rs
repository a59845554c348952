//! Property-based tests for the fixed-point numeric kernel.

use fluid_numeric::{Fixed, Numeric};
use proptest::prelude::*;

type F = Fixed<48, 16>;
type FWide = Fixed<48, 32>;

proptest! {
    // Integers round-trip exactly through from_i64/to_f64, for any sign.
    #[test]
    fn integer_round_trips_exactly(v in -1_000_000i64..1_000_000) {
        let a = F::from_i64(v);
        prop_assert_eq!(a.to_f64(), v as f64);
    }

    // Comparing two values agrees with comparing the integers they were
    // built from.
    #[test]
    fn ordering_agrees_with_integer_order(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        let fa = F::from_i64(a);
        let fb = F::from_i64(b);
        prop_assert_eq!(a < b, fa < fb);
        prop_assert_eq!(a == b, fa == fb);
    }

    // Widening to more fractional bits then narrowing back is lossless
    // (convert only ever shifts, never rounds, when going wider first).
    #[test]
    fn widen_then_narrow_round_trips(v in -10_000.0f64..10_000.0) {
        let a = F::from_f64(v);
        let wide: FWide = a.convert();
        let back: F = wide.convert();
        prop_assert_eq!(a, back);
    }

    // from_f64/to_f64 never drifts by more than one quantization step.
    #[test]
    fn float_round_trip_is_within_one_step(v in -10_000.0f64..10_000.0) {
        let a = F::from_f64(v);
        let step = 1.0 / (1u64 << 16) as f64;
        prop_assert!((a.to_f64() - v).abs() <= step);
    }

    // Addition matches float addition within fixed-point's rounding error.
    #[test]
    fn addition_matches_float(a in -1_000.0f64..1_000.0, b in -1_000.0f64..1_000.0) {
        let fa = F::from_f64(a);
        let fb = F::from_f64(b);
        let sum = (fa + fb).to_f64();
        let step = 1.0 / (1u64 << 16) as f64;
        prop_assert!((sum - (a + b)).abs() <= 4.0 * step);
    }
}
