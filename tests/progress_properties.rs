//! Property tests for the progress formula.

use proptest::prelude::*;
use rust_decimal::Decimal;

use kpi_engine::error::EngineError;
use kpi_engine::lifecycle::compute_progress;

proptest! {
    /// Progress is never negative for any non-negative actual and
    /// positive target.
    #[test]
    fn progress_never_negative(actual in 0i64..1_000_000, target in 1i64..1_000_000) {
        let progress = compute_progress(Decimal::from(actual), Decimal::from(target)).unwrap();
        prop_assert!(progress >= Decimal::ZERO);
    }

    /// Progress equals the rounded ratio formula and is uncapped above
    /// 100.
    #[test]
    fn progress_matches_formula(actual in 0i64..1_000_000, target in 1i64..1_000_000) {
        let progress = compute_progress(Decimal::from(actual), Decimal::from(target)).unwrap();
        let expected = (Decimal::from(actual) / Decimal::from(target)
            * Decimal::ONE_HUNDRED)
            .round_dp(2);
        prop_assert_eq!(progress, expected);
    }

    /// Progress is monotonic in the actual value.
    #[test]
    fn progress_monotonic_in_actual(a in 0i64..1_000_000, b in 0i64..1_000_000, target in 1i64..1_000_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = compute_progress(Decimal::from(lo), Decimal::from(target)).unwrap();
        let p_hi = compute_progress(Decimal::from(hi), Decimal::from(target)).unwrap();
        prop_assert!(p_lo <= p_hi);
    }

    /// Meeting the target exactly is always 100%.
    #[test]
    fn meeting_target_is_100_percent(target in 1i64..1_000_000) {
        let progress = compute_progress(Decimal::from(target), Decimal::from(target)).unwrap();
        prop_assert_eq!(progress, Decimal::ONE_HUNDRED);
    }

    /// A zero target always fails, regardless of the actual.
    #[test]
    fn zero_target_always_fails(actual in -1_000_000i64..1_000_000) {
        let result = compute_progress(Decimal::from(actual), Decimal::ZERO);
        prop_assert!(matches!(result, Err(EngineError::DivisionByZero)));
    }

    /// Negative actuals clamp to zero rather than going negative.
    #[test]
    fn negative_actual_clamps_to_zero(actual in -1_000_000i64..0, target in 1i64..1_000_000) {
        let progress = compute_progress(Decimal::from(actual), Decimal::from(target)).unwrap();
        prop_assert_eq!(progress, Decimal::ZERO);
    }
}
