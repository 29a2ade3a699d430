use proptest::prelude::*;
use signal::indicators::{digit_stats, macd_histogram, rsi, MIN_DIGIT_SAMPLES, RSI_PERIOD};

proptest! {
    /// RSI on randomized price windows always lands in [0, 100].
    #[test]
    fn rsi_stays_in_bounds(
        prices in proptest::collection::vec(0.0001f64..1_000_000.0f64, 15..120),
    ) {
        let value = rsi(&prices, RSI_PERIOD).unwrap();
        prop_assert!((0.0..=100.0).contains(&value));
    }

    /// MACD histogram on randomized price windows is always finite.
    #[test]
    fn macd_histogram_is_finite(
        prices in proptest::collection::vec(0.0001f64..1_000_000.0f64, 35..120),
    ) {
        let value = macd_histogram(&prices).unwrap();
        prop_assert!(value.is_finite());
    }

    /// The under-6 digit set is a subset of the under-7 set, so its
    /// percentage can never be larger; even and odd split the whole buffer.
    #[test]
    fn digit_percentages_are_consistent(
        digits in proptest::collection::vec(0u8..10, 60..120),
    ) {
        let stats = digit_stats(&digits).unwrap();
        prop_assert!(stats.under6 <= stats.under7);
        prop_assert!((stats.even + stats.odd - 100.0).abs() < 1e-9);
    }

    /// The frequency ranking is always a permutation of the digits 0-9.
    #[test]
    fn digit_ranking_is_a_permutation(
        digits in proptest::collection::vec(0u8..10, 60..120),
    ) {
        let stats = digit_stats(&digits).unwrap();
        let mut sorted = stats.ranking;
        sorted.sort_unstable();
        prop_assert_eq!(sorted, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    /// Below the sample floor there are no statistics at all.
    #[test]
    fn digit_stats_undefined_below_floor(
        digits in proptest::collection::vec(0u8..10, 0..MIN_DIGIT_SAMPLES),
    ) {
        prop_assert!(digit_stats(&digits).is_none());
    }
}
