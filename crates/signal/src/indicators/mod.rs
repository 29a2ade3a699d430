pub mod digits;
pub mod macd;
pub mod rsi;

pub use digits::{digit_stats, DigitStats, MIN_DIGIT_SAMPLES};
pub use macd::{macd_histogram, MIN_MACD_SAMPLES};
pub use rsi::{rsi, RSI_PERIOD};

/// Round to `places` decimal places, the way the published signal values
/// are formatted.
pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(54.3456, 2), 54.35);
        assert_eq!(round_to(-0.000014, 5), -0.00001);
        assert_eq!(round_to(99.999, 2), 100.0);
    }
}
