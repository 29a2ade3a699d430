use super::round_to;

/// Lookback used by the momentum evaluator.
pub const RSI_PERIOD: usize = 14;

/// Substituted for a zero average loss so the strength ratio stays finite.
const LOSS_EPSILON: f64 = 0.0001;

/// Relative Strength Index over the most recent `period` price changes
/// (oldest first input), rounded to 2 decimal places.
///
/// Gains and losses are simple averages of the window, not Wilder
/// smoothing. A lossless window divides by `LOSS_EPSILON` instead of zero,
/// capping the result just under 100. Returns `None` below `period + 1`
/// prices.
pub fn rsi(prices: &[f64], period: usize) -> Option<f64> {
    if prices.len() < period + 1 {
        return None;
    }

    let recent = &prices[prices.len() - (period + 1)..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in recent.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum += -change;
        }
    }

    let avg_gain = gain_sum / period as f64;
    let mut avg_loss = loss_sum / period as f64;
    if avg_loss == 0.0 {
        avg_loss = LOSS_EPSILON;
    }

    let rs = avg_gain / avg_loss;
    Some(round_to(100.0 - 100.0 / (1.0 + rs), 2))
}
