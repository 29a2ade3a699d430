use common::{EvaluatorId, Market, MarketSnapshot, Signal, SignalDetail};

use crate::indicators::{digit_stats, macd_histogram, round_to, rsi, RSI_PERIOD};
use crate::Evaluator;

/// Percentage of buffered digits a digit-bias evaluator requires.
const DIGIT_BIAS_THRESHOLD: f64 = 60.0;
/// RSI level above which the momentum evaluator treats the market as rising.
const RSI_RISE_THRESHOLD: f64 = 60.0;

/// The four evaluators in rotation order.
pub fn roster() -> Vec<Box<dyn Evaluator>> {
    vec![
        Box::new(UnderSixBias),
        Box::new(UnderSevenBias),
        Box::new(MomentumRise),
        Box::new(EvenBias),
    ]
}

/// V1: at least 60% of buffered digits are under 6.
pub struct UnderSixBias;

impl Evaluator for UnderSixBias {
    fn id(&self) -> EvaluatorId {
        EvaluatorId::V1
    }

    fn evaluate(&self, market: &Market, snapshot: &MarketSnapshot) -> Option<Signal> {
        let stats = digit_stats(&snapshot.digits)?;
        if stats.under6 < DIGIT_BIAS_THRESHOLD {
            return None;
        }
        Some(Signal {
            market: market.clone(),
            detail: SignalDetail::UnderSix {
                entry_digit: stats.most_frequent(),
                probability: stats.under6,
            },
        })
    }
}

/// V2: at least 60% of buffered digits are under 7.
pub struct UnderSevenBias;

impl Evaluator for UnderSevenBias {
    fn id(&self) -> EvaluatorId {
        EvaluatorId::V2
    }

    fn evaluate(&self, market: &Market, snapshot: &MarketSnapshot) -> Option<Signal> {
        let stats = digit_stats(&snapshot.digits)?;
        if stats.under7 < DIGIT_BIAS_THRESHOLD {
            return None;
        }
        Some(Signal {
            market: market.clone(),
            detail: SignalDetail::UnderSeven {
                entry_digit: stats.most_frequent(),
                probability: stats.under7,
            },
        })
    }
}

/// V4: RSI above 60 with a positive MACD histogram. Both oscillators must
/// be defined; short price buffers are a quiet abstain.
pub struct MomentumRise;

impl Evaluator for MomentumRise {
    fn id(&self) -> EvaluatorId {
        EvaluatorId::V4
    }

    fn evaluate(&self, market: &Market, snapshot: &MarketSnapshot) -> Option<Signal> {
        let rsi_value = rsi(&snapshot.prices, RSI_PERIOD)?;
        let histogram = macd_histogram(&snapshot.prices)?;
        if rsi_value <= RSI_RISE_THRESHOLD || histogram <= 0.0 {
            return None;
        }
        Some(Signal {
            market: market.clone(),
            detail: SignalDetail::Momentum {
                rsi: rsi_value,
                macd: histogram,
                momentum: round_to(rsi_value, 1),
            },
        })
    }
}

/// V5: at least 60% of buffered digits are even.
pub struct EvenBias;

impl Evaluator for EvenBias {
    fn id(&self) -> EvaluatorId {
        EvaluatorId::V5
    }

    fn evaluate(&self, market: &Market, snapshot: &MarketSnapshot) -> Option<Signal> {
        let stats = digit_stats(&snapshot.digits)?;
        if stats.even < DIGIT_BIAS_THRESHOLD {
            return None;
        }
        Some(Signal {
            market: market.clone(),
            detail: SignalDetail::Even {
                probability: stats.even,
            },
        })
    }
}
