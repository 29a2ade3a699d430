pub mod evaluators;
pub mod indicators;

pub use evaluators::{roster, EvenBias, MomentumRise, UnderSevenBias, UnderSixBias};

use common::{EvaluatorId, Market, MarketSnapshot, Signal};

/// All signal evaluator variants must satisfy this trait.
///
/// Implementations are pure functions of a snapshot: no clock, no IO, no
/// state between calls. Insufficient samples mean "no signal", never an
/// error.
pub trait Evaluator: Send + Sync {
    /// Which rotation slot this evaluator fills.
    fn id(&self) -> EvaluatorId;

    /// Inspect one market's buffers and optionally emit a signal for it.
    fn evaluate(&self, market: &Market, snapshot: &MarketSnapshot) -> Option<Signal>;
}
