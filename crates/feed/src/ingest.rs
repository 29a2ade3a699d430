use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use common::TickEvent;

use crate::store::SharedTickStore;

/// Consumes the tick broadcast and appends (last digit, quote) pairs to the
/// rolling buffers. The sole writer of the store.
pub struct TickIngestor {
    tick_rx: broadcast::Receiver<TickEvent>,
    store: SharedTickStore,
}

impl TickIngestor {
    pub fn new(tick_rx: broadcast::Receiver<TickEvent>, store: SharedTickStore) -> Self {
        Self { tick_rx, store }
    }

    /// Run the ingest loop. Call this inside a `tokio::spawn`.
    pub async fn run(mut self) {
        info!("Tick ingestor running");
        loop {
            match self.tick_rx.recv().await {
                Ok(event) => {
                    let digit = match last_digit(event.quote) {
                        Some(d) => d,
                        None => {
                            debug!(symbol = %event.symbol, quote = event.quote, "Quote without a usable last digit, skipped");
                            continue;
                        }
                    };
                    self.store.write().await.record(&event.symbol, digit, event.quote);
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(dropped = n, "Tick ingestor lagged — dropped ticks");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    warn!("Tick broadcast channel closed");
                    return;
                }
            }
        }
    }
}

/// Last decimal digit of the quote's fractional part, read off the shortest
/// decimal rendering rather than any rounded numeric. "6165.19" yields 9,
/// "362.5" yields 5, and an integral quote renders without a fractional
/// part, so its digit is 0.
pub fn last_digit(quote: f64) -> Option<u8> {
    let text = format!("{quote}");
    match text.rsplit_once('.') {
        Some((_, frac)) => frac
            .chars()
            .last()
            .and_then(|c| c.to_digit(10))
            .map(|d| d as u8),
        None => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_digit_reads_the_final_fractional_digit() {
        assert_eq!(last_digit(6165.19), Some(9));
        assert_eq!(last_digit(361.05), Some(5));
        assert_eq!(last_digit(0.7), Some(7));
    }

    #[test]
    fn trailing_zero_is_significant() {
        // 362.5 renders as "362.5", never "362.50"
        assert_eq!(last_digit(362.5), Some(5));
        // 100.0 renders without a fractional part
        assert_eq!(last_digit(100.0), Some(0));
    }

    #[test]
    fn representation_is_shortest_roundtrip() {
        // 0.1 is not exactly representable; the rendering is still "0.1"
        assert_eq!(last_digit(0.1), Some(1));
        assert_eq!(last_digit(9999.3), Some(3));
    }
}
