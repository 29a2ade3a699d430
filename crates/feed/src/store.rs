use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;

use common::{Market, MarketSnapshot};

/// Fixed capacity of each rolling buffer. Roughly two minutes of ticks on
/// the 1s indices. Statistics work off the buffered count, not this
/// capacity.
pub const BUFFER_CAPACITY: usize = 120;

/// Shared handle to the store: the ingestor writes, the scheduler reads.
pub type SharedTickStore = Arc<RwLock<TickStore>>;

/// Per-market rolling windows of last digits and raw quotes.
///
/// Both buffers evict oldest-first once capacity is reached. Appends and
/// snapshots run under the store lock with no awaits in between, so a
/// snapshot always sees matching digit and price entries.
#[derive(Debug)]
pub struct TickStore {
    capacity: usize,
    histories: HashMap<String, MarketHistory>,
}

#[derive(Debug)]
struct MarketHistory {
    digits: VecDeque<u8>,
    prices: VecDeque<f64>,
}

impl MarketHistory {
    fn new(capacity: usize) -> Self {
        Self {
            digits: VecDeque::with_capacity(capacity),
            prices: VecDeque::with_capacity(capacity),
        }
    }
}

impl TickStore {
    /// Store for the given roster at the standard capacity.
    pub fn new(markets: &[Market]) -> Self {
        Self::with_capacity(markets, BUFFER_CAPACITY)
    }

    pub fn with_capacity(markets: &[Market], capacity: usize) -> Self {
        let histories = markets
            .iter()
            .map(|m| (m.symbol.clone(), MarketHistory::new(capacity)))
            .collect();
        Self { capacity, histories }
    }

    /// Append one observation. Ticks for untracked symbols are dropped.
    pub fn record(&mut self, symbol: &str, digit: u8, quote: f64) {
        let history = match self.histories.get_mut(symbol) {
            Some(h) => h,
            None => return,
        };
        if history.digits.len() == self.capacity {
            history.digits.pop_front();
        }
        history.digits.push_back(digit);
        if history.prices.len() == self.capacity {
            history.prices.pop_front();
        }
        history.prices.push_back(quote);
    }

    /// Owned copy of a market's buffers, oldest first. Unknown symbols
    /// yield an empty snapshot.
    pub fn snapshot(&self, symbol: &str) -> MarketSnapshot {
        self.histories
            .get(symbol)
            .map(|h| MarketSnapshot {
                digits: h.digits.iter().copied().collect(),
                prices: h.prices.iter().copied().collect(),
            })
            .unwrap_or_default()
    }

    /// Number of buffered ticks for a symbol.
    pub fn len(&self, symbol: &str) -> usize {
        self.histories.get(symbol).map_or(0, |h| h.digits.len())
    }

    pub fn shared(self) -> SharedTickStore {
        Arc::new(RwLock::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Market> {
        vec![Market::new("R_10", "Volatility 10 Index")]
    }

    #[test]
    fn snapshot_preserves_append_order() {
        let mut store = TickStore::new(&roster());
        store.record("R_10", 3, 6165.23);
        store.record("R_10", 7, 6165.27);
        store.record("R_10", 1, 6165.31);

        let snap = store.snapshot("R_10");
        assert_eq!(snap.digits, vec![3, 7, 1]);
        assert_eq!(snap.prices, vec![6165.23, 6165.27, 6165.31]);
    }

    #[test]
    fn oldest_tick_evicted_at_capacity() {
        let mut store = TickStore::with_capacity(&roster(), 3);
        for (digit, quote) in [(1, 10.1), (2, 10.2), (3, 10.3), (4, 10.4)] {
            store.record("R_10", digit, quote);
        }

        let snap = store.snapshot("R_10");
        assert_eq!(snap.digits, vec![2, 3, 4]);
        assert_eq!(snap.prices, vec![10.2, 10.3, 10.4]);
        assert_eq!(store.len("R_10"), 3);
    }

    #[test]
    fn untracked_symbol_is_dropped() {
        let mut store = TickStore::new(&roster());
        store.record("R_100", 5, 123.45);

        assert_eq!(store.len("R_100"), 0);
        assert_eq!(store.snapshot("R_100"), MarketSnapshot::default());
        assert_eq!(store.len("R_10"), 0);
    }
}
