use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::{debug, info, warn};

use common::{EvaluatorId, Market, MessageHandle, Notifier, Signal, StatusPublisher, StatusRecord};
use feed::SharedTickStore;
use signal::Evaluator;

use crate::messages;

/// Lead time between the pre-alert announcement and evaluation.
pub const PRE_ALERT_WAIT: Duration = Duration::from_secs(120);
/// Idle time after a cycle without a qualifying market.
pub const NO_SIGNAL_WAIT: Duration = Duration::from_secs(600);
/// How long a published signal stays valid.
pub const SIGNAL_VALIDITY: Duration = Duration::from_secs(300);
/// Cool-down after the expiry notice before the next cycle.
pub const EXPIRED_WAIT: Duration = Duration::from_secs(300);

/// Minutes until the next evaluation, as shown to subscribers.
const NEXT_CYCLE_MINUTES: i64 = 10;
/// Minutes a signal remains valid, as shown to subscribers.
const VALIDITY_MINUTES: i64 = 5;

/// Round-robin signal cycle driver.
///
/// Owns all cycle state: the evaluator rotation index and the message
/// handles pending retraction. One instance runs for the process lifetime.
/// Notifier and publisher failures are logged and swallowed so the phase
/// clock never stalls on a delivery problem.
pub struct Scheduler {
    roster: Vec<Box<dyn Evaluator>>,
    markets: Vec<Market>,
    store: SharedTickStore,
    notifier: Arc<dyn Notifier>,
    publisher: Arc<dyn StatusPublisher>,
    index: usize,
    sent: Vec<MessageHandle>,
}

impl Scheduler {
    pub fn new(
        roster: Vec<Box<dyn Evaluator>>,
        markets: Vec<Market>,
        store: SharedTickStore,
        notifier: Arc<dyn Notifier>,
        publisher: Arc<dyn StatusPublisher>,
    ) -> Self {
        assert!(!roster.is_empty(), "Scheduler needs at least one evaluator");
        Self {
            roster,
            markets,
            store,
            notifier,
            publisher,
            index: 0,
            sent: Vec::new(),
        }
    }

    /// Run cycles forever. Call this inside a `tokio::spawn`.
    pub async fn run(mut self) {
        info!(
            evaluators = self.roster.len(),
            markets = self.markets.len(),
            "Scheduler running"
        );
        loop {
            self.run_cycle().await;
        }
    }

    /// One full pass: retract the previous cycle's messages, pre-alert,
    /// evaluate, then either the no-signal wait or the active/expired
    /// sequence.
    pub async fn run_cycle(&mut self) {
        self.retract_previous().await;

        let slot = self.index;
        let current = self.roster[slot].id();
        let next = self.roster[(slot + 1) % self.roster.len()].id();
        self.index = (self.index + 1) % self.roster.len();

        // ── PRE_ALERT ────────────────────────────────────────────────────
        info!(evaluator = %current, "Cycle starting, pre-alert");
        self.deliver(&messages::pre_alert(current, next)).await;
        tokio::time::sleep(PRE_ALERT_WAIT).await;

        // ── EVALUATE ─────────────────────────────────────────────────────
        let outcome = self.evaluate(slot).await;
        let now = Local::now();
        let next_time = (now + chrono::Duration::minutes(NEXT_CYCLE_MINUTES))
            .format("%H:%M")
            .to_string();

        match outcome {
            None => {
                // ── NO_SIGNAL ────────────────────────────────────────────
                info!(evaluator = %current, "No qualifying market this cycle");
                self.publish(StatusRecord::no_signal(current, next, &next_time))
                    .await;
                self.deliver(&messages::no_signal(current, &next_time)).await;
                tokio::time::sleep(NO_SIGNAL_WAIT).await;
            }
            Some(signal) => {
                // ── ACTIVE ───────────────────────────────────────────────
                let expires_at = (now + chrono::Duration::minutes(VALIDITY_MINUTES))
                    .format("%H:%M")
                    .to_string();
                info!(
                    evaluator = %current,
                    market = %signal.market.name,
                    trade = signal.detail.trade_label(),
                    "Signal published"
                );
                self.publish(StatusRecord::active(
                    current,
                    &signal.market.name,
                    signal.detail.trade_label(),
                    &expires_at,
                    next,
                    &next_time,
                ))
                .await;
                let caption = messages::signal_caption(current, &signal, &expires_at);
                self.deliver_with_image(current, &caption).await;
                tokio::time::sleep(SIGNAL_VALIDITY).await;

                // ── EXPIRED ──────────────────────────────────────────────
                info!(evaluator = %current, market = %signal.market.name, "Signal expired");
                self.publish(StatusRecord::expired(
                    current,
                    &signal.market.name,
                    signal.detail.trade_label(),
                    &expires_at,
                    next,
                    &next_time,
                ))
                .await;
                self.deliver(&messages::expired(&next_time)).await;
                tokio::time::sleep(EXPIRED_WAIT).await;
            }
        }
    }

    /// Run the cycle's evaluator across the roster in market order. The
    /// first market that fires wins; later markets are not consulted.
    async fn evaluate(&self, slot: usize) -> Option<Signal> {
        let evaluator = &self.roster[slot];
        let store = self.store.read().await;
        for market in &self.markets {
            let snapshot = store.snapshot(&market.symbol);
            if let Some(signal) = evaluator.evaluate(market, &snapshot) {
                return Some(signal);
            }
        }
        None
    }

    /// Best-effort retraction of everything delivered in the previous
    /// cycle.
    async fn retract_previous(&mut self) {
        for handle in self.sent.drain(..) {
            if let Err(e) = self.notifier.delete(handle).await {
                debug!(error = %e, "Failed to retract message");
            }
        }
    }

    async fn deliver(&mut self, text: &str) {
        match self.notifier.send(text).await {
            Ok(handle) => self.sent.push(handle),
            Err(e) => warn!(error = %e, "Failed to deliver notification"),
        }
    }

    async fn deliver_with_image(&mut self, evaluator: EvaluatorId, caption: &str) {
        match self.notifier.send_with_image(evaluator, caption).await {
            Ok(handle) => self.sent.push(handle),
            Err(e) => warn!(error = %e, "Failed to deliver signal notification"),
        }
    }

    async fn publish(&self, record: StatusRecord) {
        if let Err(e) = self.publisher.publish(&record).await {
            warn!(error = %e, "Failed to publish signal status");
        }
    }
}
