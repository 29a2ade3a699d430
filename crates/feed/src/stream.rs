use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::broadcast;
use tokio_tungstenite::connect_async;
use tracing::{info, warn};
use url::Url;

use common::{Market, Result, TickEvent};

/// Delay between reconnect attempts. The subscription is rebuilt from
/// scratch on every connect; buffer contents are untouched across drops.
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

const DERIV_WS_HOST: &str = "wss://ws.derivws.com/websockets/v3";

/// Deriv tick WebSocket stream for the whole market roster.
///
/// Opens a single connection, subscribes to one tick topic per market,
/// parses `{"tick": {...}}` messages into `TickEvent`, and publishes them
/// on a broadcast channel. Reconnects forever with a fixed delay.
pub struct DerivStream {
    app_id: u32,
    markets: Vec<Market>,
    tick_tx: broadcast::Sender<TickEvent>,
}

impl DerivStream {
    pub fn new(app_id: u32, markets: Vec<Market>, tick_tx: broadcast::Sender<TickEvent>) -> Self {
        Self {
            app_id,
            markets,
            tick_tx,
        }
    }

    /// Run the stream loop forever, reconnecting on failure.
    /// Call this inside a `tokio::spawn`.
    pub async fn run(self) {
        loop {
            info!(markets = self.markets.len(), "Connecting to Deriv WebSocket stream");
            match self.connect_once().await {
                Ok(()) => info!("WebSocket stream closed cleanly, reconnecting"),
                Err(e) => warn!(error = %e, "WebSocket error, reconnecting"),
            }
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    }

    async fn connect_once(&self) -> Result<()> {
        let url_str = format!("{DERIV_WS_HOST}?app_id={}", self.app_id);
        let url = Url::parse(&url_str).map_err(|e| common::Error::WebSocket(e.to_string()))?;

        let (ws_stream, _) = connect_async(url.as_str())
            .await
            .map_err(|e| common::Error::WebSocket(e.to_string()))?;

        let (mut write, mut read) = ws_stream.split();

        // One tick subscription per tracked market, all over this socket
        for market in &self.markets {
            let request = json!({ "ticks": market.symbol, "subscribe": 1 });
            write
                .send(tokio_tungstenite::tungstenite::Message::Text(
                    request.to_string(),
                ))
                .await
                .map_err(|e| common::Error::WebSocket(e.to_string()))?;
        }

        while let Some(msg) = read.next().await {
            let msg = msg.map_err(|e| common::Error::WebSocket(e.to_string()))?;

            if let tokio_tungstenite::tungstenite::Message::Text(text) = msg {
                match parse_tick_event(&text) {
                    Ok(Some(event)) => {
                        // Ignore send errors (no active receivers)
                        let _ = self.tick_tx.send(event);
                    }
                    Ok(None) => {} // non-tick message, skip
                    Err(e) => {
                        warn!(error = %e, "Failed to parse tick message");
                    }
                }
            }
        }

        Ok(())
    }
}

// ─── Deriv tick JSON parsing ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct TickWrapper {
    tick: TickData,
}

#[derive(Deserialize)]
struct TickData {
    symbol: String,
    quote: f64,
}

/// Parse one stream message. `Ok(None)` for shapes without a tick payload:
/// subscription confirmations, heartbeats, error frames.
fn parse_tick_event(text: &str) -> Result<Option<TickEvent>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if value.get("tick").is_none() {
        return Ok(None);
    }

    let wrapper: TickWrapper = serde_json::from_value(value)?;
    Ok(Some(TickEvent {
        symbol: wrapper.tick.symbol,
        quote: wrapper.tick.quote,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_message_parses_symbol_and_quote() {
        let text = r#"{"echo_req":{"ticks":"R_10","subscribe":1},"msg_type":"tick","tick":{"ask":6165.29,"bid":6165.09,"epoch":1709136001,"id":"abc","pip_size":3,"quote":6165.19,"symbol":"R_10"}}"#;
        let event = parse_tick_event(text).unwrap().unwrap();
        assert_eq!(event.symbol, "R_10");
        assert_eq!(event.quote, 6165.19);
    }

    #[test]
    fn non_tick_messages_are_skipped() {
        let confirmation = r#"{"echo_req":{"ticks":"R_10","subscribe":1},"msg_type":"tick","subscription":{"id":"abc"}}"#;
        assert!(parse_tick_event(confirmation).unwrap().is_none());

        let error_frame = r#"{"error":{"code":"MarketIsClosed","message":"This market is presently closed."},"msg_type":"tick"}"#;
        assert!(parse_tick_event(error_frame).unwrap().is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_tick_event("not json").is_err());
    }
}
