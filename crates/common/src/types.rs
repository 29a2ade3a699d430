use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::markets::Market;

/// Live quote from the tick stream. One event per tick per subscribed
/// market.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickEvent {
    pub symbol: String,
    pub quote: f64,
}

/// Owned copy of one market's rolling buffers, taken under the store lock.
/// Evaluators and indicators read snapshots only, never the live buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketSnapshot {
    /// Last decimal digits, oldest first.
    pub digits: Vec<u8>,
    /// Raw quotes, oldest first.
    pub prices: Vec<f64>,
}

/// Identity of one signal evaluator variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluatorId {
    V1,
    V2,
    V4,
    V5,
}

impl EvaluatorId {
    /// Fixed rotation order the scheduler cycles through.
    pub const SEQUENCE: [EvaluatorId; 4] = [
        EvaluatorId::V1,
        EvaluatorId::V2,
        EvaluatorId::V4,
        EvaluatorId::V5,
    ];

    /// File name of the image attached to this evaluator's signal posts.
    pub fn image_file(self) -> String {
        format!("{self}.png")
    }
}

impl std::fmt::Display for EvaluatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluatorId::V1 => write!(f, "V1"),
            EvaluatorId::V2 => write!(f, "V2"),
            EvaluatorId::V4 => write!(f, "V4"),
            EvaluatorId::V5 => write!(f, "V5"),
        }
    }
}

/// Verdict payload of one evaluator. Each variant carries exactly the
/// fields that evaluator computes.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalDetail {
    UnderSix { entry_digit: u8, probability: f64 },
    UnderSeven { entry_digit: u8, probability: f64 },
    Momentum { rsi: f64, macd: f64, momentum: f64 },
    Even { probability: f64 },
}

impl SignalDetail {
    /// Trade label shown in notifications and the status file.
    pub fn trade_label(&self) -> &'static str {
        match self {
            SignalDetail::UnderSix { .. } => "UNDER 6",
            SignalDetail::UnderSeven { .. } => "UNDER 7",
            SignalDetail::Momentum { .. } => "RISE",
            SignalDetail::Even { .. } => "EVEN",
        }
    }
}

/// A trade recommendation for one market. Lives for a single scheduler
/// cycle; nothing retains signals across cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub market: Market,
    pub detail: SignalDetail,
}

/// Lifecycle phase of the current cycle, as written to the status file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CyclePhase {
    PreAlert,
    Active,
    Expired,
    NoSignal,
    #[default]
    Idle,
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CyclePhase::PreAlert => write!(f, "PRE_ALERT"),
            CyclePhase::Active => write!(f, "ACTIVE"),
            CyclePhase::Expired => write!(f, "EXPIRED"),
            CyclePhase::NoSignal => write!(f, "NO_SIGNAL"),
            CyclePhase::Idle => write!(f, "IDLE"),
        }
    }
}

/// Which Notifier implementation deliveries go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyMode {
    Telegram,
    Console,
}

impl std::fmt::Display for NotifyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotifyMode::Telegram => write!(f, "telegram"),
            NotifyMode::Console => write!(f, "console"),
        }
    }
}

/// Opaque handle to a delivered notification, kept for later retraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHandle(pub i32);

/// Snapshot of the bot's signal state, persisted as `signals.json`.
/// Field names and the `"-"` placeholders are part of the published file
/// format consumed by the landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRecord {
    pub updated_at: String,
    pub bot_running: bool,
    pub current: CurrentSignal,
    pub next: NextSignal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentSignal {
    pub bot_name: String,
    pub market: String,
    pub signal_type: String,
    pub status: CyclePhase,
    pub expires_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextSignal {
    pub bot_name: String,
    pub time: String,
}

impl StatusRecord {
    /// Record for a cycle that found no qualifying market.
    pub fn no_signal(current: EvaluatorId, next: EvaluatorId, next_time: &str) -> Self {
        Self::build(current, None, None, CyclePhase::NoSignal, None, next, next_time)
    }

    /// Record for a freshly published signal.
    pub fn active(
        current: EvaluatorId,
        market: &str,
        trade: &str,
        expires_at: &str,
        next: EvaluatorId,
        next_time: &str,
    ) -> Self {
        Self::build(
            current,
            Some(market),
            Some(trade),
            CyclePhase::Active,
            Some(expires_at),
            next,
            next_time,
        )
    }

    /// Record for a signal past its validity window.
    pub fn expired(
        current: EvaluatorId,
        market: &str,
        trade: &str,
        expires_at: &str,
        next: EvaluatorId,
        next_time: &str,
    ) -> Self {
        Self::build(
            current,
            Some(market),
            Some(trade),
            CyclePhase::Expired,
            Some(expires_at),
            next,
            next_time,
        )
    }

    fn build(
        current: EvaluatorId,
        market: Option<&str>,
        trade: Option<&str>,
        status: CyclePhase,
        expires_at: Option<&str>,
        next: EvaluatorId,
        next_time: &str,
    ) -> Self {
        Self {
            updated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            bot_running: true,
            current: CurrentSignal {
                bot_name: current.to_string(),
                market: market.map(str::to_string).unwrap_or_else(dash),
                signal_type: trade.map(str::to_string).unwrap_or_else(dash),
                status,
                expires_at: expires_at.map(str::to_string).unwrap_or_else(dash),
            },
            next: NextSignal {
                bot_name: next.to_string(),
                time: next_time.to_string(),
            },
        }
    }
}

fn dash() -> String {
    "-".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_signal_record_uses_dash_placeholders() {
        let record = StatusRecord::no_signal(EvaluatorId::V1, EvaluatorId::V2, "14:30");
        assert!(record.bot_running);
        assert_eq!(record.current.bot_name, "V1");
        assert_eq!(record.current.market, "-");
        assert_eq!(record.current.signal_type, "-");
        assert_eq!(record.current.status, CyclePhase::NoSignal);
        assert_eq!(record.current.expires_at, "-");
        assert_eq!(record.next.bot_name, "V2");
        assert_eq!(record.next.time, "14:30");
    }

    #[test]
    fn status_record_serializes_with_published_field_names() {
        let record = StatusRecord::active(
            EvaluatorId::V4,
            "Volatility 25 Index",
            "RISE",
            "14:25",
            EvaluatorId::V5,
            "14:30",
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["bot_running"], true);
        assert_eq!(json["current"]["bot_name"], "V4");
        assert_eq!(json["current"]["market"], "Volatility 25 Index");
        assert_eq!(json["current"]["signal_type"], "RISE");
        assert_eq!(json["current"]["status"], "ACTIVE");
        assert_eq!(json["current"]["expires_at"], "14:25");
        assert_eq!(json["next"]["bot_name"], "V5");
        assert_eq!(json["next"]["time"], "14:30");
        assert!(json["updated_at"].is_string());
    }

    #[test]
    fn cycle_phase_serializes_screaming_snake() {
        for (phase, expected) in [
            (CyclePhase::PreAlert, "\"PRE_ALERT\""),
            (CyclePhase::Active, "\"ACTIVE\""),
            (CyclePhase::Expired, "\"EXPIRED\""),
            (CyclePhase::NoSignal, "\"NO_SIGNAL\""),
            (CyclePhase::Idle, "\"IDLE\""),
        ] {
            assert_eq!(serde_json::to_string(&phase).unwrap(), expected);
        }
    }

    #[test]
    fn evaluator_image_files_follow_id() {
        assert_eq!(EvaluatorId::V1.image_file(), "V1.png");
        assert_eq!(EvaluatorId::V5.image_file(), "V5.png");
    }
}
