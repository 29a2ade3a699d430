use common::{EvaluatorId, Signal, SignalDetail};

/// Display name prefixed to every notification.
const BOT_NAME: &str = "PulseBot";

/// Announcement sent two minutes before evaluation.
pub fn pre_alert(current: EvaluatorId, next: EvaluatorId) -> String {
    format!(
        "⚠️ <b>Be Prepared!</b>\n\
         Load <b>{BOT_NAME} – Signal Bot {current}</b>\n\
         Signal incoming in <b>2 minutes</b>...\n\
         ⏭ Next in rotation: <b>Signal Bot {next}</b>"
    )
}

/// Sent when the cycle found no qualifying market.
pub fn no_signal(current: EvaluatorId, next_time: &str) -> String {
    format!(
        "ℹ️ <b>No valid signal for {BOT_NAME} – Signal Bot {current}</b>\n\
         ⏭ Next check at <b>{next_time}</b>"
    )
}

/// Full signal text, used as the image caption.
pub fn signal_caption(current: EvaluatorId, signal: &Signal, expires_at: &str) -> String {
    let mut text = format!(
        "<b>{BOT_NAME} – Signal Bot {current}</b>\n\n\
         📊 <b>Market:</b> {}\n\
         🎯 <b>Trade:</b> {}",
        signal.market.name,
        signal.detail.trade_label()
    );

    match &signal.detail {
        SignalDetail::UnderSix {
            entry_digit,
            probability,
        }
        | SignalDetail::UnderSeven {
            entry_digit,
            probability,
        } => {
            text.push_str(&format!("\n🔢 <b>Entry Digit:</b> {entry_digit}"));
            text.push_str(&format!("\n📈 <b>Probability:</b> {probability:.1}%"));
        }
        SignalDetail::Even { probability } => {
            text.push_str(&format!("\n📈 <b>Probability:</b> {probability:.1}%"));
        }
        SignalDetail::Momentum {
            rsi,
            macd,
            momentum,
        } => {
            text.push_str(&format!(
                "\n\n📊 <b>Confirmations:</b>\n\
                 • RSI (14): {rsi} ✅\n\
                 • MACD Histogram: +{macd} ✅\n\
                 • Momentum Strength: {momentum}%"
            ));
        }
    }

    text.push_str(&format!(
        "\n\n⏳ <b>Validity:</b> 5 minutes\n⏱ <b>Expires at:</b> {expires_at}"
    ));
    text
}

/// Sent when the active signal passes its validity window.
pub fn expired(next_time: &str) -> String {
    format!(
        "❌ <b>Above signal is no longer valid</b>\n\n\
         ⏭ Next signal at <b>{next_time}</b>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Market;

    fn market() -> Market {
        Market::new("R_25", "Volatility 25 Index")
    }

    #[test]
    fn pre_alert_names_both_rotation_slots() {
        let text = pre_alert(EvaluatorId::V1, EvaluatorId::V2);
        assert!(text.contains("Signal Bot V1"));
        assert!(text.contains("Signal Bot V2"));
        assert!(text.contains("<b>2 minutes</b>"));
    }

    #[test]
    fn digit_caption_carries_entry_digit_and_probability() {
        let signal = Signal {
            market: market(),
            detail: SignalDetail::UnderSix {
                entry_digit: 3,
                probability: 65.83,
            },
        };
        let text = signal_caption(EvaluatorId::V1, &signal, "14:25");
        assert!(text.contains("Volatility 25 Index"));
        assert!(text.contains("UNDER 6"));
        assert!(text.contains("<b>Entry Digit:</b> 3"));
        assert!(text.contains("65.8%"));
        assert!(text.contains("<b>Expires at:</b> 14:25"));
    }

    #[test]
    fn momentum_caption_lists_confirmations_instead_of_digits() {
        let signal = Signal {
            market: market(),
            detail: SignalDetail::Momentum {
                rsi: 72.45,
                macd: 0.00213,
                momentum: 72.5,
            },
        };
        let text = signal_caption(EvaluatorId::V4, &signal, "09:10");
        assert!(text.contains("RISE"));
        assert!(text.contains("RSI (14): 72.45"));
        assert!(text.contains("MACD Histogram: +0.00213"));
        assert!(text.contains("Momentum Strength: 72.5%"));
        assert!(!text.contains("Entry Digit"));
    }

    #[test]
    fn even_caption_has_probability_but_no_entry_digit() {
        let signal = Signal {
            market: market(),
            detail: SignalDetail::Even { probability: 61.7 },
        };
        let text = signal_caption(EvaluatorId::V5, &signal, "22:00");
        assert!(text.contains("EVEN"));
        assert!(text.contains("61.7%"));
        assert!(!text.contains("Entry Digit"));
    }

    #[test]
    fn expired_notice_points_at_the_next_slot() {
        let text = expired("18:45");
        assert!(text.contains("no longer valid"));
        assert!(text.contains("<b>18:45</b>"));
    }
}
