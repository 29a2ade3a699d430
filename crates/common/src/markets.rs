use serde::{Deserialize, Serialize};

/// A tracked instrument: the Deriv symbol plus the display name used in
/// notifications and the status file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Deriv tick subscription symbol, e.g. "R_10".
    pub symbol: String,
    /// Human-readable name shown to subscribers.
    pub name: String,
}

impl Market {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }

    /// The deployment roster: four Deriv volatility indices, evaluated in
    /// this order on every cycle.
    pub fn default_roster() -> Vec<Market> {
        vec![
            Market::new("R_10", "Volatility 10 Index"),
            Market::new("1HZ10V", "Volatility 10 (1s) Index"),
            Market::new("R_25", "Volatility 25 Index"),
            Market::new("1HZ25V", "Volatility 25 (1s) Index"),
        ]
    }
}

/// Optional market roster file (TOML).
///
/// Example `config/markets.toml`:
/// ```toml
/// [[market]]
/// symbol = "R_10"
/// name = "Volatility 10 Index"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketFileConfig {
    #[serde(rename = "market")]
    pub markets: Vec<Market>,
}

impl MarketFileConfig {
    /// Load from a TOML file. Exits process on error.
    pub fn load(path: &str) -> Self {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read markets config at '{path}': {e}"));
        toml::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse markets config at '{path}': {e}"))
    }
}
