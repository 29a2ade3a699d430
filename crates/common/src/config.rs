use crate::NotifyMode;

/// All configuration loaded from environment variables at startup.
/// Missing required variables cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram credentials
    pub telegram_bot_token: String,
    pub telegram_chat_id: i64,

    // Notification delivery
    pub notify_mode: NotifyMode,
    pub image_dir: String,

    // Tick feed
    pub deriv_app_id: u32,

    // Status file
    pub status_path: String,
    pub status_git_sync: bool,

    // Optional market roster file path
    pub markets_path: Option<String>,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present. Panics on any missing required variable.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let notify_mode = match optional_env("NOTIFY_MODE")
            .map(|v| v.to_lowercase())
            .as_deref()
        {
            None | Some("telegram") => NotifyMode::Telegram,
            Some("console") => NotifyMode::Console,
            Some(other) => panic!(
                "ERROR: NOTIFY_MODE must be 'telegram' or 'console', got: '{other}'"
            ),
        };

        let telegram_chat_id = required_env("TELEGRAM_CHAT_ID")
            .trim()
            .parse::<i64>()
            .unwrap_or_else(|_| panic!("TELEGRAM_CHAT_ID must be a numeric chat ID"));

        Config {
            telegram_bot_token: required_env("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id,
            notify_mode,
            image_dir: optional_env("IMAGE_DIR").unwrap_or_else(|| "images".to_string()),
            deriv_app_id: optional_env("DERIV_APP_ID")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1089),
            status_path: optional_env("STATUS_PATH")
                .unwrap_or_else(|| "signals.json".to_string()),
            status_git_sync: optional_env("STATUS_GIT_SYNC")
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            markets_path: optional_env("MARKETS_PATH"),
        }
    }
}

fn required_env(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        panic!("Required environment variable '{key}' is not set. Check your .env file.")
    })
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
