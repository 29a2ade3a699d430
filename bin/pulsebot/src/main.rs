use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::{Config, Market, MarketFileConfig, NotifyMode, TickEvent};
use console_notify::ConsoleNotifier;
use feed::{DerivStream, TickIngestor, TickStore};
use scheduler::Scheduler;
use status::FileStatusPublisher;
use telegram_notify::TelegramNotifier;

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(mode = %cfg.notify_mode, "PulseBot starting");

    // ── Market roster ─────────────────────────────────────────────────────────
    let markets: Vec<Market> = match &cfg.markets_path {
        Some(path) => {
            let file = MarketFileConfig::load(path);
            info!(path = %path, markets = file.markets.len(), "Loaded market roster");
            file.markets
        }
        None => Market::default_roster(),
    };

    // ── Tick feed ─────────────────────────────────────────────────────────────
    let store = TickStore::new(&markets).shared();
    let (tick_tx, tick_rx) = broadcast::channel::<TickEvent>(1024);
    let stream = DerivStream::new(cfg.deriv_app_id, markets.clone(), tick_tx);
    let ingestor = TickIngestor::new(tick_rx, store.clone());

    // ── Notifier (injected based on NOTIFY_MODE) ──────────────────────────────
    let notifier: Arc<dyn common::Notifier> = match cfg.notify_mode {
        NotifyMode::Telegram => {
            info!(chat_id = cfg.telegram_chat_id, "Telegram delivery — using TelegramNotifier");
            Arc::new(TelegramNotifier::new(
                cfg.telegram_bot_token.clone(),
                cfg.telegram_chat_id,
                cfg.image_dir.clone(),
            ))
        }
        NotifyMode::Console => {
            info!("Console delivery — nothing will reach Telegram");
            Arc::new(ConsoleNotifier::new())
        }
    };

    // ── Status publisher ──────────────────────────────────────────────────────
    let publisher: Arc<dyn common::StatusPublisher> = Arc::new(FileStatusPublisher::new(
        cfg.status_path.clone(),
        cfg.status_git_sync,
    ));

    // ── Scheduler ─────────────────────────────────────────────────────────────
    let cycle = Scheduler::new(signal::roster(), markets, store, notifier, publisher);

    // ── Spawn all tasks ───────────────────────────────────────────────────────
    tokio::spawn(stream.run());
    tokio::spawn(ingestor.run());
    tokio::spawn(cycle.run());

    // Keep main alive
    info!("All subsystems started. Waiting for shutdown signal.");
    tokio::signal::ctrl_c().await.unwrap();
    info!("Shutdown signal received. Exiting.");
}
