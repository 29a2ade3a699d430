pub mod config;
pub mod error;
pub mod markets;
pub mod notify;
pub mod publish;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use markets::{Market, MarketFileConfig};
pub use notify::Notifier;
pub use publish::StatusPublisher;
pub use types::*;
