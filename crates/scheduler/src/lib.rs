pub mod cycle;
pub mod messages;

pub use cycle::{Scheduler, EXPIRED_WAIT, NO_SIGNAL_WAIT, PRE_ALERT_WAIT, SIGNAL_VALIDITY};
