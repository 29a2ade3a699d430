pub mod ingest;
pub mod store;
pub mod stream;

pub use ingest::{last_digit, TickIngestor};
pub use store::{SharedTickStore, TickStore, BUFFER_CAPACITY};
pub use stream::DerivStream;
