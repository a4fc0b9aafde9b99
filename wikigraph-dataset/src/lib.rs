pub mod error;
pub mod links;
pub mod loader;
pub mod record;

pub use error::LoadError;
pub use links::{LinkEntry, OutgoingLinks, flatten_links};
pub use loader::{Dataset, Fingerprint};
pub use record::{DocumentId, DocumentRecord};
