// Document verification: lookup dispatch across document tables, issuance,
// and the storage seam both go through.

pub mod dispatcher;
pub mod handlers;
pub mod issuance;
pub mod record;
pub mod stats;
pub mod store;

pub use store::{DocumentStore, InMemoryDocumentStore, PgDocumentStore};
