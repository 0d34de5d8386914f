//! Remote relational store abstraction.
//!
//! The store owns identifier assignment and referential integrity; callers
//! submit whole batches and read assigned ids back from the insertion
//! result.

mod memory;
mod rest;

pub use memory::{MemoryStore, StoreOp};
pub use rest::RestStore;

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("request to {target} failed")]
    Transport {
        target: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{target}: store returned HTTP {status}: {body}")]
    Status {
        target: String,
        status: u16,
        body: String,
    },
    #[error("{target}: unexpected response: {message}")]
    InvalidResponse { target: String, message: String },
    #[error("{target}: constraint violation: {message}")]
    Constraint { target: String, message: String },
    #[error("{target}: {message}")]
    Rejected { target: String, message: String },
}

/// Result of submitting a script to the ad-hoc execution endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    Executed,
    /// The store exposes no generic execution endpoint
    EndpointMissing,
}

/// Operations the seeding pipeline and migration runner need from a store.
///
/// All calls are blocking; one call is one round trip.
pub trait RemoteStore {
    /// Insert `rows` into `table` in one request. Returns the inserted rows,
    /// in submission order, each carrying its store-assigned `id`.
    fn insert(&mut self, table: &str, rows: Vec<Value>) -> Result<Vec<Value>, StoreError>;

    /// Delete every row of `table`, returning how many were removed.
    fn delete_all(&mut self, table: &str) -> Result<u64, StoreError>;

    /// Submit raw SQL to the store's execution endpoint.
    fn execute_sql(&mut self, sql: &str) -> Result<ExecOutcome, StoreError>;
}
