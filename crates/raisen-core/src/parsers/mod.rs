//! Parsers for snapshot files exported from the backend

pub mod snapshot;

pub use snapshot::{Collection, ParsedRows, SnapshotParser};
