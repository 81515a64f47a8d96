//! Common types shared across datastore backends

pub mod error;

pub use error::{DatastoreError, DatastoreResult};
