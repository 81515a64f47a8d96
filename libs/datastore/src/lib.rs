//! Datastore library for the device-management platform.
//!
//! Owns the lifecycle of the MongoDB client shared by platform services:
//! multi-host address parsing, standalone vs. replica-set topology detection,
//! credentialed connection construction, optional first-run replica-set
//! bootstrap, and resolution of the global and per-tenant database handles.
//!
//! # Features
//!
//! - `config` (default) - load [`mongodb::MongoDatastoreConfig`] from
//!   environment variables via `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use datastore::mongodb::{MongoConnectionManager, MongoDatastoreConfig};
//!
//! let config = MongoDatastoreConfig::new("localhost", "27017", "global");
//! let mut manager = MongoConnectionManager::new(config);
//! manager.connect().await?;
//!
//! let global = manager.global_database()?;
//! let tenant_db = manager.tenant_database_for_id("t1")?; // "tenant-t1"
//! ```

pub mod common;
pub mod mongodb;
pub mod tenant;

// Re-exports for convenience
pub use common::{DatastoreError, DatastoreResult};
pub use tenant::Tenant;
