//! MongoDB datastore connector
//!
//! Connection management, replica-set bootstrap, and tenant-scoped database
//! resolution.

mod bootstrap;
mod config;
mod connector;
mod health;
mod lifecycle;
mod topology;

pub use bootstrap::{ReplicaSetProbe, auto_configure_replica_set, probe_replica_set};
pub use config::MongoDatastoreConfig;
pub use connector::{ConnectionState, MongoConnectionManager, tenant_database_name};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use topology::{ServerAddr, Topology, parse_server_addresses};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
