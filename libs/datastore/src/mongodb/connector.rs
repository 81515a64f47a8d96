//! Connection manager owning the MongoDB client lifecycle.

use std::time::Duration;

use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Database};
use tracing::info;

use super::bootstrap;
use super::config::MongoDatastoreConfig;
use super::topology::{ServerAddr, Topology, parse_server_addresses};
use crate::common::{DatastoreError, DatastoreResult};
use crate::tenant::Tenant;

/// Prefix applied to tenant identifiers to form tenant database names.
pub const TENANT_DATABASE_PREFIX: &str = "tenant-";

/// Connection lifecycle state, owned exclusively by the manager.
#[derive(Default)]
pub enum ConnectionState {
    #[default]
    NotConnected,
    Connected(Client),
    Closed,
}

/// Owns the datastore client for a service process.
///
/// `connect` and `shutdown` take `&mut self`: the external lifecycle
/// controller drives them sequentially and never concurrently. Once
/// connected, handle getters take `&self`; concurrent use of the handles is
/// delegated to the driver's own pooling.
pub struct MongoConnectionManager {
    config: MongoDatastoreConfig,
    state: ConnectionState,
}

impl MongoConnectionManager {
    pub fn new(config: MongoDatastoreConfig) -> Self {
        Self {
            config,
            state: ConnectionState::NotConnected,
        }
    }

    pub fn config(&self) -> &MongoDatastoreConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, ConnectionState::Connected(_))
    }

    fn connected_client(&self) -> DatastoreResult<&Client> {
        match &self.state {
            ConnectionState::Connected(client) => Ok(client),
            ConnectionState::NotConnected => Err(DatastoreError::Connection(
                "datastore client is not connected; call connect() first".to_string(),
            )),
            ConnectionState::Closed => Err(DatastoreError::Connection(
                "datastore client has been shut down".to_string(),
            )),
        }
    }

    /// Establish the datastore connection.
    ///
    /// Parses the configured addresses, classifies the topology, builds a
    /// credentialed or anonymous client, runs the replica-set bootstrap when
    /// enabled, and forces a round trip against the global database to verify
    /// the server is reachable. Any failure leaves the state `NotConnected`;
    /// a bootstrap failure aborts the whole connect.
    pub async fn connect(&mut self) -> DatastoreResult<()> {
        let addresses = parse_server_addresses(&self.config)?;
        let topology = Topology::classify(&addresses, self.config.replica_set_name.as_deref());

        info!(
            hosts = %self.config.hostname,
            ports = %self.config.port,
            replica_set = ?self.config.replica_set_name,
            "MongoDB connection"
        );
        match topology {
            Topology::Replicated => info!("MongoDB using replicated mode"),
            Topology::Standalone => info!("MongoDB using standalone mode"),
        }

        let options = build_client_options(&self.config, &addresses, topology)?;
        let client = Client::with_options(options)?;

        if topology == Topology::Replicated && self.config.auto_configure_replication {
            bootstrap::auto_configure_replica_set(&addresses, &self.config).await?;
        }

        // Force a round trip so an unreachable server fails here, not on the
        // first real query.
        client
            .database(&self.config.database)
            .list_collection_names()
            .await
            .map_err(|e| {
                DatastoreError::Connection(format!(
                    "Timed out connecting to MongoDB instance. Verify that MongoDB is running \
                     on {}:{} and restart the service. Cause: {}",
                    self.config.hostname, self.config.port, e
                ))
            })?;

        self.state = ConnectionState::Connected(client);
        Ok(())
    }

    /// Get the live client. Fails if not connected.
    pub fn client(&self) -> DatastoreResult<&Client> {
        self.connected_client()
    }

    /// Get the handle for the configured global database.
    pub fn global_database(&self) -> DatastoreResult<Database> {
        Ok(self.connected_client()?.database(&self.config.database))
    }

    /// Get the database handle associated with a tenant record.
    pub fn tenant_database(&self, tenant: Option<&Tenant>) -> DatastoreResult<Database> {
        match tenant {
            Some(tenant) => self.tenant_database_for_id(tenant.id()),
            None => Err(DatastoreError::InvalidArgument(
                "tenant_database() called with no tenant".to_string(),
            )),
        }
    }

    /// Get the database handle for a tenant id. Pure derivation, no I/O;
    /// the driver reuses its own handles underneath.
    pub fn tenant_database_for_id(&self, tenant_id: &str) -> DatastoreResult<Database> {
        if tenant_id.trim().is_empty() {
            return Err(DatastoreError::InvalidArgument(
                "tenant id must not be empty".to_string(),
            ));
        }
        Ok(self
            .connected_client()?
            .database(&tenant_database_name(tenant_id)))
    }

    /// Release the client. Safe to call repeatedly and after a failed
    /// connect; a manager that never connected has nothing to release.
    pub async fn shutdown(&mut self) {
        match std::mem::replace(&mut self.state, ConnectionState::Closed) {
            ConnectionState::Connected(client) => {
                client.shutdown().await;
                info!("MongoDB connection closed");
            }
            ConnectionState::NotConnected | ConnectionState::Closed => {}
        }
    }
}

/// Derive the namespaced database name for a tenant id.
pub fn tenant_database_name(tenant_id: &str) -> String {
    format!("{TENANT_DATABASE_PREFIX}{tenant_id}")
}

/// Build driver options for the given topology: the first address only for
/// standalone, the full list plus the replica set name for replicated.
pub(crate) fn build_client_options(
    config: &MongoDatastoreConfig,
    addresses: &[ServerAddr],
    topology: Topology,
) -> DatastoreResult<ClientOptions> {
    let primary = addresses.first().ok_or_else(|| {
        DatastoreError::Configuration("at least one host must be configured".to_string())
    })?;

    let mut options = ClientOptions::default();
    options.hosts = match topology {
        Topology::Replicated => addresses.iter().map(Into::into).collect(),
        Topology::Standalone => vec![primary.into()],
    };
    if topology == Topology::Replicated {
        options.repl_set_name = config.replica_set_name.clone();
    }
    options.max_idle_time = Some(Duration::from_secs(config.max_connection_idle_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));
    options.credential = credential_from_config(config)?;
    Ok(options)
}

/// Build the driver credential when both username and password are set.
/// Setting exactly one of them is a configuration error rather than a silent
/// fall-through to unauthenticated access.
pub(crate) fn credential_from_config(
    config: &MongoDatastoreConfig,
) -> DatastoreResult<Option<Credential>> {
    match (&config.username, &config.password) {
        (Some(username), Some(password)) => {
            let mut credential = Credential::default();
            credential.username = Some(username.clone());
            credential.password = Some(password.clone());
            credential.source = config.auth_database.clone();
            Ok(Some(credential))
        }
        (None, None) => Ok(None),
        _ => Err(DatastoreError::Configuration(
            "username and password must be provided together".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_database_name() {
        assert_eq!(tenant_database_name("t1"), "tenant-t1");
    }

    #[test]
    fn test_handles_require_connection() {
        let manager = MongoConnectionManager::new(MongoDatastoreConfig::default());
        assert!(!manager.is_connected());
        assert!(matches!(
            manager.global_database(),
            Err(DatastoreError::Connection(_))
        ));
        assert!(matches!(
            manager.tenant_database_for_id("t1"),
            Err(DatastoreError::Connection(_))
        ));
    }

    #[test]
    fn test_tenant_database_rejects_missing_tenant() {
        let manager = MongoConnectionManager::new(MongoDatastoreConfig::default());
        assert!(matches!(
            manager.tenant_database(None),
            Err(DatastoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_tenant_database_rejects_empty_id() {
        let manager = MongoConnectionManager::new(MongoDatastoreConfig::default());
        // Argument check comes before the connectivity check.
        assert!(matches!(
            manager.tenant_database_for_id(""),
            Err(DatastoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            manager.tenant_database_for_id("  "),
            Err(DatastoreError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_shutdown_without_connect_is_safe() {
        let mut manager = MongoConnectionManager::new(MongoDatastoreConfig::default());
        manager.shutdown().await;
        manager.shutdown().await;
        assert!(!manager.is_connected());
        assert!(matches!(
            manager.global_database(),
            Err(DatastoreError::Connection(_))
        ));
    }

    #[test]
    fn test_credential_requires_both_parts() {
        let mut config = MongoDatastoreConfig::default();
        assert!(credential_from_config(&config).unwrap().is_none());

        config.username = Some("svc".to_string());
        assert!(matches!(
            credential_from_config(&config),
            Err(DatastoreError::Configuration(_))
        ));

        config.password = Some("secret".to_string());
        config.auth_database = Some("admin".to_string());
        let credential = credential_from_config(&config).unwrap().unwrap();
        assert_eq!(credential.username.as_deref(), Some("svc"));
        assert_eq!(credential.source.as_deref(), Some("admin"));
    }

    #[test]
    fn test_client_options_standalone_uses_first_address() {
        let config = MongoDatastoreConfig::new("a,b", "27017,27018", "global");
        let addresses = parse_server_addresses(&config).unwrap();
        // No replica set name, so the topology stays standalone.
        let topology = Topology::classify(&addresses, None);
        let options = build_client_options(&config, &addresses, topology).unwrap();
        assert_eq!(options.hosts.len(), 1);
        assert!(options.repl_set_name.is_none());
        assert_eq!(
            options.max_idle_time,
            Some(Duration::from_secs(3600))
        );
    }

    #[test]
    fn test_client_options_replicated_uses_all_addresses() {
        let config = MongoDatastoreConfig::new("a,b,c", "27017,27017,27017", "global")
            .with_replica_set("rs0");
        let addresses = parse_server_addresses(&config).unwrap();
        let topology = Topology::classify(&addresses, config.replica_set_name.as_deref());
        assert_eq!(topology, Topology::Replicated);
        let options = build_client_options(&config, &addresses, topology).unwrap();
        assert_eq!(options.hosts.len(), 3);
        assert_eq!(options.repl_set_name.as_deref(), Some("rs0"));
    }
}
