#[cfg(feature = "config")]
use core_config::{
    ConfigError, FromEnv, env_bool_or, env_optional, env_or_default, env_parse_or, env_required,
};

/// MongoDB datastore configuration.
///
/// Supports both standalone and replica-set deployments: `hostname` and
/// `port` each take one or more comma-separated values, and the two lists
/// must have the same length. Entry order matters; the first entry is the
/// preferred primary when auto-configuring a replica set.
///
/// # Example
///
/// ```ignore
/// use datastore::mongodb::MongoDatastoreConfig;
///
/// // Standalone
/// let config = MongoDatastoreConfig::new("localhost", "27017", "global");
///
/// // Three-node replica set with first-run bootstrap
/// let config = MongoDatastoreConfig::new("a,b,c", "27017,27017,27017", "global")
///     .with_replica_set("rs0")
///     .with_auto_configure_replication(true);
///
/// // From environment variables (requires `config` feature)
/// let config = MongoDatastoreConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoDatastoreConfig {
    /// Hostname(s), comma-separated for replica sets
    pub hostname: String,

    /// Port(s), comma-separated, same cardinality as `hostname`
    pub port: String,

    /// Replica set name; required for replicated topology
    pub replica_set_name: Option<String>,

    /// Username for authenticated access
    pub username: Option<String>,

    /// Password for authenticated access (set together with `username`)
    pub password: Option<String>,

    /// Database holding the credentials (driver defaults to "admin")
    pub auth_database: Option<String>,

    /// Name of the global (non-tenant) database
    pub database: String,

    /// Initialize the replica set on first run if it does not exist yet
    pub auto_configure_replication: bool,

    /// Idle threshold after which pooled connections are closed, in seconds
    pub max_connection_idle_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoDatastoreConfig {
    /// Create a configuration for the given host(s), port(s) and global
    /// database name, with default timeouts and no credentials.
    pub fn new(
        hostname: impl Into<String>,
        port: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            port: port.into(),
            replica_set_name: None,
            username: None,
            password: None,
            auth_database: None,
            database: database.into(),
            auto_configure_replication: false,
            max_connection_idle_secs: 3600,
            server_selection_timeout_secs: 30,
        }
    }

    /// Set the replica set name (enables replicated topology when more than
    /// one address is configured).
    pub fn with_replica_set(mut self, name: impl Into<String>) -> Self {
        self.replica_set_name = Some(name.into());
        self
    }

    /// Set credentials. `auth_database` of `None` falls back to the driver
    /// default source.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        auth_database: Option<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self.auth_database = auth_database;
        self
    }

    /// Enable or disable first-run replica-set bootstrap.
    pub fn with_auto_configure_replication(mut self, enabled: bool) -> Self {
        self.auto_configure_replication = enabled;
        self
    }

    /// Get the global database name
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoDatastoreConfig {
    fn default() -> Self {
        Self::new("localhost", "27017", "global")
    }
}

/// Load MongoDatastoreConfig from environment variables
///
/// Environment variables:
/// - `MONGODB_HOSTNAME` (default: "localhost") - comma-separated host list
/// - `MONGODB_PORT` (default: "27017") - comma-separated port list
/// - `MONGODB_REPLICA_SET` (optional) - replica set name
/// - `MONGODB_USERNAME` / `MONGODB_PASSWORD` (optional) - credentials
/// - `MONGODB_AUTH_DATABASE` (optional) - credential source database
/// - `MONGODB_DATABASE` (required) - global database name
/// - `MONGODB_AUTO_CONFIGURE_REPLICATION` (optional, default: false)
/// - `MONGODB_MAX_IDLE_SECS` (optional, default: 3600)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoDatastoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            hostname: env_or_default("MONGODB_HOSTNAME", "localhost"),
            port: env_or_default("MONGODB_PORT", "27017"),
            replica_set_name: env_optional("MONGODB_REPLICA_SET"),
            username: env_optional("MONGODB_USERNAME"),
            password: env_optional("MONGODB_PASSWORD"),
            auth_database: env_optional("MONGODB_AUTH_DATABASE"),
            database: env_required("MONGODB_DATABASE")?,
            auto_configure_replication: env_bool_or("MONGODB_AUTO_CONFIGURE_REPLICATION", false)?,
            max_connection_idle_secs: env_parse_or("MONGODB_MAX_IDLE_SECS", 3600)?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                30,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = MongoDatastoreConfig::new("localhost", "27017", "global");
        assert_eq!(config.hostname, "localhost");
        assert_eq!(config.port, "27017");
        assert_eq!(config.database(), "global");
        assert!(config.replica_set_name.is_none());
        assert!(!config.auto_configure_replication);
        assert_eq!(config.max_connection_idle_secs, 3600);
    }

    #[test]
    fn test_config_replica_set_builder() {
        let config = MongoDatastoreConfig::new("a,b,c", "27017,27017,27017", "global")
            .with_replica_set("rs0")
            .with_auto_configure_replication(true);
        assert_eq!(config.replica_set_name.as_deref(), Some("rs0"));
        assert!(config.auto_configure_replication);
    }

    #[test]
    fn test_config_credentials_builder() {
        let config = MongoDatastoreConfig::default().with_credentials(
            "svc",
            "secret",
            Some("admin".to_string()),
        );
        assert_eq!(config.username.as_deref(), Some("svc"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.auth_database.as_deref(), Some("admin"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("MONGODB_HOSTNAME", Some("a,b")),
                ("MONGODB_PORT", Some("27017,27018")),
                ("MONGODB_REPLICA_SET", Some("rs0")),
                ("MONGODB_DATABASE", Some("global")),
                ("MONGODB_AUTO_CONFIGURE_REPLICATION", Some("true")),
            ],
            || {
                let config = MongoDatastoreConfig::from_env().unwrap();
                assert_eq!(config.hostname, "a,b");
                assert_eq!(config.port, "27017,27018");
                assert_eq!(config.replica_set_name.as_deref(), Some("rs0"));
                assert_eq!(config.database(), "global");
                assert!(config.auto_configure_replication);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_config_from_env_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_HOSTNAME", None::<&str>),
                ("MONGODB_PORT", None),
                ("MONGODB_DATABASE", Some("global")),
            ],
            || {
                let config = MongoDatastoreConfig::from_env().unwrap();
                assert_eq!(config.hostname, "localhost");
                assert_eq!(config.port, "27017");
                assert!(!config.auto_configure_replication);
                assert_eq!(config.server_selection_timeout_secs, 30);
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_config_from_env_missing_database() {
        temp_env::with_var_unset("MONGODB_DATABASE", || {
            assert!(MongoDatastoreConfig::from_env().is_err());
        });
    }
}
