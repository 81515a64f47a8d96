//! First-run replica-set bootstrap.
//!
//! Administrative commands (`replSetGetStatus`, `replSetInitiate`) must
//! target a single node directly, so this module opens its own short-lived
//! direct connection to the first configured address rather than going
//! through the replica-set-aware client. That connection is released on every
//! exit path.

use bson::{Bson, Document, doc};
use mongodb::Client;
use mongodb::options::ClientOptions;
use tracing::{info, warn};

use super::config::MongoDatastoreConfig;
use super::connector::credential_from_config;
use super::topology::ServerAddr;
use crate::common::{DatastoreError, DatastoreResult};

/// Outcome of probing a node for existing replica-set state.
///
/// A failed status command is the normal "not yet configured" signal, not an
/// error.
#[derive(Debug)]
pub enum ReplicaSetProbe {
    Configured(Document),
    NotConfigured,
}

/// Detect whether a replica set is configured and initialize one if not.
///
/// Idempotent: when the status probe reports an existing replica set the
/// initiation command is skipped entirely.
pub async fn auto_configure_replica_set(
    addresses: &[ServerAddr],
    config: &MongoDatastoreConfig,
) -> DatastoreResult<()> {
    let primary = direct_primary_client(addresses, config)?;
    let outcome = run_bootstrap(&primary, addresses, config).await;
    // Scoped admin connection: released whether bootstrap succeeded or not.
    primary.shutdown().await;
    outcome
}

/// Direct connection to the first address, the preferred primary.
fn direct_primary_client(
    addresses: &[ServerAddr],
    config: &MongoDatastoreConfig,
) -> DatastoreResult<Client> {
    let primary = addresses.first().ok_or_else(|| {
        DatastoreError::Configuration("at least one host must be configured".to_string())
    })?;

    let mut options = ClientOptions::default();
    options.hosts = vec![primary.into()];
    options.direct_connection = Some(true);
    options.credential = credential_from_config(config)?;
    Ok(Client::with_options(options)?)
}

async fn run_bootstrap(
    primary: &Client,
    addresses: &[ServerAddr],
    config: &MongoDatastoreConfig,
) -> DatastoreResult<()> {
    info!("Checking for existing replica set");
    match probe_replica_set(primary).await {
        ReplicaSetProbe::Configured(_) => {
            warn!("Replica set already configured. Skipping auto-configuration.");
            return Ok(());
        }
        ReplicaSetProbe::NotConfigured => {
            info!("Replica set was not configured");
        }
    }

    let name = config.replica_set_name.as_deref().ok_or_else(|| {
        DatastoreError::Configuration(
            "replica set name is required for auto-configuration".to_string(),
        )
    })?;

    info!(replica_set = name, "Configuring new replica set");
    let initiate = doc! {
        "_id": name,
        "members": build_member_documents(addresses),
    };

    let response = primary
        .database("admin")
        .run_command(doc! { "replSetInitiate": initiate })
        .await?;
    if !command_ok(&response) {
        return Err(DatastoreError::Bootstrap(format!(
            "Unable to auto-configure replica set.\n{}",
            response
        )));
    }

    info!(replica_set = name, "Replica set creation command successful");
    Ok(())
}

/// Ask a node for its replica-set status.
pub async fn probe_replica_set(primary: &Client) -> ReplicaSetProbe {
    match primary
        .database("admin")
        .run_command(doc! { "replSetGetStatus": 1 })
        .await
    {
        Ok(status) if command_ok(&status) => ReplicaSetProbe::Configured(status),
        // Command failure means the node has no replica-set configuration yet.
        _ => ReplicaSetProbe::NotConfigured,
    }
}

/// Build the member list for `replSetInitiate`: zero-based `_id` matching
/// list position, `host:port` address, and an elevated priority on the first
/// member so it is preferred as primary.
pub(crate) fn build_member_documents(addresses: &[ServerAddr]) -> Vec<Document> {
    addresses
        .iter()
        .enumerate()
        .map(|(index, address)| {
            let mut member = doc! {
                "_id": index as i32,
                "host": address.to_string(),
            };
            if index == 0 {
                member.insert("priority", 10);
            }
            member
        })
        .collect()
}

/// Numeric "ok" field check; the server reports it as a double but older
/// nodes may use integer forms.
pub(crate) fn command_ok(response: &Document) -> bool {
    match response.get("ok") {
        Some(Bson::Double(value)) => *value == 1.0,
        Some(Bson::Int32(value)) => *value == 1,
        Some(Bson::Int64(value)) => *value == 1,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::topology::parse_server_addresses;

    fn three_node_addresses() -> Vec<ServerAddr> {
        let config = MongoDatastoreConfig::new("a,b,c", "27017,27017,27017", "global");
        parse_server_addresses(&config).unwrap()
    }

    #[test]
    fn test_member_documents_match_address_order() {
        let members = build_member_documents(&three_node_addresses());
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].get_i32("_id").unwrap(), 0);
        assert_eq!(members[0].get_str("host").unwrap(), "a:27017");
        assert_eq!(members[1].get_i32("_id").unwrap(), 1);
        assert_eq!(members[1].get_str("host").unwrap(), "b:27017");
        assert_eq!(members[2].get_i32("_id").unwrap(), 2);
        assert_eq!(members[2].get_str("host").unwrap(), "c:27017");
    }

    #[test]
    fn test_first_member_is_preferred_primary() {
        let members = build_member_documents(&three_node_addresses());
        assert_eq!(members[0].get_i32("priority").unwrap(), 10);
        assert!(!members[1].contains_key("priority"));
        assert!(!members[2].contains_key("priority"));
    }

    #[test]
    fn test_command_ok_numeric_forms() {
        assert!(command_ok(&doc! { "ok": 1.0 }));
        assert!(command_ok(&doc! { "ok": 1_i32 }));
        assert!(command_ok(&doc! { "ok": 1_i64 }));
        assert!(!command_ok(&doc! { "ok": 0.0 }));
        assert!(!command_ok(&doc! { "ok": "1" }));
        assert!(!command_ok(&doc! {}));
    }

    #[test]
    fn test_direct_primary_requires_address() {
        let config = MongoDatastoreConfig::default();
        let err = direct_primary_client(&[], &config).unwrap_err();
        assert!(matches!(err, DatastoreError::Configuration(_)));
    }

    #[tokio::test]
    #[ignore] // Requires a MongoDB node started with --replSet rs0
    async fn test_auto_configure_is_idempotent() {
        let config = MongoDatastoreConfig::new("localhost", "27017", "global")
            .with_replica_set("rs0")
            .with_auto_configure_replication(true);
        let addresses = parse_server_addresses(&config).unwrap();

        auto_configure_replica_set(&addresses, &config).await.unwrap();
        // Second run probes, sees the configured set, and skips initiation.
        auto_configure_replica_set(&addresses, &config).await.unwrap();
    }
}
