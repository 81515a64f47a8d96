//! Address parsing and topology classification.

use std::fmt;

use mongodb::options::ServerAddress;

use super::config::MongoDatastoreConfig;
use crate::common::{DatastoreError, DatastoreResult};

/// A resolved (host, port) pair.
///
/// Order is significant across a parsed list: the first entry is the
/// preferred primary during replica-set bootstrap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerAddr {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl From<&ServerAddr> for ServerAddress {
    fn from(addr: &ServerAddr) -> Self {
        ServerAddress::Tcp {
            host: addr.host.clone(),
            port: Some(addr.port),
        }
    }
}

/// Parse the comma-separated hostname and port lists into server addresses.
///
/// The two lists must have the same number of entries and every port must be
/// numeric; anything else is a configuration error. Whitespace around entries
/// is tolerated. Input order is preserved.
pub fn parse_server_addresses(
    config: &MongoDatastoreConfig,
) -> DatastoreResult<Vec<ServerAddr>> {
    let hosts: Vec<&str> = config.hostname.split(',').collect();
    let ports: Vec<&str> = config.port.split(',').collect();

    if hosts.len() != ports.len() {
        return Err(DatastoreError::Configuration(format!(
            "Number of hosts does not match number of ports. Hosts({}) Ports({})",
            hosts.join(" "),
            ports.join(" ")
        )));
    }

    hosts
        .iter()
        .zip(ports.iter())
        .map(|(host, port)| {
            let port = port.trim().parse::<u16>().map_err(|_| {
                DatastoreError::Configuration(format!(
                    "Non-numeric port '{}' specified for host '{}'",
                    port.trim(),
                    host.trim()
                ))
            })?;
            Ok(ServerAddr {
                host: host.trim().to_string(),
                port,
            })
        })
        .collect()
}

/// Datastore deployment topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    Standalone,
    Replicated,
}

impl Topology {
    /// Replicated iff there is more than one address and a non-empty replica
    /// set name; everything else is standalone.
    pub fn classify(addresses: &[ServerAddr], replica_set_name: Option<&str>) -> Self {
        let named = replica_set_name.is_some_and(|name| !name.is_empty());
        if addresses.len() > 1 && named {
            Topology::Replicated
        } else {
            Topology::Standalone
        }
    }
}
