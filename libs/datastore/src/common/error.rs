/// Unified error type for datastore operations.
///
/// Every failure propagates synchronously to the caller; this layer performs
/// no retries. The lifecycle controller decides what a startup-time failure
/// means for the service as a whole.
#[derive(Debug, thiserror::Error)]
pub enum DatastoreError {
    /// Malformed connection configuration (host/port mismatch, bad port,
    /// partial credentials). Fatal to startup, never retried.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The configured node(s) could not be reached, or a handle was requested
    /// before/after the connection's lifetime.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Replica-set initialization returned a non-success status. Carries the
    /// raw server response for diagnostics.
    #[error("Replica set bootstrap failed: {0}")]
    Bootstrap(String),

    /// Caller violated an API contract (missing tenant, empty tenant id).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Passthrough for other MongoDB driver errors.
    #[error("MongoDB error: {0}")]
    Driver(#[from] mongodb::error::Error),
}

/// Result type alias for datastore operations
pub type DatastoreResult<T> = Result<T, DatastoreError>;
