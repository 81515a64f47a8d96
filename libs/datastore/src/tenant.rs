//! Minimal tenant record used for database namespace resolution.
//!
//! The full tenant model (branding, authorized users, engine configuration)
//! lives in the tenant-management service; this crate only needs a stable
//! identifier to derive the tenant's database name.

use serde::{Deserialize, Serialize};

/// A platform tenant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    id: String,
    name: String,
}

impl Tenant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Stable tenant identifier used for database namespacing.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name for logs and operator-facing messages.
    pub fn name(&self) -> &str {
        &self.name
    }
}
