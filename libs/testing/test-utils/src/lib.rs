//! Shared test utilities for datastore testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup
//! - `TestDataBuilder`: Deterministic test data generation
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let tenant_id = builder.tenant_id();
//!     // connect against mongo.host() / mongo.port()
//! }
//! ```

mod mongo;

pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// Seeding from the test name keeps generated identifiers stable across runs
/// while avoiding collisions between tests sharing a container.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with an explicit seed
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a deterministic tenant identifier
    pub fn tenant_id(&self) -> String {
        format!("{:016x}", self.seed)
    }

    /// Generate a deterministic name with a role suffix
    pub fn name(&self, prefix: &str, role: &str) -> String {
        format!("{}_{:x}_{}", prefix, self.seed, role)
    }
}
