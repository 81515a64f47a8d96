//! Lifecycle integration for the connection manager.

use async_trait::async_trait;
use eyre::WrapErr;
use lifecycle::{LifecycleComponent, LifecycleProgressMonitor};

use super::connector::MongoConnectionManager;

#[async_trait]
impl LifecycleComponent for MongoConnectionManager {
    fn component_name(&self) -> &str {
        "mongodb-datastore"
    }

    // Services cannot run without their datastore; the controller must not
    // proceed past startup if this component fails.
    fn is_required(&self) -> bool {
        true
    }

    async fn initialize(&mut self, monitor: &dyn LifecycleProgressMonitor) -> eyre::Result<()> {
        monitor.report(&format!(
            "Connecting to MongoDB at {}:{}",
            self.config().hostname,
            self.config().port
        ));
        self.connect().await.wrap_err_with(|| {
            format!(
                "MongoDB datastore failed to initialize ({}:{})",
                self.config().hostname,
                self.config().port
            )
        })?;
        monitor.report("MongoDB connection verified");
        Ok(())
    }

    async fn start(&mut self, monitor: &dyn LifecycleProgressMonitor) -> eyre::Result<()> {
        monitor.report(&format!(
            "Mongo client ready: hosts={} ports={} database={}",
            self.config().hostname,
            self.config().port,
            self.config().database
        ));
        Ok(())
    }

    async fn stop(&mut self, monitor: &dyn LifecycleProgressMonitor) -> eyre::Result<()> {
        self.shutdown().await;
        monitor.report("MongoDB connection closed");
        Ok(())
    }
}
