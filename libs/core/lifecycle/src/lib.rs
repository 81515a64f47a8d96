//! Lifecycle contract for long-lived platform components.
//!
//! Services compose infrastructure pieces (datastore clients, brokers,
//! channels) behind a uniform `initialize`/`start`/`stop` surface. An external
//! controller drives the hooks sequentially at startup and shutdown and
//! surfaces failures to operators. Components report progress through a
//! [`LifecycleProgressMonitor`] rather than logging directly, so the
//! controller can relay status to whatever UI or probe is watching startup.

use async_trait::async_trait;
use tracing::info;

/// Receives progress messages while a lifecycle hook runs.
///
/// Implementations must be cheap; components call `report` inline between
/// startup steps.
pub trait LifecycleProgressMonitor: Send + Sync {
    fn report(&self, message: &str);
}

/// Progress monitor that forwards messages to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingProgressMonitor;

impl LifecycleProgressMonitor for LoggingProgressMonitor {
    fn report(&self, message: &str) {
        info!("{}", message);
    }
}

/// A component managed by an external lifecycle controller.
///
/// Hooks take `&mut self`: the controller owns the component and invokes
/// hooks sequentially, never concurrently. Errors propagate to the controller,
/// which decides whether to retry, abort startup, or mark the component
/// unavailable; components do not retry internally.
#[async_trait]
pub trait LifecycleComponent: Send {
    /// Human-readable name used in controller logs and error reports.
    fn component_name(&self) -> &str;

    /// Whether startup must halt if this component fails to initialize.
    fn is_required(&self) -> bool {
        false
    }

    /// Acquire resources and verify the component is usable.
    async fn initialize(&mut self, monitor: &dyn LifecycleProgressMonitor) -> eyre::Result<()>;

    /// Begin active operation. Called after `initialize` succeeds.
    async fn start(&mut self, monitor: &dyn LifecycleProgressMonitor) -> eyre::Result<()>;

    /// Release resources. Must tolerate being called after a failed
    /// `initialize` and being called more than once.
    async fn stop(&mut self, monitor: &dyn LifecycleProgressMonitor) -> eyre::Result<()>;
}
