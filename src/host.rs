//! Narrow, read-only capability traits over the host orchestration
//! platform.
//!
//! The pipeline never sees concrete host objects. Each fact it needs comes
//! through one of these seams, so tests substitute fakes and the extraction
//! logic stays host-agnostic.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Error surface of a blocking host call.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host could not produce the data (missing, I/O failure, ...).
    /// Recovered locally by substituting defaults.
    #[error("host data unavailable: {0}")]
    Unavailable(String),
    /// The host signalled cooperative cancellation during the call.
    /// Short-circuits the rest of extraction and delivery for the event.
    #[error("host call interrupted")]
    Interrupted,
}

/// Why a run was started, as recorded by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cause {
    /// A user started the run directly. Either field may be blank.
    User { user_id: String, user_name: String },
    /// Another run triggered this one.
    UpstreamRun,
    /// A source-control polling trigger fired.
    ScmTrigger,
    /// A timer trigger fired.
    TimerTrigger,
    /// Any cause kind this reporter does not recognize.
    Other,
}

/// Identity of a run and its owning job.
pub trait RunIdentity {
    /// Whether this run represents a full build-like execution. The host
    /// fires lifecycle events for lighter-weight run types too; those are
    /// ignored by the listener.
    fn is_build(&self) -> bool;
    fn job_name(&self) -> String;
    fn full_job_name(&self) -> String;
    fn number(&self) -> u32;
    /// Human-readable identifier of the run, used in log messages.
    fn display_name(&self) -> String;
    /// Relative URL of the run on the host, used in warnings.
    fn url(&self) -> String;
}

/// Timing and outcome facts the host records for a run.
pub trait TimingSource {
    fn start_time(&self) -> DateTime<Utc>;
    /// Total run duration in milliseconds; 0 until the run finishes.
    fn duration_ms(&self) -> u64;
    /// Milliseconds spent queued, available while an executor is assigned.
    fn queue_time_ms(&self) -> Option<u64>;
    /// Host result string, once one has been assigned.
    fn result(&self) -> Option<String>;
}

/// The host's record of why the run started, in host order.
pub trait CauseSource {
    fn causes(&self) -> Vec<Cause>;
}

/// Resolved environment of a run.
///
/// Resolution is a blocking host call that can fail or be interrupted; the
/// per-run console sink is handed through because the host may log there
/// while resolving.
pub trait EnvironmentSource {
    fn environment(&self, sink: &dyn TaskSink) -> Result<HashMap<String, String>, HostError>;
}

/// One declared invocation parameter.
pub trait RunParameter: Send + Sync {
    fn name(&self) -> String;
    /// Sensitive parameters are never read, logged, or transmitted.
    fn is_sensitive(&self) -> bool;
    /// Contribute this parameter's resolved value into an environment-style
    /// map, under whatever keys the parameter type defines.
    fn contribute(&self, env: &mut HashMap<String, String>);
}

/// The run's declared parameters. `None` when no parameters action is
/// attached to the run at all.
pub trait ParameterSource {
    fn parameters(&self) -> Option<&[Box<dyn RunParameter>]>;
}

/// The execution node a run is assigned to.
pub trait ExecutionNode {
    fn node_name(&self) -> String;
    /// Host/VM name of the node; a blocking lookup that can fail or be
    /// interrupted.
    fn host_name(&self) -> Result<String, HostError>;
    /// The node's label expression.
    fn label(&self) -> String;
    /// Name of the node's remote filesystem root directory.
    fn remote_fs_name(&self) -> String;
}

/// Access to the run's currently assigned executor, if any.
pub trait NodeSource {
    /// `None` when the run already finished or never started on a node.
    fn assigned_node(&self) -> Option<&dyn ExecutionNode>;
}

/// Per-run console sink the host provides for one event dispatch.
pub trait TaskSink: Send + Sync {
    fn log_line(&self, line: &str);
}

/// Process-wide facts about the host installation.
pub trait HostInfo: Send + Sync {
    /// Base URL of the CI installation, when one is configured.
    fn root_url(&self) -> Option<String>;
}

/// Everything the pipeline reads from one run.
pub trait HostRun:
    RunIdentity + TimingSource + CauseSource + EnvironmentSource + ParameterSource + NodeSource + Sync
{
}

impl<T> HostRun for T where
    T: RunIdentity
        + TimingSource
        + CauseSource
        + EnvironmentSource
        + ParameterSource
        + NodeSource
        + Sync
{
}
