//! Best-effort run telemetry for a build-orchestration host.
//!
//! Observes two lifecycle events per run (started, finalized), assembles a
//! snapshot of run facts through narrow host capability traits, and POSTs
//! each snapshot as JSON to a configured statistics endpoint. Delivery is
//! fire-and-forget: a lost record is simply lost, and no failure in this
//! crate ever reaches the run being observed.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use run_stats_reporter::{EnvEndpointProvider, HttpStatsSink, RunStatsListener};
//!
//! let listener = RunStatsListener::new(
//!     Arc::new(host_info),
//!     Arc::new(EnvEndpointProvider::new()),
//!     Arc::new(HttpStatsSink::new()),
//! );
//!
//! // Wired into the host's run lifecycle dispatch:
//! listener.on_run_started(&run, &console).await;
//! // ... run executes ...
//! listener.on_run_finalized(&run).await;
//! ```

pub mod config;
pub mod constants;
pub mod delivery;
pub mod extract;
pub mod host;
pub mod listener;
pub mod model;

pub use config::{EndpointProvider, EnvEndpointProvider};
pub use delivery::{DeliveryError, HttpStatsSink, StatsSink};
pub use host::{
    Cause, CauseSource, EnvironmentSource, ExecutionNode, HostError, HostInfo, HostRun,
    NodeSource, ParameterSource, RunIdentity, RunParameter, TaskSink, TimingSource,
};
pub use listener::RunStatsListener;
pub use model::{RunStats, ScmInfo, SlaveInfo};
