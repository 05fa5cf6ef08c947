//! Lifecycle listener: the host-facing entry point of the pipeline.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use crate::config::EndpointProvider;
use crate::constants;
use crate::delivery::{DeliveryError, StatsSink};
use crate::extract;
use crate::host::{HostError, HostInfo, HostRun, TaskSink};
use crate::model::RunStats;

#[derive(Debug, Error)]
enum ReportError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Observes run lifecycle events and reports one stats record per event.
///
/// This is the single failure-isolation boundary of the pipeline: whatever
/// goes wrong during extraction or delivery is logged as a warning and
/// swallowed here, so the observed run is never blocked, delayed, or failed
/// by telemetry.
pub struct RunStatsListener {
    host: Arc<dyn HostInfo>,
    endpoint: Arc<dyn EndpointProvider>,
    sink: Arc<dyn StatsSink>,
}

impl RunStatsListener {
    pub fn new(
        host: Arc<dyn HostInfo>,
        endpoint: Arc<dyn EndpointProvider>,
        sink: Arc<dyn StatsSink>,
    ) -> Self {
        Self {
            host,
            endpoint,
            sink,
        }
    }

    /// Handle a run entering execution.
    ///
    /// Applies only to full build-like runs; anything lighter is a no-op.
    /// `sink` is the host's per-run console for this dispatch, handed
    /// through to environment resolution.
    pub async fn on_run_started(&self, run: &dyn HostRun, sink: &dyn TaskSink) {
        if !run.is_build() {
            return;
        }
        let endpoint = self.endpoint.stats_endpoint();
        if let Err(err) = self.report_started(&endpoint, run, sink).await {
            log::warn!(
                "[STATS] Failed to call API {} for run {}: {}",
                endpoint,
                run.display_name(),
                err
            );
        }
    }

    /// Handle a run being finalized.
    ///
    /// Builds a fresh record independent of the started snapshot: final
    /// result, recorded duration, and an end time taken at this moment
    /// rather than from the run.
    pub async fn on_run_finalized(&self, run: &dyn HostRun) {
        if !run.is_build() {
            return;
        }
        let endpoint = self.endpoint.stats_endpoint();
        if let Err(err) = self.report_finalized(&endpoint, run).await {
            log::warn!(
                "[STATS] Failed to call API {} for run {}: {}",
                endpoint,
                run.display_name(),
                err
            );
        }
    }

    async fn report_started(
        &self,
        endpoint: &str,
        run: &dyn HostRun,
        sink: &dyn TaskSink,
    ) -> Result<(), ReportError> {
        let mut stats = self.identity_record(run);
        stats.start_time = run.start_time();
        stats.result = run
            .result()
            .unwrap_or_else(|| constants::IN_PROGRESS.to_string());
        stats.queue_time = run.queue_time_ms().unwrap_or(0);

        extract::resolve_actor(run, &mut stats);
        extract::resolve_scm(run, sink, &mut stats)?;
        extract::collect_parameters(run, &mut stats);
        extract::resolve_node(run, &mut stats)?;

        self.sink.post(endpoint, &stats).await?;
        log::info!(
            "[STATS] Started run {}, status: {}, start time: {}",
            run.display_name(),
            stats.result,
            stats.start_time
        );
        Ok(())
    }

    async fn report_finalized(&self, endpoint: &str, run: &dyn HostRun) -> Result<(), ReportError> {
        let mut stats = self.identity_record(run);
        stats.result = run
            .result()
            .unwrap_or_else(|| constants::UNKNOWN.to_string());
        stats.duration = run.duration_ms();
        stats.end_time = Utc::now();

        self.sink.post(endpoint, &stats).await?;
        log::info!(
            "[STATS] Run {} completed, status: {} at {}",
            run.job_name(),
            stats.result,
            stats.end_time
        );
        Ok(())
    }

    /// Fresh record carrying only identity fields.
    fn identity_record(&self, run: &dyn HostRun) -> RunStats {
        let mut stats = RunStats::new();
        stats.ci_url = self.host.root_url().unwrap_or_default();
        stats.job_name = run.job_name();
        stats.full_job_name = run.full_job_name();
        stats.number = run.number();
        stats
    }
}
