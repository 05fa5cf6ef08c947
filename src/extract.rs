//! Stateless fact extractors.
//!
//! Each one reads a single host capability and writes into the run stats
//! record, tolerating absent or partial host data. An `Unavailable` host
//! call is logged and defaulted; `Interrupted` is returned to the caller
//! untouched and ends extraction for the event.

use std::collections::HashMap;

use crate::constants;
use crate::host::{
    Cause, CauseSource, EnvironmentSource, HostError, NodeSource, ParameterSource, RunIdentity,
    TaskSink,
};
use crate::model::{RunStats, SlaveInfo};

/// Resolve who (or what) started the run from the host's cause list.
///
/// Every cause is applied in host order and the last write wins. A run with
/// no causes keeps the default empty identity fields.
pub fn resolve_actor<R>(run: &R, stats: &mut RunStats)
where
    R: CauseSource + ?Sized,
{
    for cause in run.causes() {
        match cause {
            Cause::User { user_id, user_name } => {
                stats.started_user_id = or_anonymous(user_id);
                stats.started_user_name = or_anonymous(user_name);
            }
            Cause::UpstreamRun => {
                stats.started_user_id = constants::UPSTREAM.to_string();
                stats.started_user_name = constants::SYSTEM.to_string();
            }
            Cause::ScmTrigger => {
                stats.started_user_id = constants::SCM.to_string();
                stats.started_user_name = constants::SYSTEM.to_string();
            }
            Cause::TimerTrigger => {
                stats.started_user_id = constants::TIMER.to_string();
                stats.started_user_name = constants::SYSTEM.to_string();
            }
            Cause::Other => {
                stats.started_user_id = constants::UNKNOWN.to_string();
                stats.started_user_name = constants::SYSTEM.to_string();
            }
        }
    }
}

fn or_anonymous(value: String) -> String {
    if value.is_empty() {
        constants::ANONYMOUS.to_string()
    } else {
        value
    }
}

/// Populate source-control info from the run's resolved environment.
///
/// An unavailable environment leaves every field empty; the record always
/// carries a fully constructed (possibly empty) scm block.
pub fn resolve_scm<R>(run: &R, sink: &dyn TaskSink, stats: &mut RunStats) -> Result<(), HostError>
where
    R: EnvironmentSource + RunIdentity + ?Sized,
{
    let environment = match run.environment(sink) {
        Ok(env) => Some(env),
        Err(HostError::Interrupted) => {
            log::warn!(
                "[STATS] Failed to retrieve environment for {}: interrupted",
                run.url()
            );
            return Err(HostError::Interrupted);
        }
        Err(err) => {
            log::warn!("[STATS] Failed to retrieve environment for {}: {}", run.url(), err);
            None
        }
    };

    if let Some(env) = environment {
        if let Some(url) = env.get(constants::GIT_URL) {
            stats.scm_info.url = url.clone();
        } else if let Some(url) = env.get(constants::SVN_URL) {
            stats.scm_info.url = url.clone();
        }
        if let Some(branch) = env.get(constants::GIT_BRANCH) {
            stats.scm_info.branch = branch.clone();
        }
        if let Some(commit) = env.get(constants::GIT_COMMIT) {
            stats.scm_info.commit = commit.clone();
        } else if let Some(revision) = env.get(constants::SVN_REVISION) {
            // Without a git commit the subversion revision lands in the url
            // field. Consumers read it from there, so it stays.
            stats.scm_info.url = revision.clone();
        }
    }
    Ok(())
}

/// Collect the run's non-sensitive parameters into the record.
///
/// Each parameter contributes its resolved value into an environment-style
/// map; sensitive parameters are skipped entirely. A run with no parameters
/// action keeps the default empty map.
pub fn collect_parameters<R>(run: &R, stats: &mut RunStats)
where
    R: ParameterSource + ?Sized,
{
    if let Some(params) = run.parameters() {
        let mut env = HashMap::new();
        for param in params {
            if !param.is_sensitive() {
                param.contribute(&mut env);
            }
        }
        stats.parameters = env;
    }
}

/// Populate execution-node info from the run's assigned executor.
///
/// No executor means the run already finished or never started on a node;
/// the record keeps its default empty node block. A failed host-name lookup
/// is logged and the remaining fields are still filled in.
pub fn resolve_node<R>(run: &R, stats: &mut RunStats) -> Result<(), HostError>
where
    R: NodeSource + RunIdentity + ?Sized,
{
    let Some(node) = run.assigned_node() else {
        return Ok(());
    };

    let mut info = SlaveInfo {
        slave_name: node.node_name(),
        ..SlaveInfo::default()
    };
    match node.host_name() {
        Ok(host) => info.vm_name = host,
        Err(HostError::Interrupted) => {
            log::warn!(
                "[STATS] Failed to retrieve host name of node for {}: interrupted",
                run.url()
            );
            return Err(HostError::Interrupted);
        }
        Err(err) => {
            log::warn!(
                "[STATS] Failed to retrieve host name of node for {}: {}",
                run.url(),
                err
            );
        }
    }
    info.label = node.label();
    info.remote_fs = node.remote_fs_name();
    stats.slave_info = info;
    Ok(())
}
