//! The run stats record: one snapshot of a run, transmitted per lifecycle
//! event.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source-control facts for one run.
///
/// All fields default to empty strings; presence depends entirely on what
/// the host environment exposes for the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmInfo {
    pub url: String,
    pub branch: String,
    pub commit: String,
}

/// Execution-node facts, populated only when the run has an executor
/// assigned at extraction time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaveInfo {
    pub slave_name: String,
    pub vm_name: String,
    pub label: String,
    pub remote_fs: String,
}

/// Full snapshot of one run.
///
/// A record is created fresh at the start of one listener invocation,
/// populated synchronously, handed off for a single delivery attempt, and
/// discarded. The nested records are always present in the payload, empty
/// or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub ci_url: String,
    pub job_name: String,
    pub full_job_name: String,
    pub number: u32,
    pub slave_info: SlaveInfo,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_time: DateTime<Utc>,
    pub started_user_id: String,
    pub started_user_name: String,
    pub result: String,
    /// Total run duration in milliseconds; 0 until the run is finalized.
    pub duration: u64,
    /// Non-sensitive run parameters, name to resolved value.
    pub parameters: HashMap<String, String>,
    pub scm_info: ScmInfo,
    /// Milliseconds the run spent queued before an executor picked it up.
    pub queue_time: u64,
}

impl RunStats {
    /// Fresh record with both timestamps set to the moment of construction
    /// and every other field at its empty default.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            ci_url: String::new(),
            job_name: String::new(),
            full_job_name: String::new(),
            number: 0,
            slave_info: SlaveInfo::default(),
            start_time: now,
            end_time: now,
            started_user_id: String::new(),
            started_user_name: String::new(),
            result: String::new(),
            duration: 0,
            parameters: HashMap::new(),
            scm_info: ScmInfo::default(),
            queue_time: 0,
        }
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}
