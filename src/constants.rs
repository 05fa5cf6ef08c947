//! Sentinel values and host environment variable names used by the
//! extraction pipeline.

/// Identity recorded when a user-initiated cause carries a blank id or name.
pub const ANONYMOUS: &str = "anonymous";
/// Display name recorded for every non-user cause.
pub const SYSTEM: &str = "system";
/// User id recorded when an upstream run triggered this one.
pub const UPSTREAM: &str = "upstream";
/// User id recorded for source-control polling triggers.
pub const SCM: &str = "scm";
/// User id recorded for timer triggers.
pub const TIMER: &str = "timer";
/// Recorded when the host reports nothing usable: unrecognized causes and
/// missing finalized results.
pub const UNKNOWN: &str = "UNKNOWN";
/// Result recorded for a run that has not finished yet.
pub const IN_PROGRESS: &str = "INPROGRESS";

// Environment variable names the source-control resolver reads.
pub const GIT_URL: &str = "GIT_URL";
pub const GIT_BRANCH: &str = "GIT_BRANCH";
pub const GIT_COMMIT: &str = "GIT_COMMIT";
pub const SVN_URL: &str = "SVN_URL";
pub const SVN_REVISION: &str = "SVN_REVISION";
