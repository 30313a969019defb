//! Harness configuration

use std::path::PathBuf;
use std::time::Duration;

/// Fixed rendezvous address shared by the signaling service and both peers.
pub const SIGNALING_ADDR: &str = "localhost:10000";

/// Grace period allowed for cooperative shutdown before a forced kill.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Settings for one harness run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Peer client binary, run twice per scenario.
    pub peer_binary: PathBuf,

    /// Long-lived signaling service binary, takes no arguments.
    pub signaling_binary: PathBuf,

    /// Bounded wait applied to each peer process independently.
    pub per_process_timeout: Duration,

    /// Directory receiving one `{tag}.log` file per supervised process.
    pub log_dir: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            peer_binary: PathBuf::from("./test_p2p"),
            signaling_binary: PathBuf::from("./trivial_signaling_server"),
            per_process_timeout: Duration::from_secs(20),
            log_dir: PathBuf::from("."),
        }
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the peer client binary (fluent API)
    pub fn with_peer_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.peer_binary = path.into();
        self
    }

    /// Configure the signaling service binary (fluent API)
    pub fn with_signaling_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.signaling_binary = path.into();
        self
    }

    /// Configure the per-process wait timeout (fluent API)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.per_process_timeout = timeout;
        self
    }

    /// Configure the log directory (fluent API)
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }
}
