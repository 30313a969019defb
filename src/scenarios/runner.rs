//! Reciprocal pair execution
//!
//! Runs the two halves of one conceptual connection as concurrent processes.
//! Both sides must be live before either finishes its handshake, so the pair
//! is always started before any wait begins.

use std::time::Duration;

use crate::config::{HarnessConfig, SIGNALING_ADDR};
use crate::error::HarnessResult;
use crate::runtime::{ManagedProcess, ProcessSupervisor};
use crate::verdict::FailureFlag;

/// One half of a peer pair: role selector plus identity assignment.
#[derive(Debug, Clone, Copy)]
pub struct PeerSide<'a> {
    pub role: &'a str,
    pub local: &'a str,
    pub remote: &'a str,
}

impl<'a> PeerSide<'a> {
    pub fn new(role: &'a str, local: &'a str, remote: &'a str) -> Self {
        Self { role, local, remote }
    }
}

/// Starts peer pairs and waits both sides out.
pub struct ScenarioRunner {
    config: HarnessConfig,
    supervisor: ProcessSupervisor,
}

impl ScenarioRunner {
    pub fn new(config: HarnessConfig, flag: FailureFlag) -> Self {
        let supervisor = ProcessSupervisor::new(config.log_dir.clone(), flag);
        Self { config, supervisor }
    }

    /// Command line for one peer binary invocation.
    fn peer_cmdline(&self, side: PeerSide<'_>) -> Vec<String> {
        vec![
            self.config.peer_binary.display().to_string(),
            format!("--{}", side.role),
            "--identity-local".to_string(),
            format!("str:{}", side.local),
            "--identity-remote".to_string(),
            format!("str:{}", side.remote),
            "--signaling-server".to_string(),
            SIGNALING_ADDR.to_string(),
        ]
    }

    async fn start_peer(&self, side: PeerSide<'_>) -> HarnessResult<ManagedProcess> {
        // The local identity doubles as the log tag
        self.supervisor.start(side.local, &self.peer_cmdline(side)).await
    }

    /// Run both sides of one connection concurrently and wait for both.
    ///
    /// Both processes are started before either is waited on, and the waits
    /// are independent: one side timing out never cuts the other short.
    /// Failures (launch, non-zero exit, timeout) are recorded in the shared
    /// failure flag rather than returned, so the orchestrator decides
    /// scenario by scenario whether to keep going.
    pub async fn run_pair(&self, side_a: PeerSide<'_>, side_b: PeerSide<'_>, timeout: Duration) {
        let a = self.start_peer(side_a).await;
        let b = self.start_peer(side_b).await;

        tokio::join!(wait_side(a, timeout), wait_side(b, timeout));
    }
}

/// Wait one side out. A side that never launched was already recorded as
/// failed by the supervisor; the other side still gets its full wait.
async fn wait_side(proc: HarnessResult<ManagedProcess>, timeout: Duration) {
    match proc {
        Ok(p) => {
            p.wait(timeout).await;
        }
        Err(e) => tracing::error!("{e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn runner_with(config: HarnessConfig) -> (ScenarioRunner, FailureFlag) {
        let flag = FailureFlag::new();
        (ScenarioRunner::new(config, flag.clone()), flag)
    }

    #[test]
    fn peer_cmdline_encodes_role_identities_and_rendezvous() {
        let (runner, _) = runner_with(HarnessConfig::new().with_peer_binary("./test_p2p"));

        let cmdline = runner.peer_cmdline(PeerSide::new("server", "peer_server", "peer_client"));

        assert_eq!(
            cmdline,
            vec![
                "./test_p2p",
                "--server",
                "--identity-local",
                "str:peer_server",
                "--identity-remote",
                "str:peer_client",
                "--signaling-server",
                "localhost:10000",
            ]
        );
    }

    #[cfg(unix)]
    fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passing_pair_leaves_flag_unset() {
        let dir = tempdir().unwrap();
        let peer = write_stub(dir.path(), "peer", "exit 0");
        let config = HarnessConfig::new()
            .with_peer_binary(peer)
            .with_log_dir(dir.path());
        let (runner, flag) = runner_with(config);

        runner
            .run_pair(
                PeerSide::new("server", "peer_server", "peer_client"),
                PeerSide::new("client", "peer_client", "peer_server"),
                Duration::from_secs(10),
            )
            .await;

        assert!(!flag.is_set());
        assert!(dir.path().join("peer_server.log").exists());
        assert!(dir.path().join("peer_client.log").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn one_failing_side_sets_flag() {
        let dir = tempdir().unwrap();
        // Fail only the side that declared itself "--client"
        let peer = write_stub(
            dir.path(),
            "peer",
            "case \"$1\" in --client) exit 2;; *) exit 0;; esac",
        );
        let config = HarnessConfig::new()
            .with_peer_binary(peer)
            .with_log_dir(dir.path());
        let (runner, flag) = runner_with(config);

        runner
            .run_pair(
                PeerSide::new("server", "peer_server", "peer_client"),
                PeerSide::new("client", "peer_client", "peer_server"),
                Duration::from_secs(10),
            )
            .await;

        assert!(flag.is_set());
        let server_log = std::fs::read_to_string(dir.path().join("peer_server.log")).unwrap();
        let client_log = std::fs::read_to_string(dir.path().join("peer_client.log")).unwrap();
        assert!(server_log.contains("Exited with 0"));
        assert!(client_log.contains("Exited with 2"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn launch_failure_on_one_side_still_waits_the_other() {
        let dir = tempdir().unwrap();
        let config = HarnessConfig::new()
            .with_peer_binary(dir.path().join("missing_peer"))
            .with_log_dir(dir.path());
        let (runner, flag) = runner_with(config);

        runner
            .run_pair(
                PeerSide::new("server", "peer_server", "peer_client"),
                PeerSide::new("client", "peer_client", "peer_server"),
                Duration::from_secs(10),
            )
            .await;

        assert!(flag.is_set());
        // Both sides produced a log even though neither binary exists
        assert!(dir.path().join("peer_server.log").exists());
        assert!(dir.path().join("peer_client.log").exists());
    }
}
