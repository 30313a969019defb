//! Run sequencing and final verdict
//!
//! Drives one full harness run: start the signaling service, run each
//! scenario in order with fail-fast between them, then shut the signaling
//! service down. The verdict is snapshotted before shutdown, so a messy
//! signaling exit can never flip a passing run.

use crate::config::HarnessConfig;
use crate::runtime::ProcessSupervisor;
use crate::scenarios::{Scenario, ScenarioRunner};
use crate::verdict::FailureFlag;

const SEPARATOR: &str = "=================================================================";

pub struct TestOrchestrator {
    config: HarnessConfig,
    flag: FailureFlag,
}

impl TestOrchestrator {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            flag: FailureFlag::new(),
        }
    }

    /// Run the given scenarios against one signaling service instance.
    ///
    /// Returns the harness exit code: 0 when every scenario passed, 1 when
    /// any process failed to launch, exited non-zero or timed out. A scenario
    /// that sets the failure flag stops the run; later scenarios are never
    /// started.
    pub async fn run(&self, scenarios: &[Scenario]) -> i32 {
        let supervisor = ProcessSupervisor::new(self.config.log_dir.clone(), self.flag.clone());

        // Long-lived: drained from the moment it starts, never waited on
        // until final teardown.
        let signaling_cmd = vec![self.config.signaling_binary.display().to_string()];
        let signaling = match supervisor.start("signaling", &signaling_cmd).await {
            Ok(process) => Some(process),
            Err(e) => {
                tracing::error!("{e}");
                None
            }
        };

        let runner = ScenarioRunner::new(self.config.clone(), self.flag.clone());

        for scenario in scenarios {
            if self.flag.is_set() {
                tracing::warn!("failure recorded, skipping remaining scenarios");
                break;
            }

            banner();
            tracing::info!(scenario = scenario.name(), "running scenario");
            scenario.run(&runner, self.config.per_process_timeout).await;
            banner();
        }

        // Snapshot the verdict before signaling teardown: a bad signaling
        // exit is logged but never counted against the scenarios.
        let failed = self.flag.is_set();

        if let Some(signaling) = signaling {
            signaling.terminate().await;
        }

        if failed {
            println!("TEST FAILED");
            1
        } else {
            println!("TEST SUCCEEDED");
            0
        }
    }
}

fn banner() {
    println!("{SEPARATOR}");
    println!("{SEPARATOR}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[cfg(unix)]
    #[tokio::test]
    async fn empty_scenario_list_with_live_signaling_succeeds() {
        let dir = tempdir().unwrap();
        let config = HarnessConfig::new()
            .with_signaling_binary("/bin/true")
            .with_log_dir(dir.path());
        let orchestrator = TestOrchestrator::new(config);

        let code = orchestrator.run(&[]).await;

        assert_eq!(code, 0);
        assert!(dir.path().join("signaling.log").exists());
    }

    #[tokio::test]
    async fn missing_signaling_binary_fails_the_run() {
        let dir = tempdir().unwrap();
        let config = HarnessConfig::new()
            .with_signaling_binary(dir.path().join("no_signaling_server"))
            .with_log_dir(dir.path());
        let orchestrator = TestOrchestrator::new(config);

        let code = orchestrator.run(&[]).await;

        assert_eq!(code, 1);
    }
}
