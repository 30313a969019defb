//! Test scenarios
//!
//! Named connection scenarios and the dispatch from CLI scenario names to the
//! ordered list the orchestrator runs.

pub mod connect;
pub mod runner;

pub use runner::{PeerSide, ScenarioRunner};

use std::time::Duration;

/// One end-to-end scenario: a reciprocal pair of peer processes run
/// concurrently against the shared signaling service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// One peer listens as "server", the other connects as "client".
    ClientServer,
    /// Both peers take the symmetric role; neither is the designated listener.
    Symmetric,
}

impl Scenario {
    pub fn name(self) -> &'static str {
        match self {
            Scenario::ClientServer => "client_server",
            Scenario::Symmetric => "symmetric",
        }
    }

    /// Run to completion: both peer processes reach a terminal state before
    /// this returns. Failures surface only through the shared failure flag.
    pub async fn run(self, runner: &ScenarioRunner, timeout: Duration) {
        match self {
            Scenario::ClientServer => connect::client_server(runner, timeout).await,
            Scenario::Symmetric => connect::symmetric(runner, timeout).await,
        }
    }
}

/// Resolve a CLI scenario name to the ordered scenario list.
pub fn scenario_set(name: &str) -> Option<Vec<Scenario>> {
    match name {
        "client_server" => Some(vec![Scenario::ClientServer]),
        "symmetric" => Some(vec![Scenario::Symmetric]),
        "all" => Some(vec![Scenario::ClientServer, Scenario::Symmetric]),
        _ => None,
    }
}

/// Get list of available scenario names
pub fn available_scenarios() -> Vec<&'static str> {
    vec!["client_server", "symmetric", "all"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_runs_client_server_first() {
        let set = scenario_set("all").unwrap();
        assert_eq!(set, vec![Scenario::ClientServer, Scenario::Symmetric]);
    }

    #[test]
    fn single_scenario_dispatch() {
        assert_eq!(
            scenario_set("symmetric").unwrap(),
            vec![Scenario::Symmetric]
        );
        assert_eq!(
            scenario_set("client_server").unwrap(),
            vec![Scenario::ClientServer]
        );
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(scenario_set("bogus").is_none());
    }

    #[test]
    fn every_advertised_name_resolves() {
        for name in available_scenarios() {
            assert!(scenario_set(name).is_some(), "'{name}' should resolve");
        }
    }
}
