//! Connection scenarios
//!
//! The two rendezvous cases: a connection-oriented client/server pair and a
//! symmetric pair, each using reciprocal identities so that one side's local
//! identity is the other's remote identity.

use std::time::Duration;

use crate::scenarios::runner::{PeerSide, ScenarioRunner};

/// Standard connection-oriented case: one peer listens, the other connects.
pub async fn client_server(runner: &ScenarioRunner, timeout: Duration) {
    tracing::info!("Running basic socket client/server test");

    runner
        .run_pair(
            PeerSide::new("server", "peer_server", "peer_client"),
            PeerSide::new("client", "peer_client", "peer_server"),
            timeout,
        )
        .await;
}

/// Symmetric case: both peers dial each other with the same role.
pub async fn symmetric(runner: &ScenarioRunner, timeout: Duration) {
    tracing::info!("Running socket symmetric test");

    runner
        .run_pair(
            PeerSide::new("symmetric", "alice", "bob"),
            PeerSide::new("symmetric", "bob", "alice"),
            timeout,
        )
        .await;
}
