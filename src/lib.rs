//! Integration-test harness for the P2P connection stack
//!
//! Orchestrates the black-box test binaries (a signaling service and two peer
//! clients) as supervised child processes: captures their output into tagged
//! per-process logs, enforces bounded waits with kill-on-timeout, sequences
//! the connection scenarios with fail-fast between them, and reports one
//! aggregate pass/fail verdict through the harness exit code.
//!
//! The binaries themselves are opaque collaborators; the harness depends only
//! on their command-line contract, their line-oriented output, their exit
//! codes, and their response to a cooperative termination signal.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod runtime;
pub mod scenarios;
pub mod verdict;

// Re-export commonly used types
pub use config::{HarnessConfig, SIGNALING_ADDR};
pub use error::{HarnessError, HarnessResult};
pub use orchestrator::TestOrchestrator;
pub use runtime::{ExitOutcome, LogSink, ManagedProcess, ProcessSupervisor};
pub use scenarios::{PeerSide, Scenario, ScenarioRunner};
pub use verdict::FailureFlag;
