//! P2P integration-test harness
//!
//! Runs the signaling service plus the connection scenarios as supervised
//! child processes and exits 0 only if every scenario passed.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use p2p_harness::scenarios::{available_scenarios, scenario_set};
use p2p_harness::{HarnessConfig, TestOrchestrator};

#[derive(Parser)]
#[command(name = "p2p-harness")]
#[command(about = "Integration-test harness for the P2P connection stack")]
struct Args {
    /// Scenario set to run
    #[arg(long, default_value = "all")]
    scenario: String,

    /// Peer client binary
    #[arg(long, default_value = "./test_p2p")]
    peer_binary: PathBuf,

    /// Signaling service binary
    #[arg(long, default_value = "./trivial_signaling_server")]
    signaling_binary: PathBuf,

    /// Per-process wait timeout in seconds
    #[arg(long, default_value = "20")]
    timeout_secs: u64,

    /// Directory for per-process log files
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,

    /// Enable verbose tracing output
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let Some(scenarios) = scenario_set(&args.scenario) else {
        eprintln!(
            "Unknown test scenario: '{}'. Available: {}",
            args.scenario,
            available_scenarios().join(", ")
        );
        return ExitCode::from(2);
    };

    tracing::info!(
        scenario = %args.scenario,
        timeout_secs = args.timeout_secs,
        "starting harness"
    );

    let config = HarnessConfig::new()
        .with_peer_binary(args.peer_binary)
        .with_signaling_binary(args.signaling_binary)
        .with_timeout(Duration::from_secs(args.timeout_secs))
        .with_log_dir(args.log_dir);

    let code = TestOrchestrator::new(config).run(&scenarios).await;
    ExitCode::from(code as u8)
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("p2p_harness=debug,info")
    } else {
        EnvFilter::new("p2p_harness=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
