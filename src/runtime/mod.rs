//! Process runtime: supervision, log capture and child environments

pub mod environment;
pub mod log_sink;
pub mod supervisor;

pub use log_sink::LogSink;
pub use supervisor::{ExitOutcome, ManagedProcess, ProcessSupervisor};
