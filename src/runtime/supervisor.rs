//! Child process supervision
//!
//! Spawns each test binary with stdin closed and both output streams piped
//! back to the harness, drains them concurrently into the process's tagged
//! log, and enforces bounded waits with kill-on-timeout. Draining runs on
//! dedicated tasks: a child that floods its pipes can never stall the harness
//! or a sibling process.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::SHUTDOWN_GRACE;
use crate::error::{HarnessError, HarnessResult};
use crate::runtime::{environment, LogSink};
use crate::verdict::FailureFlag;

/// Terminal state of a supervised process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The process terminated on its own with this exit code.
    Exited(i32),
    /// The process outlived its wait period and was forcibly killed.
    Killed,
}

impl ExitOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, ExitOutcome::Exited(0))
    }
}

/// Launches child processes and hands out supervision handles.
pub struct ProcessSupervisor {
    log_dir: PathBuf,
    flag: FailureFlag,
}

impl ProcessSupervisor {
    pub fn new(log_dir: impl Into<PathBuf>, flag: FailureFlag) -> Self {
        Self {
            log_dir: log_dir.into(),
            flag,
        }
    }

    /// Spawn `cmdline` with stdin closed and both output streams captured.
    ///
    /// The child environment is derived from the harness's own, with the
    /// library search path adjustment logged up front so failed library
    /// lookups can be diagnosed from the process log alone. A spawn failure
    /// is logged, recorded in the failure flag and returned as
    /// [`HarnessError::Launch`].
    pub async fn start(&self, tag: &str, cmdline: &[String]) -> HarnessResult<ManagedProcess> {
        let mut sink = LogSink::create(&self.log_dir, tag).await?;

        let env = environment::build(&environment::current());
        if let Some(path) = env.get("LD_LIBRARY_PATH") {
            sink.write_line(&format!("LD_LIBRARY_PATH = '{path}'")).await;
        }
        sink.write_line(&format!("Executing: {}", cmdline.join(" "))).await;

        let Some((program, args)) = cmdline.split_first() else {
            sink.write_line("Failed to launch: empty command line").await;
            self.flag.set();
            return Err(HarnessError::Launch {
                tag: tag.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command line"),
            });
        };

        let mut cmd = Command::new(program);
        cmd.args(args)
            .env_clear()
            .envs(&env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(source) => {
                sink.write_line(&format!("Failed to launch: {source}")).await;
                self.flag.set();
                return Err(HarnessError::Launch {
                    tag: tag.to_string(),
                    source,
                });
            }
        };

        let sink = Arc::new(Mutex::new(sink));
        let mut drains = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            drains.push(spawn_drain(stdout, Arc::clone(&sink)));
        }
        if let Some(stderr) = child.stderr.take() {
            drains.push(spawn_drain(stderr, Arc::clone(&sink)));
        }

        tracing::debug!(tag, pid = child.id(), "spawned process");

        Ok(ManagedProcess {
            tag: tag.to_string(),
            child,
            sink,
            drains,
            flag: self.flag.clone(),
        })
    }
}

/// Consume one captured stream line by line until end-of-stream.
fn spawn_drain<R>(stream: R, sink: Arc<Mutex<LogSink>>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            sink.lock().await.write_line(&line).await;
        }
    })
}

/// One supervised child process with its log sink and drain tasks.
///
/// Exclusively owns the underlying OS handle; [`wait`](Self::wait) and
/// [`terminate`](Self::terminate) consume the value once a terminal state has
/// been observed and logged.
#[derive(Debug)]
pub struct ManagedProcess {
    tag: String,
    child: Child,
    sink: Arc<Mutex<LogSink>>,
    drains: Vec<JoinHandle<()>>,
    flag: FailureFlag,
}

impl ManagedProcess {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Block up to `timeout` for the process to exit.
    ///
    /// A natural exit records the exit code, non-zero setting the failure
    /// flag. A timeout kills the process exactly once and always counts as a
    /// failure. Either way a final line reporting the outcome is appended to
    /// the process log after the drains have delivered every captured line.
    pub async fn wait(mut self, timeout: Duration) -> ExitOutcome {
        match tokio::time::timeout(timeout, self.child.wait()).await {
            Ok(Ok(status)) => {
                let code = status.code().unwrap_or(-1);
                self.finish_drains().await;
                self.sink
                    .lock()
                    .await
                    .write_line(&format!("Exited with {code}"))
                    .await;
                if code != 0 {
                    self.flag.set();
                    let err = HarnessError::AbnormalExit {
                        tag: self.tag.clone(),
                        code,
                    };
                    tracing::warn!("{err}");
                }
                ExitOutcome::Exited(code)
            }
            Ok(Err(e)) => {
                self.finish_drains().await;
                self.sink
                    .lock()
                    .await
                    .write_line(&format!("Wait failed: {e}"))
                    .await;
                self.flag.set();
                ExitOutcome::Exited(-1)
            }
            Err(_) => {
                let seconds = timeout.as_secs();
                self.sink
                    .lock()
                    .await
                    .write_line(&format!("Still running after {seconds} seconds. Killing"))
                    .await;
                self.flag.set();
                let err = HarnessError::Timeout {
                    tag: self.tag.clone(),
                    seconds,
                };
                tracing::warn!("{err}");
                let _ = self.child.kill().await;
                let _ = self.child.wait().await;
                self.finish_drains().await;
                ExitOutcome::Killed
            }
        }
    }

    /// Cooperative shutdown: termination signal, bounded grace period, then a
    /// forced kill if the process has still not exited.
    pub async fn terminate(mut self) -> ExitOutcome {
        self.sink
            .lock()
            .await
            .write_line("Attempting graceful shutdown")
            .await;
        self.request_termination();
        self.wait(SHUTDOWN_GRACE).await
    }

    #[cfg(unix)]
    fn request_termination(&mut self) {
        use nix::sys::signal::{self, Signal};
        use nix::unistd::Pid;

        if let Some(pid) = self.child.id() {
            let _ = signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
        }
    }

    #[cfg(not(unix))]
    fn request_termination(&mut self) {
        // No cooperative signal available; the grace-period wait in
        // `terminate` escalates to a kill.
        let _ = self.child.start_kill();
    }

    /// Join the drain tasks so every captured line lands before the final
    /// outcome line.
    async fn finish_drains(&mut self) {
        for handle in self.drains.drain(..) {
            let _ = handle.await;
        }
    }
}
