//! Per-process log capture
//!
//! Each supervised process gets its own `{tag}.log` file, truncated at
//! process start. Every line is echoed to the console with a `tag>` prefix
//! for live visibility and flushed to the file immediately so output survives
//! a forced kill.

use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::HarnessResult;

#[derive(Debug)]
pub struct LogSink {
    tag: String,
    file: File,
}

impl LogSink {
    /// Create (or truncate) `{tag}.log` under `log_dir`.
    pub async fn create(log_dir: &Path, tag: &str) -> HarnessResult<Self> {
        let path = log_dir.join(format!("{tag}.log"));
        let file = File::create(&path).await?;
        Ok(Self {
            tag: tag.to_string(),
            file,
        })
    }

    /// Append one line and echo it to the console.
    ///
    /// File writes are best-effort: a failing log file must not take the run
    /// down, the verdict comes from exit codes alone.
    pub async fn write_line(&mut self, line: &str) {
        println!("{}> {}", self.tag, line);
        let _ = self.file.write_all(line.as_bytes()).await;
        let _ = self.file.write_all(b"\n").await;
        let _ = self.file.flush().await;
    }
}
