//! Live tail of an append-only log file.
//!
//! # Responsibilities
//! - Poll for the log file's creation before monitoring starts
//! - Follow appended content only, never replaying historical lines
//! - Signal termination when the tail child dies
//!
//! # Design Decisions
//! - Delegates following to `tail -F -n 0` rather than reimplementing
//!   inode tracking; the child is killed when the source is dropped
//! - Pipe EOF means the child is gone, which is fatal to the caller

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};

use crate::source::{LineSource, SourceError, SourceEvent};

use async_trait::async_trait;

/// `LineSource` backed by a `tail -F` child process.
pub struct TailSource {
    path: PathBuf,
    creation_poll: Duration,
    child: Option<Child>,
    lines: Option<Lines<BufReader<ChildStdout>>>,
}

impl TailSource {
    pub fn new(path: impl AsRef<Path>, creation_poll: Duration) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            creation_poll,
            child: None,
            lines: None,
        }
    }

    fn spawn_tail(&mut self) -> Result<(), SourceError> {
        // -n 0: no replay of lines written before monitoring started.
        let mut child = Command::new("tail")
            .arg("-F")
            .arg("-n")
            .arg("0")
            .arg(&self.path)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child.stdout.take().ok_or_else(|| {
            SourceError::Io(std::io::Error::other("tail child has no stdout pipe"))
        })?;

        tracing::info!(path = %self.path.display(), pid = child.id(), "Tail process started");

        self.lines = Some(BufReader::new(stdout).lines());
        self.child = Some(child);
        Ok(())
    }
}

#[async_trait]
impl LineSource for TailSource {
    /// Wait for the log file to exist, then start following it.
    async fn ready(&mut self) -> Result<(), SourceError> {
        if self.lines.is_some() {
            return Ok(());
        }

        let mut reported = false;
        while !self.path.exists() {
            if !reported {
                tracing::info!(path = %self.path.display(), "Waiting for log file to appear");
                reported = true;
            }
            tokio::time::sleep(self.creation_poll).await;
        }

        tracing::info!(path = %self.path.display(), "Log file found");
        self.spawn_tail()
    }

    async fn next_line(&mut self) -> Result<SourceEvent, SourceError> {
        let Some(lines) = self.lines.as_mut() else {
            return Ok(SourceEvent::Idle);
        };

        match lines.next_line().await? {
            Some(line) => Ok(SourceEvent::Line(line)),
            None => {
                // Pipe closed: the tail child is gone. Reap it so the
                // exit status makes it into the log.
                if let Some(mut child) = self.child.take() {
                    match child.wait().await {
                        Ok(status) => {
                            tracing::error!(%status, "Tail process died")
                        }
                        Err(e) => tracing::error!(error = %e, "Failed to reap tail process"),
                    }
                }
                self.lines = None;
                Ok(SourceEvent::Terminated)
            }
        }
    }
}
