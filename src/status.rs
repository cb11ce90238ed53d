//! Startup progress handshake through a single status file.
//!
//! The launcher overwrites the file with one human-readable line per stage
//! and finally writes `CLOSE`; the splash window side polls it.

use crate::Result;
use log::{debug, trace, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const CLOSE_COMMAND: &str = "CLOSE";
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// `~/Library/Application Support/Cartoonizer/progress_status.txt`
pub fn default_status_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join("Library")
            .join("Application Support")
            .join("Cartoonizer")
            .join("progress_status.txt"),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    Message(String),
    Close,
}

#[derive(Debug, Clone)]
pub struct StatusFile {
    path: PathBuf,
}

impl StatusFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the current status line.
    pub fn write(&self, message: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, message.trim())?;
        debug!("Status: {}", message.trim());
        Ok(())
    }

    pub fn close(&self) -> Result<()> {
        self.write(CLOSE_COMMAND)
    }

    /// Trimmed content, or `None` if the file is missing or blank.
    pub fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let text = text.trim();
                Ok((!text.is_empty()).then(|| text.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Turns successive reads of a [`StatusFile`] into change events.
#[derive(Debug)]
pub struct StatusWatcher {
    file: StatusFile,
    last: Option<String>,
}

impl StatusWatcher {
    pub fn new(file: StatusFile) -> Self {
        Self { file, last: None }
    }

    /// Read once. Returns an event only when the content changed.
    pub fn poll(&mut self) -> Option<StatusEvent> {
        let status = match self.file.read() {
            Ok(Some(status)) => status,
            Ok(None) => return None,
            Err(e) => {
                trace!("Status read failed: {}", e);
                return None;
            }
        };
        if self.last.as_deref() == Some(status.as_str()) {
            return None;
        }
        self.last = Some(status.clone());
        if status.eq_ignore_ascii_case(CLOSE_COMMAND) {
            Some(StatusEvent::Close)
        } else {
            Some(StatusEvent::Message(status))
        }
    }

    /// Poll on a background thread until `Close` is seen or the receiver is dropped.
    pub fn spawn(mut self, interval: Duration) -> (Receiver<StatusEvent>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || loop {
            if let Some(event) = self.poll() {
                let closing = event == StatusEvent::Close;
                if tx.send(event).is_err() || closing {
                    break;
                }
            }
            thread::sleep(interval);
        });
        (rx, handle)
    }
}

/// Wait for a watcher thread, turning a panic into an error.
pub fn join_watcher(handle: JoinHandle<()>) -> Result<()> {
    handle.join().map_err(|_| {
        warn!("Status watcher thread panicked");
        std::io::Error::other("status watcher thread panicked").into()
    })
}
