//! Sequential file appender
//!
//! One background thread owns the append-mode file handle and drains an
//! unbounded queue, so lines land on disk in the order they were issued and
//! callers never wait for I/O. Failed writes are reported on the console error
//! stream and dropped, never retried.

use super::console::Console;
use crate::errors::{LoggerError, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use tokio::sync::{mpsc, oneshot};

/// Message for the writer queue
enum WriteMessage {
    Append(String),
    Flush(oneshot::Sender<()>),
}

pub struct FileSink {
    path: PathBuf,
    tx: Option<mpsc::UnboundedSender<WriteMessage>>,
    worker: Option<JoinHandle<()>>,
}

/// Make sure `path` exists: create missing parent directories and an empty
/// file. An existing file is left untouched.
pub fn ensure_log_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| LoggerError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggerError::CreateFile {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(())
}

impl FileSink {
    /// Open `path` for appending and start the writer thread
    pub fn open(path: &Path, console: Arc<dyn Console>) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LoggerError::OpenFile {
                path: path.to_path_buf(),
                source,
            })?;

        let (tx, rx) = mpsc::unbounded_channel();
        let worker = std::thread::Builder::new()
            .name("microlog-writer".to_string())
            .spawn(move || run_writer(file, rx, console))
            .map_err(LoggerError::Writer)?;

        Ok(Self {
            path: path.to_path_buf(),
            tx: Some(tx),
            worker: Some(worker),
        })
    }

    /// Queue a chunk for appending; returns immediately
    pub fn write(&self, text: String) {
        if let Some(tx) = &self.tx {
            // Send only fails once the worker is gone, nothing left to report to
            let _ = tx.send(WriteMessage::Append(text));
        }
    }

    /// Block until everything queued so far is on disk.
    ///
    /// Safe on any thread. A thread driving a tokio runtime cannot block on the
    /// ack itself, so the wait is parked on a short-lived helper thread.
    pub fn flush(&self) {
        let Some(ack) = self.request_flush() else {
            return;
        };

        if tokio::runtime::Handle::try_current().is_ok() {
            std::thread::scope(|s| {
                let _ = s.spawn(move || ack.blocking_recv()).join();
            });
        } else {
            let _ = ack.blocking_recv();
        }
    }

    /// Wait until everything queued so far is on disk
    pub async fn flush_async(&self) {
        if let Some(ack) = self.request_flush() {
            let _ = ack.await;
        }
    }

    fn request_flush(&self) -> Option<oneshot::Receiver<()>> {
        let tx = self.tx.as_ref()?;
        let (ack_tx, ack_rx) = oneshot::channel();
        tx.send(WriteMessage::Flush(ack_tx)).ok()?;
        Some(ack_rx)
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Closing the queue lets the worker drain what is left and exit
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink").field("path", &self.path).finish()
    }
}

fn run_writer(
    mut file: File,
    mut rx: mpsc::UnboundedReceiver<WriteMessage>,
    console: Arc<dyn Console>,
) {
    while let Some(message) = rx.blocking_recv() {
        match message {
            WriteMessage::Append(text) => {
                if let Err(e) = file.write_all(text.as_bytes()) {
                    console.err(&format!("Logger file error: {}", e));
                }
            }
            WriteMessage::Flush(ack) => {
                if let Err(e) = file.flush() {
                    console.err(&format!("Logger file error: {}", e));
                }
                let _ = ack.send(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::console::capture::CaptureConsole;
    use super::*;

    #[test]
    fn test_ensure_creates_parents_and_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("log.txt");

        ensure_log_file(&path).unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");

        std::fs::write(&path, "keep me\n").unwrap();
        ensure_log_file(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me\n");
    }

    #[test]
    fn test_ensure_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let result = ensure_log_file(&blocker.join("log.txt"));
        assert!(matches!(result, Err(LoggerError::CreateDirectory { .. })));
    }

    #[test]
    fn test_writes_keep_issue_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.log");
        let sink = FileSink::open(&path, Arc::new(CaptureConsole::default())).unwrap();

        for i in 0..500 {
            sink.write(format!("{}\n", i));
        }
        sink.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        let numbers: Vec<usize> = content.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(numbers, (0..500).collect::<Vec<_>>());
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("existing.log");
        std::fs::write(&path, "old\n").unwrap();

        let sink = FileSink::open(&path, Arc::new(CaptureConsole::default())).unwrap();
        sink.write("new\n".to_string());
        drop(sink);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_writes_are_reported_and_dropped() {
        let console = CaptureConsole::default();
        let sink = FileSink::open(Path::new("/dev/full"), Arc::new(console.clone())).unwrap();

        sink.write("first\n".to_string());
        sink.write("second\n".to_string());
        sink.flush();

        // Each failed append is reported once and the worker keeps draining
        let reported: Vec<_> = console
            .err_lines()
            .into_iter()
            .filter(|l| l.starts_with("Logger file error"))
            .collect();
        assert_eq!(reported.len(), 2);
        assert!(console.out_lines().is_empty());

        sink.write("third\n".to_string());
        sink.flush();
        assert!(console.err_lines().len() >= 3);
    }

    #[tokio::test]
    async fn test_blocking_flush_inside_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runtime.log");
        let sink = FileSink::open(&path, Arc::new(CaptureConsole::default())).unwrap();

        sink.write("line\n".to_string());
        sink.flush();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "line\n");
    }

    #[tokio::test]
    async fn test_flush_async() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("async.log");
        let sink = FileSink::open(&path, Arc::new(CaptureConsole::default())).unwrap();

        sink.write("line\n".to_string());
        sink.flush_async().await;

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "line\n");
    }
}
