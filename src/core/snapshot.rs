//! Read side of the shared, append-only log file.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay_ms: u64) -> Self {
        Self {
            attempts: attempts.max(1),
            delay: Duration::from_millis(delay_ms),
        }
    }
}

/// The log content as it was on disk when it was opened.
#[derive(Debug, Clone)]
pub struct LogSnapshot {
    pub bytes: Vec<u8>,
}

impl LogSnapshot {
    /// Read whatever the collector has flushed at call time.
    ///
    /// The collector keeps appending while we read and nothing is locked: a
    /// row written after the open is simply absent (the next render sees it),
    /// and a torn last line fails to parse and is counted as malformed.
    ///
    /// A missing or unreadable file is retried, since the writer may be
    /// rotating it, and then reported as [`AppError::LogUnavailable`].
    pub fn read(path: &Path, retry: RetryPolicy) -> AppResult<LogSnapshot> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match fs::read(path) {
                Ok(bytes) => return Ok(LogSnapshot { bytes }),
                Err(e) if attempt < retry.attempts => {
                    warning(format!(
                        "Cannot open log {} ({}), retry {}/{}",
                        path.display(),
                        e,
                        attempt,
                        retry.attempts - 1
                    ));
                    thread::sleep(retry.delay);
                }
                Err(_) => {
                    return Err(AppError::LogUnavailable {
                        path: path.display().to_string(),
                        attempts: attempt,
                    });
                }
            }
        }
    }
}
