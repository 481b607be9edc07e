//! Piped-input collection with a bounded wait for the first byte

use std::io::{self, IsTerminal, Read};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use thiserror::Error;

const CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug, Error)]
pub enum StdinError {
    #[error("No input supplied (nothing arrived on stdin within {0:?})")]
    Timeout(Duration),

    #[error("No input supplied (stdin is a terminal; pass --source or pipe data in)")]
    Terminal,

    #[error("Failed to read stdin: {0}")]
    Io(#[from] io::Error),
}

enum Event {
    Chunk(Vec<u8>),
    Eof,
    Failed(io::Error),
}

/// Reads an upstream stage's output to completion
#[derive(Debug, Clone, Copy)]
pub struct StdinCollector {
    timeout: Duration,
}

impl StdinCollector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Collects the process's stdin
    pub fn collect_stdin(&self) -> Result<String, StdinError> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Err(StdinError::Terminal);
        }

        self.collect(stdin)
    }

    /// Collects `reader` until it closes
    ///
    /// Fails with [`StdinError::Timeout`] if no byte arrives within the
    /// timeout. Once data starts flowing there is no further deadline.
    /// A stream that closes without data yields an empty string.
    pub fn collect<R>(&self, mut reader: R) -> Result<String, StdinError>
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        // The reader thread may stay blocked after a timeout; the process is
        // about to exit in that case.
        thread::spawn(move || {
            let mut buf = vec![0u8; CHUNK_SIZE];
            loop {
                let event = match reader.read(&mut buf) {
                    Ok(0) => Event::Eof,
                    Ok(n) => Event::Chunk(buf[..n].to_vec()),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => Event::Failed(e),
                };

                let done = !matches!(event, Event::Chunk(_));
                if tx.send(event).is_err() || done {
                    break;
                }
            }
        });

        let mut bytes = match rx.recv_timeout(self.timeout) {
            Ok(Event::Chunk(chunk)) => chunk,
            Ok(Event::Eof) | Err(RecvTimeoutError::Disconnected) => return Ok(String::new()),
            Ok(Event::Failed(e)) => return Err(StdinError::Io(e)),
            Err(RecvTimeoutError::Timeout) => return Err(StdinError::Timeout(self.timeout)),
        };

        while let Ok(event) = rx.recv() {
            match event {
                Event::Chunk(chunk) => bytes.extend_from_slice(&chunk),
                Event::Eof => break,
                Event::Failed(e) => return Err(StdinError::Io(e)),
            }
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
