//! Shell Handler Module
//!
//! This module runs an interactive session: it reads lines from an input
//! stream, hands each one to the [`Database`] and writes one reply line back.
//!
//! ## Session Lifecycle
//!
//! ```text
//! 1. Session starts (optional greeting)
//!        │
//!        ▼
//! 2. ┌──────────────────────────────┐
//!    │      Main Loop               │
//!    │                              │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Write prompt            │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Read until newline      │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Database::process       │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │  ┌─────────────────────────┐ │
//!    │  │ Write reply line        │ │
//!    │  └───────────┬─────────────┘ │
//!    │              ▼               │
//!    │         [Loop back]          │
//!    └──────────────────────────────┘
//!        │
//!        ▼
//! 3. End of input: the last unterminated line is still processed
//! ```
//!
//! ## Buffer Management
//!
//! Input accumulates in a `BytesMut` buffer, the same way a network
//! connection would be read: one read may deliver half a line or several
//! lines at once.

use crate::database::Database;
use crate::protocol::Parser;
use crate::storage::Engine;
use bytes::BytesMut;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, info, trace, warn};

/// Default maximum length of one input line (64 KB)
pub const DEFAULT_MAX_LINE: usize = 64 * 1024;

/// Initial buffer capacity
const INITIAL_BUFFER_SIZE: usize = 4096;

/// Greeting written at session start
pub const GREETING: &str = "Enter query:";

/// Statistics for a shell session
#[derive(Debug, Default)]
pub struct ShellStats {
    /// Total lines read
    pub lines_read: AtomicU64,
    /// Lines that produced a result
    pub commands_succeeded: AtomicU64,
    /// Lines that produced an error
    pub commands_failed: AtomicU64,
    /// Total bytes read
    pub bytes_read: AtomicU64,
    /// Total bytes written
    pub bytes_written: AtomicU64,
}

impl ShellStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_read(&self) {
        self.lines_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn command_succeeded(&self) {
        self.commands_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn command_failed(&self) {
        self.commands_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_read(&self, count: usize) {
        self.bytes_read.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn bytes_written(&self, count: usize) {
        self.bytes_written
            .fetch_add(count as u64, Ordering::Relaxed);
    }
}

/// Options for a shell session.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    /// Text written before each line is read (None = no prompt)
    pub prompt: Option<String>,
    /// Write [`GREETING`] when the session starts
    pub greeting: bool,
    /// Longest accepted input line in bytes
    pub max_line: usize,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            prompt: Some(">>> ".to_string()),
            greeting: true,
            max_line: DEFAULT_MAX_LINE,
        }
    }
}

impl ShellOptions {
    /// Options without prompt or greeting: replies only.
    pub fn quiet() -> Self {
        Self {
            prompt: None,
            greeting: false,
            ..Self::default()
        }
    }
}

/// One input line, or the marker for a line that was too long.
#[derive(Debug, PartialEq)]
enum Line {
    Text(String),
    TooLong,
}

/// Runs a session against one reader/writer pair.
pub struct Shell<R, W, P, E> {
    /// Input stream
    reader: R,

    /// Output stream
    writer: BufWriter<W>,

    /// Buffer for incoming data
    buffer: BytesMut,

    /// Set while skipping the rest of an oversized line
    discarding: bool,

    /// The database every line goes to
    database: Database<P, E>,

    /// Session options
    options: ShellOptions,

    /// Session statistics (shared)
    stats: Arc<ShellStats>,
}

impl<R, W, P, E> Shell<R, W, P, E>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    P: Parser,
    E: Engine,
{
    /// Creates a new shell.
    ///
    /// # Arguments
    ///
    /// * `reader` - Where input lines come from
    /// * `writer` - Where replies go
    /// * `database` - The database to run queries against
    /// * `options` - Prompt, greeting and line limit
    /// * `stats` - Shared session statistics
    pub fn new(
        reader: R,
        writer: W,
        database: Database<P, E>,
        options: ShellOptions,
        stats: Arc<ShellStats>,
    ) -> Self {
        Self {
            reader,
            writer: BufWriter::new(writer),
            buffer: BytesMut::with_capacity(INITIAL_BUFFER_SIZE),
            discarding: false,
            database,
            options,
            stats,
        }
    }

    /// Returns the database driven by this shell.
    pub fn database(&self) -> &Database<P, E> {
        &self.database
    }

    /// Runs the session until the input ends.
    pub async fn run(&mut self) -> Result<(), ShellError> {
        info!("Session started");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => info!(
                lines = self.stats.lines_read.load(Ordering::Relaxed),
                succeeded = self.stats.commands_succeeded.load(Ordering::Relaxed),
                failed = self.stats.commands_failed.load(Ordering::Relaxed),
                "Session ended"
            ),
            Err(e) => warn!(error = %e, "Session error"),
        }

        result
    }

    /// The main read-process-reply loop.
    async fn main_loop(&mut self) -> Result<(), ShellError> {
        if self.options.greeting {
            self.write_line(GREETING).await?;
        }

        loop {
            self.write_prompt().await?;

            let line = loop {
                if let Some(line) = self.try_take_line() {
                    break Some(line);
                }
                if !self.read_more_data().await? {
                    break self.take_remainder();
                }
            };

            match line {
                Some(line) => self.handle_line(line).await?,
                None => return Ok(()),
            }
        }
    }

    /// Processes one line and writes the reply.
    async fn handle_line(&mut self, line: Line) -> Result<(), ShellError> {
        self.stats.line_read();

        let reply = match line {
            Line::Text(text) => match self.database.process(&text) {
                Ok(result) => {
                    self.stats.command_succeeded();
                    result
                }
                Err(e) => {
                    self.stats.command_failed();
                    format!("error: {}", e)
                }
            },
            Line::TooLong => {
                self.stats.command_failed();
                "error: line too long".to_string()
            }
        };

        self.write_line(&reply).await
    }

    /// Attempts to take one complete line from the buffer.
    fn try_take_line(&mut self) -> Option<Line> {
        let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') else {
            if self.buffer.len() > self.options.max_line && !self.discarding {
                warn!(
                    size = self.buffer.len(),
                    max = self.options.max_line,
                    "Line size limit exceeded"
                );
                self.discarding = true;
            }
            if self.discarding {
                self.buffer.clear();
            }
            return None;
        };

        let line = self.buffer.split_to(pos + 1);

        if self.discarding {
            self.discarding = false;
            return Some(Line::TooLong);
        }

        if pos > self.options.max_line {
            warn!(size = pos, max = self.options.max_line, "Line size limit exceeded");
            return Some(Line::TooLong);
        }

        trace!(consumed = pos + 1, remaining = self.buffer.len(), "Took line");
        Some(Line::Text(decode_line(&line[..pos])))
    }

    /// Takes whatever is left after the input ended.
    fn take_remainder(&mut self) -> Option<Line> {
        if self.discarding {
            self.discarding = false;
            self.buffer.clear();
            return Some(Line::TooLong);
        }

        if self.buffer.is_empty() {
            return None;
        }

        let rest = self.buffer.split();
        debug!(bytes = rest.len(), "Processing unterminated last line");
        Some(Line::Text(decode_line(&rest)))
    }

    /// Reads more data into the buffer. Returns false at end of input.
    async fn read_more_data(&mut self) -> Result<bool, ShellError> {
        // Ensure we have some capacity
        if self.buffer.capacity() - self.buffer.len() < 1024 {
            self.buffer.reserve(INITIAL_BUFFER_SIZE);
        }

        let n = self.reader.read_buf(&mut self.buffer).await?;
        if n == 0 {
            return Ok(false);
        }

        self.stats.bytes_read(n);
        trace!(bytes = n, "Read data");
        Ok(true)
    }

    /// Writes the prompt, if one is configured.
    async fn write_prompt(&mut self) -> Result<(), ShellError> {
        let Some(prompt) = self.options.prompt.as_deref() else {
            return Ok(());
        };

        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;
        self.stats.bytes_written(prompt.len());
        Ok(())
    }

    /// Writes one line followed by `\n` and flushes.
    async fn write_line(&mut self, text: &str) -> Result<(), ShellError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        self.stats.bytes_written(text.len() + 1);
        trace!(bytes = text.len() + 1, "Sent reply");
        Ok(())
    }
}

/// Decodes a raw line, dropping a trailing `\r`.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// Errors that can end a shell session.
///
/// Bad queries are not session errors; they are answered with an
/// `error: ...` line and the session continues.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// I/O error on the input or output stream
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::TextParser;
    use crate::storage::InMemoryEngine;

    type TestShell<'a> = Shell<&'a [u8], Vec<u8>, TextParser, InMemoryEngine>;

    fn create_shell(input: &[u8], options: ShellOptions) -> TestShell<'_> {
        Shell::new(
            input,
            Vec::new(),
            Database::in_memory(),
            options,
            Arc::new(ShellStats::new()),
        )
    }

    async fn run_session(input: &str) -> String {
        let mut shell = create_shell(input.as_bytes(), ShellOptions::quiet());
        shell.run().await.unwrap();
        String::from_utf8(shell.writer.into_inner()).unwrap()
    }

    #[tokio::test]
    async fn test_set_get() {
        let output = run_session("SET name guppy\nGET name\n").await;
        assert_eq!(output, "OK\nguppy\n");
    }

    #[tokio::test]
    async fn test_errors_do_not_end_session() {
        let output = run_session("GET missing\nSELECT 1\n\nSET a b\nGET a\n").await;
        assert_eq!(
            output,
            "error: get key: key not found: 'missing'\n\
             error: parse input: unknown command 'SELECT'\n\
             error: parse input: empty input\n\
             OK\n\
             b\n"
        );
    }

    #[tokio::test]
    async fn test_crlf_and_unterminated_last_line() {
        let output = run_session("SET a 1\r\nGET a").await;
        assert_eq!(output, "OK\n1\n");
    }

    #[tokio::test]
    async fn test_empty_input() {
        assert_eq!(run_session("").await, "");
    }

    #[tokio::test]
    async fn test_prompt_and_greeting() {
        let mut shell = create_shell(b"SET a 1\n", ShellOptions::default());
        shell.run().await.unwrap();

        let output = String::from_utf8(shell.writer.into_inner()).unwrap();
        assert_eq!(output, "Enter query:\n>>> OK\n>>> ");
    }

    #[tokio::test]
    async fn test_line_too_long() {
        let options = ShellOptions {
            max_line: 8,
            ..ShellOptions::quiet()
        };
        let input = b"SET key_that_is_long value\nSET a b\nGET a\n";
        let mut shell = create_shell(input, options);
        shell.run().await.unwrap();

        let output = String::from_utf8(shell.writer.into_inner()).unwrap();
        assert_eq!(output, "error: line too long\nOK\nb\n");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_a_bad_symbol() {
        let mut shell = create_shell(b"GET \xff\xfe\n", ShellOptions::quiet());
        shell.run().await.unwrap();

        let output = String::from_utf8(shell.writer.into_inner()).unwrap();
        assert!(output.starts_with("error: parse input: input contains invalid symbols"));
    }

    #[tokio::test]
    async fn test_stats() {
        let stats = Arc::new(ShellStats::new());
        let input = b"SET a 1\nGET a\nGET b\n";
        let mut shell = Shell::new(
            &input[..],
            Vec::new(),
            Database::in_memory(),
            ShellOptions::quiet(),
            Arc::clone(&stats),
        );
        shell.run().await.unwrap();

        assert_eq!(stats.lines_read.load(Ordering::Relaxed), 3);
        assert_eq!(stats.commands_succeeded.load(Ordering::Relaxed), 2);
        assert_eq!(stats.commands_failed.load(Ordering::Relaxed), 1);
        assert_eq!(stats.bytes_read.load(Ordering::Relaxed), input.len() as u64);
        assert!(stats.bytes_written.load(Ordering::Relaxed) > 0);
        assert_eq!(shell.database().engine().len(), 1);
    }

    #[tokio::test]
    async fn test_scripted_io() {
        let mock = tokio_test::io::Builder::new()
            .write(b"Enter query:\n")
            .write(b"> ")
            .read(b"SET weather cold\n")
            .write(b"OK\n")
            .write(b"> ")
            .read(b"DEL weather\n")
            .write(b"OK\n")
            .write(b"> ")
            .build();
        let (reader, writer) = tokio::io::split(mock);

        let options = ShellOptions {
            prompt: Some("> ".to_string()),
            ..ShellOptions::default()
        };
        let mut shell = Shell::new(
            reader,
            writer,
            Database::in_memory(),
            options,
            Arc::new(ShellStats::new()),
        );
        shell.run().await.unwrap();
        assert!(shell.database().engine().is_empty());
    }
}
