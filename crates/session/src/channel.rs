//! Duplex line channel between a session and its client.

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::editor;
use crate::output::Style;

/// The client went away. Not a command failure: the session simply ends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChannelError {
    #[error("connection closed by peer")]
    Eof,
    #[error("Line too long (limit is {limit} bytes).")]
    LineTooLong { limit: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Longest line a client may send, newline excluded.
pub const MAX_LINE_BYTES: usize = 4096;

type Reader = Box<dyn AsyncBufRead + Unpin + Send>;
type Writer = Box<dyn AsyncWrite + Unpin + Send>;

/// One client's input source and output sink.
///
/// Owned by exactly one session, so no two commands ever read from it at once.
pub struct LineChannel {
    reader: Reader,
    writer: Writer,
    style: Style,
    interactive: bool,
    max_line: usize,
    buf: Vec<u8>,
}

impl LineChannel {
    pub fn new<R, W>(reader: R, writer: W, style: Style, interactive: bool) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        Self {
            reader: Box::new(reader),
            writer: Box::new(writer),
            style,
            interactive,
            max_line: MAX_LINE_BYTES,
            buf: Vec::new(),
        }
    }

    /// Replace the [`MAX_LINE_BYTES`] cap on incoming lines.
    #[must_use]
    pub fn with_max_line(mut self, max_line: usize) -> Self {
        self.max_line = max_line;
        self
    }

    #[must_use]
    pub fn style(&self) -> Style {
        self.style
    }

    /// Whether the peer is a terminal that can edit pre-filled text.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Write `line` followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError::Io` if the peer can no longer be written to.
    pub async fn write_line(&mut self, line: &str) -> Result<(), ChannelError> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Write text without a newline, leaving the cursor after it.
    async fn write_inline(&mut self, text: &str) -> Result<(), ChannelError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Re-arm the command prompt.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError::Io` if the peer can no longer be written to.
    pub async fn prompt(&mut self, text: &str) -> Result<(), ChannelError> {
        let styled = self.style.prompt(text);
        self.write_inline(&styled).await
    }

    /// Read one raw line; `Ok(None)` on end of input.
    ///
    /// Never buffers more than the line cap plus the trailing `\n`.
    async fn read_raw_line(&mut self) -> Result<Option<String>, ChannelError> {
        self.buf.clear();
        let cap = u64::try_from(self.max_line).unwrap_or(u64::MAX).saturating_add(1);
        let read = (&mut self.reader)
            .take(cap)
            .read_until(b'\n', &mut self.buf)
            .await?;
        if read == 0 {
            return Ok(None);
        }
        if self.buf.len() > self.max_line && self.buf.last() != Some(&b'\n') {
            self.buf.clear();
            return Err(ChannelError::LineTooLong {
                limit: self.max_line,
            });
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }

    /// Next command line, trimmed. `Ok(None)` when the client hung up cleanly.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError::LineTooLong` past the line cap, or
    /// `ChannelError::Io` if reading fails.
    pub async fn next_command(&mut self) -> Result<Option<String>, ChannelError> {
        Ok(self
            .read_raw_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    /// Show `prompt` and wait for exactly one reply line, trimmed.
    ///
    /// An empty line resolves to `""`.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError::Eof` if the client hangs up while being asked,
    /// or `ChannelError::Io` on transport failure.
    pub async fn ask(&mut self, prompt: &str) -> Result<String, ChannelError> {
        let styled = self.style.question(prompt);
        self.write_inline(&styled).await?;
        match self.read_raw_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(ChannelError::Eof),
        }
    }

    /// Like [`ask`](Self::ask), with `current` offered as editable text.
    ///
    /// On an interactive terminal `current` is placed in the input line and can
    /// be edited in place. Elsewhere this is exactly `ask`.
    ///
    /// # Errors
    ///
    /// Same as [`ask`](Self::ask).
    pub async fn ask_with_default(
        &mut self,
        prompt: &str,
        current: &str,
    ) -> Result<String, ChannelError> {
        if !self.interactive {
            return self.ask(prompt).await;
        }

        self.writer.flush().await?;
        let styled = self.style.question(prompt);
        let width = prompt.chars().count();
        let current = current.to_string();
        let edited =
            tokio::task::spawn_blocking(move || editor::edit_line(&styled, width, &current))
                .await
                .map_err(std::io::Error::other)??;
        match edited {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(ChannelError::Eof),
        }
    }

    /// Flush and shut down the write side.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError::Io` if the shutdown fails.
    pub async fn close(&mut self) -> Result<(), ChannelError> {
        self.writer.flush().await?;
        self.writer.shutdown().await?;
        Ok(())
    }
}
