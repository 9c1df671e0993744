//! Where message text comes from.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Source of message text for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Text given on the command line; standard input is never read.
    Text(String),
    /// One message per input line, delivered as each line arrives.
    Stream,
    /// All input lines joined with `\n` into one message.
    Buffered,
}

impl Input {
    /// Pick the input mode from positional arguments and the buffered flag.
    ///
    /// Any positional argument wins: the arguments are joined with single
    /// spaces and the buffered flag has no effect.
    #[must_use]
    pub fn from_args(args: &[String], buffered: bool) -> Self {
        if !args.is_empty() {
            Self::Text(args.join(" "))
        } else if buffered {
            Self::Buffered
        } else {
            Self::Stream
        }
    }
}

/// Line reader that never fails on encoding.
///
/// Lines end at `\n`; a `\r\n` terminator is stripped as a whole. Bytes
/// that are not valid UTF-8 become U+FFFD, so only a fault in the underlying
/// stream is reported as an error.
pub struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R> LineReader<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Next line without its terminator, or `None` at end of input.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf).await? == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

/// Read `reader` to the end and join its lines with `\n`.
///
/// A trailing newline does not produce a trailing empty line. Empty input
/// yields an empty string.
pub async fn read_joined<R>(reader: R) -> std::io::Result<(String, usize)>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = LineReader::new(reader);
    let mut collected = Vec::new();

    while let Some(line) = lines.next_line().await? {
        collected.push(line);
    }

    let count = collected.len();
    Ok((collected.join("\n"), count))
}
