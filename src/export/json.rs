//! JSON output.
//!
//! Exports are written as a single pretty-printed JSON object with four-space
//! indentation, both to stdout and to backup files. The two are identical
//! apart from the trailing newline printed on stdout.

use std::io::{self, ErrorKind, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::config::JSON_INDENT;

/// Wrapper around a Write that ignores broken pipe errors (EPIPE).
/// This allows graceful handling when stdout is piped to a command that exits early.
pub(crate) struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}

/// Serializes `value` as pretty-printed JSON (UTF-8, four-space indent, no trailing newline).
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Writes `value` as pretty-printed JSON followed by a newline, then flushes.
pub(crate) fn write_json_line<T, W>(writer: &mut W, value: &T) -> io::Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    let json = to_pretty_json(value)?;
    writer.write_all(&json)?;
    writer.write_all(b"\n")?;
    writer.flush()
}
