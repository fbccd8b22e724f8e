// src/utils/log.rs

//! Log output helpers for the binary's `env_logger` setup.

use std::io::{self, Write};

/// Writer that duplicates every write to two sinks.
///
/// Used to keep console output while also appending to a log file.
pub struct Tee<A, B> {
    primary: A,
    secondary: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }

    /// Give back both sinks.
    pub fn into_inner(self) -> (A, B) {
        (self.primary, self.secondary)
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_all(buf)?;
        Ok(buf.len())
    }

    // Both sinks get the whole buffer even if the first one fails.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let first = self.primary.write_all(buf);
        let second = self.secondary.write_all(buf);
        first.and(second)
    }

    fn flush(&mut self) -> io::Result<()> {
        let first = self.primary.flush();
        let second = self.secondary.flush();
        first.and(second)
    }
}

/// Tee to stderr and `file`.
pub fn stderr_and<W: Write>(file: W) -> Tee<io::Stderr, W> {
    Tee::new(io::stderr(), file)
}
