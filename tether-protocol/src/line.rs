//! Line framing for the serial link.
//!
//! Bytes are accumulated into a fixed buffer until `\n` arrives. The
//! completed line is handed out with surrounding whitespace (including a
//! trailing `\r`) removed. Only the trimmed length counts against the
//! buffer; a line longer than that is reported once and then dropped up to
//! its terminating newline.

/// Default maximum line length in bytes, excluding the terminator
pub const MAX_LINE_LEN: usize = 64;

/// Line terminator
pub const LINE_END: u8 = b'\n';

/// Errors reported while framing lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded the buffer; the rest of it will be discarded
    Overflow,
}

/// Accumulates bytes into trimmed lines without allocating
#[derive(Debug, Clone)]
pub struct LineReader<const N: usize = MAX_LINE_LEN> {
    buffer: [u8; N],
    len: usize,
    /// Dropping bytes until the next terminator
    discarding: bool,
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LineReader<N> {
    /// Create an empty reader
    pub const fn new() -> Self {
        Self {
            buffer: [0; N],
            len: 0,
            discarding: false,
        }
    }

    /// Drop any partially received line
    pub fn reset(&mut self) {
        self.len = 0;
        self.discarding = false;
    }

    /// Number of bytes buffered for the line in progress
    pub fn pending(&self) -> usize {
        self.len
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when `byte` terminates a line, `Ok(None)`
    /// when more bytes are needed, or `Err(LineError::Overflow)` the moment
    /// a line outgrows the buffer.
    ///
    /// A line that is not valid UTF-8 is returned as the empty string.
    pub fn feed(&mut self, byte: u8) -> Result<Option<&str>, LineError> {
        if byte == LINE_END {
            if self.discarding {
                self.discarding = false;
                return Ok(None);
            }
            let len = self.len;
            self.len = 0;
            let line = core::str::from_utf8(&self.buffer[..len]).unwrap_or("");
            return Ok(Some(line.trim()));
        }

        if self.discarding {
            return Ok(None);
        }

        // Leading whitespace, and whitespace past a full buffer, would be
        // trimmed anyway; only an extra visible byte overflows
        if byte.is_ascii_whitespace() && (self.len == 0 || self.len == N) {
            return Ok(None);
        }

        if self.len < N {
            self.buffer[self.len] = byte;
            self.len += 1;
            return Ok(None);
        }

        self.len = 0;
        self.discarding = true;
        Err(LineError::Overflow)
    }
}
