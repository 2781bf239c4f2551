//! Character sources for the tokenizer.
//!
//! The tokenizer reads one character at a time and may push back exactly
//! one character. Any text origin that supports those two operations can
//! feed it: an in-memory string ([`StrSource`]) or a buffered reader over a
//! file or stdin ([`ReaderSource`]). [`LineTracker`] wraps either and
//! records where lines start, so streamed input can still be located.

use crate::location::Location;
use std::io::{self, BufRead};

/// A sequential character source with one character of pushback.
pub trait CharSource {
    /// Reads the next character, or `None` at end of input.
    ///
    /// # Errors
    /// Returns an error if the underlying source cannot be read or does not
    /// hold valid UTF-8.
    fn read_char(&mut self) -> io::Result<Option<char>>;

    /// Pushes back the character returned by the last [`read_char`](Self::read_char).
    ///
    /// # Errors
    /// Returns `InvalidInput` if nothing was read since the last unread, or
    /// the last read hit end of input.
    fn unread_char(&mut self) -> io::Result<()>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        (**self).read_char()
    }

    fn unread_char(&mut self) -> io::Result<()> {
        (**self).unread_char()
    }
}

fn nothing_to_unread() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, "no character to unread")
}

/// Character source over an in-memory string.
#[derive(Clone, Debug)]
pub struct StrSource<'src> {
    source: &'src str,
    /// Current byte offset.
    offset: usize,
    /// Byte length of the last character read, while it may be unread.
    last_len: Option<usize>,
}

impl<'src> StrSource<'src> {
    /// Creates a source over the given text.
    #[must_use]
    pub const fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            last_len: None,
        }
    }

    /// Returns the text not yet read.
    #[must_use]
    pub fn rest(&self) -> &'src str {
        &self.source[self.offset..]
    }
}

impl CharSource for StrSource<'_> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let next = self.rest().chars().next();
        self.last_len = next.map(char::len_utf8);
        if let Some(len) = self.last_len {
            self.offset += len;
        }
        Ok(next)
    }

    fn unread_char(&mut self) -> io::Result<()> {
        let len = self.last_len.take().ok_or_else(nothing_to_unread)?;
        self.offset -= len;
        Ok(())
    }
}

/// Streaming character source over a buffered reader.
///
/// Decodes UTF-8 incrementally, so a file never has to be held in memory.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    /// Character pushed back by `unread_char`, returned by the next read.
    pending: Option<char>,
    /// Last character read, while it may be unread.
    last: Option<char>,
}

impl<R: BufRead> ReaderSource<R> {
    /// Creates a source over the given reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
            last: None,
        }
    }

    /// Consumes the source, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => {
                    let Some(&byte) = buf.first() else {
                        return Ok(None);
                    };
                    self.reader.consume(1);
                    return Ok(Some(byte));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn decode_next(&mut self) -> io::Result<Option<char>> {
        let Some(first) = self.read_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(first)
            .ok_or_else(|| invalid_data(format!("invalid UTF-8 lead byte 0x{first:02x}")))?;

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            *slot = self
                .read_byte()?
                .ok_or_else(|| invalid_data("truncated UTF-8 sequence".to_string()))?;
        }

        let text = std::str::from_utf8(&bytes[..width])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(text.chars().next())
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let next = match self.pending.take() {
            Some(c) => Some(c),
            None => self.decode_next()?,
        };
        self.last = next;
        Ok(next)
    }

    fn unread_char(&mut self) -> io::Result<()> {
        let c = self.last.take().ok_or_else(nothing_to_unread)?;
        self.pending = Some(c);
        Ok(())
    }
}

/// Character source that records line starts as characters pass through.
///
/// Hand the tokenizer `&mut tracker` and keep the tracker to turn error
/// positions into a [`Location`] once scanning stops.
#[derive(Debug)]
pub struct LineTracker<S> {
    inner: S,
    /// Characters read so far, net of unreads.
    offset: usize,
    /// Character offset of each line start seen; always begins with 0.
    line_starts: Vec<usize>,
    /// Last character read, while it may be unread.
    last: Option<char>,
}

impl<S: CharSource> LineTracker<S> {
    /// Wraps a source.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            offset: 0,
            line_starts: vec![0],
            last: None,
        }
    }

    /// Locates a character offset among the lines read so far.
    ///
    /// Offsets at or past the last read character count as part of the last
    /// line.
    #[must_use]
    pub fn location(&self, position: usize) -> Location {
        let index = self
            .line_starts
            .partition_point(|&start| start <= position)
            .max(1);
        let start = self.line_starts[index - 1];
        Location::new(saturate(index), saturate(position - start + 1))
    }

    /// Consumes the tracker, returning the wrapped source.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: CharSource> CharSource for LineTracker<S> {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        let next = self.inner.read_char()?;
        self.last = next;
        if let Some(c) = next {
            self.offset += 1;
            if c == '\n' {
                self.line_starts.push(self.offset);
            }
        }
        Ok(next)
    }

    fn unread_char(&mut self) -> io::Result<()> {
        self.inner.unread_char()?;
        let c = self.last.take().ok_or_else(nothing_to_unread)?;
        if c == '\n' {
            self.line_starts.pop();
        }
        self.offset -= 1;
        Ok(())
    }
}

fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Returns the encoded length of a UTF-8 sequence from its lead byte.
const fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}
