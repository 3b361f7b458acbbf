/// A byte cursor over source text that tracks position.
///
/// Works on bytes because every delimiter the stripper and lexer care about
/// is ASCII; multi-byte UTF-8 sequences are always consumed whole so the
/// offset never lands inside a character.
#[derive(Clone)]
pub struct Cursor<'src> {
    /// The source text being scanned.
    source: &'src str,
    /// Current byte offset from start of source.
    offset: usize,
    /// Current line number (1-indexed).
    line: u32,
    /// Current column number (1-indexed, byte-based).
    column: u32,
}

impl<'src> Cursor<'src> {
    /// Create a new cursor at the start of the source.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current byte offset from start of source.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current line number (1-indexed).
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Current column number (1-indexed, byte-based).
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Check if we've reached the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Peek at the current byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.offset).copied()
    }

    /// Peek at the nth byte ahead (0 = current).
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<u8> {
        self.source.as_bytes().get(self.offset + n).copied()
    }

    /// Check if the upcoming bytes match the given string.
    #[inline]
    pub fn check_str(&self, s: &str) -> bool {
        self.source.as_bytes()[self.offset..].starts_with(s.as_bytes())
    }

    /// Check if the upcoming bytes match the given string, ignoring ASCII case.
    pub fn check_str_ignore_case(&self, s: &str) -> bool {
        self.source.as_bytes()[self.offset..]
            .get(..s.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(s.as_bytes()))
    }

    /// Consume the current character and advance.
    ///
    /// Returns the first byte of the consumed character, or `None` at EOF.
    /// A multi-byte character is consumed in full.
    #[inline]
    pub fn advance(&mut self) -> Option<u8> {
        let first = self.peek()?;
        let width = utf8_width(first);

        // `\r\n` breaks at the `\n`; a lone `\r` is an old Mac line ending.
        if first == b'\n' || (first == b'\r' && self.peek_nth(1) != Some(b'\n')) {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += width as u32;
        }
        self.offset = (self.offset + width).min(self.source.len());

        Some(first)
    }

    /// Advance by `n` characters.
    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// Consume if the current byte matches.
    #[inline]
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while the predicate matches their first byte.
    ///
    /// Returns the consumed slice.
    pub fn eat_while(&mut self, f: impl Fn(u8) -> bool) -> &'src str {
        let start = self.offset;
        while self.peek().is_some_and(&f) {
            self.advance();
        }
        &self.source[start..self.offset]
    }

    /// Advance until `needle` starts at the cursor, or to EOF.
    ///
    /// Returns `true` if the needle was found (the cursor sits on it).
    pub fn skip_until(&mut self, needle: &str) -> bool {
        while !self.is_eof() {
            if self.check_str(needle) {
                return true;
            }
            self.advance();
        }
        false
    }

    /// Get a slice of source from a starting offset to current position.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.offset]
    }
}

/// Byte width of the UTF-8 sequence introduced by `first`.
#[inline]
fn utf8_width(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Check if a byte can start an identifier.
///
/// Bytes of multi-byte UTF-8 characters are accepted, matching the
/// `[a-zA-Z_\x80-\xff]` label rule.
#[inline]
pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

/// Check if a byte can continue an identifier.
#[inline]
pub fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}
