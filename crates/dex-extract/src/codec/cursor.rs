//! Byte cursor over source text.
//!
//! Every delimiter the scanner cares about is ASCII, so scanning bytes is
//! safe on UTF-8 input: an ASCII byte never occurs inside a multi-byte
//! sequence, and every offset the cursor stops at is a char boundary.

/// Cursor for scanning source text.
///
/// Wraps a string slice and provides the small set of moves the scanner
/// needs, with bounds checking on every read.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Creates a cursor at byte offset `pos`, clamped to the text length.
    pub fn at(text: &'a str, pos: usize) -> Self {
        Self {
            text,
            pos: pos.min(text.len()),
        }
    }

    /// Returns the current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread text.
    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Returns true if all text has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Returns the next byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Consumes `byte` if it is next. Returns whether it was consumed.
    #[inline]
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the next byte if it is any of `bytes`.
    #[inline]
    pub fn eat_any(&mut self, bytes: &[u8]) -> bool {
        match self.peek() {
            Some(b) if bytes.contains(&b) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Skips ASCII whitespace.
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Advances from an opening `{` to its matching `}`.
    ///
    /// On success the cursor rests on the closing brace and its offset is
    /// returned. If the text ends first, returns the depth still open
    /// (zero if the cursor was not on a `{`).
    /// Braces inside string literals are counted like any other brace.
    pub fn match_braces(&mut self) -> Result<usize, usize> {
        if self.peek() != Some(b'{') {
            return Err(0);
        }
        let bytes = self.text.as_bytes();
        let mut depth = 0usize;
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'{' => depth += 1,
                b'}' => {
                    // depth > 0: the scan starts on an opening brace
                    depth -= 1;
                    if depth == 0 {
                        return Ok(self.pos);
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
        Err(depth)
    }
}

/// Returns true for bytes that can continue an identifier.
#[inline]
pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eat_and_whitespace() {
        let mut cursor = Cursor::new("  :\t{");
        cursor.skip_whitespace();
        assert!(cursor.eat(b':'));
        assert!(!cursor.eat(b':'));
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(), Some(b'{'));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_match_braces_nested() {
        let text = "{a:{b:1},c:{}} tail";
        let mut cursor = Cursor::new(text);
        assert_eq!(cursor.match_braces(), Ok(13));
        assert_eq!(cursor.remaining(), "} tail");
    }

    #[test]
    fn test_match_braces_unbalanced() {
        let mut cursor = Cursor::new("{a:{b:1}");
        assert_eq!(cursor.match_braces(), Err(1));
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_at_clamps() {
        let cursor = Cursor::at("abc", 10);
        assert!(cursor.is_empty());
        assert_eq!(cursor.remaining(), "");
    }
}
