/// A cursor for byte-level inline scanning with an exclusive upper bound.
///
/// Cloning a cursor is how scanners backtrack: work on a copy and only
/// publish its position once the whole construct has matched.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
    /// Exclusive end of the scannable region.
    pub max: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at `i`; `max` is clamped to the string length.
    pub fn new(s: &'a str, i: usize, max: usize) -> Self {
        Self {
            s,
            i,
            max: max.min(s.len()),
        }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true once the cursor reaches `max`.
    pub fn eof(&self) -> bool {
        self.i >= self.max
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        if self.eof() {
            return None;
        }
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input (up to `max`) starts with `pat`.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..self.max)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances past the whole character at the cursor.
    pub fn bump_char(&mut self) {
        if let Some(c) = self.s.get(self.i..).and_then(|rest| rest.chars().next()) {
            self.i += c.len_utf8();
        } else {
            self.i += 1;
        }
    }

    /// Moves to an absolute byte index.
    pub fn jump(&mut self, i: usize) {
        self.i = i;
    }

    /// Advances while `pred` holds, returning the number of bytes skipped.
    pub fn skip_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        self.i - start
    }

    /// Skips spaces, tabs and newlines.
    pub fn skip_whitespace(&mut self) -> usize {
        self.skip_while(|b| matches!(b, b' ' | b'\t' | b'\n'))
    }

    /// Source text between two byte indices.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.s[start..end]
    }
}
