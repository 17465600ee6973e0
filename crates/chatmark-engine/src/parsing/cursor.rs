/// A forward-only cursor over the message being scanned.
///
/// Positions are byte offsets. The scan loop only ever stops on ASCII
/// delimiters (`[`, `]`, `{`), so every position it produces is a char
/// boundary and slicing with it is safe.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s`.
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        self.s.get(self.i..).unwrap_or("")
    }

    /// Returns the absolute position of the next `b` at or after the cursor.
    pub fn find(&self, b: u8) -> Option<usize> {
        self.s.as_bytes()[self.i.min(self.s.len())..]
            .iter()
            .position(|&c| c == b)
            .map(|off| self.i + off)
    }

    /// Advances by `n` bytes, clamped to the end of input.
    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Moves the cursor to `pos` and returns the text skipped over.
    pub fn advance_to(&mut self, pos: usize) -> &'a str {
        let pos = pos.clamp(self.i, self.s.len());
        let skipped = &self.s[self.i..pos];
        self.i = pos;
        skipped
    }
}
