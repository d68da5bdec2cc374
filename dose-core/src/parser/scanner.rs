//! Small cursor-based text scanner used by the KRL parsers.
//!
//! Every matcher is written as a function over a [`Scanner`] that returns
//! `None` as soon as the input stops fitting the grammar. [`find_all`] then
//! tries the matcher at every character position, left to right, and resumes
//! after the end of each successful match, so matches never overlap.

/// Cursor over a borrowed text.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at byte offset `pos`.
    pub fn at(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Text consumed since `start`.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.text[start..self.pos]
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Skip any run of whitespace, including none.
    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }

    /// Require at least one whitespace character, then skip the rest of the run.
    pub fn whitespace1(&mut self) -> Option<()> {
        if !self.peek()?.is_whitespace() {
            return None;
        }
        self.skip_whitespace();
        Some(())
    }

    /// Consume exactly `expected`.
    pub fn char(&mut self, expected: char) -> Option<()> {
        if self.peek()? != expected {
            return None;
        }
        self.pos += expected.len_utf8();
        Some(())
    }

    /// Consume `expected`, ignoring ASCII letter case.
    pub fn char_ignore_case(&mut self, expected: char) -> Option<()> {
        let c = self.peek()?;
        if !c.eq_ignore_ascii_case(&expected) {
            return None;
        }
        self.pos += c.len_utf8();
        Some(())
    }

    /// Consume an exact, case-sensitive literal.
    pub fn literal(&mut self, expected: &str) -> Option<()> {
        if !self.rest().starts_with(expected) {
            return None;
        }
        self.pos += expected.len();
        Some(())
    }

    /// Consume an ASCII keyword in any letter case.
    pub fn keyword(&mut self, expected: &str) -> Option<()> {
        let candidate = self.rest().get(..expected.len())?;
        if !candidate.eq_ignore_ascii_case(expected) {
            return None;
        }
        self.pos += expected.len();
        Some(())
    }

    /// Consume one or more ASCII digits.
    pub fn digits(&mut self) -> Option<&'a str> {
        let start = self.pos;
        let len = self
            .rest()
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(self.slice_from(start))
    }

    /// Consume a decimal number: optional `-`, digits, optional `.` fraction.
    ///
    /// No exponent and no leading `+`. Parsing is locale-invariant.
    pub fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        let mut probe = self.clone();
        if probe.peek() == Some('-') {
            probe.pos += 1;
        }
        probe.digits()?;
        if probe.peek() == Some('.') {
            probe.pos += 1;
            // Fraction digits are optional: "2." reads as 2.
            let _ = probe.digits();
        }
        let value = probe.slice_from(start).parse().ok()?;
        self.pos = probe.pos;
        Some(value)
    }
}

/// Find every non-overlapping match of `matcher` in `text`, left to right.
pub fn find_all<'a, T>(
    text: &'a str,
    mut matcher: impl FnMut(&mut Scanner<'a>) -> Option<T>,
) -> Vec<T> {
    let mut found = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut scanner = Scanner::at(text, start);
        match matcher(&mut scanner) {
            Some(item) if scanner.position() > start => {
                found.push(item);
                start = scanner.position();
            }
            _ => start += next_char_len(&text[start..]),
        }
    }

    found
}

/// Find the leftmost match of `matcher` in `text`.
pub fn find_first<'a, T>(
    text: &'a str,
    mut matcher: impl FnMut(&mut Scanner<'a>) -> Option<T>,
) -> Option<T> {
    let mut start = 0;

    while start < text.len() {
        let mut scanner = Scanner::at(text, start);
        if let Some(item) = matcher(&mut scanner) {
            if scanner.position() > start {
                return Some(item);
            }
        }
        start += next_char_len(&text[start..]);
    }

    None
}

fn next_char_len(rest: &str) -> usize {
    rest.chars().next().map_or(1, char::len_utf8)
}
