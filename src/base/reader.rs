//! Forward-only cursor over an immutable line of text.
//!
//! The reader is the only mutable state threaded through a parse. All read
//! operations are monotonic: the cursor never moves backwards. Backtracking
//! is done by the caller holding a copy of the reader (it is `Copy`).

use super::{ParseError, Span};

/// A scanner over a single line with a byte-offset cursor.
#[derive(Debug, Clone, Copy)]
pub struct StringReader<'a> {
    src: &'a str,
    pub cursor: usize,
}

impl<'a> StringReader<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, cursor: 0 }
    }

    /// The unread remainder of the line.
    pub fn remaining(&self) -> &'a str {
        &self.src[self.cursor..]
    }

    pub fn can_read(&self) -> bool {
        self.cursor < self.src.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Read one character and advance.
    pub fn read(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    /// Advance past one character without returning it.
    pub fn skip(&mut self) {
        if let Some(c) = self.peek() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c == ' ' || c == '\t') {
            self.skip();
        }
    }

    /// Assert that the next character is `expected` without consuming it.
    pub fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(ParseError::fatal(
                Span::at(self.cursor),
                format!("expected '{expected}' but got '{c}'"),
            )),
            None => Err(ParseError::fatal(
                Span::at(self.cursor),
                format!("expected '{expected}' but got nothing"),
            )),
        }
    }

    /// Read a run of unquoted-string characters. May be empty.
    pub fn read_unquoted_string(&mut self) -> &'a str {
        let start = self.cursor;
        while self.peek().is_some_and(Self::is_allowed_in_unquoted_string) {
            self.skip();
        }
        &self.src[start..self.cursor]
    }

    /// Read a double-quoted string, handling `\"` and `\\` escapes.
    pub fn read_quoted_string(&mut self) -> Result<String, ParseError> {
        self.expect('"')?;
        self.skip();
        let mut ans = String::new();
        loop {
            match self.read() {
                None => {
                    return Err(ParseError::fatal(
                        Span::at(self.cursor),
                        "expected an ending quote '\"' but got nothing",
                    ));
                }
                Some('"') => return Ok(ans),
                Some('\\') => match self.read() {
                    Some(c @ ('"' | '\\')) => ans.push(c),
                    Some(c) => {
                        return Err(ParseError::fatal(
                            Span::new(self.cursor - c.len_utf8(), self.cursor),
                            format!("unsupported escape character '{c}'"),
                        ));
                    }
                    None => {
                        return Err(ParseError::fatal(
                            Span::at(self.cursor),
                            "expected an escapable character but got nothing",
                        ));
                    }
                },
                Some(c) => ans.push(c),
            }
        }
    }

    /// Read a quoted or unquoted string depending on the next character.
    pub fn read_string(&mut self) -> Result<String, ParseError> {
        if self.peek() == Some('"') {
            self.read_quoted_string()
        } else {
            Ok(self.read_unquoted_string().to_string())
        }
    }

    /// Read an integer literal.
    pub fn read_int(&mut self) -> Result<i64, ParseError> {
        let start = self.cursor;
        while self.peek().is_some_and(Self::is_allowed_in_number) {
            self.skip();
        }
        let raw = &self.src[start..self.cursor];
        if raw.is_empty() {
            return Err(ParseError::fatal(
                Span::at(self.cursor),
                "expected a number but got nothing",
            ));
        }
        raw.parse::<i64>().map_err(|_| {
            ParseError::fatal(
                Span::new(start, self.cursor),
                format!("expected a number but got '{raw}'"),
            )
        })
    }

    /// Consume and return everything up to the end of the line.
    pub fn read_remaining(&mut self) -> &'a str {
        let ans = self.remaining();
        self.cursor = self.src.len();
        ans
    }

    /// Characters allowed in unquoted strings: `0-9 a-z A-Z _ - . +`.
    pub fn is_allowed_in_unquoted_string(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')
    }

    /// Characters that may make up a numeric literal.
    pub fn is_allowed_in_number(c: char) -> bool {
        c.is_ascii_digit() || matches!(c, '-' | '.' | '+')
    }
}
