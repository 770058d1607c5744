use crate::base::{ParseError, Span, StringReader};

use super::argument::{ArgValue, ArgumentParser, ParseContext};
use super::result::ParserResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrKind {
    /// A single unquoted or quoted word.
    Word,
    /// Everything up to the end of the line.
    Greedy,
}

#[derive(Debug, Clone, Copy)]
pub struct StrParser {
    kind: StrKind,
}

impl StrParser {
    pub fn new(kind: StrKind) -> Self {
        Self { kind }
    }

    pub fn parse(&self, reader: &mut StringReader, _ctx: &ParseContext) -> ParserResult<String> {
        let start = reader.cursor;
        match self.kind {
            StrKind::Greedy => ParserResult::new(reader.read_remaining().to_string()),
            StrKind::Word => {
                let mut res = ParserResult::new(String::new());
                if reader.peek() == Some('"') {
                    match reader.read_quoted_string() {
                        Ok(s) => res.data = s,
                        Err(e) => res.errors.push(e),
                    }
                } else {
                    res.data = reader.read_unquoted_string().to_string();
                    if res.data.is_empty() {
                        res.errors.push(ParseError::fatal(
                            Span::at(start),
                            "expected a string but got nothing",
                        ));
                    }
                }
                res
            }
        }
    }
}

impl ArgumentParser for StrParser {
    fn name(&self) -> &'static str {
        "string"
    }

    fn parse_arg(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<ArgValue> {
        self.parse(reader, ctx).map(ArgValue::String)
    }

    fn examples(&self) -> &'static [&'static str] {
        &["word", "\"quoted phrase\""]
    }
}
