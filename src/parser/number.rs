use crate::base::{ParseError, Span, StringReader};

use super::argument::{ArgValue, ArgumentParser, ParseContext};
use super::result::ParserResult;

/// Parses a decimal integer, optionally bounds-checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerParser {
    min: Option<i64>,
    max: Option<i64>,
}

impl IntegerParser {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    pub fn parse(&self, reader: &mut StringReader, _ctx: &ParseContext) -> ParserResult<i64> {
        let start = reader.cursor;
        let mut res = ParserResult::new(0);
        match reader.read_int() {
            Ok(n) => {
                res.data = n;
                let range = Span::new(start, reader.cursor);
                if let Some(min) = self.min {
                    if n < min {
                        res.errors.push(ParseError::tolerable(
                            range,
                            format!("expected a number not less than {min} but got {n}"),
                        ));
                    }
                }
                if let Some(max) = self.max {
                    if n > max {
                        res.errors.push(ParseError::tolerable(
                            range,
                            format!("expected a number not greater than {max} but got {n}"),
                        ));
                    }
                }
            }
            Err(e) => res.errors.push(e),
        }
        res
    }
}

impl ArgumentParser for IntegerParser {
    fn name(&self) -> &'static str {
        "integer"
    }

    fn parse_arg(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<ArgValue> {
        self.parse(reader, ctx).map(ArgValue::Integer)
    }

    fn examples(&self) -> &'static [&'static str] {
        &["0", "-123"]
    }
}
