use crate::base::{ParseError, Span, StringReader};
use crate::syntax::{CompletionItem, NbtCompound, NbtValue};

use super::argument::{ArgValue, ArgumentParser, ParseContext};
use super::result::ParserResult;
use super::schema_walker::SchemaWalker;

/// Parses SNBT compound tags (`{Count: 1b, id: "minecraft:stone"}` style,
/// minus the numeric suffixes this dialect does not distinguish).
///
/// When a [`SchemaWalker`] is supplied, keys are validated against the
/// schema and declared keys are offered at the caret.
#[derive(Debug, Clone, Copy, Default)]
pub struct NbtTagParser;

impl NbtTagParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_compound(
        &self,
        reader: &mut StringReader,
        ctx: &ParseContext,
        walker: Option<&SchemaWalker>,
    ) -> ParserResult<NbtCompound> {
        let mut res = ParserResult::new(NbtCompound::default());
        if let Err(e) = reader.expect('{') {
            res.errors.push(e);
            return res;
        }
        reader.skip();
        reader.skip_whitespace();
        if reader.peek() == Some('}') {
            reader.skip();
            return res;
        }
        loop {
            reader.skip_whitespace();
            let key_start = reader.cursor;
            if ctx.is_cursor_at(key_start) {
                if let Some(walker) = walker {
                    for key in walker.child_keys() {
                        res.completions.push(CompletionItem::new(key));
                    }
                }
            }
            let key = match reader.read_string() {
                Ok(key) => key,
                Err(e) => {
                    res.errors.push(e);
                    return res;
                }
            };
            if key.is_empty() {
                res.errors.push(ParseError::fatal(
                    Span::at(key_start),
                    "expected a key but got nothing",
                ));
                return res;
            }
            let sub = walker.and_then(|w| w.child(&key));
            if let Some(walker) = walker {
                if sub.is_none() && !walker.accepts_additional_children() {
                    res.errors.push(ParseError::warning(
                        Span::new(key_start, reader.cursor),
                        format!("unknown key '{key}'"),
                    ));
                }
            }
            reader.skip_whitespace();
            if let Err(e) = reader.expect(':') {
                res.errors.push(e);
                return res;
            }
            reader.skip();
            reader.skip_whitespace();
            let value = res.absorb(self.parse_value(reader, ctx, sub.as_ref()));
            res.data.insert(key, value);
            reader.skip_whitespace();
            match reader.peek() {
                Some(',') => reader.skip(),
                Some('}') => {
                    reader.skip();
                    break;
                }
                _ => {
                    if let Err(e) = reader.expect('}') {
                        res.errors.push(e);
                    }
                    break;
                }
            }
        }
        res
    }

    fn parse_value(
        &self,
        reader: &mut StringReader,
        ctx: &ParseContext,
        walker: Option<&SchemaWalker>,
    ) -> ParserResult<NbtValue> {
        match reader.peek() {
            Some('{') => self
                .parse_compound(reader, ctx, walker)
                .map(NbtValue::Compound),
            Some('[') => self.parse_list(reader, ctx, walker),
            Some('"') => {
                let mut res = ParserResult::new(NbtValue::String(String::new()));
                match reader.read_quoted_string() {
                    Ok(s) => res.data = NbtValue::String(s),
                    Err(e) => res.errors.push(e),
                }
                res
            }
            _ => {
                let mut res =
                    ParserResult::new(NbtValue::String(String::new()));
                let start = reader.cursor;
                let raw = reader.read_unquoted_string();
                if raw.is_empty() {
                    res.errors.push(ParseError::fatal(
                        Span::at(start),
                        "expected a value but got nothing",
                    ));
                } else if let Ok(n) = raw.parse::<i64>() {
                    res.data = NbtValue::Int(n);
                } else if let Ok(f) = raw.parse::<f64>() {
                    res.data = NbtValue::Double(f);
                } else {
                    res.data = NbtValue::String(raw.to_string());
                }
                res
            }
        }
    }

    fn parse_list(
        &self,
        reader: &mut StringReader,
        ctx: &ParseContext,
        walker: Option<&SchemaWalker>,
    ) -> ParserResult<NbtValue> {
        let mut res = ParserResult::new(NbtValue::List(Vec::new()));
        let item_walker = walker.and_then(SchemaWalker::item);
        // '[' was peeked by the caller.
        reader.skip();
        reader.skip_whitespace();
        let mut items = Vec::new();
        if reader.peek() == Some(']') {
            reader.skip();
            return res;
        }
        loop {
            reader.skip_whitespace();
            items.push(res.absorb(self.parse_value(reader, ctx, item_walker.as_ref())));
            reader.skip_whitespace();
            match reader.peek() {
                Some(',') => reader.skip(),
                Some(']') => {
                    reader.skip();
                    break;
                }
                _ => {
                    if let Err(e) = reader.expect(']') {
                        res.errors.push(e);
                    }
                    break;
                }
            }
        }
        res.data = NbtValue::List(items);
        res
    }
}

impl ArgumentParser for NbtTagParser {
    fn name(&self) -> &'static str {
        "nbt"
    }

    fn parse_arg(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<ArgValue> {
        self.parse_compound(reader, ctx, None)
            .map(|c| ArgValue::Nbt(NbtValue::Compound(c)))
    }

    fn examples(&self) -> &'static [&'static str] {
        &["{}", "{foo: bar}", "{Count: 1, tag: {display: {}}}"]
    }
}
