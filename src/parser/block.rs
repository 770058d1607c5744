use std::sync::Arc;

use crate::base::{to_message, ParseError, Span, StringReader};
use crate::syntax::{Block, BlockDefinition, BlockDefinitions, CompletionItem};

use super::argument::{ArgValue, ArgumentParser, ParseContext};
use super::identity::IdentityParser;
use super::literal::LiteralParser;
use super::result::ParserResult;

/// Parses a block: an id, optional `[key=value,...]` states, and an
/// optional `{...}` NBT suffix.
///
/// States are validated against the block definitions when the id resolves
/// to one. Tags skip validation; their member set is not known here.
#[derive(Debug, Clone)]
pub struct BlockParser {
    id: IdentityParser,
    definitions: Arc<BlockDefinitions>,
}

impl BlockParser {
    pub fn new(id: IdentityParser, definitions: Arc<BlockDefinitions>) -> Self {
        Self { id, definitions }
    }

    pub fn parse(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<Block> {
        let mut res = ParserResult::new(Block::default());
        let id_res = self.id.parse(reader, ctx);
        let fatal = id_res.is_fatal();
        res.data.id = res.absorb(id_res);
        if fatal {
            return res;
        }

        let definition = if res.data.id.is_tag {
            None
        } else {
            self.definitions.get(&res.data.id.lookup_key())
        };

        if reader.peek() == Some('[') {
            self.parse_states(&mut res, reader, ctx, definition);
        }
        if reader.peek() == Some('{') {
            let compound = res.absorb(ctx.suite.nbt_compound().parse_compound(reader, ctx, None));
            res.data.tag = Some(compound);
        }
        res
    }

    fn parse_states(
        &self,
        res: &mut ParserResult<Block>,
        reader: &mut StringReader,
        ctx: &ParseContext,
        definition: Option<&BlockDefinition>,
    ) {
        // '[' was peeked by the caller.
        reader.skip();
        loop {
            reader.skip_whitespace();
            if reader.peek() == Some(']') {
                self.complete_remaining_keys(res, reader, ctx, definition);
                reader.skip();
                break;
            }
            if !reader.can_read() {
                self.complete_remaining_keys(res, reader, ctx, definition);
                if let Err(e) = reader.expect(']') {
                    res.errors.push(e);
                }
                break;
            }

            let key_start = reader.cursor;
            self.complete_remaining_keys(res, reader, ctx, definition);
            let key = match reader.read_string() {
                Ok(key) => key,
                Err(e) => {
                    res.errors.push(e);
                    break;
                }
            };
            if let Some(definition) = definition {
                let remaining: Vec<&str> = definition
                    .properties
                    .keys()
                    .map(String::as_str)
                    .filter(|k| !res.data.states.contains_key(*k))
                    .collect();
                if !remaining.contains(&key.as_str()) {
                    res.errors.push(ParseError::tolerable(
                        Span::new(key_start, reader.cursor),
                        format!(
                            "expected {} but got '{key}'",
                            to_message(&remaining, true, "or")
                        ),
                    ));
                }
                if res.data.states.contains_key(&key) {
                    res.errors.push(ParseError::tolerable(
                        Span::new(key_start, reader.cursor),
                        format!("duplicate key '{key}'"),
                    ));
                }
            }

            reader.skip_whitespace();
            if let Err(e) = reader.expect('=') {
                res.errors.push(e);
                break;
            }
            reader.skip();
            reader.skip_whitespace();

            let values = definition.and_then(|d| d.properties.get(&key));
            let value = match values {
                Some(values) => {
                    res.absorb(LiteralParser::new(values.iter().map(String::as_str)).parse(reader, ctx))
                }
                None => match reader.read_string() {
                    Ok(value) => value,
                    Err(e) => {
                        res.errors.push(e);
                        break;
                    }
                },
            };
            res.data.states.insert(key, value);

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
    }

    /// Offers the not-yet-used state keys when the caret sits here.
    fn complete_remaining_keys(
        &self,
        res: &mut ParserResult<Block>,
        reader: &StringReader,
        ctx: &ParseContext,
        definition: Option<&BlockDefinition>,
    ) {
        if !ctx.is_cursor_at(reader.cursor) {
            return;
        }
        if let Some(definition) = definition {
            for key in definition.properties.keys() {
                if !res.data.states.contains_key(key) {
                    res.completions.push(CompletionItem::new(key.as_str()));
                }
            }
        }
    }
}

impl ArgumentParser for BlockParser {
    fn name(&self) -> &'static str {
        "block"
    }

    fn parse_arg(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<ArgValue> {
        self.parse(reader, ctx).map(ArgValue::Block)
    }

    fn examples(&self) -> &'static [&'static str] {
        &["stone", "minecraft:stone", "stone[foo=bar]", "stone{bar: baz}"]
    }
}
