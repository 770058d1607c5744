use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{to_message, ParseError, Span, StringReader};
use crate::syntax::{CompletionItem, NbtPath, NbtPathToken, NbtSchema};

use super::argument::{ArgValue, ArgumentParser, ParseContext};
use super::number::IntegerParser;
use super::result::ParserResult;
use super::schema_walker::SchemaWalker;

/// Which root document an NBT path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NbtCategory {
    Blocks,
    Entities,
    Items,
}

impl NbtCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NbtCategory::Blocks => "blocks",
            NbtCategory::Entities => "entities",
            NbtCategory::Items => "items",
        }
    }
}

impl fmt::Display for NbtCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a path is allowed to continue with at a given point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentKind {
    Key,
    CompoundFilter,
    Index,
}

impl SegmentKind {
    fn label(&self) -> &'static str {
        match self {
            SegmentKind::Key => "a key",
            SegmentKind::CompoundFilter => "a compound filter",
            SegmentKind::Index => "an index",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parses an NBT path (`foo.bar[0]{fizz: buzz}`) into a token sequence,
/// walking the schema alongside the text when the addressed id is known.
///
/// Schema mismatches are warnings: the game would fail the lookup at run
/// time, but the path is still structurally valid.
#[derive(Debug, Clone)]
pub struct NbtPathParser {
    category: NbtCategory,
    anchor: Option<SmolStr>,
    schema: Arc<NbtSchema>,
}

impl NbtPathParser {
    pub fn new(category: NbtCategory, anchor: Option<&str>, schema: Arc<NbtSchema>) -> Self {
        Self {
            category,
            anchor: anchor.map(SmolStr::new),
            schema,
        }
    }

    pub fn parse(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<NbtPath> {
        let mut res = ParserResult::new(NbtPath::default());
        let doc = format!("roots/{}.json", self.category);
        let walker = self
            .anchor
            .as_ref()
            .and_then(|anchor| SchemaWalker::locate(&self.schema, &doc, anchor));
        self.parse_segment(
            &mut res,
            reader,
            ctx,
            walker,
            &[
                SegmentKind::CompoundFilter,
                SegmentKind::Key,
                SegmentKind::Index,
            ],
            false,
        );
        res
    }

    /// Dispatches on the next character among the allowed continuations.
    /// Keys win over filters when both could start here.
    fn parse_segment(
        &self,
        res: &mut ParserResult<NbtPath>,
        reader: &mut StringReader,
        ctx: &ParseContext,
        walker: Option<SchemaWalker>,
        kinds: &[SegmentKind],
        allow_empty: bool,
    ) {
        let may = |kind| kinds.contains(&kind);
        if may(SegmentKind::Key) && ctx.is_cursor_at(reader.cursor) {
            if let Some(walker) = &walker {
                if walker.node().is_compound() {
                    for key in walker.child_keys() {
                        res.completions.push(CompletionItem::new(key));
                    }
                }
            }
        }
        if may(SegmentKind::Key) && Self::can_parse_key(reader) {
            let walker = self.check_compound(res, reader, walker, "keys");
            self.parse_key(res, reader, ctx, walker);
        } else if may(SegmentKind::CompoundFilter) && reader.peek() == Some('{') {
            let walker = self.check_compound(res, reader, walker, "compound filters");
            self.parse_filter(res, reader, ctx, walker);
        } else if may(SegmentKind::Index) && reader.peek() == Some('[') {
            let walker = self.check_indexable(res, reader, walker);
            self.parse_index(res, reader, ctx, walker);
        } else if !allow_empty {
            res.errors.push(ParseError::fatal(
                Span::at(reader.cursor),
                format!(
                    "expected {} but got nothing",
                    to_message(kinds, false, "or")
                ),
            ));
        }
    }

    fn can_parse_key(reader: &StringReader) -> bool {
        reader.peek().is_some_and(|c| {
            c == '"'
                || (StringReader::is_allowed_in_unquoted_string(c) && c != '.')
        })
    }

    /// Drops the walker with a warning when the schema says this position is
    /// not compound-shaped.
    fn check_compound<'s>(
        &self,
        res: &mut ParserResult<NbtPath>,
        reader: &StringReader,
        walker: Option<SchemaWalker<'s>>,
        what: &str,
    ) -> Option<SchemaWalker<'s>> {
        match walker {
            Some(w) if !w.node().is_compound() => {
                res.errors.push(ParseError::warning(
                    Span::at(reader.cursor),
                    format!("{what} are only used for compound tags"),
                ));
                None
            }
            other => other,
        }
    }

    fn check_indexable<'s>(
        &self,
        res: &mut ParserResult<NbtPath>,
        reader: &StringReader,
        walker: Option<SchemaWalker<'s>>,
    ) -> Option<SchemaWalker<'s>> {
        match walker {
            Some(w) if !w.node().is_indexable() => {
                res.errors.push(ParseError::warning(
                    Span::at(reader.cursor),
                    "indexes are only used for lists and arrays tags",
                ));
                None
            }
            other => other,
        }
    }

    fn parse_key<'s>(
        &'s self,
        res: &mut ParserResult<NbtPath>,
        reader: &mut StringReader,
        ctx: &ParseContext,
        walker: Option<SchemaWalker<'s>>,
    ) {
        let start = reader.cursor;
        let key = if reader.peek() == Some('"') {
            match reader.read_quoted_string() {
                Ok(key) => key,
                Err(e) => {
                    res.errors.push(e);
                    return;
                }
            }
        } else {
            let mut key = String::new();
            while reader
                .peek()
                .is_some_and(|c| StringReader::is_allowed_in_unquoted_string(c) && c != '.')
            {
                if let Some(c) = reader.read() {
                    key.push(c);
                }
            }
            key
        };
        res.data.push(NbtPathToken::Key(key.clone()));

        let sub = walker.as_ref().and_then(|w| w.child(&key));
        if let Some(walker) = &walker {
            if sub.is_none() && !walker.accepts_additional_children() {
                res.errors.push(ParseError::warning(
                    Span::new(start, reader.cursor),
                    format!("unknown key '{key}'"),
                ));
            }
        }

        if reader.peek() == Some('.') {
            self.parse_sep(res, reader);
            self.parse_segment(
                res,
                reader,
                ctx,
                sub,
                &[SegmentKind::Key, SegmentKind::Index],
                false,
            );
        } else {
            self.parse_segment(
                res,
                reader,
                ctx,
                sub,
                &[SegmentKind::CompoundFilter, SegmentKind::Index],
                true,
            );
        }
    }

    fn parse_sep(&self, res: &mut ParserResult<NbtPath>, reader: &mut StringReader) {
        reader.skip();
        res.data.push(NbtPathToken::Sep);
    }

    fn parse_filter<'s>(
        &'s self,
        res: &mut ParserResult<NbtPath>,
        reader: &mut StringReader,
        ctx: &ParseContext,
        walker: Option<SchemaWalker<'s>>,
    ) {
        let compound = res.absorb(
            ctx.suite
                .nbt_compound()
                .parse_compound(reader, ctx, walker.as_ref()),
        );
        res.data.push(NbtPathToken::Filter(compound));
        if reader.peek() == Some('.') {
            self.parse_sep(res, reader);
            // A filter keeps the walker where it was: it narrows values, not
            // the addressed type.
            self.parse_segment(res, reader, ctx, walker, &[SegmentKind::Key], false);
        }
    }

    fn parse_index<'s>(
        &'s self,
        res: &mut ParserResult<NbtPath>,
        reader: &mut StringReader,
        ctx: &ParseContext,
        walker: Option<SchemaWalker<'s>>,
    ) {
        // '[' was peeked by the dispatcher.
        reader.skip();
        res.data.push(NbtPathToken::IndexBegin);
        reader.skip_whitespace();

        // The item walker is resolved at most once so a missing-item warning
        // cannot repeat between the filter and the key continuation.
        let mut item: Option<Option<SchemaWalker<'s>>> = None;
        match reader.peek() {
            Some('{') => {
                let sub = Self::item_of(res, reader.cursor, walker.as_ref());
                item = Some(sub);
                let compound = res.absorb(
                    ctx.suite
                        .nbt_compound()
                        .parse_compound(reader, ctx, sub.as_ref()),
                );
                res.data.push(NbtPathToken::Filter(compound));
            }
            Some(c) if StringReader::is_allowed_in_number(c) => {
                let n = res.absorb(
                    IntegerParser::new(Some(i64::from(i32::MIN)), Some(i64::from(i32::MAX)))
                        .parse(reader, ctx),
                );
                res.data
                    .push(NbtPathToken::Index(i32::try_from(n).unwrap_or_default()));
            }
            _ => {}
        }

        reader.skip_whitespace();
        if let Err(e) = reader.expect(']') {
            res.errors.push(e);
            return;
        }
        reader.skip();
        res.data.push(NbtPathToken::IndexEnd);

        if reader.peek() == Some('.') {
            let sub = match item {
                Some(sub) => sub,
                None => Self::item_of(res, reader.cursor, walker.as_ref()),
            };
            self.parse_sep(res, reader);
            self.parse_segment(res, reader, ctx, sub, &[SegmentKind::Key], false);
        }
    }

    /// The item type addressed by an index, warning when the schema has no
    /// item here.
    fn item_of<'s>(
        res: &mut ParserResult<NbtPath>,
        cursor: usize,
        walker: Option<&SchemaWalker<'s>>,
    ) -> Option<SchemaWalker<'s>> {
        let item = walker.and_then(|w| w.item());
        if item.is_none() && walker.is_some() {
            res.errors.push(ParseError::warning(
                Span::at(cursor),
                "the current tag doesn't have extra items",
            ));
        }
        item
    }
}

impl ArgumentParser for NbtPathParser {
    fn name(&self) -> &'static str {
        "nbt_path"
    }

    fn parse_arg(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<ArgValue> {
        self.parse(reader, ctx).map(ArgValue::NbtPath)
    }

    fn examples(&self) -> &'static [&'static str] {
        &["foo", "foo.bar", "foo[0]", "[0]", "{foo: bar}"]
    }
}
