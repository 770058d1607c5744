use crate::base::StringReader;
use crate::syntax::{Block, Config, CrossRefCache, Identity, NbtPath, NbtValue};

use super::result::ParserResult;
use super::suite::ParserSuite;

/// A parsed argument value, one variant per value-producing parser family.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Integer(i64),
    Identity(Identity),
    Block(Block),
    Nbt(NbtValue),
    NbtPath(NbtPath),
}

impl Default for ArgValue {
    fn default() -> Self {
        ArgValue::String(String::new())
    }
}

/// One argument of a parsed line: the value plus the name of the parser that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub data: ArgValue,
    pub parser: &'static str,
}

impl Arg {
    pub fn new(data: ArgValue, parser: &'static str) -> Self {
        Self { data, parser }
    }

    /// The literal or string content, for parsers that produce text.
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Read-only surroundings of a parse.
///
/// `cursor` is the editor caret, when one exists. Parsers that can offer
/// completions compare it against their reader position and stay silent when
/// it points elsewhere.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    pub cursor: Option<usize>,
    pub suite: &'a ParserSuite,
    pub config: &'a Config,
    pub cache: &'a CrossRefCache,
}

impl<'a> ParseContext<'a> {
    pub fn new(suite: &'a ParserSuite, config: &'a Config, cache: &'a CrossRefCache) -> Self {
        Self {
            cursor: None,
            suite,
            config,
            cache,
        }
    }

    pub fn with_cursor(mut self, cursor: usize) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn is_cursor_at(&self, pos: usize) -> bool {
        self.cursor == Some(pos)
    }
}

/// The contract every argument parser fulfills.
///
/// `parse_arg` must leave the reader exactly at the end of what it consumed,
/// record every problem as a diagnostic instead of returning early, and keep
/// the most useful value it could assemble.
pub trait ArgumentParser {
    /// Stable name used in hints, e.g. `<id: string>`.
    fn name(&self) -> &'static str;

    fn parse_arg(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<ArgValue>;

    /// Sample inputs, for documentation and error hints.
    fn examples(&self) -> &'static [&'static str] {
        &[]
    }
}
