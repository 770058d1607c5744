use crate::base::{ParseError, Span, StringReader};
use crate::syntax::CacheCategory;

use super::argument::{Arg, ArgValue, ArgumentParser, ParseContext};
use super::result::ParserResult;
use super::suite::{AnyParser, ParserSuite};

/// What a `#define` declaration introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Entity,
    Storage,
    Tag,
}

impl DefinitionKind {
    pub fn from_literal(literal: &str) -> Option<Self> {
        match literal {
            "entity" => Some(Self::Entity),
            "storage" => Some(Self::Storage),
            "tag" => Some(Self::Tag),
            _ => None,
        }
    }

    pub fn category(&self) -> CacheCategory {
        match self {
            Self::Entity => CacheCategory::Entities,
            Self::Storage => CacheCategory::Storages,
            Self::Tag => CacheCategory::Tags,
        }
    }
}

/// Parses the declared name of a `#define` line and records it as a cache
/// definition. With no kind the name still parses, it just defines nothing.
#[derive(Debug, Clone, Copy)]
pub struct DefinitionIdParser {
    kind: Option<DefinitionKind>,
}

impl DefinitionIdParser {
    pub fn new(kind: Option<DefinitionKind>) -> Self {
        Self { kind }
    }

    pub fn parse(&self, reader: &mut StringReader, _ctx: &ParseContext) -> ParserResult<String> {
        let start = reader.cursor;
        let mut res = ParserResult::new(reader.read_unquoted_string().to_string());
        if res.data.is_empty() {
            res.errors.push(ParseError::fatal(
                Span::at(start),
                "expected a string but got nothing",
            ));
        } else if let Some(kind) = self.kind {
            res.cache
                .add_def(kind.category(), &res.data, Span::new(start, reader.cursor));
        }
        res
    }
}

impl ArgumentParser for DefinitionIdParser {
    fn name(&self) -> &'static str {
        "string"
    }

    fn parse_arg(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<ArgValue> {
        self.parse(reader, ctx).map(ArgValue::String)
    }

    fn examples(&self) -> &'static [&'static str] {
        &["SPGoding", "en_us"]
    }
}

/// Tree binding for the `#define <kind> <name>` argument: the parser for the
/// name depends on the kind literal already consumed on the line.
pub fn bind_definition_id(args: &[Arg], _suite: &ParserSuite) -> AnyParser {
    let kind = args
        .last()
        .and_then(Arg::as_str)
        .and_then(DefinitionKind::from_literal);
    AnyParser::DefinitionId(DefinitionIdParser::new(kind))
}
