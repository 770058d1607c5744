use std::sync::Arc;

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::StringReader;
use crate::syntax::{BlockDefinitions, CacheCategory, NbtSchema, Registries};

use super::argument::{ArgValue, ArgumentParser, ParseContext};
use super::block::BlockParser;
use super::definition::{DefinitionIdParser, DefinitionKind};
use super::identity::{IdentityParser, IdentityTarget};
use super::literal::LiteralParser;
use super::nbt_path::{NbtCategory, NbtPathParser};
use super::nbt_tag::NbtTagParser;
use super::number::IntegerParser;
use super::result::ParserResult;
use super::string::{StrKind, StrParser};

/// A defect in the grammar itself, raised while building a parser.
///
/// Distinct from [`ParseError`](crate::base::ParseError): these never come
/// out of parsing a line, only out of wiring a tree to data that cannot
/// support it.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("unknown registry '{0}'")]
    UnknownRegistry(String),
    #[error("no tag category corresponds to '{0}'")]
    NoTagCategory(String),
}

/// Shared factory for argument parsers.
///
/// Owns the externally supplied data sets (registries, block definitions,
/// NBT schemas) and hands out parsers wired to them. Construction is the
/// point where grammar defects surface, so factories that depend on the data
/// return `Result`.
#[derive(Debug, Clone)]
pub struct ParserSuite {
    registries: Arc<Registries>,
    block_definitions: Arc<BlockDefinitions>,
    nbt_schema: Arc<NbtSchema>,
}

impl ParserSuite {
    pub fn new(
        registries: Arc<Registries>,
        block_definitions: Arc<BlockDefinitions>,
        nbt_schema: Arc<NbtSchema>,
    ) -> Self {
        Self {
            registries,
            block_definitions,
            nbt_schema,
        }
    }

    pub fn registries(&self) -> &Arc<Registries> {
        &self.registries
    }

    pub fn block_definitions(&self) -> &Arc<BlockDefinitions> {
        &self.block_definitions
    }

    pub fn nbt_schema(&self) -> &Arc<NbtSchema> {
        &self.nbt_schema
    }

    pub fn literal<I, S>(&self, candidates: I) -> LiteralParser
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        LiteralParser::new(candidates)
    }

    pub fn word_string(&self) -> StrParser {
        StrParser::new(StrKind::Word)
    }

    pub fn greedy_string(&self) -> StrParser {
        StrParser::new(StrKind::Greedy)
    }

    pub fn integer(&self, min: Option<i64>, max: Option<i64>) -> IntegerParser {
        IntegerParser::new(min, max)
    }

    pub fn identity(
        &self,
        target: IdentityTarget,
        allow_tag: bool,
        require_namespace: bool,
    ) -> Result<IdentityParser, GrammarError> {
        IdentityParser::new(
            target,
            Arc::clone(&self.registries),
            allow_tag,
            require_namespace,
        )
    }

    pub fn nbt_compound(&self) -> NbtTagParser {
        NbtTagParser::new()
    }

    pub fn nbt_path(&self, category: NbtCategory, anchor: Option<&str>) -> NbtPathParser {
        NbtPathParser::new(category, anchor, Arc::clone(&self.nbt_schema))
    }

    pub fn block(&self, allow_tag: bool) -> Result<BlockParser, GrammarError> {
        let id = self.identity(
            IdentityTarget::Registry(SmolStr::new_static("minecraft:block")),
            allow_tag,
            false,
        )?;
        Ok(BlockParser::new(id, Arc::clone(&self.block_definitions)))
    }

    pub fn definition_id(&self, kind: Option<DefinitionKind>) -> DefinitionIdParser {
        DefinitionIdParser::new(kind)
    }

    pub fn cache_identity(
        &self,
        category: CacheCategory,
        allow_tag: bool,
    ) -> Result<IdentityParser, GrammarError> {
        self.identity(IdentityTarget::Cache(category), allow_tag, false)
    }
}

/// A concrete parser behind a tree node, dispatched without boxing.
#[derive(Debug, Clone)]
pub enum AnyParser {
    Literal(LiteralParser),
    Str(StrParser),
    Integer(IntegerParser),
    Identity(IdentityParser),
    NbtTag(NbtTagParser),
    NbtPath(NbtPathParser),
    Block(BlockParser),
    DefinitionId(DefinitionIdParser),
}

impl ArgumentParser for AnyParser {
    fn name(&self) -> &'static str {
        match self {
            AnyParser::Literal(p) => p.name(),
            AnyParser::Str(p) => p.name(),
            AnyParser::Integer(p) => p.name(),
            AnyParser::Identity(p) => p.name(),
            AnyParser::NbtTag(p) => p.name(),
            AnyParser::NbtPath(p) => p.name(),
            AnyParser::Block(p) => p.name(),
            AnyParser::DefinitionId(p) => p.name(),
        }
    }

    fn parse_arg(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<ArgValue> {
        match self {
            AnyParser::Literal(p) => p.parse_arg(reader, ctx),
            AnyParser::Str(p) => p.parse_arg(reader, ctx),
            AnyParser::Integer(p) => p.parse_arg(reader, ctx),
            AnyParser::Identity(p) => p.parse_arg(reader, ctx),
            AnyParser::NbtTag(p) => p.parse_arg(reader, ctx),
            AnyParser::NbtPath(p) => p.parse_arg(reader, ctx),
            AnyParser::Block(p) => p.parse_arg(reader, ctx),
            AnyParser::DefinitionId(p) => p.parse_arg(reader, ctx),
        }
    }

    fn examples(&self) -> &'static [&'static str] {
        match self {
            AnyParser::Literal(p) => p.examples(),
            AnyParser::Str(p) => p.examples(),
            AnyParser::Integer(p) => p.examples(),
            AnyParser::Identity(p) => p.examples(),
            AnyParser::NbtTag(p) => p.examples(),
            AnyParser::NbtPath(p) => p.examples(),
            AnyParser::Block(p) => p.examples(),
            AnyParser::DefinitionId(p) => p.examples(),
        }
    }
}

macro_rules! into_any {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(impl From<$ty> for AnyParser {
            fn from(p: $ty) -> Self {
                AnyParser::$variant(p)
            }
        })+
    };
}

into_any! {
    Literal(LiteralParser),
    Str(StrParser),
    Integer(IntegerParser),
    Identity(IdentityParser),
    NbtTag(NbtTagParser),
    NbtPath(NbtPathParser),
    Block(BlockParser),
    DefinitionId(DefinitionIdParser),
}
