//! Argument parsers and the line-level driver.
//!
//! Every parser consumes text through a [`StringReader`] and reports what it
//! found through a [`ParserResult`]: the parsed value plus any diagnostics,
//! completions, and cache contributions, all merged upward with
//! [`ParserResult::absorb`]. [`LineParser`] walks the command tree and runs
//! one argument parser per consumed token.
//!
//! [`StringReader`]: crate::base::StringReader

mod argument;
mod block;
mod definition;
mod identity;
mod line;
mod literal;
mod nbt_path;
mod nbt_tag;
mod number;
mod result;
mod schema_walker;
mod string;
mod suite;

pub use argument::{Arg, ArgValue, ArgumentParser, ParseContext};
pub use block::BlockParser;
pub use definition::{bind_definition_id, DefinitionIdParser, DefinitionKind};
pub use identity::{IdentityParser, IdentityTarget};
pub use line::{Hint, LineParser, ParsedLine};
pub use literal::LiteralParser;
pub use nbt_path::{NbtCategory, NbtPathParser};
pub use nbt_tag::NbtTagParser;
pub use number::IntegerParser;
pub use result::ParserResult;
pub use schema_walker::SchemaWalker;
pub use string::{StrKind, StrParser};
pub use suite::{AnyParser, GrammarError, ParserSuite};
