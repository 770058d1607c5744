//! Data model for parse products and externally supplied records.
//!
//! Everything here is either produced by a parse (completions, cache deltas,
//! identities, NBT paths) or handed in read-only by the orchestrator
//! (registries, block definitions, NBT schemas, configuration).

mod block;
mod cache;
mod completion;
mod config;
mod identity;
mod nbt;
mod nbt_path;
mod registry;
mod schema;

pub use block::Block;
pub use cache::{CacheCategory, CacheUnit, CrossRefCache};
pub use completion::{CompletionItem, CompletionKind};
pub use config::{Config, LintConfig, StrictCheck};
pub use identity::Identity;
pub use nbt::{NbtCompound, NbtValue};
pub use nbt_path::{NbtPath, NbtPathToken};
pub use registry::{BlockDefinition, BlockDefinitions, Registries, Registry, RegistryEntry};
pub use schema::{NbtSchema, NbtSchemaNode, NbtTypedNode};

// Diagnostics live in `base` (the reader raises them); re-exported here so
// parse products are importable from one place.
pub use crate::base::{ParseError, Severity};
