//! # mcfunction-base
//!
//! Core library for mcfunction command parsing, semantic validation, and
//! completion. One pass over a single line produces the typed argument list,
//! diagnostics, completion candidates, a cross-reference cache delta, and a
//! "what comes next" hint.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! parser  → argument parsers, line parser, parser suite, schema walker
//! tree    → command tree nodes, redirect/template resolution
//! syntax  → diagnostics, completions, cache, identity, NBT, schema, config
//! base    → primitives (Span, StringReader, message formatting)
//! ```
//!
//! `syntax` and `base` are the foundation; `tree` and `parser` sit on top of
//! them and reference each other (tree nodes bind parser instances, the line
//! parser walks the tree).
//!
//! Registries, block definitions, NBT schemas, the lint configuration and the
//! cross-reference cache are supplied by the caller and treated as read-only
//! for the duration of a parse.

/// Foundation types: Span, StringReader, list-message formatting
pub mod base;

/// Syntax: diagnostics, completions, cache, identity, NBT values and paths,
/// registry/schema records, configuration
pub mod syntax;

/// Command tree: grammar nodes, redirect and template resolution
pub mod tree;

/// Parsers: the argument-parser contract, concrete parsers, the line parser
pub mod parser;

// Re-export foundation types
pub use base::{FxIndexMap, FxIndexSet, Span, StringReader};
pub use syntax::{
    CompletionItem, CompletionKind, Config, CrossRefCache, Identity, ParseError, Severity,
};
