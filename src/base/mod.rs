//! Foundation types for the mcfunction toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Span`] - Byte-offset ranges into the source line
//! - [`StringReader`] - Forward-only cursor over an immutable line
//! - [`ParseError`], [`Severity`] - The per-parse diagnostic primitive
//! - [`to_message`] - Candidate-list rendering for diagnostics
//! - `FxIndexMap`/`FxIndexSet` - Order-preserving maps with a fast hasher
//!
//! This module has NO dependencies on other mcfunction modules.

mod diagnostic;
mod message;
mod reader;
mod span;

pub use diagnostic::{ParseError, Severity};
pub use message::to_message;
pub use reader::StringReader;
pub use span::Span;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

/// Insertion-ordered map with the rustc hasher. Used for every map whose
/// iteration order is observable in diagnostics or completions.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Insertion-ordered set with the rustc hasher.
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;
