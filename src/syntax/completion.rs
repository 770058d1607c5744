//! Completion candidates produced mid-parse.

use smol_str::SmolStr;

/// Kind of completion candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    /// A namespace prefix (`minecraft`, `#minecraft`).
    Namespace,
    /// An intermediate path segment with children below it.
    Folder,
    /// A leaf entry (registry id, cache unit, state key).
    Field,
    /// An allowed value for a key.
    Value,
    Keyword,
}

impl CompletionKind {
    /// LSP `CompletionItemKind` number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Namespace => 9, // Module
            CompletionKind::Folder => 19,   // Folder
            CompletionKind::Field => 5,     // Field
            CompletionKind::Value => 12,    // Value
            CompletionKind::Keyword => 14,  // Keyword
        }
    }

    /// Characters that accept a candidate of this kind when typed.
    pub fn commit_characters(&self) -> &'static [char] {
        match self {
            CompletionKind::Namespace => &[':'],
            CompletionKind::Folder => &['/'],
            CompletionKind::Field => &[' '],
            CompletionKind::Value | CompletionKind::Keyword => &[],
        }
    }
}

/// A completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: SmolStr,
    /// The kind of completion, when known.
    pub kind: Option<CompletionKind>,
    /// Characters that, if typed next, accept the candidate.
    pub commit: &'static [char],
}

impl CompletionItem {
    /// A bare candidate with no kind tag.
    pub fn new(label: impl Into<SmolStr>) -> Self {
        Self {
            label: label.into(),
            kind: None,
            commit: &[],
        }
    }

    /// A candidate tagged with a kind and its commit characters.
    pub fn of_kind(label: impl Into<SmolStr>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind: Some(kind),
            commit: kind.commit_characters(),
        }
    }
}
