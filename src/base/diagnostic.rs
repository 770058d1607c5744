//! The per-parse diagnostic primitive.
//!
//! Diagnostics never abort a parse by themselves: tolerable ones mean the
//! produced value is still usable, non-tolerable ones mean the surrounding
//! parser must not trust the value for lookups or cache contributions.
//! Static-configuration defects (bad grammar wiring) are NOT diagnostics;
//! they use `parser::GrammarError` at construction time instead.

use super::Span;

/// Severity level for diagnostics, mirroring the LSP scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// A problem in the user's input.
    #[default]
    Error,
    /// A semantic lookup failure or policy violation; the value still parsed.
    Warning,
    /// Informational note.
    Information,
    /// An editor hint.
    Hint,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// LSP `DiagnosticSeverity` number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Self::Error => 1,
            Self::Warning => 2,
            Self::Information => 3,
            Self::Hint => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Information => "information",
            Self::Hint => "hint",
        }
    }
}

/// A reported problem anchored at an exact range of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Source location.
    pub range: Span,
    /// Human-readable message.
    pub message: String,
    /// Whether the surrounding parse may keep using the produced value.
    pub tolerable: bool,
    /// Severity level.
    pub severity: Severity,
}

impl ParseError {
    /// A tolerable error: parsing continued and the value is usable.
    pub fn tolerable(range: Span, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
            tolerable: true,
            severity: Severity::Error,
        }
    }

    /// A fatal error: the produced value is unreliable past this point.
    pub fn fatal(range: Span, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
            tolerable: false,
            severity: Severity::Error,
        }
    }

    /// A tolerable warning, used for semantic lookup failures.
    pub fn warning(range: Span, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
            tolerable: true,
            severity: Severity::Warning,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}
