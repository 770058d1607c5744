//! The configuration surface consumed by the parsing core.
//!
//! Loading configuration files is the orchestrator's job; the core receives
//! a ready [`Config`] by reference for every parse.

use super::CacheCategory;

/// Decides whether an unresolved identity in a cache category is reported.
/// Plain registries are always checked regardless of this policy.
pub type StrictCheck = fn(CacheCategory) -> bool;

#[derive(Debug, Clone, Copy)]
pub struct LintConfig {
    /// Per-category strict-vs-lenient unknown-identifier checking.
    pub strict_check: StrictCheck,
    /// Whether omitting the default namespace is preferred. Carried for the
    /// orchestrator; the resolver deliberately does not warn on style here
    /// (only grammar positions that *require* a namespace produce an error).
    pub omit_default_namespace: Option<bool>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            strict_check: |_| false,
            omit_default_namespace: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub lint: LintConfig,
    /// Highest node permission level usable from function files.
    pub permission_level: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lint: LintConfig::default(),
            permission_level: 2,
        }
    }
}

impl Config {
    pub fn is_strict(&self, category: CacheCategory) -> bool {
        (self.lint.strict_check)(category)
    }
}
