//! Namespaced identities (`minecraft:stone`, `#spgoding:function/1`).

use std::fmt;

use smol_str::SmolStr;

/// A namespace-qualified, slash-segmented identifier, optionally marked as a
/// tag reference.
///
/// `namespace: None` means the namespace was omitted in the source; it is
/// distinct from an explicit `minecraft` for equality, but renders the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Identity {
    pub namespace: Option<SmolStr>,
    pub paths: Vec<SmolStr>,
    pub is_tag: bool,
}

impl Identity {
    /// The namespace assumed when none is written.
    pub const DEFAULT_NAMESPACE: &'static str = "minecraft";
    /// Separates path segments.
    pub const PATH_SEP: char = '/';
    /// Separates the namespace from the path.
    pub const NAMESPACE_SEP: char = ':';
    /// Marks a tag reference.
    pub const TAG_SYMBOL: char = '#';

    pub fn new<I, S>(namespace: Option<&str>, paths: I, is_tag: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            namespace: namespace.map(SmolStr::new),
            paths: paths.into_iter().map(Into::into).collect(),
            is_tag,
        }
    }

    /// The effective namespace, defaulted when omitted.
    pub fn namespace_or_default(&self) -> &str {
        self.namespace.as_deref().unwrap_or(Self::DEFAULT_NAMESPACE)
    }

    /// The canonical string used for registry and cache lookups. Never
    /// carries the tag symbol; cache categories already separate tags.
    pub fn lookup_key(&self) -> String {
        let mut ans = String::new();
        ans.push_str(self.namespace_or_default());
        ans.push(Self::NAMESPACE_SEP);
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                ans.push(Self::PATH_SEP);
            }
            ans.push_str(path);
        }
        ans
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_tag {
            write!(f, "{}", Self::TAG_SYMBOL)?;
        }
        f.write_str(&self.lookup_key())
    }
}
