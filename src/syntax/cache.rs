//! Cross-reference cache: category → identity → definition/reference spans.
//!
//! The cache is owned by the orchestrator. Parsers produce small deltas that
//! are merged in with [`CrossRefCache::combine`]; nothing is ever removed or
//! overwritten by the core.

use std::fmt;
use std::str::FromStr;

use crate::base::{FxIndexMap, Span};

/// The closed set of cross-referenced buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheCategory {
    Advancements,
    Bossbars,
    /// Names declared with `#define entity`.
    Entities,
    Functions,
    LootTables,
    Objectives,
    Predicates,
    Recipes,
    /// Names declared with `#define storage`.
    Storages,
    /// Scoreboard tags declared with `#define tag`.
    Tags,
    TagsBlocks,
    TagsEntityTypes,
    TagsFluids,
    TagsFunctions,
    TagsItems,
}

impl CacheCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Advancements => "advancements",
            Self::Bossbars => "bossbars",
            Self::Entities => "entities",
            Self::Functions => "functions",
            Self::LootTables => "lootTables",
            Self::Objectives => "objectives",
            Self::Predicates => "predicates",
            Self::Recipes => "recipes",
            Self::Storages => "storages",
            Self::Tags => "tags",
            Self::TagsBlocks => "tags/blocks",
            Self::TagsEntityTypes => "tags/entityTypes",
            Self::TagsFluids => "tags/fluids",
            Self::TagsFunctions => "tags/functions",
            Self::TagsItems => "tags/items",
        }
    }
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "advancements" => Self::Advancements,
            "bossbars" => Self::Bossbars,
            "entities" => Self::Entities,
            "functions" => Self::Functions,
            "lootTables" => Self::LootTables,
            "objectives" => Self::Objectives,
            "predicates" => Self::Predicates,
            "recipes" => Self::Recipes,
            "storages" => Self::Storages,
            "tags" => Self::Tags,
            "tags/blocks" => Self::TagsBlocks,
            "tags/entityTypes" => Self::TagsEntityTypes,
            "tags/fluids" => Self::TagsFluids,
            "tags/functions" => Self::TagsFunctions,
            "tags/items" => Self::TagsItems,
            _ => return Err(()),
        })
    }
}

/// Definition and reference locations of one identity.
///
/// A single parse of one occurrence contributes at most one span to exactly
/// one of the two lists, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheUnit {
    pub def: Vec<Span>,
    pub refs: Vec<Span>,
}

impl CacheUnit {
    pub fn is_empty(&self) -> bool {
        self.def.is_empty() && self.refs.is_empty()
    }
}

/// Category → identity string → [`CacheUnit`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossRefCache {
    categories: FxIndexMap<CacheCategory, FxIndexMap<String, CacheUnit>>,
}

impl CrossRefCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(|c| c.is_empty())
    }

    pub fn category(&self, category: CacheCategory) -> Option<&FxIndexMap<String, CacheUnit>> {
        self.categories.get(&category)
    }

    /// The identity keys of a category, empty when the category is absent.
    pub fn keys(&self, category: CacheCategory) -> impl Iterator<Item = &str> {
        self.category(category)
            .into_iter()
            .flat_map(|units| units.keys().map(String::as_str))
    }

    pub fn contains(&self, category: CacheCategory, id: &str) -> bool {
        self.category(category).is_some_and(|c| c.contains_key(id))
    }

    pub fn unit(&self, category: CacheCategory, id: &str) -> Option<&CacheUnit> {
        self.category(category)?.get(id)
    }

    fn unit_mut(&mut self, category: CacheCategory, id: &str) -> &mut CacheUnit {
        self.categories
            .entry(category)
            .or_default()
            .entry(id.to_string())
            .or_default()
    }

    /// Record a reference occurrence of `id`.
    pub fn add_ref(&mut self, category: CacheCategory, id: &str, range: Span) {
        self.unit_mut(category, id).refs.push(range);
    }

    /// Record a definition occurrence of `id`.
    pub fn add_def(&mut self, category: CacheCategory, id: &str, range: Span) {
        self.unit_mut(category, id).def.push(range);
    }

    /// Append `other` into `self`. Ranges are concatenated in encounter
    /// order; nothing is overwritten.
    pub fn combine(&mut self, other: CrossRefCache) {
        for (category, units) in other.categories {
            for (id, unit) in units {
                let target = self.categories.entry(category).or_default().entry(id).or_default();
                target.def.extend(unit.def);
                target.refs.extend(unit.refs);
            }
        }
    }
}
