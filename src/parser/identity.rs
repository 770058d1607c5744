use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{FxIndexSet, ParseError, Span, StringReader};
use crate::syntax::{CacheCategory, CompletionItem, CompletionKind, Identity, Registries};

use super::argument::{ArgValue, ArgumentParser, ParseContext};
use super::result::ParserResult;
use super::suite::GrammarError;

/// Where an identity's candidates come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityTarget {
    /// A vanilla registry, e.g. `minecraft:block`.
    Registry(SmolStr),
    /// A cross-reference cache category, e.g. declared functions.
    Cache(CacheCategory),
}

impl IdentityTarget {
    fn describe(&self) -> String {
        match self {
            IdentityTarget::Registry(name) => name.to_string(),
            IdentityTarget::Cache(category) => category.to_string(),
        }
    }
}

/// Parses a namespaced identity and resolves it against a registry or cache
/// category, offering segment-wise completions at the caret.
#[derive(Debug, Clone)]
pub struct IdentityParser {
    target: IdentityTarget,
    registries: Arc<Registries>,
    allow_tag: bool,
    require_namespace: bool,
}

impl IdentityParser {
    /// Fails when the registry is unknown or, with `allow_tag`, when the
    /// target has no tag category. Both are grammar defects, not line
    /// diagnostics.
    pub fn new(
        target: IdentityTarget,
        registries: Arc<Registries>,
        allow_tag: bool,
        require_namespace: bool,
    ) -> Result<Self, GrammarError> {
        if let IdentityTarget::Registry(name) = &target {
            if registries.get(name).is_none() {
                return Err(GrammarError::UnknownRegistry(name.to_string()));
            }
        }
        if allow_tag {
            // Surface a missing tag mapping now rather than mid-parse.
            Self::tag_category_for(&target)?;
        }
        Ok(Self {
            target,
            registries,
            allow_tag,
            require_namespace,
        })
    }

    /// The cache category holding tags for a target, when one exists.
    fn tag_category_for(target: &IdentityTarget) -> Result<CacheCategory, GrammarError> {
        match target {
            IdentityTarget::Registry(name) => match name.as_str() {
                "minecraft:block" => Ok(CacheCategory::TagsBlocks),
                "minecraft:entity_type" => Ok(CacheCategory::TagsEntityTypes),
                "minecraft:fluid" => Ok(CacheCategory::TagsFluids),
                "minecraft:item" => Ok(CacheCategory::TagsItems),
                other => Err(GrammarError::NoTagCategory(other.to_string())),
            },
            IdentityTarget::Cache(CacheCategory::Functions) => Ok(CacheCategory::TagsFunctions),
            IdentityTarget::Cache(other) => Err(GrammarError::NoTagCategory(other.to_string())),
        }
    }

    pub fn parse(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<Identity> {
        let mut res = ParserResult::new(Identity::default());
        let start = reader.cursor;

        let tag_candidates: Vec<&str> = match Self::tag_category_for(&self.target) {
            Ok(category) => ctx.cache.keys(category).collect(),
            Err(_) => Vec::new(),
        };
        let regular_candidates: Vec<&str> = match &self.target {
            IdentityTarget::Cache(category) => ctx.cache.keys(*category).collect(),
            IdentityTarget::Registry(name) => self
                .registries
                .get(name)
                .map(|r| r.entries.keys().map(String::as_str).collect())
                .unwrap_or_default(),
        };

        // Candidate segments surface in three buckets, rendered in the order
        // they were discovered: namespaces, then folders, then files.
        let mut namespaces: FxIndexSet<SmolStr> = FxIndexSet::default();
        let mut folders: FxIndexSet<SmolStr> = FxIndexSet::default();
        let mut files: FxIndexSet<SmolStr> = FxIndexSet::default();

        if ctx.is_cursor_at(start) {
            if self.allow_tag {
                for candidate in &tag_candidates {
                    Self::seed_head_segments(
                        candidate,
                        true,
                        self.require_namespace,
                        &mut namespaces,
                        &mut folders,
                        &mut files,
                    );
                }
            }
            for candidate in &regular_candidates {
                Self::seed_head_segments(
                    candidate,
                    false,
                    self.require_namespace,
                    &mut namespaces,
                    &mut folders,
                    &mut files,
                );
            }
        }

        let mut is_tag = false;
        if reader.peek() == Some(Identity::TAG_SYMBOL) {
            reader.skip();
            is_tag = true;
            if !self.allow_tag {
                res.errors.push(ParseError::tolerable(
                    Span::new(start, reader.cursor),
                    "tags are not allowed here",
                ));
            }
        }
        let mut candidates = if is_tag {
            tag_candidates
        } else {
            regular_candidates
        };

        if !reader.can_read() {
            res.errors.push(ParseError::fatal(
                Span::at(start),
                "expected a namespaced ID but got nothing",
            ));
        } else {
            let mut namespace: Option<&str> = None;
            let mut paths: Vec<&str> = Vec::new();

            let mut head = reader.read_unquoted_string();
            if reader.peek() == Some(Identity::NAMESPACE_SEP) {
                reader.skip();
                let prefix = format!("{head}{}", Identity::NAMESPACE_SEP);
                candidates = candidates
                    .iter()
                    .filter_map(|c| c.strip_prefix(prefix.as_str()))
                    .collect();
                if ctx.is_cursor_at(reader.cursor) {
                    Self::seed_path_segments(&candidates, 0, &mut folders, &mut files);
                }
                namespace = Some(head);
                head = reader.read_unquoted_string();
            } else {
                let prefix = format!(
                    "{}{}",
                    Identity::DEFAULT_NAMESPACE,
                    Identity::NAMESPACE_SEP
                );
                candidates = candidates
                    .iter()
                    .filter_map(|c| c.strip_prefix(prefix.as_str()))
                    .collect();
                if self.require_namespace {
                    res.errors.push(ParseError::tolerable(
                        Span::new(start, reader.cursor),
                        "default namespace cannot be omitted here",
                    ));
                }
            }
            paths.push(head);

            while reader.peek() == Some(Identity::PATH_SEP) {
                reader.skip();
                let prefix = format!("{}{}", paths.join("/"), Identity::PATH_SEP);
                candidates.retain(|c| c.starts_with(&prefix));
                if ctx.is_cursor_at(reader.cursor) {
                    Self::seed_path_segments(&candidates, paths.len(), &mut folders, &mut files);
                }
                paths.push(reader.read_unquoted_string());
            }

            res.data = Identity::new(namespace, paths, is_tag);

            if reader.cursor > start {
                let range = Span::new(start, reader.cursor);
                let key = res.data.lookup_key();
                if is_tag {
                    if let Ok(category) = Self::tag_category_for(&self.target) {
                        self.resolve_in_cache(&mut res, category, &key, range, ctx);
                    }
                } else {
                    match &self.target {
                        IdentityTarget::Cache(category) => {
                            self.resolve_in_cache(&mut res, *category, &key, range, ctx);
                        }
                        IdentityTarget::Registry(name) => {
                            let known = self
                                .registries
                                .get(name)
                                .is_some_and(|r| r.contains(&key));
                            if !known {
                                res.errors.push(ParseError::warning(
                                    range,
                                    format!(
                                        "failed to resolve namespaced ID '{key}' in registry '{name}'"
                                    ),
                                ));
                            }
                        }
                    }
                }
            }
        }

        for label in namespaces {
            res.completions
                .push(CompletionItem::of_kind(label, CompletionKind::Namespace));
        }
        for label in folders {
            res.completions
                .push(CompletionItem::of_kind(label, CompletionKind::Folder));
        }
        for label in files {
            res.completions
                .push(CompletionItem::of_kind(label, CompletionKind::Field));
        }
        res
    }

    fn resolve_in_cache(
        &self,
        res: &mut ParserResult<Identity>,
        category: CacheCategory,
        key: &str,
        range: Span,
        ctx: &ParseContext,
    ) {
        if ctx.cache.contains(category, key) {
            res.cache.add_ref(category, key, range);
        } else if ctx.config.is_strict(category) {
            res.errors.push(ParseError::warning(
                range,
                format!(
                    "failed to resolve namespaced ID '{key}' in cache category '{category}'"
                ),
            ));
        }
    }

    /// Seeds completions offered before anything is typed: every namespace,
    /// plus head path segments of the default namespace when it may be
    /// omitted.
    fn seed_head_segments(
        candidate: &str,
        tag: bool,
        require_namespace: bool,
        namespaces: &mut FxIndexSet<SmolStr>,
        folders: &mut FxIndexSet<SmolStr>,
        files: &mut FxIndexSet<SmolStr>,
    ) {
        let Some((ns, rest)) = candidate.split_once(Identity::NAMESPACE_SEP) else {
            return;
        };
        namespaces.insert(if tag {
            SmolStr::new(format!("{}{ns}", Identity::TAG_SYMBOL))
        } else {
            SmolStr::new(ns)
        });
        if ns == Identity::DEFAULT_NAMESPACE && !require_namespace {
            match rest.split_once(Identity::PATH_SEP) {
                Some((folder, _)) => {
                    folders.insert(SmolStr::new(folder));
                }
                None => {
                    files.insert(SmolStr::new(rest));
                }
            }
        }
    }

    /// Seeds the segment at `depth` of every surviving candidate, split into
    /// folders (more segments follow) and files (leaf).
    fn seed_path_segments(
        candidates: &[&str],
        depth: usize,
        folders: &mut FxIndexSet<SmolStr>,
        files: &mut FxIndexSet<SmolStr>,
    ) {
        for candidate in candidates {
            let segments: Vec<&str> = candidate.split(Identity::PATH_SEP).collect();
            if segments.len() > depth + 1 {
                folders.insert(SmolStr::new(segments[depth]));
            } else if segments.len() == depth + 1 {
                files.insert(SmolStr::new(segments[depth]));
            }
        }
    }
}

impl ArgumentParser for IdentityParser {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn parse_arg(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<ArgValue> {
        self.parse(reader, ctx).map(ArgValue::Identity)
    }

    fn examples(&self) -> &'static [&'static str] {
        &["example:foo/bar", "stone", "#minecraft:fluid_tag"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_registry_is_a_grammar_error() {
        let err = IdentityParser::new(
            IdentityTarget::Registry(SmolStr::new_static("minecraft:nonexistent")),
            Arc::new(Registries::default()),
            false,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, GrammarError::UnknownRegistry(_)));
    }

    #[test]
    fn tagless_cache_category_rejects_allow_tag() {
        let err = IdentityParser::new(
            IdentityTarget::Cache(CacheCategory::Bossbars),
            Arc::new(Registries::default()),
            true,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, GrammarError::NoTagCategory(_)));
    }
}
