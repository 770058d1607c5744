use crate::base::ParseError;
use crate::syntax::{CompletionItem, CrossRefCache};

/// The product of a single parse: a value of type `T` together with every
/// side channel the parse filled in along the way.
///
/// Diagnostics never abort a parse by themselves. A parser records what went
/// wrong, marks the error fatal or tolerable, and keeps the best value it
/// could build. Callers decide whether to keep going based on
/// [`is_fatal`](Self::is_fatal).
#[derive(Debug, Clone, Default)]
pub struct ParserResult<T> {
    pub data: T,
    pub errors: Vec<ParseError>,
    pub completions: Vec<CompletionItem>,
    pub cache: CrossRefCache,
}

impl<T> ParserResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
            completions: Vec::new(),
            cache: CrossRefCache::default(),
        }
    }

    /// True if any recorded error is not tolerable.
    pub fn is_fatal(&self) -> bool {
        self.errors.iter().any(|e| !e.tolerable)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_completions(&self) -> bool {
        !self.completions.is_empty()
    }

    /// Merges the side channels of `other` into `self` and returns the inner
    /// value. This is how nested parses hand their findings upward.
    pub fn absorb<U>(&mut self, other: ParserResult<U>) -> U {
        self.errors.extend(other.errors);
        self.completions.extend(other.completions);
        self.cache.combine(other.cache);
        other.data
    }

    /// Replaces the value while keeping every side channel.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParserResult<U> {
        ParserResult {
            data: f(self.data),
            errors: self.errors,
            completions: self.completions,
            cache: self.cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Span;
    use crate::syntax::CacheCategory;

    #[test]
    fn absorb_merges_all_channels() {
        let mut outer = ParserResult::new(0u32);
        let mut inner = ParserResult::new("seven");
        inner
            .errors
            .push(ParseError::tolerable(Span::new(0, 5), "bad token"));
        inner.completions.push(CompletionItem::new("seven"));
        inner
            .cache
            .add_ref(CacheCategory::Functions, "a:b", Span::new(0, 5));

        let word = outer.absorb(inner);
        assert_eq!(word, "seven");
        assert_eq!(outer.errors.len(), 1);
        assert_eq!(outer.completions.len(), 1);
        assert!(outer.cache.contains(CacheCategory::Functions, "a:b"));
    }

    #[test]
    fn fatality_reflects_tolerability() {
        let mut res = ParserResult::new(());
        assert!(!res.is_fatal());
        res.errors
            .push(ParseError::tolerable(Span::new(0, 1), "soft"));
        assert!(!res.is_fatal());
        res.errors.push(ParseError::fatal(Span::new(0, 1), "hard"));
        assert!(res.is_fatal());
    }
}
