use smol_str::SmolStr;

use crate::base::{to_message, ParseError, Span, StringReader};

use super::argument::{ArgValue, ArgumentParser, ParseContext};
use super::result::ParserResult;

/// Matches one of a fixed set of keywords.
///
/// Candidates are matched against the upcoming text directly, so keywords
/// may contain characters an unquoted string cannot (`#define`). A match
/// only counts when the following character could not extend it, which keeps
/// `grant` from matching inside `granted`.
#[derive(Debug, Clone)]
pub struct LiteralParser {
    candidates: Vec<SmolStr>,
}

impl LiteralParser {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn candidates(&self) -> &[SmolStr] {
        &self.candidates
    }

    /// How this literal reads in a hint: `grant`, `(grant|revoke)`, or the
    /// bracketed forms when the argument is optional.
    pub fn hint(&self, optional: bool) -> String {
        let inner = if self.candidates.len() == 1 {
            self.candidates[0].to_string()
        } else {
            self.candidates.join("|")
        };
        match (optional, self.candidates.len()) {
            (true, _) => format!("[{inner}]"),
            (false, 1) => inner,
            (false, _) => format!("({inner})"),
        }
    }

    pub fn parse(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<String> {
        let start = reader.cursor;
        let remaining = reader.remaining();

        let matched = self
            .candidates
            .iter()
            .filter(|c| {
                remaining.starts_with(c.as_str())
                    && !remaining[c.len()..]
                        .chars()
                        .next()
                        .is_some_and(StringReader::is_allowed_in_unquoted_string)
            })
            .max_by_key(|c| c.len());

        let value = match matched {
            Some(c) => {
                let value = c.to_string();
                reader.cursor += c.len();
                value
            }
            None => reader.read_unquoted_string().to_string(),
        };

        let mut res = ParserResult::new(value);
        if let Some(cursor) = ctx.cursor {
            if cursor >= start
                && cursor <= reader.cursor
                && res.data.is_char_boundary(cursor - start)
            {
                let prefix = &res.data[..cursor - start];
                for candidate in &self.candidates {
                    if candidate.starts_with(prefix) {
                        res.completions.push(crate::syntax::CompletionItem::new(
                            candidate.clone(),
                        ));
                    }
                }
            }
        }

        if res.data.is_empty() {
            res.errors.push(ParseError::fatal(
                Span::at(start),
                format!(
                    "expected {} but got nothing",
                    to_message(&self.candidates, true, "or")
                ),
            ));
        } else if !self.candidates.iter().any(|c| c == res.data.as_str()) {
            res.errors.push(ParseError::tolerable(
                Span::new(start, reader.cursor),
                format!(
                    "expected {} but got '{}'",
                    to_message(&self.candidates, true, "or"),
                    res.data
                ),
            ));
        }
        res
    }
}

impl ArgumentParser for LiteralParser {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn parse_arg(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<ArgValue> {
        self.parse(reader, ctx).map(ArgValue::String)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::suite::ParserSuite;
    use super::*;
    use crate::syntax::{BlockDefinitions, Config, CrossRefCache, NbtSchema, Registries};

    fn empty_suite() -> ParserSuite {
        ParserSuite::new(
            Arc::new(Registries::default()),
            Arc::new(BlockDefinitions::default()),
            Arc::new(NbtSchema::default()),
        )
    }

    #[test]
    fn caret_inside_a_multibyte_candidate_offers_nothing() {
        let suite = empty_suite();
        let config = Config::default();
        let cache = CrossRefCache::default();
        // Byte 3 sits inside the two-byte 'ï'.
        let ctx = ParseContext::new(&suite, &config, &cache).with_cursor(3);

        let parser = LiteralParser::new(["naïve"]);
        let res = parser.parse(&mut StringReader::new("naïve"), &ctx);
        assert_eq!(res.data, "naïve");
        assert!(res.errors.is_empty());
        assert!(res.completions.is_empty());
    }

    #[test]
    fn caret_at_a_char_boundary_still_filters() {
        let suite = empty_suite();
        let config = Config::default();
        let cache = CrossRefCache::default();
        let ctx = ParseContext::new(&suite, &config, &cache).with_cursor(2);

        let parser = LiteralParser::new(["naïve", "nag"]);
        let res = parser.parse(&mut StringReader::new("naïve"), &ctx);
        let labels: Vec<&str> = res.completions.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["naïve", "nag"]);
    }
}
