use smol_str::SmolStr;

use crate::base::{FxIndexMap, ParseError, Span, StringReader};
use crate::tree::{CommandTree, CommandTreeNode, ParserBinding};

use super::argument::{Arg, ArgValue, ArgumentParser, ParseContext};
use super::result::ParserResult;
use super::suite::AnyParser;

/// Backstop for grammars whose nodes accept without consuming.
const MAX_WALK_DEPTH: usize = 256;

/// The signature of the line as parsed so far.
///
/// `fix` holds one rendering per cleanly parsed argument. The first argument
/// that produced diagnostics or completions moves to `options` together with
/// the renderings of its continuations, and `fix` stops growing: everything
/// after that point is best-effort recovery, not signature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hint {
    pub fix: Vec<String>,
    pub options: Vec<(String, Vec<String>)>,
}

/// A fully walked line: one [`Arg`] per consumed token plus the signature
/// hint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLine {
    pub args: Vec<Arg>,
    pub hint: Hint,
}

/// Walks one line of a function file against the command tree, running each
/// node's argument parser on the token it claims.
#[derive(Debug, Clone, Copy)]
pub struct LineParser<'t> {
    tree: &'t CommandTree,
}

impl<'t> LineParser<'t> {
    pub fn new(tree: &'t CommandTree) -> Self {
        Self { tree }
    }

    pub fn parse(&self, reader: &mut StringReader, ctx: &ParseContext) -> ParserResult<ParsedLine> {
        let mut res = ParserResult::new(ParsedLine::default());

        // Ordinary comments swallow the line. `#define` lines look like
        // comments but walk the tree so declarations land in the cache.
        if reader.peek() == Some('#') && !reader.remaining().starts_with("#define") {
            let comment = reader.read_remaining().to_string();
            res.data
                .args
                .push(Arg::new(ArgValue::String(comment), "string"));
            return res;
        }

        let Some(root) = self.tree.resolve("commands") else {
            tracing::warn!("command tree has no 'commands' root");
            return res;
        };
        let Some(children) = self.tree.get_children(root) else {
            return res;
        };
        let mut frozen = false;
        self.parse_children(reader, ctx, &children, &mut res, &mut frozen, 0);
        res
    }

    /// Tries every child on a copy of the reader and commits the first one
    /// that parses without diagnostics, or failing that the one that
    /// consumed the most input (earliest on ties).
    #[allow(clippy::too_many_arguments)]
    fn parse_children(
        &self,
        reader: &mut StringReader,
        ctx: &ParseContext,
        children: &FxIndexMap<SmolStr, CommandTreeNode>,
        res: &mut ParserResult<ParsedLine>,
        frozen: &mut bool,
        depth: usize,
    ) {
        if depth > MAX_WALK_DEPTH {
            res.errors.push(ParseError::fatal(
                Span::at(reader.cursor),
                "command tree walk exceeded the depth bound",
            ));
            return;
        }

        let mut chosen: Option<(
            &SmolStr,
            &CommandTreeNode,
            StringReader,
            ParserResult<ArgValue>,
            &'static str,
        )> = None;
        for (key, node) in children {
            let mut probe = *reader;
            let (attempt, parser_name) =
                self.run_node_parser(&mut probe, ctx, key, node, &res.data.args);
            let clean = attempt.errors.is_empty();
            let better = match &chosen {
                None => true,
                Some((_, _, best, _, _)) => clean || probe.cursor > best.cursor,
            };
            if better {
                chosen = Some((key, node, probe, attempt, parser_name));
            }
            if clean {
                break;
            }
        }
        let Some((key, node, probe, attempt, parser_name)) = chosen else {
            return;
        };

        let start = reader.cursor;
        *reader = probe;
        let fatal = attempt.is_fatal();
        let has_issues = !attempt.errors.is_empty() || !attempt.completions.is_empty();
        let value = res.absorb(attempt);
        res.data.args.push(Arg::new(value, parser_name));

        if !*frozen {
            let rep = self.hint_of(key, node, false);
            if has_issues {
                res.data.hint.options.push((rep, self.child_hints(node)));
                *frozen = true;
            } else {
                res.data.hint.fix.push(rep);
            }
        }

        let required = node.permission.unwrap_or(0);
        if required > ctx.config.permission_level {
            res.errors.push(ParseError::tolerable(
                Span::new(start, reader.cursor),
                format!(
                    "permission level {required} is required, which is higher than {} defined in the config",
                    ctx.config.permission_level
                ),
            ));
        }
        if fatal {
            return;
        }

        let next = self.tree.get_children(node);
        if !reader.can_read() {
            self.require_executable(node, reader, res);
            return;
        }
        let Some(next) = next else {
            reader.skip_whitespace();
            if reader.can_read() {
                let rest_start = reader.cursor;
                let rest = reader.read_remaining();
                res.errors.push(ParseError::tolerable(
                    Span::new(rest_start, reader.cursor),
                    format!("expected nothing but got '{rest}'"),
                ));
            }
            return;
        };
        match reader.peek() {
            Some(' ') => reader.skip(),
            Some(c) => {
                res.errors.push(ParseError::fatal(
                    Span::at(reader.cursor),
                    format!("expected ' ' but got '{c}'"),
                ));
                return;
            }
            None => return,
        }
        if !reader.can_read() {
            // The line ends in a space: nothing to parse, but the caret may
            // sit here wanting to know what could come next.
            if ctx.is_cursor_at(reader.cursor) {
                for (child_key, child_node) in &next {
                    let mut probe = *reader;
                    let (attempt, _) =
                        self.run_node_parser(&mut probe, ctx, child_key, child_node, &res.data.args);
                    res.completions.extend(attempt.completions);
                }
            }
            self.require_executable(node, reader, res);
            return;
        }
        self.parse_children(reader, ctx, &next, res, frozen, depth + 1);
    }

    fn require_executable(
        &self,
        node: &CommandTreeNode,
        reader: &StringReader,
        res: &mut ParserResult<ParsedLine>,
    ) {
        if !node.executable {
            res.errors.push(ParseError::tolerable(
                Span::new(reader.cursor, reader.cursor + 2),
                "expected more arguments but got nothing",
            ));
        }
    }

    fn run_node_parser(
        &self,
        reader: &mut StringReader,
        ctx: &ParseContext,
        key: &SmolStr,
        node: &CommandTreeNode,
        args: &[Arg],
    ) -> (ParserResult<ArgValue>, &'static str) {
        match &node.parser {
            Some(ParserBinding::Static(parser)) => (parser.parse_arg(reader, ctx), parser.name()),
            Some(ParserBinding::Dynamic { name, bind }) => {
                (bind(args, ctx.suite).parse_arg(reader, ctx), *name)
            }
            None => {
                tracing::warn!(node = %key, "tree node has no parser bound");
                let mut ans = ParserResult::new(ArgValue::default());
                ans.errors.push(ParseError::fatal(
                    Span::at(reader.cursor),
                    format!("node '{key}' is not parsable"),
                ));
                (ans, "unknown")
            }
        }
    }

    /// `grant`, `(grant|revoke)`, `<id: string>`, bracketed when optional.
    fn hint_of(&self, key: &SmolStr, node: &CommandTreeNode, optional: bool) -> String {
        match &node.parser {
            Some(ParserBinding::Static(AnyParser::Literal(literal))) => literal.hint(optional),
            Some(binding) => {
                let inner = format!("<{key}: {}>", binding.name());
                if optional {
                    format!("[{inner}]")
                } else {
                    inner
                }
            }
            None => key.to_string(),
        }
    }

    /// Renderings of a node's continuations, marked optional when the node
    /// itself may terminate the line.
    fn child_hints(&self, node: &CommandTreeNode) -> Vec<String> {
        self.tree
            .get_children(node)
            .map(|children| {
                children
                    .iter()
                    .map(|(key, child)| self.hint_of(key, child, node.executable))
                    .collect()
            })
            .unwrap_or_default()
    }
}
