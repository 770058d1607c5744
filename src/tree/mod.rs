//! The command tree: the static grammar of valid token sequences.
//!
//! A node declares at most one of `children`, `redirect` (alias to another
//! subtree's continuation) or `template` (stamp a shared subtree shape with
//! per-use overrides); [`CommandTree::get_children`] resolves whichever is
//! present into the effective child set. Redirect cycles are expected (the
//! `execute ... run` construct points back at the command roots) and are
//! safe because the line parser consumes input before every traversal; a
//! depth bound backstops malformed trees.

use smol_str::SmolStr;

use crate::base::FxIndexMap;
use crate::parser::{AnyParser, Arg, ArgumentParser, ParserSuite};

/// Resolution bound for redirect/template chains that fail to terminate.
const MAX_RESOLUTION_DEPTH: usize = 32;

/// How a node binds its argument parser.
#[derive(Debug, Clone)]
pub enum ParserBinding {
    /// A parser instance constructed when the tree was built.
    Static(AnyParser),
    /// A parser constructed from the already-parsed arguments. This is the
    /// narrow data-driven path (`#define`'s id parser needs the declared
    /// kind, which is the previous argument).
    Dynamic {
        name: &'static str,
        bind: fn(&[Arg], &ParserSuite) -> AnyParser,
    },
}

impl ParserBinding {
    /// The parser name used in hints (`<id: string>`).
    pub fn name(&self) -> &'static str {
        match self {
            ParserBinding::Static(parser) => parser.name(),
            ParserBinding::Dynamic { name, .. } => *name,
        }
    }
}

/// One grammar node.
#[derive(Debug, Clone, Default)]
pub struct CommandTreeNode {
    pub children: Option<FxIndexMap<SmolStr, CommandTreeNode>>,
    /// Dotted path to the node whose effective children continue this one.
    pub redirect: Option<SmolStr>,
    /// Dotted path to a template node stamped with this node's overrides.
    pub template: Option<SmolStr>,
    pub executable: bool,
    pub permission: Option<u8>,
    pub parser: Option<ParserBinding>,
    pub description: Option<SmolStr>,
}

impl CommandTreeNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parser(mut self, parser: AnyParser) -> Self {
        self.parser = Some(ParserBinding::Static(parser));
        self
    }

    pub fn dynamic_parser(
        mut self,
        name: &'static str,
        bind: fn(&[Arg], &ParserSuite) -> AnyParser,
    ) -> Self {
        self.parser = Some(ParserBinding::Dynamic { name, bind });
        self
    }

    pub fn executable(mut self) -> Self {
        self.executable = true;
        self
    }

    pub fn permission(mut self, level: u8) -> Self {
        self.permission = Some(level);
        self
    }

    pub fn describe(mut self, description: impl Into<SmolStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn child(mut self, key: impl Into<SmolStr>, node: CommandTreeNode) -> Self {
        self.children
            .get_or_insert_with(FxIndexMap::default)
            .insert(key.into(), node);
        self
    }

    pub fn redirect(mut self, path: impl Into<SmolStr>) -> Self {
        self.redirect = Some(path.into());
        self
    }

    pub fn template(mut self, path: impl Into<SmolStr>) -> Self {
        self.template = Some(path.into());
        self
    }

    /// The scalar fields of this node, used as template overrides.
    fn scalar_overrides(&self) -> CommandTreeNode {
        CommandTreeNode {
            children: None,
            redirect: None,
            template: None,
            executable: self.executable,
            permission: self.permission,
            parser: self.parser.clone(),
            description: self.description.clone(),
        }
    }
}

/// The whole grammar: named roots (`commands`, `templates`, ...) addressed
/// by dotted paths.
#[derive(Debug, Clone, Default)]
pub struct CommandTree {
    roots: FxIndexMap<SmolStr, CommandTreeNode>,
}

impl CommandTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, key: impl Into<SmolStr>, node: CommandTreeNode) -> Self {
        self.roots.insert(key.into(), node);
        self
    }

    /// Resolve a dotted path (`line.command`) through declared children.
    pub fn resolve(&self, path: &str) -> Option<&CommandTreeNode> {
        let mut segments = path.split('.');
        let mut node = self.roots.get(segments.next()?)?;
        for segment in segments {
            node = node.children.as_ref()?.get(segment)?;
        }
        Some(node)
    }

    /// The effective child set of `node`, resolving redirects and templates.
    /// `None` means the node is a dead end for tree-walking (it may still be
    /// executable).
    pub fn get_children(
        &self,
        node: &CommandTreeNode,
    ) -> Option<FxIndexMap<SmolStr, CommandTreeNode>> {
        self.get_children_bounded(node, 0)
    }

    fn get_children_bounded(
        &self,
        node: &CommandTreeNode,
        depth: usize,
    ) -> Option<FxIndexMap<SmolStr, CommandTreeNode>> {
        if depth > MAX_RESOLUTION_DEPTH {
            tracing::warn!(depth, "redirect/template chain exceeded the resolution bound");
            return None;
        }
        if let Some(children) = &node.children {
            return Some(children.clone());
        }
        if let Some(redirect) = &node.redirect {
            let target = self.resolve(redirect)?;
            return self.get_children_bounded(target, depth + 1);
        }
        if let Some(template) = &node.template {
            let target = self.resolve(template)?;
            let mut concrete = node.clone();
            concrete.template = None;
            let filled = fill_single_template(target, &concrete);
            // The template may itself continue through a redirect.
            return self.get_children_bounded(&filled, depth + 1);
        }
        None
    }
}

/// Fill `node` from `template`: only fields absent on `node` are taken from
/// the template. Template children are used when the node declares none and
/// are recursively stamped with the node's scalar overrides.
pub fn fill_single_template(
    template: &CommandTreeNode,
    node: &CommandTreeNode,
) -> CommandTreeNode {
    let mut ans = node.clone();
    if ans.parser.is_none() {
        ans.parser = template.parser.clone();
    }
    if ans.description.is_none() {
        ans.description = template.description.clone();
    }
    if ans.permission.is_none() {
        ans.permission = template.permission;
    }
    ans.executable |= template.executable;
    if ans.children.is_none() {
        if let Some(children) = &template.children {
            let overrides = node.scalar_overrides();
            ans.children = Some(
                children
                    .iter()
                    .map(|(key, child)| (key.clone(), fill_single_template(child, &overrides)))
                    .collect(),
            );
        } else {
            ans.redirect = ans.redirect.or_else(|| template.redirect.clone());
        }
    }
    ans
}
