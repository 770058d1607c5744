use crate::syntax::{NbtSchema, NbtSchemaNode, NbtTypedNode};

/// Reference chains longer than this are treated as broken.
const MAX_REF_DEPTH: usize = 8;

/// A read-only position inside an NBT schema.
///
/// Movement is by cloning: `child` and `item` return a new walker instead of
/// mutating, so callers can probe a key without committing to it. Every move
/// resolves reference nodes through to a typed node, bounded against cycles.
#[derive(Debug, Clone, Copy)]
pub struct SchemaWalker<'a> {
    schema: &'a NbtSchema,
    node: &'a NbtTypedNode,
}

impl<'a> SchemaWalker<'a> {
    /// Positions a walker at the top of a document.
    pub fn from_doc(schema: &'a NbtSchema, doc: &str) -> Option<Self> {
        let node = resolve(schema, schema.get(doc)?, 0)?;
        Some(Self { schema, node })
    }

    /// Positions a walker at `anchor` under `doc`, the usual entry point for
    /// root documents (`roots/blocks.json` + a block id).
    pub fn locate(schema: &'a NbtSchema, doc: &str, anchor: &str) -> Option<Self> {
        Self::from_doc(schema, doc)?.child(anchor)
    }

    pub fn node(&self) -> &'a NbtTypedNode {
        self.node
    }

    /// Moves to a named child of a compound-shaped node.
    pub fn child(&self, key: &str) -> Option<Self> {
        let node = resolve(self.schema, child_node(self.schema, self.node, key)?, 0)?;
        Some(Self {
            schema: self.schema,
            node,
        })
    }

    /// Moves to the item type of a list node.
    pub fn item(&self) -> Option<Self> {
        match self.node {
            NbtTypedNode::List { item } => {
                let node = resolve(self.schema, item, 0)?;
                Some(Self {
                    schema: self.schema,
                    node,
                })
            }
            _ => None,
        }
    }

    /// Every declared child key, including keys merged in via `child_ref`.
    pub fn child_keys(&self) -> Vec<&'a str> {
        let mut ans: Vec<&'a str> = Vec::new();
        collect_child_keys(self.schema, self.node, 0, &mut ans);
        ans
    }

    /// Whether undeclared keys are acceptable at this position.
    pub fn accepts_additional_children(&self) -> bool {
        matches!(
            self.node,
            NbtTypedNode::Compound {
                additional_children: true,
                ..
            }
        )
    }
}

/// Follows reference nodes until a typed node is reached. A reference target
/// may carry a `#anchor` suffix naming a child of the referenced document.
fn resolve<'a>(
    schema: &'a NbtSchema,
    node: &'a NbtSchemaNode,
    depth: usize,
) -> Option<&'a NbtTypedNode> {
    match node {
        NbtSchemaNode::Direct(typed) => Some(typed),
        NbtSchemaNode::Reference { target } => {
            if depth >= MAX_REF_DEPTH {
                tracing::warn!(target = %target, "schema reference chain too deep, giving up");
                return None;
            }
            let (doc, anchor) = match target.split_once('#') {
                Some((doc, anchor)) => (doc, Some(anchor)),
                None => (target.as_str(), None),
            };
            let typed = resolve(schema, schema.get(doc)?, depth + 1)?;
            match anchor {
                None => Some(typed),
                Some(anchor) => resolve(schema, child_node(schema, typed, anchor)?, depth + 1),
            }
        }
    }
}

/// Looks up a child key on a typed node, consulting `child_ref` documents
/// when the key is not declared directly.
fn child_node<'a>(
    schema: &'a NbtSchema,
    node: &'a NbtTypedNode,
    key: &str,
) -> Option<&'a NbtSchemaNode> {
    match node {
        NbtTypedNode::Root { children } => children.get(key),
        NbtTypedNode::Compound {
            children,
            child_ref,
            ..
        } => children.get(key).or_else(|| {
            child_ref.iter().find_map(|doc| {
                let merged = resolve(schema, schema.get(doc)?, 0)?;
                match merged {
                    NbtTypedNode::Compound { children, .. } => children.get(key),
                    _ => None,
                }
            })
        }),
        _ => None,
    }
}

fn collect_child_keys<'a>(
    schema: &'a NbtSchema,
    node: &'a NbtTypedNode,
    depth: usize,
    out: &mut Vec<&'a str>,
) {
    if depth >= MAX_REF_DEPTH {
        return;
    }
    match node {
        NbtTypedNode::Root { children } => {
            out.extend(children.keys().map(String::as_str));
        }
        NbtTypedNode::Compound {
            children,
            child_ref,
            ..
        } => {
            out.extend(children.keys().map(String::as_str));
            for doc in child_ref {
                if let Some(merged) = schema.get(doc).and_then(|n| resolve(schema, n, depth)) {
                    collect_child_keys(schema, merged, depth + 1, out);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> NbtSchema {
        serde_json::from_str(
            r#"{
                "roots/blocks.json": {
                    "type": "root",
                    "children": {
                        "base": { "type": "no-nbt" },
                        "minecraft:furnace": { "ref": "block/furnace.json" }
                    }
                },
                "block/furnace.json": {
                    "type": "compound",
                    "child_ref": ["block/block_entity.json"],
                    "children": {
                        "BurnTime": { "type": "short" },
                        "Items": {
                            "type": "list",
                            "item": { "ref": "util/item.json" }
                        }
                    }
                },
                "block/block_entity.json": {
                    "type": "compound",
                    "children": { "id": { "type": "string" } }
                },
                "util/item.json": {
                    "type": "compound",
                    "children": { "Count": { "type": "byte" } }
                },
                "loop/a.json": { "ref": "loop/b.json" },
                "loop/b.json": { "ref": "loop/a.json" }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn walks_through_references_and_child_refs() {
        let schema = schema();
        let walker = SchemaWalker::locate(&schema, "roots/blocks.json", "minecraft:furnace")
            .unwrap();
        assert!(walker.node().is_compound());
        assert!(walker.child("BurnTime").is_some());
        // Merged in from block_entity.json through child_ref.
        assert!(walker.child("id").is_some());
        assert!(walker.child("Lock").is_none());

        let items = walker.child("Items").unwrap();
        assert!(items.node().is_indexable());
        assert!(items.item().unwrap().child("Count").is_some());
    }

    #[test]
    fn child_keys_include_merged_documents() {
        let schema = schema();
        let walker = SchemaWalker::locate(&schema, "roots/blocks.json", "minecraft:furnace")
            .unwrap();
        assert_eq!(walker.child_keys(), ["BurnTime", "Items", "id"]);
    }

    #[test]
    fn circular_references_terminate() {
        let schema = schema();
        assert!(SchemaWalker::from_doc(&schema, "loop/a.json").is_none());
    }
}
