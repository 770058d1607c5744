//! NBT schema records, supplied by the data layer as JSON.
//!
//! A schema is a map from document key (`roots/blocks.json`,
//! `block/furnace.json`, ...) to a node tree. Reference nodes point at other
//! documents by key, optionally with a `#anchor` child suffix.

use serde::Deserialize;

use crate::base::FxIndexMap;

/// One schema node: either a reference to another document or a typed node.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NbtSchemaNode {
    Reference {
        #[serde(rename = "ref")]
        target: String,
    },
    Direct(NbtTypedNode),
}

/// A typed schema node, discriminated by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NbtTypedNode {
    #[serde(rename = "no-nbt")]
    NoNbt,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
    ByteArray,
    IntArray,
    LongArray,
    List {
        item: Box<NbtSchemaNode>,
    },
    Compound {
        #[serde(default)]
        children: FxIndexMap<String, NbtSchemaNode>,
        /// Whether keys outside `children` are acceptable.
        #[serde(default, rename = "additionalChildren")]
        additional_children: bool,
        /// Documents whose compound children are merged into this one.
        #[serde(default)]
        child_ref: Vec<String>,
    },
    Root {
        #[serde(default)]
        children: FxIndexMap<String, NbtSchemaNode>,
    },
}

impl NbtTypedNode {
    /// Compound-shaped nodes accept key segments and compound filters.
    pub fn is_compound(&self) -> bool {
        matches!(self, Self::Compound { .. } | Self::Root { .. })
    }

    /// Nodes that accept `[...]` index segments.
    pub fn is_indexable(&self) -> bool {
        matches!(
            self,
            Self::List { .. } | Self::ByteArray | Self::IntArray | Self::LongArray
        )
    }
}

/// Document key → schema node tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct NbtSchema(pub FxIndexMap<String, NbtSchemaNode>);

impl NbtSchema {
    pub fn get(&self, doc: &str) -> Option<&NbtSchemaNode> {
        self.0.get(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_the_vanilla_shapes() {
        let schema: NbtSchema = serde_json::from_str(
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
                    "children": {
                        "BurnTime": { "type": "short" },
                        "Items": { "type": "list", "item": { "type": "compound" } }
                    }
                }
            }"#,
        )
        .unwrap();

        let Some(NbtSchemaNode::Direct(root)) = schema.get("roots/blocks.json") else {
            panic!("expected a direct root node");
        };
        assert!(root.is_compound());
        let NbtTypedNode::Root { children } = root else {
            panic!("expected a root node");
        };
        assert!(matches!(
            children.get("minecraft:furnace"),
            Some(NbtSchemaNode::Reference { target }) if target == "block/furnace.json"
        ));
    }
}
