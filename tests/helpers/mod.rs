//! Shared fixtures: data sets, a small command tree, and context plumbing.
#![allow(dead_code)]

use std::sync::Arc;

use once_cell::sync::Lazy;

use mcfunction::parser::{bind_definition_id, ParserSuite};
use mcfunction::syntax::{BlockDefinitions, CacheCategory, NbtSchema, Registries};
use mcfunction::tree::{CommandTree, CommandTreeNode};
use mcfunction::{CrossRefCache, Span};

pub fn test_registries() -> Arc<Registries> {
    static REGISTRIES: Lazy<Arc<Registries>> = Lazy::new(build_registries);
    Arc::clone(&REGISTRIES)
}

fn build_registries() -> Arc<Registries> {
    Arc::new(
        serde_json::from_str(
            r#"{
                "minecraft:block": {
                    "protocol_id": 3,
                    "entries": {
                        "minecraft:stone": { "protocol_id": 0 },
                        "minecraft:grass_block": { "protocol_id": 1 }
                    }
                },
                "minecraft:fluid": {
                    "protocol_id": 4,
                    "entries": {
                        "minecraft:water": { "protocol_id": 0 },
                        "minecraft:lava": { "protocol_id": 1 }
                    }
                },
                "minecraft:item": {
                    "protocol_id": 5,
                    "entries": { "minecraft:stone": { "protocol_id": 0 } }
                },
                "minecraft:entity_type": {
                    "protocol_id": 6,
                    "entries": { "minecraft:area_effect_cloud": { "protocol_id": 0 } }
                }
            }"#,
        )
        .expect("registries fixture"),
    )
}

pub fn test_block_definitions() -> Arc<BlockDefinitions> {
    static DEFINITIONS: Lazy<Arc<BlockDefinitions>> = Lazy::new(build_block_definitions);
    Arc::clone(&DEFINITIONS)
}

fn build_block_definitions() -> Arc<BlockDefinitions> {
    Arc::new(
        serde_json::from_str(
            r#"{
                "minecraft:stone": {
                    "properties": {
                        "snowy": ["true", "false"],
                        "age": ["0", "1", "2", "3"]
                    }
                },
                "minecraft:grass_block": { "properties": {} }
            }"#,
        )
        .expect("block definitions fixture"),
    )
}

pub fn test_schema() -> Arc<NbtSchema> {
    static SCHEMA: Lazy<Arc<NbtSchema>> = Lazy::new(build_schema);
    Arc::clone(&SCHEMA)
}

fn build_schema() -> Arc<NbtSchema> {
    Arc::new(
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
                    "children": {
                        "Count": { "type": "byte" },
                        "tag": { "type": "compound", "additionalChildren": true }
                    }
                }
            }"#,
        )
        .expect("schema fixture"),
    )
}

pub fn test_suite() -> ParserSuite {
    ParserSuite::new(test_registries(), test_block_definitions(), test_schema())
}

/// The cache an orchestrator would have built from the rest of the project.
pub fn test_cache() -> CrossRefCache {
    let mut cache = CrossRefCache::new();
    cache.add_def(CacheCategory::Functions, "spgoding:a/b/c", Span::new(0, 1));
    cache.add_def(CacheCategory::Functions, "spgoding:a/d", Span::new(0, 1));
    cache.add_def(CacheCategory::Functions, "minecraft:tick", Span::new(0, 1));
    cache.add_def(
        CacheCategory::TagsFunctions,
        "spgoding:function/1",
        Span::new(0, 1),
    );
    cache.add_def(
        CacheCategory::TagsFluids,
        "minecraft:fluid_tag",
        Span::new(0, 1),
    );
    cache
}

/// A grammar exercising every node feature: literals, strings, identities,
/// blocks, `#define`, redirects, and a template.
pub fn test_tree(suite: &ParserSuite) -> CommandTree {
    let advancement = CommandTreeNode::new()
        .parser(suite.literal(["advancement"]).into())
        .describe("grant or revoke advancements")
        .child(
            "grant_revoke",
            CommandTreeNode::new()
                .parser(suite.literal(["grant", "revoke"]).into())
                .child(
                    "id",
                    CommandTreeNode::new()
                        .parser(suite.word_string().into())
                        .executable(),
                ),
        );

    let function = CommandTreeNode::new()
        .parser(suite.literal(["function"]).into())
        .child(
            "name",
            CommandTreeNode::new()
                .parser(
                    suite
                        .cache_identity(CacheCategory::Functions, true)
                        .expect("functions identity")
                        .into(),
                )
                .executable(),
        );

    let setblock = CommandTreeNode::new()
        .parser(suite.literal(["setblock"]).into())
        .child(
            "block",
            CommandTreeNode::new()
                .parser(suite.block(true).expect("block parser").into())
                .executable(),
        );

    let define = CommandTreeNode::new()
        .parser(suite.literal(["#define"]).into())
        .child(
            "kind",
            CommandTreeNode::new()
                .parser(suite.literal(["entity", "storage", "tag"]).into())
                .child(
                    "id",
                    CommandTreeNode::new()
                        .dynamic_parser("string", bind_definition_id)
                        .executable(),
                ),
        );

    // `run` loops back to the command roots, like vanilla `execute ... run`.
    let execute = CommandTreeNode::new()
        .parser(suite.literal(["execute"]).into())
        .permission(2)
        .child(
            "run",
            CommandTreeNode::new()
                .parser(suite.literal(["run"]).into())
                .redirect("commands"),
        );

    let gamerule = CommandTreeNode::new()
        .parser(suite.literal(["gamerule"]).into())
        .permission(4)
        .executable();

    CommandTree::new()
        .root(
            "commands",
            CommandTreeNode::new()
                .child("advancement", advancement)
                .child("function", function)
                .child("setblock", setblock)
                .child("#define", define)
                .child("execute", execute)
                .child("gamerule", gamerule),
        )
        .root(
            "templates",
            CommandTreeNode::new().child(
                "goto_function",
                CommandTreeNode::new().describe("templated description").child(
                    "name",
                    CommandTreeNode::new()
                        .parser(
                            suite
                                .cache_identity(CacheCategory::Functions, true)
                                .expect("functions identity")
                                .into(),
                        )
                        .executable(),
                ),
            ),
        )
}
