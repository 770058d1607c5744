//! Externally supplied registry and block-definition records.
//!
//! These arrive as JSON from the data layer; the parsing core only reads
//! them. Protocol ids are opaque to parsing beyond existence.

use serde::Deserialize;

use crate::base::FxIndexMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RegistryEntry {
    pub protocol_id: u32,
}

/// One registry: `minecraft:block`, `minecraft:item`, ...
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub protocol_id: u32,
    #[serde(default)]
    pub entries: FxIndexMap<String, RegistryEntry>,
}

impl Registry {
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }
}

/// Registry name → registry record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Registries(pub FxIndexMap<String, Registry>);

impl Registries {
    pub fn get(&self, name: &str) -> Option<&Registry> {
        self.0.get(name)
    }
}

/// The state-property surface of one block id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockDefinition {
    /// Property name → allowed values, in declaration order.
    #[serde(default)]
    pub properties: FxIndexMap<String, Vec<String>>,
}

/// Block id (canonical form) → definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct BlockDefinitions(pub FxIndexMap<String, BlockDefinition>);

impl BlockDefinitions {
    pub fn get(&self, id: &str) -> Option<&BlockDefinition> {
        self.0.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registries_deserialize_from_vanilla_shaped_json() {
        let registries: Registries = serde_json::from_str(
            r#"{
                "minecraft:block": {
                    "protocol_id": 3,
                    "entries": { "minecraft:stone": { "protocol_id": 0 } }
                }
            }"#,
        )
        .unwrap();
        assert!(registries.get("minecraft:block").unwrap().contains("minecraft:stone"));
    }

    #[test]
    fn block_definitions_deserialize_properties_in_order() {
        let defs: BlockDefinitions = serde_json::from_str(
            r#"{
                "minecraft:stone": {
                    "properties": { "snowy": ["true", "false"], "age": ["0", "1"] }
                }
            }"#,
        )
        .unwrap();
        let props = &defs.get("minecraft:stone").unwrap().properties;
        let keys: Vec<_> = props.keys().collect();
        assert_eq!(keys, ["snowy", "age"]);
    }
}
