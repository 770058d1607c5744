//! Block values (`minecraft:stone[snowy=true]{...}`).

use super::identity::Identity;
use super::nbt::NbtCompound;
use crate::base::FxIndexMap;

/// A block id with optional state properties and an optional NBT suffix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub id: Identity,
    pub states: FxIndexMap<String, String>,
    pub tag: Option<NbtCompound>,
}

impl Block {
    pub fn new(id: Identity) -> Self {
        Self {
            id,
            states: FxIndexMap::default(),
            tag: None,
        }
    }
}
