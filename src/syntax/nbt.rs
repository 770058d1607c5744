//! Minimal SNBT value model.
//!
//! Only what compound filters need: strings, numbers, nested compounds and
//! lists. Full typed-NBT parsing (byte/short/long suffixes, typed arrays)
//! belongs to the leaf value-parser family outside this core.

use crate::base::FxIndexMap;

pub type NbtCompound = FxIndexMap<String, NbtValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum NbtValue {
    String(String),
    Int(i64),
    Double(f64),
    Compound(NbtCompound),
    List(Vec<NbtValue>),
}

impl NbtValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            NbtValue::String(_) => "string",
            NbtValue::Int(_) => "int",
            NbtValue::Double(_) => "double",
            NbtValue::Compound(_) => "compound",
            NbtValue::List(_) => "list",
        }
    }
}
