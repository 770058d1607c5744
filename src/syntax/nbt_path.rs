//! NBT path values (`foo.bar[0]`, `{}.Items[{Slot:0}]`).

use std::fmt;

use super::nbt::NbtCompound;

/// One token of a parsed NBT path. The separator and bracket sentinels are
/// kept so the exact surface syntax can be reconstructed for highlighting.
#[derive(Debug, Clone, PartialEq)]
pub enum NbtPathToken {
    Key(String),
    Index(i32),
    Filter(NbtCompound),
    Sep,
    IndexBegin,
    IndexEnd,
}

/// An ordered token sequence forming one path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NbtPath(pub Vec<NbtPathToken>);

impl NbtPath {
    pub fn push(&mut self, token: NbtPathToken) {
        self.0.push(token);
    }
}

impl fmt::Display for NbtPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.0 {
            match token {
                NbtPathToken::Key(key) => f.write_str(key)?,
                NbtPathToken::Index(i) => write!(f, "{i}")?,
                NbtPathToken::Filter(_) => f.write_str("{...}")?,
                NbtPathToken::Sep => f.write_str(".")?,
                NbtPathToken::IndexBegin => f.write_str("[")?,
                NbtPathToken::IndexEnd => f.write_str("]")?,
            }
        }
        Ok(())
    }
}
