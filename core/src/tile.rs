use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Content token shown on the face of a tile. Two tiles pair up when their symbols are equal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for Symbol {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identity of a tile, never reused within a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    symbol: Symbol,
    face_up: bool,
    matched: bool,
    shake_count: u32,
}

impl Tile {
    pub(crate) fn new(id: TileId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            face_up: false,
            matched: false,
            shake_count: 0,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Bumped every time the tile takes part in a mismatch, observers animate on change.
    pub fn shake_count(&self) -> u32 {
        self.shake_count
    }

    /// Whether the face should be shown, matched tiles stay visible.
    pub fn is_visible(&self) -> bool {
        self.face_up || self.matched
    }

    /// Face-down and unmatched, the only tiles a flip can act on.
    pub fn is_hidden(&self) -> bool {
        !self.face_up && !self.matched
    }

    pub(crate) fn set_face_up(&mut self, face_up: bool) {
        self.face_up = face_up;
    }

    pub(crate) fn mark_matched(&mut self) {
        self.matched = true;
    }

    pub(crate) fn shake(&mut self) {
        self.shake_count = self.shake_count.saturating_add(1);
    }
}
