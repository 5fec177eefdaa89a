//! Grid coordinates and their packed integer form.
//!
//! A [`CellPos`] is a signed 16-bit `(x, y)` pair. Its packed [`CellKey`] is
//! the 32-bit integer `(x << 16) | (y & 0xFFFF)`, which is what the event
//! source uses when a configuration payload references another cell. The
//! packing is a byte concatenation, so every pair maps to exactly one key and
//! back.

use serde::{Deserialize, Serialize};

/// A single addressable location on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPos {
    /// Horizontal coordinate.
    pub x: i16,
    /// Vertical coordinate.
    pub y: i16,
}

impl CellPos {
    /// Create a position from its coordinates.
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Pack this position into its integer key.
    pub const fn pack(self) -> CellKey {
        let [x_hi, x_lo] = self.x.to_be_bytes();
        let [y_hi, y_lo] = self.y.to_be_bytes();
        CellKey(i32::from_be_bytes([x_hi, x_lo, y_hi, y_lo]))
    }

    /// Translate by a relative offset.
    ///
    /// Returns `None` when either coordinate leaves the `i16` range.
    pub const fn offset(self, by: CellOffset) -> Option<Self> {
        let Some(x) = self.x.checked_add(by.dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add(by.dy) else {
            return None;
        };
        Some(Self { x, y })
    }
}

impl core::fmt::Display for CellPos {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<CellPos> for CellKey {
    fn from(pos: CellPos) -> Self {
        pos.pack()
    }
}

/// Packed integer encoding of a [`CellPos`], used as the history map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellKey(pub i32);

impl CellKey {
    /// Sentinel meaning "no link" in link configuration payloads.
    pub const NONE: Self = Self(-1);

    /// Recover the position this key was packed from.
    pub const fn unpack(self) -> CellPos {
        let [x_hi, x_lo, y_hi, y_lo] = self.0.to_be_bytes();
        CellPos {
            x: i16::from_be_bytes([x_hi, x_lo]),
            y: i16::from_be_bytes([y_hi, y_lo]),
        }
    }

    /// Whether this is a negative key, which link payloads use for "none".
    pub const fn is_sentinel(self) -> bool {
        self.0 < 0
    }
}

impl From<CellKey> for CellPos {
    fn from(key: CellKey) -> Self {
        key.unpack()
    }
}

/// A relative displacement between two cells, as sent by bridge and
/// router style configuration UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellOffset {
    /// Horizontal displacement.
    pub dx: i16,
    /// Vertical displacement.
    pub dy: i16,
}

impl CellOffset {
    /// Create an offset.
    pub const fn new(dx: i16, dy: i16) -> Self {
        Self { dx, dy }
    }
}

impl core::fmt::Display for CellOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({:+},{:+})", self.dx, self.dy)
    }
}
