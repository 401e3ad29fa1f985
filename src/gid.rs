//! Raw cell values as stored in Tiled layer data.

/// Horizontal flip flag.
pub const FLIP_H: u32 = 0x8000_0000; // bit 31
/// Vertical flip flag.
pub const FLIP_V: u32 = 0x4000_0000; // bit 30
/// Anti-diagonal flip flag. Carried but not rendered.
pub const FLIP_D: u32 = 0x2000_0000; // bit 29
/// Strips every flag bit from a cell value.
pub const GID_MASK: u32 = 0x1FFF_FFFF; // keep lower 29 bits (bit 28 is free)

/// A layer cell value: a global tile id plus Tiled's flip flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

impl TileId {
    /// Value as stored, flags included.
    #[inline] pub fn raw(self) -> u32 { self.0 }
    /// The gid with flags masked off.
    #[inline] pub fn clean(self) -> u32 { self.0 & GID_MASK }
    /// Mirrored left to right.
    #[inline] pub fn flip_h(self) -> bool { (self.0 & FLIP_H) != 0 }
    /// Mirrored top to bottom.
    #[inline] pub fn flip_v(self) -> bool { (self.0 & FLIP_V) != 0 }
    /// Swapped along the anti-diagonal.
    #[inline] pub fn flip_d(self) -> bool { (self.0 & FLIP_D) != 0 }
    /// `true` for the "no tile" value, flags included.
    #[inline] pub fn is_empty(self) -> bool { self.clean() == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_all_flip_flags() {
        let id = TileId(FLIP_H | FLIP_V | FLIP_D | 42);
        assert_eq!(id.clean(), 42);
        assert!(id.flip_h() && id.flip_v() && id.flip_d());
        assert_eq!(id.raw(), FLIP_H | FLIP_V | FLIP_D | 42);
    }

    #[test]
    fn flagged_zero_is_still_empty() {
        assert!(TileId(FLIP_H).is_empty());
        assert!(!TileId(1).is_empty());
    }
}
