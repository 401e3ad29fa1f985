use crate::tileset::Tileset;

/// `[first, end)` gid range owned by the tileset at `index`.
#[derive(Debug, Clone, Copy)]
struct GidRange {
    first: u32,
    end: u64,
    index: usize,
}

/// gid -> index of the owning tileset.
///
/// Indices point into the slice the lookup was built from, so the caller's
/// declaration order is preserved. On overlapping ranges the tileset with the
/// higher `first_gid` wins.
pub struct TilesetLookup {
    /// Sorted by `first`; ties keep declaration order.
    ranges: Vec<GidRange>,
}

impl TilesetLookup {
    /// Builds the lookup over `tilesets`, skipping empty ones.
    pub fn new(tilesets: &[Tileset]) -> Self {
        let mut ranges: Vec<GidRange> = tilesets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.tile_count() > 0)
            .map(|(index, t)| GidRange {
                first: t.first_gid(),
                end: u64::from(t.first_gid()) + u64::from(t.tile_count()),
                index,
            })
            .collect();
        ranges.sort_by_key(|r| r.first);

        Self { ranges }
    }

    /// Index of the tileset covering `gid` (flags already stripped).
    #[inline]
    pub fn tileset_for(&self, gid: u32) -> Option<usize> {
        let upto = self.ranges.partition_point(|r| r.first <= gid);
        self.ranges[..upto]
            .iter()
            .rev()
            .find(|r| u64::from(gid) < r.end)
            .map(|r| r.index)
    }

    /// Highest gid covered by any tileset.
    pub fn max_gid(&self) -> u32 {
        self.ranges
            .iter()
            .map(|r| u32::try_from(r.end - 1).unwrap_or(u32::MAX))
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tileset::{DynamicTileset, UniformTileset};
    use image::RgbaImage;

    fn dynamic(first_gid: u32, n: usize) -> Tileset {
        Tileset::Dynamic(DynamicTileset::from_images(
            first_gid,
            vec![RgbaImage::new(1, 1); n],
        ))
    }

    #[test]
    fn picks_tileset_by_range_not_position() {
        // declared out of gid order on purpose
        let tilesets = vec![
            dynamic(30, 2),
            Tileset::Uniform(UniformTileset::from_image(1, RgbaImage::new(22 * 16, 16))),
        ];
        let lut = TilesetLookup::new(&tilesets);
        assert_eq!(lut.tileset_for(1), Some(1));
        assert_eq!(lut.tileset_for(22), Some(1));
        assert_eq!(lut.tileset_for(23), None);
        assert_eq!(lut.tileset_for(30), Some(0));
        assert_eq!(lut.tileset_for(31), Some(0));
        assert_eq!(lut.tileset_for(32), None);
        assert_eq!(lut.tileset_for(0), None);
        assert_eq!(lut.max_gid(), 31);
    }

    #[test]
    fn later_first_gid_wins_on_overlap() {
        let tilesets = vec![dynamic(1, 5), dynamic(3, 1)];
        let lut = TilesetLookup::new(&tilesets);
        assert_eq!(lut.tileset_for(2), Some(0));
        assert_eq!(lut.tileset_for(3), Some(1));
        assert_eq!(lut.tileset_for(4), Some(0));
    }

    #[test]
    fn high_first_gid_needs_no_dense_table() {
        let tilesets = vec![dynamic(1, 1), dynamic(4_000_000_000, 2)];
        let lut = TilesetLookup::new(&tilesets);
        assert_eq!(lut.tileset_for(1), Some(0));
        assert_eq!(lut.tileset_for(2), None);
        assert_eq!(lut.tileset_for(4_000_000_001), Some(1));
        assert_eq!(lut.tileset_for(4_000_000_002), None);
        assert_eq!(lut.tileset_for(u32::MAX), None);
        assert_eq!(lut.max_gid(), 4_000_000_001);
    }

    #[test]
    fn indices_past_u16_are_kept() {
        let tilesets: Vec<Tileset> = (0..70_000u32).map(|i| dynamic(i + 1, 1)).collect();
        let lut = TilesetLookup::new(&tilesets);
        assert_eq!(lut.tileset_for(65_536), Some(65_535));
        assert_eq!(lut.tileset_for(70_000), Some(69_999));
    }

    #[test]
    fn empty_lookup_covers_nothing() {
        let lut = TilesetLookup::new(&[]);
        assert_eq!(lut.tileset_for(1), None);
        assert_eq!(lut.max_gid(), 0);
    }
}
