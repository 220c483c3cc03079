//! Builders for subtables shared across the layout tables.

use std::collections::BTreeSet;

use ot_types::GlyphId;

use crate::{OffsetWriter, WriteError};

/// Assembles a coverage table from a set of glyphs.
///
/// Duplicates are discarded and glyphs are kept sorted, so the emitted
/// table is always well formed. The output uses format 2 (glyph ranges)
/// when that encoding is smaller than the flat format 1 list.
#[derive(Clone, Debug, Default)]
pub struct CoverageBuilder {
    glyphs: BTreeSet<GlyphId>,
}

impl CoverageBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add(&mut self, gid: GlyphId) {
        self.glyphs.insert(gid);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The glyphs in coverage-index order.
    pub fn iter(&self) -> impl Iterator<Item = GlyphId> + '_ {
        self.glyphs.iter().copied()
    }

    /// Maximal runs of consecutive glyph ids.
    fn ranges(&self) -> Vec<(GlyphId, GlyphId)> {
        let mut ranges: Vec<(GlyphId, GlyphId)> = Vec::new();
        for gid in &self.glyphs {
            match ranges.last_mut() {
                Some((_, end)) if end.to_u16() + 1 == gid.to_u16() => *end = *gid,
                _ => ranges.push((*gid, *gid)),
            }
        }
        ranges
    }

    /// Emit the coverage table at the writer's current position.
    ///
    /// Fails if the glyph count cannot be represented by the format's
    /// 16-bit count field.
    pub fn write(&self, writer: &mut OffsetWriter) -> Result<(), WriteError> {
        let ranges = self.ranges();
        // format 1 costs 2 bytes per glyph, format 2 costs 6 per range
        if self.glyphs.len() * 2 <= ranges.len() * 6 {
            let glyph_count = u16::try_from(self.glyphs.len())
                .map_err(|_| WriteError::CountOverflow(self.glyphs.len()))?;
            writer.write(1u16);
            writer.write(glyph_count);
            for gid in &self.glyphs {
                writer.write(*gid);
            }
        } else {
            let range_count = u16::try_from(ranges.len())
                .map_err(|_| WriteError::CountOverflow(ranges.len()))?;
            writer.write(2u16);
            writer.write(range_count);
            let mut coverage_index = 0u16;
            for (start, end) in ranges {
                writer.write(start);
                writer.write(end);
                writer.write(coverage_index);
                let span = (end.to_u16() - start.to_u16()) as u32 + 1;
                coverage_index = coverage_index.wrapping_add(span as u16);
            }
        }
        Ok(())
    }
}

impl FromIterator<GlyphId> for CoverageBuilder {
    fn from_iter<T: IntoIterator<Item = GlyphId>>(iter: T) -> Self {
        CoverageBuilder {
            glyphs: iter.into_iter().collect(),
        }
    }
}

impl Extend<GlyphId> for CoverageBuilder {
    fn extend<T: IntoIterator<Item = GlyphId>>(&mut self, iter: T) {
        self.glyphs.extend(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use read_tables::{FontData, FontRead};

    fn build(coverage: &CoverageBuilder) -> Vec<u8> {
        let mut writer = OffsetWriter::new();
        coverage.write(&mut writer).unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn scattered_glyphs_use_format1() {
        let coverage: CoverageBuilder = [7u16, 3, 101, 3].map(GlyphId::new).into_iter().collect();
        let bytes = build(&coverage);
        assert_eq!(bytes[..2], [0, 1]);
        // sorted and deduplicated
        assert_eq!(bytes[2..4], [0, 3]);
        assert_eq!(bytes[4..6], [0, 3]);

        let table = read_tables::tables::layout::CoverageTable::read(FontData::new(&bytes)).unwrap();
        assert_eq!(table.get(GlyphId::new(7)), Ok(Some(1)));
        assert_eq!(table.get(GlyphId::new(101)), Ok(Some(2)));
        assert_eq!(table.get(GlyphId::new(8)), Ok(None));
    }

    #[test]
    fn consecutive_glyphs_use_format2() {
        let coverage: CoverageBuilder = (10u16..=50).map(GlyphId::new).collect();
        let bytes = build(&coverage);
        assert_eq!(bytes[..2], [0, 2]);
        assert_eq!(bytes.len(), 4 + 6); // one range

        let table = read_tables::tables::layout::CoverageTable::read(FontData::new(&bytes)).unwrap();
        assert_eq!(table.get(GlyphId::new(10)), Ok(Some(0)));
        assert_eq!(table.get(GlyphId::new(50)), Ok(Some(40)));
        assert_eq!(table.get(GlyphId::new(51)), Ok(None));
    }

    #[test]
    fn coverage_indices_span_ranges() {
        let mut coverage = CoverageBuilder::new();
        coverage.extend((1u16..=3).map(GlyphId::new));
        coverage.extend((100u16..=110).map(GlyphId::new));
        let bytes = build(&coverage);
        assert_eq!(bytes[..2], [0, 2]);

        let table = read_tables::tables::layout::CoverageTable::read(FontData::new(&bytes)).unwrap();
        // second range continues the numbering where the first left off
        assert_eq!(table.get(GlyphId::new(100)), Ok(Some(3)));
        assert_eq!(table.get(GlyphId::new(110)), Ok(Some(13)));
    }

    #[test]
    fn full_glyph_set_is_one_range() {
        // all 65536 glyph ids: only format 2 can hold this, as one range
        let coverage: CoverageBuilder = (0..=u16::MAX).map(GlyphId::new).collect();
        let bytes = build(&coverage);
        assert_eq!(bytes[..2], [0, 2]);
        assert_eq!(bytes.len(), 4 + 6);

        let table = read_tables::tables::layout::CoverageTable::read(FontData::new(&bytes)).unwrap();
        assert_eq!(table.get(GlyphId::new(0)), Ok(Some(0)));
        assert_eq!(table.get(GlyphId::new(u16::MAX)), Ok(Some(u16::MAX)));
    }

    #[test]
    fn empty_coverage() {
        let bytes = build(&CoverageBuilder::new());
        let table = read_tables::tables::layout::CoverageTable::read(FontData::new(&bytes)).unwrap();
        assert_eq!(table.get(GlyphId::new(0)), Ok(None));
    }
}
