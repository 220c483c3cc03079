//! Builders for GDEF subtables.

use std::collections::{BTreeMap, BTreeSet};

use ot_types::GlyphId;

use crate::builders::layout::CoverageBuilder;
use crate::{OffsetWriter, WriteError};

/// Assembles a GDEF attachment point list.
///
/// Glyphs and point indices are kept sorted and deduplicated, and the
/// coverage table is derived from the glyphs that have points, so the
/// attach point array always lines up with the coverage indices.
#[derive(Clone, Debug, Default)]
pub struct AttachListBuilder {
    points: BTreeMap<GlyphId, BTreeSet<u16>>,
}

impl AttachListBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Record that `gid` has an attachment at contour point `point_index`.
    pub fn add_point(&mut self, gid: GlyphId, point_index: u16) {
        self.points.entry(gid).or_default().insert(point_index);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Serialize the attach list, offsets relative to its own start.
    pub fn build(&self) -> Result<Vec<u8>, WriteError> {
        let mut writer = OffsetWriter::new();
        let coverage: CoverageBuilder = self.points.keys().copied().collect();
        let coverage_label = writer.create_label();
        writer.write_offset16(coverage_label, 0);
        let glyph_count = u16::try_from(self.points.len())
            .map_err(|_| WriteError::CountOverflow(self.points.len()))?;
        writer.write_u16(glyph_count);
        let point_labels: Vec<_> = self
            .points
            .iter()
            .map(|_| {
                let label = writer.create_label();
                writer.write_offset16(label, 0);
                label
            })
            .collect();
        for (label, points) in point_labels.iter().zip(self.points.values()) {
            writer.align2();
            writer.define_label_here(*label)?;
            let point_count = u16::try_from(points.len())
                .map_err(|_| WriteError::CountOverflow(points.len()))?;
            writer.write_u16(point_count);
            for point in points {
                writer.write_u16(*point);
            }
        }
        writer.align2();
        writer.define_label_here(coverage_label)?;
        coverage.write(&mut writer)?;
        writer.finish()
    }
}

/// Assembles a GDEF mark glyph sets table.
#[derive(Clone, Debug, Default)]
pub struct MarkGlyphSetsBuilder {
    sets: Vec<CoverageBuilder>,
}

impl MarkGlyphSetsBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Append a glyph set, returning its mark glyph set index.
    pub fn add_set(&mut self, set: CoverageBuilder) -> u16 {
        self.sets.push(set);
        (self.sets.len() - 1) as u16
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Serialize the table, offsets relative to its own start.
    ///
    /// Mark glyph set coverage offsets are 32-bit, so the table can hold
    /// more coverage data than the 16-bit subtables.
    pub fn build(&self) -> Result<Vec<u8>, WriteError> {
        let mut writer = OffsetWriter::new();
        writer.write_u16(1); // format
        let set_count = u16::try_from(self.sets.len())
            .map_err(|_| WriteError::CountOverflow(self.sets.len()))?;
        writer.write_u16(set_count);
        let labels: Vec<_> = self
            .sets
            .iter()
            .map(|_| {
                let label = writer.create_label();
                writer.write_offset32(label, 0);
                label
            })
            .collect();
        for (label, set) in labels.iter().zip(&self.sets) {
            writer.define_label_here(*label)?;
            set.write(&mut writer)?;
        }
        writer.finish()
    }
}
