//! OpenType layout common table formats

use ot_types::GlyphId;

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// A [Coverage] table, mapping a sorted set of glyph ids to sequential indices.
///
/// [Coverage]: https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-table
#[derive(Clone, Debug)]
pub enum CoverageTable<'a> {
    Format1(CoverageFormat1<'a>),
    Format2(CoverageFormat2<'a>),
}

impl<'a> FontRead<'a> for CoverageTable<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            1 => CoverageFormat1::read(data).map(Self::Format1),
            2 => CoverageFormat2::read(data).map(Self::Format2),
            other => Err(ReadError::InvalidFormat(other as i64)),
        }
    }
}

impl<'a> CoverageTable<'a> {
    /// The coverage index for the provided glyph, or `Ok(None)` if the glyph
    /// is not covered.
    ///
    /// An `Err` means the coverage data itself could not be read, which is
    /// distinct from the glyph merely being absent.
    pub fn get(&self, gid: GlyphId) -> Result<Option<u16>, ReadError> {
        match self {
            CoverageTable::Format1(table) => table.get(gid),
            CoverageTable::Format2(table) => table.get(gid),
        }
    }

    /// An iterator over the covered glyphs, in coverage index order.
    ///
    /// Iteration stops at the first unreadable entry, so a truncated table
    /// yields the prefix that is actually present.
    pub fn iter(&self) -> impl Iterator<Item = GlyphId> + 'a {
        let (f1, f2) = match self {
            CoverageTable::Format1(table) => (Some(table.clone()), None),
            CoverageTable::Format2(table) => (None, Some(table.clone())),
        };
        let f1_iter = f1
            .into_iter()
            .flat_map(|table| (0..table.glyph_count() as usize).map(move |i| table.glyph_id(i)))
            .map_while(Result::ok);
        let f2_iter = f2
            .into_iter()
            .flat_map(|table| (0..table.range_count() as usize).map(move |i| table.range_record(i)))
            .map_while(Result::ok)
            .flat_map(|record| {
                (record.start_glyph_id.to_u16()..=record.end_glyph_id.to_u16()).map(GlyphId::new)
            });
        f1_iter.chain(f2_iter)
    }
}

/// [Coverage format 1](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-format-1):
/// a sorted list of glyph ids.
#[derive(Clone, Debug)]
pub struct CoverageFormat1<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for CoverageFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // coverageFormat
        cursor.advance::<u16>(); // glyphCount
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> CoverageFormat1<'a> {
    const GLYPH_ARRAY_OFFSET: usize = 4;

    /// Number of glyphs in the glyph array.
    pub fn glyph_count(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }

    /// Element `index` of the sorted glyph id array.
    pub fn glyph_id(&self, index: usize) -> Result<GlyphId, ReadError> {
        if index >= self.glyph_count() as usize {
            return Err(ReadError::OutOfBounds);
        }
        self.data.read_array_item(Self::GLYPH_ARRAY_OFFSET, index)
    }

    fn get(&self, gid: GlyphId) -> Result<Option<u16>, ReadError> {
        let mut lo = 0usize;
        let mut hi = self.glyph_count() as usize;
        while lo < hi {
            let mid = (lo + hi) / 2;
            let found: GlyphId = self
                .data
                .read_array_item(Self::GLYPH_ARRAY_OFFSET, mid)?;
            if gid < found {
                hi = mid;
            } else if gid > found {
                lo = mid + 1;
            } else {
                return Ok(Some(mid as u16));
            }
        }
        Ok(None)
    }
}

/// [Coverage format 2](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-format-2):
/// a sorted list of glyph ranges.
#[derive(Clone, Debug)]
pub struct CoverageFormat2<'a> {
    data: FontData<'a>,
}

/// One contiguous range of covered glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeRecord {
    pub start_glyph_id: GlyphId,
    pub end_glyph_id: GlyphId,
    pub start_coverage_index: u16,
}

impl<'a> FontRead<'a> for CoverageFormat2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // coverageFormat
        cursor.advance::<u16>(); // rangeCount
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> CoverageFormat2<'a> {
    const RANGE_ARRAY_OFFSET: usize = 4;
    const RANGE_LEN: usize = 6;

    /// Number of range records.
    pub fn range_count(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }

    /// Range record `index`.
    pub fn range_record(&self, index: usize) -> Result<RangeRecord, ReadError> {
        if index >= self.range_count() as usize {
            return Err(ReadError::OutOfBounds);
        }
        let offset = Self::RANGE_ARRAY_OFFSET + index * Self::RANGE_LEN;
        Ok(RangeRecord {
            start_glyph_id: self.data.read_at(offset)?,
            end_glyph_id: self.data.read_at(offset + 2)?,
            start_coverage_index: self.data.read_at(offset + 4)?,
        })
    }

    fn get(&self, gid: GlyphId) -> Result<Option<u16>, ReadError> {
        let mut lo = 0usize;
        let mut hi = self.range_count() as usize;
        while lo < hi {
            let mid = (lo + hi) / 2;
            let record = self.range_record(mid)?;
            if gid < record.start_glyph_id {
                hi = mid;
            } else if gid > record.end_glyph_id {
                lo = mid + 1;
            } else {
                let delta = gid.to_u16() - record.start_glyph_id.to_u16();
                let index = record.start_coverage_index as u32 + delta as u32;
                return u16::try_from(index)
                    .map(Some)
                    .map_err(|_| ReadError::MalformedData("coverage index exceeds uint16"));
            }
        }
        Ok(None)
    }
}

/// A [Class Definition] table, mapping glyph ids to class values.
///
/// Glyphs not assigned to any class implicitly belong to class 0.
///
/// [Class Definition]: https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#class-definition-table
#[derive(Clone, Debug)]
pub enum ClassDef<'a> {
    Format1(ClassDefFormat1<'a>),
    Format2(ClassDefFormat2<'a>),
}

impl<'a> FontRead<'a> for ClassDef<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            1 => ClassDefFormat1::read(data).map(Self::Format1),
            2 => ClassDefFormat2::read(data).map(Self::Format2),
            other => Err(ReadError::InvalidFormat(other as i64)),
        }
    }
}

impl<'a> ClassDef<'a> {
    /// The class value for the provided glyph (0 if unassigned).
    pub fn get(&self, gid: GlyphId) -> Result<u16, ReadError> {
        match self {
            ClassDef::Format1(table) => table.get(gid),
            ClassDef::Format2(table) => table.get(gid),
        }
    }
}

/// [ClassDef format 1](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#class-definition-table-format-1):
/// class values for a contiguous glyph range.
#[derive(Clone, Debug)]
pub struct ClassDefFormat1<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for ClassDefFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // classFormat
        cursor.advance::<u16>(); // startGlyphID
        cursor.advance::<u16>(); // glyphCount
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> ClassDefFormat1<'a> {
    pub fn start_glyph_id(&self) -> GlyphId {
        self.data.read_at(2).unwrap_or_default()
    }

    pub fn glyph_count(&self) -> u16 {
        self.data.read_at(4).unwrap_or_default()
    }

    fn get(&self, gid: GlyphId) -> Result<u16, ReadError> {
        let start = self.start_glyph_id().to_u16();
        let Some(rel) = gid.to_u16().checked_sub(start) else {
            return Ok(0);
        };
        if rel >= self.glyph_count() {
            return Ok(0);
        }
        self.data.read_array_item(6, rel as usize)
    }
}

/// [ClassDef format 2](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#class-definition-table-format-2):
/// class ranges.
#[derive(Clone, Debug)]
pub struct ClassDefFormat2<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for ClassDefFormat2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // classFormat
        cursor.advance::<u16>(); // classRangeCount
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> ClassDefFormat2<'a> {
    const RANGE_ARRAY_OFFSET: usize = 4;
    const RANGE_LEN: usize = 6;

    pub fn class_range_count(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }

    fn get(&self, gid: GlyphId) -> Result<u16, ReadError> {
        let mut lo = 0usize;
        let mut hi = self.class_range_count() as usize;
        while lo < hi {
            let mid = (lo + hi) / 2;
            let offset = Self::RANGE_ARRAY_OFFSET + mid * Self::RANGE_LEN;
            let start: GlyphId = self.data.read_at(offset)?;
            let end: GlyphId = self.data.read_at(offset + 2)?;
            if gid < start {
                hi = mid;
            } else if gid > end {
                lo = mid + 1;
            } else {
                return self.data.read_at(offset + 4);
            }
        }
        Ok(0)
    }
}

/// A [Device] table: ppem-size-specific adjustments to a design-unit value.
///
/// [Device]: https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#device-and-variationindex-tables
#[derive(Clone, Debug)]
pub struct Device<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for Device<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // startSize
        cursor.advance::<u16>(); // endSize
        let format: u16 = cursor.read()?;
        if !(1..=3).contains(&format) {
            return Err(ReadError::InvalidFormat(format as i64));
        }
        Ok(Self { data })
    }
}

impl<'a> Device<'a> {
    const DELTA_ARRAY_OFFSET: usize = 6;

    /// Smallest ppem size with an adjustment.
    pub fn start_size(&self) -> u16 {
        self.data.read_at(0).unwrap_or_default()
    }

    /// Largest ppem size with an adjustment.
    pub fn end_size(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }

    /// The packed delta width: 1 for 2-bit deltas, 2 for 4-bit, 3 for 8-bit.
    pub fn delta_format(&self) -> u16 {
        self.data.read_at(4).unwrap_or_default()
    }

    /// The signed adjustment for the provided ppem size, or `Ok(None)` when
    /// the size is outside the table's range.
    pub fn delta(&self, ppem: u16) -> Result<Option<i16>, ReadError> {
        let start = self.start_size();
        let end = self.end_size();
        if ppem < start || ppem > end {
            return Ok(None);
        }
        let format = self.delta_format();
        let bits = match format {
            1 => 2,
            2 => 4,
            3 => 8,
            other => return Err(ReadError::InvalidFormat(other as i64)),
        };
        let per_word = 16 / bits;
        let index = (ppem - start) as usize;
        let word: u16 = self
            .data
            .read_array_item(Self::DELTA_ARRAY_OFFSET, index / per_word)?;
        // deltas are packed msb-first within each word
        let shift = 16 - bits * (index % per_word + 1);
        let raw = (word >> shift) & ((1u16 << bits) - 1);
        // sign extend
        let sign_bit = 1u16 << (bits - 1);
        let value = if raw & sign_bit != 0 {
            (raw | !((1u16 << bits) - 1)) as i16
        } else {
            raw as i16
        };
        Ok(Some(value))
    }
}
