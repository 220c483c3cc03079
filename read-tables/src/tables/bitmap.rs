//! The [EBLC] (Embedded Bitmap Location) table and the sbit metrics records
//! shared by the embedded bitmap tables.
//!
//! [EBLC]: https://docs.microsoft.com/en-us/typography/opentype/spec/eblc

use ot_types::Tag;

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// 'EBLC'
pub const TAG: Tag = Tag::new(b"EBLC");

/// [Sbit line metrics](https://docs.microsoft.com/en-us/typography/opentype/spec/eblc#sbitlinemetrics): a 12-byte record describing the line layout of
/// bitmaps in one strike, for one direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SbitLineMetrics {
    pub ascender: i8,
    pub descender: i8,
    pub width_max: u8,
    pub caret_slope_numerator: i8,
    pub caret_slope_denominator: i8,
    pub caret_offset: i8,
    pub min_origin_sb: i8,
    pub min_advance_sb: i8,
    pub max_before_bl: i8,
    pub min_after_bl: i8,
    pub pad1: i8,
    pub pad2: i8,
}

impl SbitLineMetrics {
    pub const RAW_BYTE_LEN: usize = 12;
}

impl<'a> FontRead<'a> for SbitLineMetrics {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        Ok(SbitLineMetrics {
            ascender: cursor.read()?,
            descender: cursor.read()?,
            width_max: cursor.read()?,
            caret_slope_numerator: cursor.read()?,
            caret_slope_denominator: cursor.read()?,
            caret_offset: cursor.read()?,
            min_origin_sb: cursor.read()?,
            min_advance_sb: cursor.read()?,
            max_before_bl: cursor.read()?,
            min_after_bl: cursor.read()?,
            pad1: cursor.read()?,
            pad2: cursor.read()?,
        })
    }
}

/// [Small glyph metrics](https://docs.microsoft.com/en-us/typography/opentype/spec/eblc#smallglyphmetrics): a 5-byte record for glyphs whose vertical
/// metrics can be derived from the strike's line metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SmallGlyphMetrics {
    pub height: u8,
    pub width: u8,
    pub bearing_x: i8,
    pub bearing_y: i8,
    pub advance: u8,
}

impl SmallGlyphMetrics {
    pub const RAW_BYTE_LEN: usize = 5;
}

impl<'a> FontRead<'a> for SmallGlyphMetrics {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        Ok(SmallGlyphMetrics {
            height: cursor.read()?,
            width: cursor.read()?,
            bearing_x: cursor.read()?,
            bearing_y: cursor.read()?,
            advance: cursor.read()?,
        })
    }
}

/// [Big glyph metrics](https://docs.microsoft.com/en-us/typography/opentype/spec/eblc#bigglyphmetrics): an 8-byte record carrying both horizontal and
/// vertical metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BigGlyphMetrics {
    pub height: u8,
    pub width: u8,
    pub hori_bearing_x: i8,
    pub hori_bearing_y: i8,
    pub hori_advance: u8,
    pub vert_bearing_x: i8,
    pub vert_bearing_y: i8,
    pub vert_advance: u8,
}

impl BigGlyphMetrics {
    pub const RAW_BYTE_LEN: usize = 8;
}

impl<'a> FontRead<'a> for BigGlyphMetrics {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        Ok(BigGlyphMetrics {
            height: cursor.read()?,
            width: cursor.read()?,
            hori_bearing_x: cursor.read()?,
            hori_bearing_y: cursor.read()?,
            hori_advance: cursor.read()?,
            vert_bearing_x: cursor.read()?,
            vert_bearing_y: cursor.read()?,
            vert_advance: cursor.read()?,
        })
    }
}

/// The [EBLC] table header.
///
/// Only the header is validated up front; each 48-byte [`BitmapSize`] record
/// in the array is bounds checked when requested.
///
/// [EBLC]: https://docs.microsoft.com/en-us/typography/opentype/spec/eblc
#[derive(Clone, Debug)]
pub struct Eblc<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for Eblc<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // majorVersion
        cursor.advance::<u16>(); // minorVersion
        cursor.advance::<u32>(); // numSizes
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> Eblc<'a> {
    const BITMAP_SIZES: usize = 8;

    pub fn major_version(&self) -> u16 {
        self.data.read_at(0).unwrap_or_default()
    }

    pub fn minor_version(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }

    pub fn num_sizes(&self) -> u32 {
        self.data.read_at(4).unwrap_or_default()
    }

    /// The [`BitmapSize`] record for strike `index`.
    ///
    /// A declared count larger than the data only fails here, for the
    /// records that actually fall outside the table.
    pub fn bitmap_size(&self, index: usize) -> Result<BitmapSize, ReadError> {
        if index as u64 >= self.num_sizes() as u64 {
            return Err(ReadError::OutOfBounds);
        }
        let start = index
            .checked_mul(BitmapSize::RAW_BYTE_LEN)
            .and_then(|rel| rel.checked_add(Self::BITMAP_SIZES))
            .ok_or(ReadError::OutOfBounds)?;
        let end = start
            .checked_add(BitmapSize::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        let data = self.data.slice(start..end).ok_or(ReadError::OutOfBounds)?;
        BitmapSize::read(data)
    }

    /// All strikes, each resolved independently.
    pub fn bitmap_sizes(&self) -> impl Iterator<Item = Result<BitmapSize, ReadError>> + 'a {
        let this = self.clone();
        (0..this.num_sizes() as usize).map(move |i| this.bitmap_size(i))
    }
}

/// A [BitmapSize](https://docs.microsoft.com/en-us/typography/opentype/spec/eblc#bitmapsize-record) record: one strike in an EBLC table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitmapSize {
    pub index_sub_table_array_offset: u32,
    pub index_tables_size: u32,
    pub number_of_index_sub_tables: u32,
    pub color_ref: u32,
    pub hori: SbitLineMetrics,
    pub vert: SbitLineMetrics,
    pub start_glyph_index: u16,
    pub end_glyph_index: u16,
    pub ppem_x: u8,
    pub ppem_y: u8,
    pub bit_depth: u8,
    pub flags: i8,
}

impl BitmapSize {
    pub const RAW_BYTE_LEN: usize = 48;
}

impl<'a> FontRead<'a> for BitmapSize {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let index_sub_table_array_offset = cursor.read()?;
        let index_tables_size = cursor.read()?;
        let number_of_index_sub_tables = cursor.read()?;
        let color_ref = cursor.read()?;
        let hori = SbitLineMetrics::read(data.slice(16..28).ok_or(ReadError::OutOfBounds)?)?;
        let vert = SbitLineMetrics::read(data.slice(28..40).ok_or(ReadError::OutOfBounds)?)?;
        let mut cursor = data.cursor();
        cursor.advance_by(40);
        Ok(BitmapSize {
            index_sub_table_array_offset,
            index_tables_size,
            number_of_index_sub_tables,
            color_ref,
            hori,
            vert,
            start_glyph_index: cursor.read()?,
            end_glyph_index: cursor.read()?,
            ppem_x: cursor.read()?,
            ppem_y: cursor.read()?,
            bit_depth: cursor.read()?,
            flags: cursor.read()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ot_types::test_helpers::BeBuffer;

    fn sample_line_metrics(ascender: i8) -> [i8; 12] {
        [ascender, -3, 14, 1, 1, 0, 0, 1, 10, -3, 0, 0]
    }

    fn push_bitmap_size(buf: &mut BeBuffer, ppem: u8, start: u16, end: u16) {
        buf.push(0x38u32); // indexSubTableArrayOffset
        buf.push(0x100u32); // indexTablesSize
        buf.push(2u32); // numberOfIndexSubTables
        buf.push(0u32); // colorRef
        buf.extend(sample_line_metrics(12)); // hori
        buf.extend(sample_line_metrics(11)); // vert
        buf.push(start).push(end);
        buf.push(ppem).push(ppem);
        buf.push(1u8); // bitDepth
        buf.push(1i8); // flags: horizontal
    }

    fn sample_eblc(num_sizes: u32) -> BeBuffer {
        let mut buf = BeBuffer::new();
        buf.push(2u16).push(0u16).push(num_sizes);
        buf
    }

    #[test]
    fn read_strikes() {
        let mut buf = sample_eblc(2);
        push_bitmap_size(&mut buf, 12, 1, 120);
        push_bitmap_size(&mut buf, 24, 1, 120);
        let eblc = Eblc::read(FontData::new(&buf)).unwrap();
        assert_eq!(eblc.major_version(), 2);
        assert_eq!(eblc.num_sizes(), 2);

        let strike = eblc.bitmap_size(0).unwrap();
        assert_eq!(strike.index_sub_table_array_offset, 0x38);
        assert_eq!(strike.hori.ascender, 12);
        assert_eq!(strike.hori.descender, -3);
        assert_eq!(strike.vert.ascender, 11);
        assert_eq!(strike.start_glyph_index, 1);
        assert_eq!(strike.end_glyph_index, 120);
        assert_eq!(strike.ppem_x, 12);
        assert_eq!(strike.bit_depth, 1);
        assert_eq!(strike.flags, 1);
        assert_eq!(eblc.bitmap_size(1).unwrap().ppem_x, 24);
        assert_eq!(eblc.bitmap_size(2), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn lying_num_sizes_fails_per_record() {
        let mut buf = sample_eblc(1000);
        push_bitmap_size(&mut buf, 12, 1, 120);
        let eblc = Eblc::read(FontData::new(&buf)).unwrap();
        // the one record that exists still reads
        assert_eq!(eblc.bitmap_size(0).unwrap().ppem_x, 12);
        // everything past the data fails locally
        assert_eq!(eblc.bitmap_size(1), Err(ReadError::OutOfBounds));
        assert_eq!(eblc.bitmap_size(999), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn truncated_header() {
        let mut buf = BeBuffer::new();
        buf.push(2u16).push(0u16);
        assert_eq!(
            Eblc::read(FontData::new(&buf)).map(|_| ()),
            Err(ReadError::OutOfBounds)
        );
    }

    #[test]
    fn small_glyph_metrics() {
        let mut buf = BeBuffer::new();
        buf.push(9u8).push(7u8).push(-1i8).push(8i8).push(8u8);
        let metrics = SmallGlyphMetrics::read(FontData::new(&buf)).unwrap();
        assert_eq!(metrics.height, 9);
        assert_eq!(metrics.width, 7);
        assert_eq!(metrics.bearing_x, -1);
        assert_eq!(metrics.bearing_y, 8);
        assert_eq!(metrics.advance, 8);
    }

    #[test]
    fn big_glyph_metrics() {
        let mut buf = BeBuffer::new();
        buf.push(16u8).push(12u8);
        buf.push(1i8).push(14i8).push(13u8);
        buf.push(-2i8).push(0i8).push(17u8);
        let metrics = BigGlyphMetrics::read(FontData::new(&buf)).unwrap();
        assert_eq!(metrics.hori_advance, 13);
        assert_eq!(metrics.vert_bearing_x, -2);
        assert_eq!(metrics.vert_advance, 17);
    }
}
