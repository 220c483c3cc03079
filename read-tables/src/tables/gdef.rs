//! the [GDEF] table
//!
//! [GDEF]: https://docs.microsoft.com/en-us/typography/opentype/spec/gdef

use ot_types::{GlyphId, Nullable, Offset16, Offset32, Tag};

use crate::font_data::FontData;
use crate::offset::{ResolveNullableOffset, ResolveOffset};
use crate::read::{FontRead, ReadError};

pub use super::layout::{ClassDef, CoverageTable, Device};

/// 'GDEF'
pub const TAG: Tag = Tag::new(b"GDEF");

/// The [GDEF] (Glyph Definition) table header.
///
/// The header length depends on the minor version: 1.0 carries four subtable
/// offsets, 1.2 adds `markGlyphSetsDefOffset`, and 1.3 adds
/// `itemVarStoreOffset`. The version is validated once, when the table is
/// first read; the version-gated accessors then return `None` for older
/// tables instead of reading garbage.
///
/// [GDEF]: https://docs.microsoft.com/en-us/typography/opentype/spec/gdef
#[derive(Clone, Debug)]
pub struct Gdef<'a> {
    data: FontData<'a>,
    minor_version: u16,
}

impl<'a> FontRead<'a> for Gdef<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let major: u16 = cursor.read()?;
        if major != 1 {
            return Err(ReadError::InvalidFormat(major as i64));
        }
        let minor: u16 = cursor.read()?;
        cursor.advance::<Offset16>(); // glyphClassDefOffset
        cursor.advance::<Offset16>(); // attachListOffset
        cursor.advance::<Offset16>(); // ligCaretListOffset
        cursor.advance::<Offset16>(); // markAttachClassDefOffset
        if minor >= 2 {
            cursor.advance::<Offset16>(); // markGlyphSetsDefOffset
        }
        if minor >= 3 {
            cursor.advance::<Offset32>(); // itemVarStoreOffset
        }
        cursor.finish()?;
        Ok(Self {
            data,
            minor_version: minor,
        })
    }
}

impl<'a> Gdef<'a> {
    pub fn major_version(&self) -> u16 {
        self.data.read_at(0).unwrap_or_default()
    }

    pub fn minor_version(&self) -> u16 {
        self.minor_version
    }

    pub fn glyph_class_def_offset(&self) -> Nullable<Offset16> {
        self.data.read_at(4).unwrap_or_default()
    }

    /// The glyph class definition subtable, if present.
    pub fn glyph_class_def(&self) -> Option<Result<ClassDef<'a>, ReadError>> {
        self.glyph_class_def_offset().resolve(self.data)
    }

    pub fn attach_list_offset(&self) -> Nullable<Offset16> {
        self.data.read_at(6).unwrap_or_default()
    }

    /// The attachment point list subtable, if present.
    pub fn attach_list(&self) -> Option<Result<AttachList<'a>, ReadError>> {
        self.attach_list_offset().resolve(self.data)
    }

    pub fn lig_caret_list_offset(&self) -> Nullable<Offset16> {
        self.data.read_at(8).unwrap_or_default()
    }

    /// The ligature caret list subtable, if present.
    pub fn lig_caret_list(&self) -> Option<Result<LigCaretList<'a>, ReadError>> {
        self.lig_caret_list_offset().resolve(self.data)
    }

    pub fn mark_attach_class_def_offset(&self) -> Nullable<Offset16> {
        self.data.read_at(10).unwrap_or_default()
    }

    /// The mark attachment class definition subtable, if present.
    pub fn mark_attach_class_def(&self) -> Option<Result<ClassDef<'a>, ReadError>> {
        self.mark_attach_class_def_offset().resolve(self.data)
    }

    /// `markGlyphSetsDefOffset`, present only in version 1.2 and later.
    pub fn mark_glyph_sets_def_offset(&self) -> Option<Nullable<Offset16>> {
        (self.minor_version >= 2).then(|| self.data.read_at(12).unwrap_or_default())
    }

    /// The mark glyph sets subtable, if the version carries it and the offset
    /// is non-null.
    pub fn mark_glyph_sets_def(&self) -> Option<Result<MarkGlyphSets<'a>, ReadError>> {
        self.mark_glyph_sets_def_offset()
            .and_then(|off| off.resolve(self.data))
    }
}

/// The [Attachment Point List] subtable.
///
/// [Attachment Point List]: https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#attachment-point-list-table
#[derive(Clone, Debug)]
pub struct AttachList<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for AttachList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<Offset16>(); // coverageOffset
        cursor.advance::<u16>(); // glyphCount
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> AttachList<'a> {
    const ATTACH_POINT_OFFSETS: usize = 4;

    pub fn coverage_offset(&self) -> Offset16 {
        self.data.read_at(0).unwrap_or_default()
    }

    /// The coverage table listing the glyphs with attachment points.
    pub fn coverage(&self) -> Result<CoverageTable<'a>, ReadError> {
        self.coverage_offset().resolve(self.data)
    }

    pub fn glyph_count(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }

    /// The raw `attachPointOffset` for the provided coverage index.
    pub fn attach_point_offset(&self, index: usize) -> Result<Offset16, ReadError> {
        if index >= self.glyph_count() as usize {
            return Err(ReadError::OutOfBounds);
        }
        self.data.read_array_item(Self::ATTACH_POINT_OFFSETS, index)
    }

    /// The [`AttachPoint`] for the provided coverage index.
    ///
    /// Each index resolves independently; a corrupt entry does not affect
    /// its siblings.
    pub fn attach_point(&self, index: usize) -> Result<AttachPoint<'a>, ReadError> {
        self.attach_point_offset(index)?.resolve(self.data)
    }

    /// Look up the attachment points for a glyph.
    ///
    /// The result is three-way: `Ok(None)` means the glyph is not covered,
    /// `Ok(Some(_))` is the glyph's attachment point table, and `Err(_)`
    /// means the glyph is covered but the data is malformed (or the coverage
    /// table itself could not be read).
    pub fn attach_points(&self, gid: GlyphId) -> Result<Option<AttachPoint<'a>>, ReadError> {
        match self.coverage()?.get(gid)? {
            Some(coverage_index) => self.attach_point(coverage_index as usize).map(Some),
            None => Ok(None),
        }
    }
}

/// An [Attachment Point] table: contour point indices for one glyph.
///
/// [Attachment Point]: https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#attachment-point-table
#[derive(Clone, Debug)]
pub struct AttachPoint<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for AttachPoint<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // pointCount
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> AttachPoint<'a> {
    const POINT_INDICES: usize = 2;

    pub fn point_count(&self) -> u16 {
        self.data.read_at(0).unwrap_or_default()
    }

    /// Contour point index `index`.
    pub fn point_index(&self, index: usize) -> Result<u16, ReadError> {
        if index >= self.point_count() as usize {
            return Err(ReadError::OutOfBounds);
        }
        self.data.read_array_item(Self::POINT_INDICES, index)
    }

    /// All contour point indices, each bounds checked individually.
    pub fn point_indices(&self) -> impl Iterator<Item = Result<u16, ReadError>> + 'a {
        let this = self.clone();
        (0..this.point_count() as usize).map(move |i| this.point_index(i))
    }
}

/// The [Ligature Caret List] subtable.
///
/// [Ligature Caret List]: https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#ligature-caret-list-table
#[derive(Clone, Debug)]
pub struct LigCaretList<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for LigCaretList<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<Offset16>(); // coverageOffset
        cursor.advance::<u16>(); // ligGlyphCount
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> LigCaretList<'a> {
    const LIG_GLYPH_OFFSETS: usize = 4;

    pub fn coverage_offset(&self) -> Offset16 {
        self.data.read_at(0).unwrap_or_default()
    }

    /// The coverage table listing the ligature glyphs.
    pub fn coverage(&self) -> Result<CoverageTable<'a>, ReadError> {
        self.coverage_offset().resolve(self.data)
    }

    pub fn lig_glyph_count(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }

    pub fn lig_glyph_offset(&self, index: usize) -> Result<Offset16, ReadError> {
        if index >= self.lig_glyph_count() as usize {
            return Err(ReadError::OutOfBounds);
        }
        self.data.read_array_item(Self::LIG_GLYPH_OFFSETS, index)
    }

    /// The [`LigGlyph`] table for the provided coverage index.
    pub fn lig_glyph(&self, index: usize) -> Result<LigGlyph<'a>, ReadError> {
        self.lig_glyph_offset(index)?.resolve(self.data)
    }

    /// Look up the caret data for a ligature glyph.
    ///
    /// Same three-way semantics as [`AttachList::attach_points`].
    pub fn lig_glyph_for(&self, gid: GlyphId) -> Result<Option<LigGlyph<'a>>, ReadError> {
        match self.coverage()?.get(gid)? {
            Some(coverage_index) => self.lig_glyph(coverage_index as usize).map(Some),
            None => Ok(None),
        }
    }
}

/// A [Ligature Glyph] table: caret values for one ligature.
///
/// [Ligature Glyph]: https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#ligature-glyph-table
#[derive(Clone, Debug)]
pub struct LigGlyph<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for LigGlyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // caretCount
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> LigGlyph<'a> {
    const CARET_VALUE_OFFSETS: usize = 2;

    pub fn caret_count(&self) -> u16 {
        self.data.read_at(0).unwrap_or_default()
    }

    pub fn caret_value_offset(&self, index: usize) -> Result<Offset16, ReadError> {
        if index >= self.caret_count() as usize {
            return Err(ReadError::OutOfBounds);
        }
        self.data.read_array_item(Self::CARET_VALUE_OFFSETS, index)
    }

    /// The [`CaretValue`] for caret `index`, resolved independently of its
    /// siblings.
    pub fn caret_value(&self, index: usize) -> Result<CaretValue<'a>, ReadError> {
        self.caret_value_offset(index)?.resolve(self.data)
    }
}

/// A [Caret Value] table.
///
/// The format discriminant selects which of three mutually exclusive payload
/// interpretations is legal to read; the wrong interpretation is
/// unrepresentable once the enum is constructed.
///
/// [Caret Value]: https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#caret-value-tables
#[derive(Clone, Debug)]
pub enum CaretValue<'a> {
    /// A design-unit x or y coordinate.
    Format1(CaretValueFormat1<'a>),
    /// A contour point index.
    Format2(CaretValueFormat2<'a>),
    /// A coordinate with a device table for per-size adjustment.
    Format3(CaretValueFormat3<'a>),
}

impl<'a> FontRead<'a> for CaretValue<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            1 => CaretValueFormat1::read(data).map(Self::Format1),
            2 => CaretValueFormat2::read(data).map(Self::Format2),
            3 => CaretValueFormat3::read(data).map(Self::Format3),
            other => Err(ReadError::InvalidFormat(other as i64)),
        }
    }
}

impl<'a> CaretValue<'a> {
    /// The design-unit coordinate, for the formats that carry one (1 and 3).
    pub fn coordinate(&self) -> Option<i16> {
        match self {
            CaretValue::Format1(table) => Some(table.coordinate()),
            CaretValue::Format2(_) => None,
            CaretValue::Format3(table) => Some(table.coordinate()),
        }
    }
}

/// [CaretValue format 1](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#caretvalue-format-1)
#[derive(Clone, Debug)]
pub struct CaretValueFormat1<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for CaretValueFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // caretValueFormat
        cursor.advance::<i16>(); // coordinate
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> CaretValueFormat1<'a> {
    pub fn coordinate(&self) -> i16 {
        self.data.read_at(2).unwrap_or_default()
    }
}

/// [CaretValue format 2](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#caretvalue-format-2)
#[derive(Clone, Debug)]
pub struct CaretValueFormat2<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for CaretValueFormat2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // caretValueFormat
        cursor.advance::<u16>(); // caretValuePointIndex
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> CaretValueFormat2<'a> {
    pub fn caret_value_point_index(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }
}

/// [CaretValue format 3](https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#caretvalue-format-3)
#[derive(Clone, Debug)]
pub struct CaretValueFormat3<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for CaretValueFormat3<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        cursor.advance::<u16>(); // caretValueFormat
        cursor.advance::<i16>(); // coordinate
        cursor.advance::<Offset16>(); // deviceOffset
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> CaretValueFormat3<'a> {
    pub fn coordinate(&self) -> i16 {
        self.data.read_at(2).unwrap_or_default()
    }

    pub fn device_offset(&self) -> Offset16 {
        self.data.read_at(4).unwrap_or_default()
    }

    /// The device table adjusting the coordinate for specific sizes.
    pub fn device(&self) -> Result<Device<'a>, ReadError> {
        self.device_offset().resolve(self.data)
    }
}

/// The [Mark Glyph Sets] subtable (GDEF version 1.2+).
///
/// [Mark Glyph Sets]: https://docs.microsoft.com/en-us/typography/opentype/spec/gdef#mark-glyph-sets-table
#[derive(Clone, Debug)]
pub struct MarkGlyphSets<'a> {
    data: FontData<'a>,
}

impl<'a> FontRead<'a> for MarkGlyphSets<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        if format != 1 {
            return Err(ReadError::InvalidFormat(format as i64));
        }
        cursor.advance::<u16>(); // markGlyphSetCount
        cursor.finish()?;
        Ok(Self { data })
    }
}

impl<'a> MarkGlyphSets<'a> {
    const COVERAGE_OFFSETS: usize = 4;

    pub fn format(&self) -> u16 {
        self.data.read_at(0).unwrap_or_default()
    }

    pub fn mark_glyph_set_count(&self) -> u16 {
        self.data.read_at(2).unwrap_or_default()
    }

    /// Mark glyph set coverage offsets are 32-bit, unlike the rest of GDEF.
    pub fn coverage_offset(&self, index: usize) -> Result<Offset32, ReadError> {
        if index >= self.mark_glyph_set_count() as usize {
            return Err(ReadError::OutOfBounds);
        }
        self.data.read_array_item(Self::COVERAGE_OFFSETS, index)
    }

    /// The coverage table for mark glyph set `index`.
    pub fn coverage(&self, index: usize) -> Result<CoverageTable<'a>, ReadError> {
        self.coverage_offset(index)?.resolve(self.data)
    }

    /// `true` if the glyph belongs to mark glyph set `index`.
    pub fn covered(&self, index: usize, gid: GlyphId) -> Result<bool, ReadError> {
        Ok(self.coverage(index)?.get(gid)?.is_some())
    }
}
