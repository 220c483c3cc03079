//! Reading OpenType binary tables
//!
//! This crate provides memory safe zero-allocation parsing of table data.
//! It is unopinionated, and attempts to provide raw access to the underlying
//! bytes as they are described in the [OpenType specification][spec].
//!
//! The caller is responsible for locating a table's byte range (by tag lookup
//! in the font's table directory); this crate is handed raw bytes only and
//! never performs I/O.
//!
//! # Example
//!
//! ```no_run
//! # fn bytes_for_tag(_: ot_types::Tag) -> &'static [u8] { &[] }
//! use read_tables::{tables::gdef::Gdef, FontData, FontRead};
//! use ot_types::{GlyphId, Tag};
//!
//! let data = FontData::new(bytes_for_tag(Tag::new(b"GDEF")));
//! let gdef = Gdef::read(data).expect("malformed GDEF table");
//! if let Some(Ok(attach_list)) = gdef.attach_list() {
//!     let points = attach_list.attach_points(GlyphId::new(5));
//!     println!("{points:?}");
//! }
//! ```
//!
//! [spec]: https://learn.microsoft.com/en-us/typography/opentype/spec/

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod font_data;
mod offset;
mod read;
pub mod tables;

pub use font_data::FontData;
pub use offset::{Offset, ResolveNullableOffset, ResolveOffset};
pub use read::{FontRead, ReadError};

/// Types re-exported from the `ot-types` crate.
pub mod types {
    pub use ot_types::*;
}
