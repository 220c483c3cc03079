//! Building binary font tables.
//!
//! This crate is the write-side companion to `read-tables`. It provides:
//!
//! - [`OffsetWriter`], a byte sink that lets you emit an offset field before
//!   the data it points at exists, using [`Label`]s that are patched in when
//!   the buffer is finished;
//! - the OpenType table [`checksum`];
//! - [`builders`] that assemble common subtables on top of the writer.
//!
//! ```
//! use write_tables::{Label, OffsetWriter};
//!
//! let mut writer = OffsetWriter::new();
//! let body = writer.create_label();
//! writer.write(2u16); // some header field
//! writer.write_offset16(body, 0);
//! writer.define_label_here(body).unwrap();
//! writer.write(0xdeadu16);
//! let bytes = writer.finish().unwrap();
//! assert_eq!(bytes[2..4], [0, 4]);
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod builders;
pub mod checksum;
mod error;
mod offset_writer;

pub use error::WriteError;
pub use offset_writer::{Label, OffsetWriter};

/// Re-export of the scalar types used by table fields.
pub mod types {
    pub use ot_types::*;
}
