//! Builders that assemble subtables on top of [`OffsetWriter`].
//!
//! [`OffsetWriter`]: crate::OffsetWriter

pub mod gdef;
pub mod layout;
