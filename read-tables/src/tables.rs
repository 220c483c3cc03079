//! Typed table definitions

pub mod bitmap;
pub mod gdef;
pub mod layout;
