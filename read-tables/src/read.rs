//! Traits for interpreting table data

use crate::font_data::FontData;

/// A type that can be read from raw table data.
///
/// This trait is implemented for all tables that are self-describing: that
/// is, tables that do not require any external state in order to interpret
/// their underlying bytes.
///
/// `read` validates that the fixed-size portion of the table (including any
/// version-gated fields) is present; array contents are *not* pre-validated,
/// and are bounds checked individually on access instead.
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// An error that occurs when reading table data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A computed byte span fell outside the data.
    ///
    /// This is always recoverable locally, as "this lookup failed": malformed
    /// or truncated input is an expected condition, not a fault.
    OutOfBounds,
    /// A format or version field has a value the reader does not recognize.
    // i64 is flexible enough to store any value we might encounter
    InvalidFormat(i64),
    /// A length or count field is inconsistent with the item size.
    InvalidArrayLen,
    /// An offset whose target is required was the `0` sentinel.
    ///
    /// Distinct from [`OutOfBounds`](ReadError::OutOfBounds): callers branch on
    /// this to implement "not present" as opposed to "present but broken".
    NullOffset,
    MalformedData(&'static str),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::InvalidFormat(x) => write!(f, "Invalid format '{x}'"),
            ReadError::InvalidArrayLen => {
                write!(f, "Specified array length not a multiple of item size")
            }
            ReadError::NullOffset => write!(f, "An offset was unexpectedly null"),
            ReadError::MalformedData(msg) => write!(f, "Malformed data: '{msg}'"),
        }
    }
}

impl std::error::Error for ReadError {}
