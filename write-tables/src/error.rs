//! Errors that occur during writing

use crate::offset_writer::Label;

/// An error occurred while finishing a table buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteError {
    /// An offset field references a label that was never assigned a position.
    UndefinedLabel(Label),
    /// A label was assigned two different positions.
    LabelRedefined(Label),
    /// The distance from an offset's base to its target does not fit the
    /// field. Negative distances (target before base) are unrepresentable
    /// and reported the same way.
    OffsetOverflow {
        /// Signed distance from the base to the label position.
        distance: i64,
        /// Largest value the offset field can hold.
        max: u32,
    },
    /// An array is too long for its 16-bit count field.
    CountOverflow(usize),
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::UndefinedLabel(label) => {
                write!(f, "offset field references undefined {label:?}")
            }
            WriteError::LabelRedefined(label) => {
                write!(f, "{label:?} defined at two different positions")
            }
            WriteError::OffsetOverflow { distance, max } => {
                write!(f, "offset distance {distance} outside field range 0..={max}")
            }
            WriteError::CountOverflow(len) => {
                write!(f, "array length {len} exceeds uint16 count field")
            }
        }
    }
}

impl std::error::Error for WriteError {}
