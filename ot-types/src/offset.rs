//! Offsets to tables

/// A raw value that is possibly the null (`0`) sentinel.
///
/// Specific offset fields in a table may be documented as permitting a null
/// value, meaning the referenced subtable is simply not present. This wrapper
/// records that fact in the type, so that generic resolution code can report
/// "absent" separately from "out of bounds".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Nullable<T>(T);

impl<T> Nullable<T> {
    /// Construct a new `Nullable` around some offset.
    pub const fn new(offset: T) -> Self {
        Self(offset)
    }

    /// The wrapped offset value.
    pub fn offset(&self) -> &T {
        &self.0
    }
}

impl<T: crate::Scalar> crate::Scalar for Nullable<T> {
    type Raw = T::Raw;
    fn from_raw(raw: Self::Raw) -> Self {
        Self(T::from_raw(raw))
    }

    fn to_raw(self) -> Self::Raw {
        self.0.to_raw()
    }
}

macro_rules! impl_offset {
    ($name:ident, $bits:literal, $rawty:ty) => {
        #[doc = concat!("A ", stringify!($bits), "-bit offset to a table.")]
        ///
        /// The offset is relative to the start of the table that contains it,
        /// never absolute within the file.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name($rawty);

        impl $name {
            /// Create a new offset.
            pub const fn new(raw: $rawty) -> Self {
                Self(raw)
            }

            /// Return the raw integer value of this offset.
            pub const fn to_u32(self) -> u32 {
                self.0 as u32
            }

            /// `true` if this offset is the `0` ("no subtable") sentinel.
            pub const fn is_null(self) -> bool {
                self.0 == 0
            }
        }

        impl crate::Scalar for $name {
            type Raw = <$rawty as crate::Scalar>::Raw;
            fn from_raw(raw: Self::Raw) -> Self {
                Self(<$rawty>::from_raw(raw))
            }

            fn to_raw(self) -> Self::Raw {
                self.0.to_raw()
            }
        }
    };
}

impl_offset!(Offset16, 16, u16);
impl_offset!(Offset32, 32, u32);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;

    #[test]
    fn null_sentinel() {
        assert!(Offset16::new(0).is_null());
        assert!(!Offset16::new(10).is_null());
        assert!(Offset32::new(0).is_null());
    }

    #[test]
    fn be_repr() {
        assert_eq!(Offset16::new(10).to_raw(), [0, 10]);
        assert_eq!(Offset32::new(0x0102_0304).to_raw(), [1, 2, 3, 4]);
        assert_eq!(Nullable::new(Offset16::new(7)).to_raw(), [0, 7]);
    }
}
