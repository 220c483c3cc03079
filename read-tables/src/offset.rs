//! Handling offsets

use ot_types::{Nullable, Offset16, Offset32};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};

/// Any offset type.
pub trait Offset: Copy {
    fn to_usize(self) -> usize;

    /// Returns the offset as a `usize`, unless it is the `0` sentinel.
    fn non_null(self) -> Option<usize> {
        match self.to_usize() {
            0 => None,
            other => Some(other),
        }
    }
}

macro_rules! impl_offset {
    ($name:ident) => {
        impl Offset for $name {
            #[inline]
            fn to_usize(self) -> usize {
                self.to_u32() as _
            }
        }
    };
}

impl_offset!(Offset16);
impl_offset!(Offset32);

/// A helper trait providing a 'resolve' method for offset types
///
/// `data` must be the [`FontData`] anchored at the start of the table that
/// declares the offset; by convention offsets are relative to that position.
pub trait ResolveOffset {
    fn resolve<'a, T: FontRead<'a>>(&self, data: FontData<'a>) -> Result<T, ReadError>;
}

/// A helper trait providing a 'resolve' method for nullable offset types
pub trait ResolveNullableOffset {
    /// Returns `None` if the offset is the `0` ("no subtable") sentinel.
    ///
    /// A non-null offset that cannot be resolved is `Some(Err(_))`, so a
    /// caller can always distinguish absent from malformed.
    fn resolve<'a, T: FontRead<'a>>(&self, data: FontData<'a>) -> Option<Result<T, ReadError>>;
}

impl<O: Offset> ResolveOffset for O {
    fn resolve<'a, T: FontRead<'a>>(&self, data: FontData<'a>) -> Result<T, ReadError> {
        self.non_null()
            .ok_or(ReadError::NullOffset)
            .and_then(|off| data.split_off(off).ok_or(ReadError::OutOfBounds))
            .and_then(T::read)
    }
}

impl<O: Offset + Copy> ResolveNullableOffset for Nullable<O> {
    fn resolve<'a, T: FontRead<'a>>(&self, data: FontData<'a>) -> Option<Result<T, ReadError>> {
        match self.offset().resolve(data) {
            Ok(thing) => Some(Ok(thing)),
            Err(ReadError::NullOffset) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Raw<'a>(FontData<'a>);

    impl<'a> FontRead<'a> for Raw<'a> {
        fn read(data: FontData<'a>) -> Result<Self, ReadError> {
            Ok(Raw(data))
        }
    }

    #[test]
    fn null_offset_is_absent_not_error() {
        let data = FontData::new(&[1, 2, 3, 4]);
        let off = Nullable::new(Offset16::new(0));
        assert!(off.resolve::<Raw>(data).is_none());

        // same raw value through the non-nullable path is an error
        let off = Offset16::new(0);
        assert_eq!(
            off.resolve::<Raw>(data).map(|_| ()),
            Err(ReadError::NullOffset)
        );
    }

    #[test]
    fn null_is_absent_even_for_empty_buffer() {
        let data = FontData::new(&[]);
        assert!(Nullable::new(Offset32::new(0)).resolve::<Raw>(data).is_none());
    }

    #[test]
    fn out_of_bounds_target() {
        let data = FontData::new(&[1, 2, 3, 4]);
        let off = Nullable::new(Offset16::new(5));
        assert_eq!(
            off.resolve::<Raw>(data).map(|r| r.map(|_| ())),
            Some(Err(ReadError::OutOfBounds))
        );
    }

    #[test]
    fn resolved_window_is_table_relative() {
        let data = FontData::new(&[0, 0, 9, 8]);
        let raw = Offset16::new(2).resolve::<Raw>(data).unwrap();
        assert_eq!(raw.0.as_bytes(), &[9, 8]);
    }
}
