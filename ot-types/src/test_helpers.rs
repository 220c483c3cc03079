//! small utilities used in tests

use crate::Scalar;

/// A convenience type for generating a buffer of big-endian bytes.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer(Vec<u8>);

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// The current length of the buffer.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Write any scalar to this buffer.
    pub fn push(&mut self, item: impl Scalar) -> &mut Self {
        self.0.extend(item.to_raw().as_ref());
        self
    }

    /// Write multiple scalars into the buffer
    pub fn extend<T: Scalar>(&mut self, iter: impl IntoIterator<Item = T>) -> &mut Self {
        for item in iter {
            self.0.extend(item.to_raw().as_ref());
        }
        self
    }

    /// The finished bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.clone()
    }
}

impl std::ops::Deref for BeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for BeBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn be_order() {
        let mut buf = BeBuffer::new();
        buf.push(1u16).extend([2u32, 3]).push(-1i8);
        assert_eq!(&*buf, &[0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0xff]);
    }
}
