//! A byte sink with deferred offset patching.

use ot_types::Scalar;

use crate::error::WriteError;

/// A position in the output that may not be known yet.
///
/// Labels are created by [`OffsetWriter::create_label`] and are only
/// meaningful for the writer that created them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Label(u32);

#[derive(Clone, Copy, Debug)]
enum OffsetWidth {
    Two,
    Four,
}

impl OffsetWidth {
    fn max_value(self) -> u32 {
        match self {
            OffsetWidth::Two => u16::MAX as u32,
            OffsetWidth::Four => u32::MAX,
        }
    }
}

/// A reserved offset field, patched when the writer is finished.
#[derive(Clone, Copy, Debug)]
struct Patch {
    /// Position of the reserved field in the buffer.
    at: usize,
    /// Position offsets stored in this field are measured from.
    base: usize,
    label: Label,
    width: OffsetWidth,
}

/// A growable byte buffer that can write offset fields before their targets
/// have been laid out.
///
/// Offsets in font tables are relative to the start of the table that
/// declares them, so an offset field generally has to be written before the
/// subtable it points at. [`write_offset16`] and [`write_offset32`] reserve
/// a zeroed field tied to a [`Label`]; once every label has been defined,
/// [`finish`] patches the reserved fields and returns the bytes. Ordering
/// is free: a label may be defined before or after the fields that
/// reference it.
///
/// [`write_offset16`]: OffsetWriter::write_offset16
/// [`write_offset32`]: OffsetWriter::write_offset32
/// [`finish`]: OffsetWriter::finish
#[derive(Debug, Default)]
pub struct OffsetWriter {
    buf: Vec<u8>,
    /// Indexed by label id.
    labels: Vec<Option<usize>>,
    patches: Vec<Patch>,
}

impl OffsetWriter {
    pub fn new() -> Self {
        Default::default()
    }

    /// The current write position, which is always the end of the buffer.
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Allocate a new, undefined label.
    pub fn create_label(&mut self) -> Label {
        let label = Label(self.labels.len() as u32);
        self.labels.push(None);
        label
    }

    /// Assign a position to a label.
    ///
    /// Defining a label twice with the same position is a no-op; defining it
    /// with a different position is an error.
    pub fn define_label(&mut self, label: Label, pos: usize) -> Result<(), WriteError> {
        match &mut self.labels[label.0 as usize] {
            Some(existing) if *existing != pos => Err(WriteError::LabelRedefined(label)),
            slot => {
                *slot = Some(pos);
                Ok(())
            }
        }
    }

    /// Assign the current write position to a label.
    pub fn define_label_here(&mut self, label: Label) -> Result<(), WriteError> {
        self.define_label(label, self.position())
    }

    /// Append any scalar in its big-endian representation.
    pub fn write<T: Scalar>(&mut self, value: T) {
        self.buf.extend_from_slice(value.to_raw().as_ref());
    }

    /// Append raw bytes verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.write(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.write(value);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write(value);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write(value);
    }

    /// Reserve a 16-bit offset field pointing at `label`, measured from
    /// `base`.
    pub fn write_offset16(&mut self, label: Label, base: usize) {
        self.reserve_offset(label, base, OffsetWidth::Two);
    }

    /// Reserve a 32-bit offset field pointing at `label`, measured from
    /// `base`.
    pub fn write_offset32(&mut self, label: Label, base: usize) {
        self.reserve_offset(label, base, OffsetWidth::Four);
    }

    fn reserve_offset(&mut self, label: Label, base: usize, width: OffsetWidth) {
        let at = self.position();
        self.patches.push(Patch {
            at,
            base,
            label,
            width,
        });
        let len = match width {
            OffsetWidth::Two => 2,
            OffsetWidth::Four => 4,
        };
        self.buf.extend(std::iter::repeat(0).take(len));
    }

    /// Pad with zero bytes until the position is a multiple of `alignment`.
    pub fn align(&mut self, alignment: usize) {
        while self.buf.len() % alignment != 0 {
            self.buf.push(0);
        }
    }

    /// Pad with zero bytes to a 2-byte boundary.
    pub fn align2(&mut self) {
        self.align(2);
    }

    /// Pad with zero bytes to a 4-byte boundary.
    pub fn align4(&mut self) {
        self.align(4);
    }

    /// Patch every reserved offset field and return the buffer.
    ///
    /// Fails if any referenced label is undefined, or if a label's distance
    /// from its base does not fit the reserved field.
    pub fn finish(mut self) -> Result<Vec<u8>, WriteError> {
        log::debug!(
            "patching {} offsets in {} byte buffer",
            self.patches.len(),
            self.buf.len()
        );
        for patch in &self.patches {
            let pos = self.labels[patch.label.0 as usize]
                .ok_or(WriteError::UndefinedLabel(patch.label))?;
            let distance = pos as i64 - patch.base as i64;
            let max = patch.width.max_value();
            if distance < 0 || distance > max as i64 {
                return Err(WriteError::OffsetOverflow { distance, max });
            }
            match patch.width {
                OffsetWidth::Two => self.buf[patch.at..patch.at + 2]
                    .copy_from_slice(&(distance as u16).to_be_bytes()),
                OffsetWidth::Four => self.buf[patch.at..patch.at + 4]
                    .copy_from_slice(&(distance as u32).to_be_bytes()),
            }
        }
        Ok(self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_forward_reference() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut writer = OffsetWriter::new();
        let label = writer.create_label();
        writer.write(0u16);
        writer.write_offset16(label, 0);
        writer.write_bytes(&[0xaa; 6]);
        writer.define_label_here(label).unwrap();
        writer.write(0xbeefu16);
        let bytes = writer.finish().unwrap();
        // label was defined at position 10
        assert_eq!(bytes[2..4], [0, 10]);
        assert_eq!(bytes[10..12], [0xbe, 0xef]);
    }

    #[test]
    fn patch_backward_reference() {
        let mut writer = OffsetWriter::new();
        let label = writer.create_label();
        writer.write(1u32);
        writer.define_label_here(label).unwrap();
        writer.write(2u32);
        writer.write_offset32(label, 0);
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes[8..12], [0, 0, 0, 4]);
    }

    #[test]
    fn base_relative_distances() {
        let mut writer = OffsetWriter::new();
        writer.write_bytes(&[0; 6]);
        let subtable = writer.position(); // 6
        let label = writer.create_label();
        writer.write_offset16(label, subtable);
        writer.define_label_here(label).unwrap();
        let bytes = writer.finish().unwrap();
        // distance is measured from the subtable, not the buffer start
        assert_eq!(bytes[6..8], [0, 2]);
    }

    #[test]
    fn define_label_is_idempotent() {
        let mut writer = OffsetWriter::new();
        let label = writer.create_label();
        writer.write_bytes(&[0; 4]);
        assert!(writer.define_label(label, 4).is_ok());
        assert!(writer.define_label(label, 4).is_ok());
        assert_eq!(
            writer.define_label(label, 6),
            Err(WriteError::LabelRedefined(label))
        );
    }

    #[test]
    fn undefined_label_fails_finish() {
        let mut writer = OffsetWriter::new();
        let label = writer.create_label();
        writer.write_offset16(label, 0);
        assert_eq!(
            writer.finish(),
            Err(WriteError::UndefinedLabel(label))
        );
    }

    #[test]
    fn offset16_overflow() {
        let mut writer = OffsetWriter::new();
        let label = writer.create_label();
        writer.write_offset16(label, 0);
        writer.write_bytes(&vec![0; 70_000]);
        writer.define_label_here(label).unwrap();
        assert_eq!(
            writer.finish(),
            Err(WriteError::OffsetOverflow {
                distance: 70_002,
                max: u16::MAX as u32,
            })
        );
    }

    #[test]
    fn offset32_accepts_what_offset16_cannot() {
        let mut writer = OffsetWriter::new();
        let label = writer.create_label();
        writer.write_offset32(label, 0);
        writer.write_bytes(&vec![0; 70_000]);
        writer.define_label_here(label).unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes[0..4], 70_004u32.to_be_bytes());
    }

    #[test]
    fn target_before_base_overflows() {
        let mut writer = OffsetWriter::new();
        let label = writer.create_label();
        writer.define_label_here(label).unwrap();
        writer.write(0u32);
        writer.write_offset16(label, 8);
        assert_eq!(
            writer.finish(),
            Err(WriteError::OffsetOverflow {
                distance: -8,
                max: u16::MAX as u32,
            })
        );
    }

    #[test]
    fn align_pads_with_zeros() {
        let mut writer = OffsetWriter::new();
        writer.write(1u8);
        writer.align(4);
        assert_eq!(writer.position(), 4);
        writer.align(4); // already aligned
        assert_eq!(writer.position(), 4);
    }
}
