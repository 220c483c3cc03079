//! The OpenType table checksum.
//!
//! A table's checksum is the wrapping sum of its contents read as big-endian
//! `u32` words. A table whose length is not a multiple of four is treated as
//! if zero padded: the trailing bytes occupy the high bytes of the final
//! word.

/// An incremental checksum over a stream of bytes.
///
/// Data may be appended in chunks of any size; the result depends only on
/// the concatenated bytes, never on the chunking.
///
/// ```
/// use write_tables::checksum::Checksum;
///
/// let mut sum = Checksum::new();
/// sum.append(&[0, 1, 2]);
/// sum.append(&[3, 4]);
/// assert_eq!(sum.finish(), 0x04010203);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Checksum {
    sum: u32,
    /// Bytes of a partially filled word, high bytes first.
    tail: [u8; 4],
    tail_len: usize,
}

impl Checksum {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add bytes to the running sum.
    pub fn append(&mut self, mut bytes: &[u8]) {
        if self.tail_len > 0 {
            let take = (4 - self.tail_len).min(bytes.len());
            self.tail[self.tail_len..self.tail_len + take].copy_from_slice(&bytes[..take]);
            self.tail_len += take;
            bytes = &bytes[take..];
            if self.tail_len < 4 {
                return;
            }
            self.sum = self.sum.wrapping_add(u32::from_be_bytes(self.tail));
            self.tail_len = 0;
        }
        let mut words = bytes.chunks_exact(4);
        for word in &mut words {
            let word = [word[0], word[1], word[2], word[3]];
            self.sum = self.sum.wrapping_add(u32::from_be_bytes(word));
        }
        let rem = words.remainder();
        self.tail[..rem.len()].copy_from_slice(rem);
        self.tail_len = rem.len();
    }

    /// The checksum of everything appended so far, zero padding any
    /// trailing partial word.
    pub fn finish(self) -> u32 {
        if self.tail_len == 0 {
            return self.sum;
        }
        let mut word = [0u8; 4];
        word[..self.tail_len].copy_from_slice(&self.tail[..self.tail_len]);
        self.sum.wrapping_add(u32::from_be_bytes(word))
    }
}

/// Checksum a complete table in one call.
pub fn compute_checksum(table: &[u8]) -> u32 {
    let mut sum = Checksum::new();
    sum.append(table);
    sum.finish()
}

/// Checksum the 'head' table.
///
/// The `checksumAdjustment` field at bytes 8..12 is treated as zero, so the
/// checksum of a finished font's 'head' table matches the value computed
/// before the adjustment was filled in.
pub fn head_table_checksum(table: &[u8]) -> u32 {
    let mut sum = Checksum::new();
    if table.len() <= 8 {
        sum.append(table);
        return sum.finish();
    }
    let adjustment_end = table.len().min(12);
    sum.append(&table[..8]);
    sum.append(&[0u8; 4][..adjustment_end - 8]);
    sum.append(&table[adjustment_end..]);
    sum.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_bytes_are_high_bytes() {
        assert_eq!(compute_checksum(&[0, 1, 2, 3, 4]), 0x04010203);
    }

    #[test]
    fn whole_words() {
        assert_eq!(compute_checksum(&[]), 0);
        assert_eq!(compute_checksum(&[0, 0, 0, 1, 0, 0, 0, 2]), 3);
    }

    #[test]
    fn wrapping_sum() {
        let sum = compute_checksum(&[0xff, 0xff, 0xff, 0xff, 0, 0, 0, 2]);
        assert_eq!(sum, 1);
    }

    #[test]
    fn chunking_is_invariant() {
        let data: Vec<u8> = (0u8..=41).collect();
        let expect = compute_checksum(&data);
        for split in 0..data.len() {
            let (head, tail) = data.split_at(split);
            let mut sum = Checksum::new();
            sum.append(head);
            sum.append(tail);
            assert_eq!(sum.finish(), expect, "split at {split}");
        }
        // byte at a time
        let mut sum = Checksum::new();
        for byte in &data {
            sum.append(std::slice::from_ref(byte));
        }
        assert_eq!(sum.finish(), expect);
    }

    #[test]
    fn head_adjustment_is_ignored() {
        let mut head = vec![0u8; 54];
        head[0] = 1; // majorVersion
        let before = head_table_checksum(&head);
        head[8..12].copy_from_slice(&0xdeadbeefu32.to_be_bytes());
        assert_eq!(head_table_checksum(&head), before);
        // a plain checksum does see the adjustment
        assert_ne!(compute_checksum(&head), before);
    }
}
