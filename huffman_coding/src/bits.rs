//! Growable sequence of bits, used for codewords and encoded streams.

use std::fmt;
use std::str::FromStr;
use bitm::{BitAccess, ceiling_div};
use dyn_size_of::GetSize;

use crate::DecodeError;

/// Ordered sequence of binary digits.
///
/// Bits are stored in 64-bit words, the `i`-th bit at position `i % 64` of the word `i / 64`.
/// Bits past `len` are always zero, so derived equality compares contents only.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    words: Vec<u64>,
    len: usize
}

impl BitString {
    /// Constructs an empty bit string.
    #[inline] pub fn new() -> Self { Self::default() }

    /// Constructs an empty bit string able to hold `bits` bits without reallocating.
    #[inline] pub fn with_capacity(bits: usize) -> Self {
        Self { words: Vec::with_capacity(ceiling_div(bits, 64)), len: 0 }
    }

    /// Returns the number of bits.
    #[inline] pub fn len(&self) -> usize { self.len }

    /// Returns whether `self` has no bits.
    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Appends `bit` to the end.
    pub fn push(&mut self, bit: bool) {
        if self.len % 64 == 0 { self.words.push(0); }
        if bit { self.words.set_bit(self.len); }
        self.len += 1;
    }

    /// Appends all bits of `other` to the end.
    pub fn extend_from_bits(&mut self, other: &BitString) {
        if self.len % 64 == 0 {
            self.words.extend_from_slice(&other.words);
            self.len += other.len;
        } else {
            self.words.reserve(ceiling_div(other.len, 64));
            for bit in other.iter() { self.push(bit); }
        }
    }

    /// Returns the bit at `index` or `None` if `index` is out of range.
    #[inline] pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.len).then(|| self.words.get_bit(index))
    }

    /// Returns an iterator over the bits, from the first one.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.words.get_bit(i))
    }

    /// Returns a copy of the first `len` bits, or `None` if `self` is shorter.
    pub fn prefix(&self, len: usize) -> Option<BitString> {
        if len > self.len { return None; }
        let mut words = self.words[..ceiling_div(len, 64)].to_vec();
        if len % 64 != 0 {
            if let Some(last) = words.last_mut() { *last &= (1u64 << (len % 64)) - 1; }
        }
        Some(Self { words, len })
    }

    /// Returns whether `self` is a prefix of (or equal to) `other`.
    pub fn is_prefix_of(&self, other: &BitString) -> bool {
        other.prefix(self.len).map_or(false, |p| p == *self)
    }

    /// Returns the number of bytes needed to store `self` packed.
    #[inline] pub fn bytes_len(&self) -> usize { ceiling_div(self.len, 8) }

    /// Packs the bits into bytes, most significant bit first.
    /// The last byte is padded with zero bits.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = vec![0u8; self.bytes_len()];
        for (i, bit) in self.iter().enumerate() {
            if bit { result[i / 8] |= 0x80 >> (i % 8); }
        }
        result
    }

    /// Unpacks all bits of `bytes`, most significant bit of each byte first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut result = Self::with_capacity(bytes.len() * 8);
        for byte in bytes {
            for shift in (0..8).rev() { result.push(byte & (1 << shift) != 0); }
        }
        result
    }

    /// Unpacks the first `bit_len` bits of `bytes`, discarding the rest (usually padding).
    pub fn from_bytes_exact(bytes: &[u8], bit_len: usize) -> Result<Self, DecodeError> {
        let available = bytes.len() * 8;
        if bit_len > available {
            return Err(DecodeError::BitLengthOutOfRange { bit_len, available });
        }
        let mut result = Self::with_capacity(bit_len);
        for i in 0..bit_len {
            result.push(bytes[i / 8] & (0x80 >> (i % 8)) != 0);
        }
        Ok(result)
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut result = Self::with_capacity(iter.size_hint().0);
        for bit in iter { result.push(bit); }
        result
    }
}

impl Extend<bool> for BitString {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter { self.push(bit); }
    }
}

/// Parses strings of `0` and `1` characters.
impl FromStr for BitString {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut result = Self::with_capacity(s.len());
        for (position, character) in s.chars().enumerate() {
            match character {
                '0' => result.push(false),
                '1' => result.push(true),
                _ => return Err(DecodeError::IllegalCharacter { character, position })
            }
        }
        Ok(result)
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() { f.write_str(if bit { "1" } else { "0" })?; }
        Ok(())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitString(\"{}\")", self)
    }
}

impl GetSize for BitString {
    fn size_bytes_dyn(&self) -> usize { self.words.size_bytes_dyn() }
    fn size_bytes_content_dyn(&self) -> usize { self.words.size_bytes_content_dyn() }
    const USES_DYN_MEM: bool = true;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString { s.parse().unwrap() }

    #[test]
    fn push_and_get() {
        let mut b = BitString::new();
        assert!(b.is_empty());
        b.push(true);
        b.push(false);
        b.push(true);
        assert_eq!(b.len(), 3);
        assert_eq!(b.get(0), Some(true));
        assert_eq!(b.get(1), Some(false));
        assert_eq!(b.get(2), Some(true));
        assert_eq!(b.get(3), None);
        assert_eq!(b.to_string(), "101");
    }

    #[test]
    fn long_strings_cross_words() {
        let text = "1011".repeat(40);
        let b = bits(&text);
        assert_eq!(b.len(), 160);
        assert_eq!(b.to_string(), text);
        assert_eq!(b.iter().filter(|b| *b).count(), 120);
    }

    #[test]
    fn extend() {
        let mut b = bits("1");
        b.extend_from_bits(&bits("0110"));
        assert_eq!(b, bits("10110"));
        let mut aligned = bits(&"0".repeat(64));
        aligned.extend_from_bits(&bits("11"));
        assert_eq!(aligned.len(), 66);
        assert_eq!(aligned.get(64), Some(true));
        assert_eq!(aligned, bits(&format!("{}11", "0".repeat(64))));
    }

    #[test]
    fn prefixes() {
        assert!(bits("10").is_prefix_of(&bits("101")));
        assert!(bits("101").is_prefix_of(&bits("101")));
        assert!(!bits("11").is_prefix_of(&bits("101")));
        assert!(!bits("1011").is_prefix_of(&bits("101")));
        assert!(BitString::new().is_prefix_of(&bits("0")));
        assert_eq!(bits("0111").prefix(2), Some(bits("01")));
        assert_eq!(bits("0111").prefix(5), None);
    }

    #[test]
    fn illegal_character() {
        assert_eq!("01x1".parse::<BitString>(),
                   Err(DecodeError::IllegalCharacter { character: 'x', position: 2 }));
    }

    #[test]
    fn pack_msb_first() {
        let b = bits("1000000101");
        assert_eq!(b.bytes_len(), 2);
        assert_eq!(b.to_bytes(), vec![0b1000_0001, 0b0100_0000]);
        assert_eq!(BitString::from_bytes(&[0b1000_0001]), bits("10000001"));
        assert_eq!(BitString::from_bytes_exact(&[0b1000_0001, 0b0100_0000], 10), Ok(b));
        assert_eq!(BitString::from_bytes_exact(&[0xFF], 9),
                   Err(DecodeError::BitLengthOutOfRange { bit_len: 9, available: 8 }));
        assert!(BitString::new().to_bytes().is_empty());
    }

    #[test]
    fn size() {
        let b = bits(&"1".repeat(65));
        assert!(b.size_bytes_content_dyn() >= 2 * 8);
    }
}
