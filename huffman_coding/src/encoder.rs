//! Encoding sequences of symbols with a code table.

use std::borrow::Borrow;
use std::hash::Hash;
use dyn_size_of::GetSize;

use crate::{BitString, CodeTable, DecodeError, Error};

/// Bytes of an encoded sequence together with the exact number of meaningful bits.
///
/// The bits are packed most significant bit first and the last byte is padded with zeros.
/// A payload can be decoded only with the tree (or code table) that produced it.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct EncodedPayload {
    /// Packed bits.
    pub bytes: Box<[u8]>,
    /// Number of bits in `bytes` that are not padding.
    pub bit_len: usize
}

impl EncodedPayload {
    /// Packs `bits`.
    pub fn from_bits(bits: &BitString) -> Self {
        Self { bytes: bits.to_bytes().into_boxed_slice(), bit_len: bits.len() }
    }

    /// Unpacks the meaningful bits, discarding the padding.
    pub fn bits(&self) -> Result<BitString, DecodeError> {
        BitString::from_bytes_exact(&self.bytes, self.bit_len)
    }

    /// Returns number of padding bits in the last byte,
    /// or `0` if `bit_len` exceeds the number of bits in `bytes`.
    #[inline] pub fn padding(&self) -> usize { (self.bytes.len() * 8).saturating_sub(self.bit_len) }
}

impl From<&BitString> for EncodedPayload {
    #[inline] fn from(bits: &BitString) -> Self { Self::from_bits(bits) }
}

impl GetSize for EncodedPayload {
    fn size_bytes_dyn(&self) -> usize { self.bytes.len() }
    const USES_DYN_MEM: bool = true;
}

impl<S: Hash + Eq> CodeTable<S> {
    /// Encodes `sequence` as concatenation of codewords of its symbols.
    ///
    /// Fails with [`Error::UnknownSymbol`] if some symbol has no codeword.
    pub fn encode_to_bits<Iter>(&self, sequence: Iter) -> Result<BitString, Error>
        where Iter: IntoIterator, Iter::Item: Borrow<S>
    {
        let mut result = BitString::new();
        for (position, symbol) in sequence.into_iter().enumerate() {
            let code = self.get(symbol.borrow()).ok_or(Error::UnknownSymbol { position })?;
            result.extend_from_bits(code);
        }
        Ok(result)
    }

    /// Encodes `sequence` and packs the bits into bytes, most significant bit first,
    /// padding the last byte with zeros.
    ///
    /// The number of bits is lost, so decoding requires it to be recorded separately,
    /// see [`Self::encode`].
    pub fn encode_to_bytes<Iter>(&self, sequence: Iter) -> Result<Vec<u8>, Error>
        where Iter: IntoIterator, Iter::Item: Borrow<S>
    {
        self.encode_to_bits(sequence).map(|bits| bits.to_bytes())
    }

    /// Encodes `sequence` into packed bytes, keeping the exact number of bits.
    pub fn encode<Iter>(&self, sequence: Iter) -> Result<EncodedPayload, Error>
        where Iter: IntoIterator, Iter::Item: Borrow<S>
    {
        self.encode_to_bits(sequence).map(|bits| EncodedPayload::from_bits(&bits))
    }
}

/// Encodes `sequence` with `codes`, see [`CodeTable::encode_to_bits`].
#[inline] pub fn encode_to_bits<S, Iter>(sequence: Iter, codes: &CodeTable<S>) -> Result<BitString, Error>
    where S: Hash + Eq, Iter: IntoIterator, Iter::Item: Borrow<S>
{
    codes.encode_to_bits(sequence)
}

/// Encodes `sequence` with `codes` into padded bytes, see [`CodeTable::encode_to_bytes`].
#[inline] pub fn encode_to_bytes<S, Iter>(sequence: Iter, codes: &CodeTable<S>) -> Result<Vec<u8>, Error>
    where S: Hash + Eq, Iter: IntoIterator, Iter::Item: Borrow<S>
{
    codes.encode_to_bytes(sequence)
}

/// Encodes `sequence` with `codes` into [`EncodedPayload`], see [`CodeTable::encode`].
#[inline] pub fn encode<S, Iter>(sequence: Iter, codes: &CodeTable<S>) -> Result<EncodedPayload, Error>
    where S: Hash + Eq, Iter: IntoIterator, Iter::Item: Borrow<S>
{
    codes.encode(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HuffmanTree;

    fn codes_of(text: &str) -> CodeTable<char> {
        HuffmanTree::from_iter(text.chars()).unwrap().code_table()
    }

    #[test]
    fn concatenates_codewords() {
        // c=0, a=10, b=11
        let codes = codes_of("abbccc");
        assert_eq!(codes.encode_to_bits("abbccc".chars()).unwrap().to_string(), "101111000");
        assert_eq!(encode_to_bits("cab".chars(), &codes).unwrap().to_string(), "01011");
        assert!(codes.encode_to_bits("".chars()).unwrap().is_empty());
    }

    #[test]
    fn single_symbol() {
        let codes = codes_of("aaaa");
        assert_eq!(codes.encode_to_bits("aaaa".chars()).unwrap().to_string(), "0000");
    }

    #[test]
    fn unknown_symbol() {
        let codes = codes_of("abbccc");
        assert_eq!(codes.encode_to_bits("abxc".chars()), Err(Error::UnknownSymbol { position: 2 }));
        assert_eq!(encode_to_bytes("d".chars(), &codes), Err(Error::UnknownSymbol { position: 0 }));
    }

    #[test]
    fn packs_with_zero_padding() {
        let codes = codes_of("abbccc");
        // 10111100 0 -> 0xBC, 0x00
        assert_eq!(codes.encode_to_bytes("abbccc".chars()).unwrap(), vec![0xBC, 0x00]);
        let payload = encode("abbccc".chars(), &codes).unwrap();
        assert_eq!(payload.bytes.as_ref(), [0xBC, 0x00]);
        assert_eq!(payload.bit_len, 9);
        assert_eq!(payload.padding(), 7);
        assert_eq!(payload.bits().unwrap().to_string(), "101111000");
        assert_eq!(payload.size_bytes_dyn(), 2);
    }

    #[test]
    fn inconsistent_payload() {
        let payload = EncodedPayload { bytes: Box::new([0]), bit_len: 9 };
        assert_eq!(payload.padding(), 0);
        assert_eq!(payload.bits(), Err(DecodeError::BitLengthOutOfRange { bit_len: 9, available: 8 }));
        let tree = HuffmanTree::from_iter("ab".chars()).unwrap();
        assert_eq!(tree.decode_payload(&payload), Err(DecodeError::BitLengthOutOfRange { bit_len: 9, available: 8 }));
    }

    #[test]
    fn encodes_borrowed_symbols() {
        let words = ["to", "be", "or", "not", "to", "be"];
        let codes = HuffmanTree::<&str>::from_iter(words.iter()).unwrap().code_table();
        let bits = codes.encode_to_bits(&words).unwrap();
        assert_eq!(bits.len(), words.iter().map(|w| codes.get(w).unwrap().len()).sum::<usize>());
    }
}
