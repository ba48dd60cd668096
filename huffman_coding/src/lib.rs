#![doc = include_str!("../README.md")]

use std::borrow::Borrow;
use std::hash::Hash;
use std::io::{Read, Write};
use dyn_size_of::GetSize;

mod error;
pub use error::{DecodeError, Error, Result};
mod frequencies;
pub use frequencies::{count, Frequencies, FrequencyTable};
mod bits;
pub use bits::BitString;
mod tree;
pub use tree::{HuffmanTree, Node};
mod code;
pub use code::CodeTable;
mod encoder;
pub use encoder::{encode, encode_to_bits, encode_to_bytes, EncodedPayload};
mod decoder;
pub use decoder::{decode_bits, decode_bytes, Decoder, DecodingResult};
mod io;

/// Huffman tree bundled with its code table, ready to both encode and decode.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Coding<S: Hash + Eq> {
    /// Tree used for decoding.
    pub tree: HuffmanTree<S>,
    /// Codewords used for encoding, derived from `tree`.
    pub codes: CodeTable<S>
}

impl<S: Hash + Eq + Ord + Clone> Coding<S> {
    /// Constructs coding for given `frequencies` of symbols.
    pub fn from_frequencies<F: Frequencies<Value = S>>(frequencies: F) -> Result<Self> {
        Ok(Self::from_tree(HuffmanTree::from_frequencies(frequencies)?))
    }

    /// Counts occurrences of all symbols exposed by `iter` and constructs coding for obtained frequencies.
    pub fn from_iter<Iter>(iter: Iter) -> Result<Self>
        where Iter: IntoIterator, Iter::Item: Borrow<S>
    {
        Ok(Self::from_tree(HuffmanTree::from_iter(iter)?))
    }

    /// Constructs coding that uses given `codes`, see [`HuffmanTree::from_codes`].
    pub fn from_codes(codes: CodeTable<S>) -> Result<Self> {
        Ok(Self { tree: HuffmanTree::from_codes(&codes)?, codes })
    }

    /// Writes the code table of `self`, see [`CodeTable::write`].
    #[inline] pub fn write<F>(&self, output: &mut dyn Write, write_symbol: F) -> std::io::Result<()>
        where F: FnMut(&mut dyn Write, &S) -> std::io::Result<()>
    {
        self.codes.write(output, write_symbol)
    }

    /// Reads the code table written by [`Self::write`] and rebuilds the tree.
    pub fn read<F>(input: &mut dyn Read, read_symbol: F) -> std::io::Result<Self>
        where F: FnMut(&mut dyn Read) -> std::io::Result<S>
    {
        Self::from_codes(CodeTable::read(input, read_symbol)?)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

impl<S: Hash + Eq + Clone> Coding<S> {
    /// Constructs coding that uses `tree` and its code table.
    pub fn from_tree(tree: HuffmanTree<S>) -> Self {
        let codes = tree.code_table();
        Self { tree, codes }
    }

    /// Encodes `sequence`, see [`CodeTable::encode_to_bits`].
    #[inline] pub fn encode_to_bits<Iter>(&self, sequence: Iter) -> Result<BitString>
        where Iter: IntoIterator, Iter::Item: Borrow<S>
    {
        self.codes.encode_to_bits(sequence)
    }

    /// Encodes `sequence` into padded bytes, see [`CodeTable::encode_to_bytes`].
    #[inline] pub fn encode_to_bytes<Iter>(&self, sequence: Iter) -> Result<Vec<u8>>
        where Iter: IntoIterator, Iter::Item: Borrow<S>
    {
        self.codes.encode_to_bytes(sequence)
    }

    /// Encodes `sequence` into [`EncodedPayload`], see [`CodeTable::encode`].
    #[inline] pub fn encode<Iter>(&self, sequence: Iter) -> Result<EncodedPayload>
        where Iter: IntoIterator, Iter::Item: Borrow<S>
    {
        self.codes.encode(sequence)
    }

    /// Decodes all `bits`, see [`HuffmanTree::decode_bits`].
    #[inline] pub fn decode_bits(&self, bits: &BitString) -> Result<Vec<S>, DecodeError> {
        self.tree.decode_bits(bits)
    }

    /// Decodes a string of `0` and `1` characters, see [`HuffmanTree::decode_str`].
    #[inline] pub fn decode_str(&self, bits: &str) -> Result<Vec<S>, DecodeError> {
        self.tree.decode_str(bits)
    }

    /// Decodes all bits of `bytes`, see [`HuffmanTree::decode_bytes`].
    #[inline] pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Vec<S>, DecodeError> {
        self.tree.decode_bytes(bytes)
    }

    /// Decodes the first `bit_len` bits of `bytes`, see [`HuffmanTree::decode_bytes_exact`].
    #[inline] pub fn decode_bytes_exact(&self, bytes: &[u8], bit_len: usize) -> Result<Vec<S>, DecodeError> {
        self.tree.decode_bytes_exact(bytes, bit_len)
    }

    /// Decodes `payload`, see [`HuffmanTree::decode_payload`].
    #[inline] pub fn decode_payload(&self, payload: &EncodedPayload) -> Result<Vec<S>, DecodeError> {
        self.tree.decode_payload(payload)
    }

    /// Returns decoder that walks the tree of `self`, consuming one bit at a time.
    #[inline] pub fn decoder(&self) -> Decoder<'_, S> { self.tree.decoder() }
}

impl<S: Hash + Eq + GetSize> GetSize for Coding<S> {
    fn size_bytes_dyn(&self) -> usize {
        self.tree.size_bytes_dyn() + self.codes.size_bytes_dyn()
    }
    fn size_bytes_content_dyn(&self) -> usize {
        self.tree.size_bytes_content_dyn() + self.codes.size_bytes_content_dyn()
    }
    const USES_DYN_MEM: bool = true;
}
