//! Errors reported by construction, encoding and decoding.

use thiserror::Error;

/// Reasons for which a bit stream cannot be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The bit with index `bit_index` leads to a child that the current node does not have.
    /// The stream is corrupted or was produced with a different tree.
    #[error("bit {bit_index} leads to a non-existent child node")]
    MissingChild { bit_index: usize },

    /// The stream ended in the middle of a codeword, after `pending_bits` bits of it.
    #[error("unterminated codeword: stream ends {pending_bits} bit(s) into a codeword")]
    UnterminatedCodeword { pending_bits: usize },

    /// A textual bit string contains a `character` other than `0` or `1`.
    #[error("illegal character {character:?} at position {position} of binary string")]
    IllegalCharacter { character: char, position: usize },

    /// The requested number of bits exceeds the bits available in the payload.
    #[error("bit length {bit_len} exceeds {available} available bits")]
    BitLengthOutOfRange { bit_len: usize, available: usize },
}

/// Error type of the crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// There are no symbols to build a tree from.
    #[error("cannot build a Huffman tree from an empty frequency table")]
    EmptyInput,

    /// The symbol at `position` of the encoded sequence has no codeword,
    /// so the code table was built for a different distribution.
    #[error("symbol at position {position} has no codeword in the code table")]
    UnknownSymbol { position: usize },

    /// The bit stream cannot be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The codewords do not describe a complete, prefix-free binary code.
    #[error("invalid code table: {0}")]
    InvalidCodeTable(&'static str),
}

/// Result type of the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
