use crate::{BitString, DecodeError, EncodedPayload, HuffmanTree, Node};

/// Result of bit decoding returned by [`Decoder::consume`].
#[derive(PartialOrd, Ord, PartialEq, Eq, Debug, Clone, Hash)]
pub enum DecodingResult<T> {
    /// Completed value that has been successfully decoded.
    Value(T),
    /// The codeword is incomplete and the next bit is needed.
    Incomplete,
    /// The bit leads to a non-existent child (possible only for the single-leaf tree).
    Invalid
}

/// Decoder that walks the Huffman tree, consuming one bit at a time.
///
/// Time complexity of decoding a symbol is *O(length of its codeword)*.
///
/// Memory complexity: *O(1)*
pub struct Decoder<'tree, S> {
    tree: &'tree HuffmanTree<S>,
    /// Index of the current node.
    cursor: u32,
    /// Number of bits consumed since the cursor left the root.
    pending: u32
}

impl<'tree, S> Decoder<'tree, S> {
    /// Constructs decoder for given `tree`, with the cursor at the root.
    pub fn new(tree: &'tree HuffmanTree<S>) -> Self {
        Self { tree, cursor: tree.root_index(), pending: 0 }
    }

    /// Moves the cursor back to the root, abandoning the current codeword.
    #[inline] pub fn reset(&mut self) {
        self.cursor = self.tree.root_index();
        self.pending = 0;
    }

    /// Returns the number of bits of the current, unfinished codeword consumed so far.
    #[inline(always)] pub fn pending_bits(&self) -> u32 { self.pending }

    /// Returns whether the cursor is at the root, i.e. no codeword is partially consumed.
    #[inline(always)] pub fn is_at_root(&self) -> bool { self.pending == 0 }

    /// Consumes a `bit` (`false` = 0 = left, `true` = 1 = right) and returns:
    /// - a symbol if the given `bit` finishes the codeword, the cursor is then moved back to the root;
    /// - [`DecodingResult::Incomplete`] if the codeword is incomplete and the next bit is needed;
    /// - or [`DecodingResult::Invalid`] if the current node has no child for `bit`
    ///   (only `1` at the root of the single-leaf tree), the state is unchanged then.
    pub fn consume(&mut self, bit: bool) -> DecodingResult<&'tree S> {
        let tree = self.tree;
        let next = match tree.node(self.cursor) {
            Node::Internal { left, right, .. } => if bit { *right } else { *left },
            Node::Leaf { symbol, .. } => {   // the root of a single-leaf tree, its codeword is 0
                return if bit { DecodingResult::Invalid } else { DecodingResult::Value(symbol) };
            }
        };
        match tree.node(next) {
            Node::Leaf { symbol, .. } => {
                self.reset();
                DecodingResult::Value(symbol)
            }
            Node::Internal { .. } => {
                self.cursor = next;
                self.pending += 1;
                DecodingResult::Incomplete
            }
        }
    }

    /// Tries to decode and return a single symbol from the `bits` iterator,
    /// consuming as many bits as needed.
    ///
    /// Returns [`DecodingResult::Incomplete`] if the iterator exhausted before the symbol was decoded
    /// ([`Self::pending_bits`] enables checking if the iterator yielded any bit of the codeword).
    pub fn decode_next<I: Iterator<Item = bool>>(&mut self, bits: &mut I) -> DecodingResult<&'tree S> {
        for bit in bits {
            match self.consume(bit) {
                DecodingResult::Incomplete => {},
                result => return result
            }
        }
        DecodingResult::Incomplete
    }
}

impl<S: Clone> HuffmanTree<S> {
    /// Decodes the whole sequence of `bits`.
    ///
    /// Fails if some bit leads to a non-existent child
    /// or if the bits end in the middle of a codeword. No partial result is returned.
    pub fn decode<I: IntoIterator<Item = bool>>(&self, bits: I) -> Result<Vec<S>, DecodeError> {
        let mut decoder = self.decoder();
        let mut result = Vec::new();
        for (bit_index, bit) in bits.into_iter().enumerate() {
            match decoder.consume(bit) {
                DecodingResult::Value(symbol) => result.push(symbol.clone()),
                DecodingResult::Incomplete => {},
                DecodingResult::Invalid => return Err(DecodeError::MissingChild { bit_index })
            }
        }
        if decoder.is_at_root() {
            Ok(result)
        } else {
            Err(DecodeError::UnterminatedCodeword { pending_bits: decoder.pending_bits() as usize })
        }
    }

    /// Decodes all `bits`.
    #[inline] pub fn decode_bits(&self, bits: &BitString) -> Result<Vec<S>, DecodeError> {
        self.decode(bits.iter())
    }

    /// Decodes bits given as a string of `0` and `1` characters.
    pub fn decode_str(&self, bits: &str) -> Result<Vec<S>, DecodeError> {
        self.decode_bits(&bits.parse()?)
    }

    /// Decodes all bits of `bytes`, taking the most significant bit of each byte first.
    ///
    /// Padding bits are decoded as well, which usually ends with
    /// [`DecodeError::UnterminatedCodeword`]. Use [`Self::decode_bytes_exact`] to skip them.
    #[inline] pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Vec<S>, DecodeError> {
        self.decode_bits(&BitString::from_bytes(bytes))
    }

    /// Decodes the first `bit_len` bits of `bytes`, taking the most significant bit of each byte first.
    pub fn decode_bytes_exact(&self, bytes: &[u8], bit_len: usize) -> Result<Vec<S>, DecodeError> {
        self.decode_bits(&BitString::from_bytes_exact(bytes, bit_len)?)
    }

    /// Decodes the bits of `payload`.
    #[inline] pub fn decode_payload(&self, payload: &EncodedPayload) -> Result<Vec<S>, DecodeError> {
        self.decode_bytes_exact(&payload.bytes, payload.bit_len)
    }
}

/// Decodes all `bits` with `tree`, see [`HuffmanTree::decode_bits`].
#[inline] pub fn decode_bits<S: Clone>(bits: &BitString, tree: &HuffmanTree<S>) -> Result<Vec<S>, DecodeError> {
    tree.decode_bits(bits)
}

/// Decodes all bits of `bytes` with `tree`, see [`HuffmanTree::decode_bytes`].
#[inline] pub fn decode_bytes<S: Clone>(bytes: &[u8], tree: &HuffmanTree<S>) -> Result<Vec<S>, DecodeError> {
    tree.decode_bytes(bytes)
}
