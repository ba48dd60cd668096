//! Binary serialization of code tables.
//!
//! Format: number of entries (*VByte*), then for each entry, in the order of symbols:
//! the symbol (written by a caller-supplied function), codeword length in bits (*VByte*)
//! and the codeword packed into bytes, the most significant bit first.

use std::collections::HashMap;
use std::hash::Hash;
use std::io;
use binout::{Serializer, VByte};
use bitm::ceiling_div;

use crate::{BitString, CodeTable};

#[inline] fn invalid_data(msg: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

impl<S: Hash + Eq + Ord> CodeTable<S> {
    /// Returns number of bytes which `write` will write,
    /// assuming that each call to `write_symbol` writes `bytes_per_symbol` bytes.
    pub fn write_bytes(&self, bytes_per_symbol: usize) -> usize {
        VByte::size(self.len() as u32) +
            self.iter().map(|(_, code)| bytes_per_symbol + VByte::size(code.len() as u32) + code.bytes_len()).sum::<usize>()
    }

    /// Writes `self` to the given `output`, using `write_symbol` to write each symbol.
    pub fn write<F>(&self, output: &mut dyn io::Write, mut write_symbol: F) -> io::Result<()>
        where F: FnMut(&mut dyn io::Write, &S) -> io::Result<()>
    {
        VByte::write(output, self.len() as u32)?;
        self.sorted().into_iter().try_for_each(|(symbol, code)| {
            write_symbol(output, symbol)?;
            VByte::write(output, code.len() as u32)?;
            output.write_all(&code.to_bytes())
        })
    }
}

impl<S: Hash + Eq> CodeTable<S> {
    /// Reads `CodeTable` from the given `input`, using `read_symbol` to read each symbol.
    ///
    /// Fails with [`io::ErrorKind::InvalidData`] on an empty codeword, a repeated symbol,
    /// or a codeword longer than any complete code of the read size can have
    /// (`n-1` bits for `n > 1` symbols).
    /// Prefix-freedom is not verified, [`crate::HuffmanTree::from_codes`] does it.
    pub fn read<F>(input: &mut dyn io::Read, mut read_symbol: F) -> io::Result<Self>
        where F: FnMut(&mut dyn io::Read) -> io::Result<S>
    {
        let len: u32 = VByte::read(input)?;
        let max_bit_len = len.saturating_sub(1).max(1);
        let mut codes = HashMap::new();
        for _ in 0..len {
            let symbol = read_symbol(input)?;
            let bit_len: u32 = VByte::read(input)?;
            if bit_len == 0 { return Err(invalid_data("empty codeword")); }
            if bit_len > max_bit_len { return Err(invalid_data("codeword too long")); }
            let mut bytes = vec![0u8; ceiling_div(bit_len as usize, 8)];
            input.read_exact(&mut bytes)?;
            let code = BitString::from_bytes_exact(&bytes, bit_len as usize)
                .map_err(|_| invalid_data("codeword longer than its bytes"))?;
            if codes.insert(symbol, code).is_some() { return Err(invalid_data("repeated symbol")); }
        }
        Ok(Self::from_map(codes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binout::AsIs;
    use crate::HuffmanTree;

    fn write_u8(output: &mut dyn io::Write, v: &u8) -> io::Result<()> { AsIs::write(output, *v) }
    fn read_u8(input: &mut dyn io::Read) -> io::Result<u8> { AsIs::read(input) }

    #[test]
    fn write_read() {
        let codes = HuffmanTree::from_iter(b"mississippi river").unwrap().code_table();
        let mut buff = Vec::new();
        codes.write(&mut buff, write_u8).unwrap();
        assert_eq!(buff.len(), codes.write_bytes(1));
        let read = CodeTable::read(&mut &buff[..], read_u8).unwrap();
        assert_eq!(read, codes);
    }

    #[test]
    fn deterministic_output() {
        let text = b"abracadabra";
        let mut first = Vec::new();
        HuffmanTree::from_iter(text).unwrap().code_table().write(&mut first, write_u8).unwrap();
        let mut second = Vec::new();
        HuffmanTree::from_iter(text).unwrap().code_table().write(&mut second, write_u8).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_symbol_format() {
        let codes = HuffmanTree::from_iter(b"zzz").unwrap().code_table();
        let mut buff = Vec::new();
        codes.write(&mut buff, write_u8).unwrap();
        assert_eq!(buff, [1, b'z', 1, 0b0000_0000]);
    }

    #[test]
    fn rejects_invalid_data() {
        let empty_code = [1u8, b'a', 0];
        assert_eq!(CodeTable::read(&mut &empty_code[..], read_u8).unwrap_err().kind(), io::ErrorKind::InvalidData);
        let repeated = [2u8, b'a', 1, 0x00, b'a', 1, 0x80];
        assert_eq!(CodeTable::read(&mut &repeated[..], read_u8).unwrap_err().kind(), io::ErrorKind::InvalidData);
        let truncated = [3u8, b'a', 2];
        assert_eq!(CodeTable::read(&mut &truncated[..], read_u8).unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn rejects_overlong_codeword_before_reading_it() {
        // 2 entries allow codewords of at most 1 bit
        let mut two_bits = vec![2u8, b'a'];
        VByte::write(&mut two_bits, 2u32).unwrap();
        two_bits.push(0x00);
        assert_eq!(CodeTable::read(&mut &two_bits[..], read_u8).unwrap_err().kind(), io::ErrorKind::InvalidData);
        // a huge length fails at once, without reading (or allocating) its bytes
        let mut huge = vec![3u8, b'a'];
        VByte::write(&mut huge, u32::MAX).unwrap();
        let err = CodeTable::read(&mut &huge[..], read_u8).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(err.to_string(), "codeword too long");
        // the single codeword may have 1 bit
        let single = [1u8, b'a', 1, 0x00];
        assert_eq!(CodeTable::read(&mut &single[..], read_u8).unwrap().len(), 1);
    }
}
