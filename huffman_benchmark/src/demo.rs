use std::error::Error;
use std::io::{BufRead, Read, Write};

use huffman_coding::{Coding, EncodedPayload, Frequencies};

/// Reads the whole `input`, builds Huffman coding for its characters and writes to `output`
/// the codewords, the encoded bits and the text decoded back from them.
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<(), Box<dyn Error>> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    let text = text.trim_end_matches(['\n', '\r']);
    let coding = Coding::<char>::from_iter(text.chars())?;
    tracing::info!(chars = text.chars().count(), symbols = coding.codes.len(), "demo coding constructed");

    writeln!(output, "Input: {}", text)?;
    writeln!(output, "Codewords:")?;
    for (symbol, code) in coding.codes.sorted() {
        writeln!(output, " {:?}: {}", symbol, code)?;
    }
    let bits = coding.encode_to_bits(text.chars())?;
    writeln!(output, "Encoded: {}", bits)?;
    let freq = huffman_coding::count::<char, _>(text.chars());
    writeln!(output, "Encoded size: {} bits, {:.3} bits/symbol, entropy {:.3} bits/symbol",
        bits.len(), bits.len() as f64 / freq.total() as f64, freq.entropy())?;
    let decoded: String = coding.decode_bits(&bits)?.into_iter().collect();
    writeln!(output, "Decoded from bits: {}", decoded)?;
    let payload = EncodedPayload::from_bits(&bits);
    let hex: Vec<String> = payload.bytes.iter().map(|b| format!("{:02x}", b)).collect();
    writeln!(output, "Packed: {} ({} padding bits)", hex.join(" "), payload.padding())?;
    let decoded: String = coding.decode_payload(&payload)?.into_iter().collect();
    writeln!(output, "Decoded from bytes: {}", decoded)?;
    Ok(())
}
