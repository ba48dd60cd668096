use std::error::Error;
use std::hint::black_box;

use dyn_size_of::GetSize;
use huffman_coding::{Coding, Frequencies, FrequencyTable, HuffmanTree};

use crate::{compare_texts, Conf};

fn benchmark<F, C>(conf: &Conf, label: &str, count: C) -> Result<(), Box<dyn Error>>
    where F: Frequencies<Value = u8> + Clone, C: Fn(&[u8]) -> F
{
    let text = conf.text()?;
    tracing::info!(label, len = text.len(), symbols = conf.symbols, spread = conf.spread, "benchmark started");
    println!("{}:", label);

    println!(" Counting symbol occurrences [ns]: {:.0}", conf.measure(|| count(&text[..])) * 1e9);
    let frequencies = count(&text[..]);
    let entropy = frequencies.entropy();

    let tree_construction = conf.measure(|| HuffmanTree::from_frequencies(frequencies.clone()));
    let tree = HuffmanTree::from_frequencies(frequencies.clone())?;
    let codes_construction = conf.measure(|| tree.code_table());
    println!(" Tree + code table construction time [ns]: {:.0} + {:.0} = {:.0}",
        tree_construction * 1e9, codes_construction * 1e9, (tree_construction + codes_construction) * 1e9);
    let coding = Coding::from_tree(tree);
    println!(" Tree size [bytes]: {}", coding.tree.size_bytes());
    println!(" Code table size [bytes]: {}", coding.codes.size_bytes());

    let encoding = conf.measure(|| coding.encode(text.iter()));
    conf.print_speed(" Encoding", encoding);
    let payload = coding.encode(text.iter())?;
    let bits_per_symbol = payload.bit_len as f64 / text.len().max(1) as f64;
    println!(" Compressed size [bytes]: {} ({:.3} bits/symbol, entropy {:.3}, longest codeword {} bits)",
        payload.bytes.len(), bits_per_symbol, entropy, coding.codes.max_len());

    let bits = payload.bits()?;
    let decoding = conf.measure(|| {
        let mut bits = bits.iter();
        let mut d = coding.decoder();
        while let huffman_coding::DecodingResult::Value(v) = d.decode_next(&mut bits) {
            black_box(v);
        }
    });
    conf.print_speed(" Decoding", decoding);

    if conf.verify {
        print!(" Verification... ");
        let decoded_text = coding.decode_payload(&payload)?;
        if !compare_texts(&text, &decoded_text) {
            return Err("verification failed".into());
        }
    }
    Ok(())
}

pub fn benchmark_generic(conf: &Conf) -> Result<(), Box<dyn Error>> {
    benchmark(conf, "HashMap frequencies", |text| FrequencyTable::<u8>::with_counted_all(text))
}

pub fn benchmark_bytes(conf: &Conf) -> Result<(), Box<dyn Error>> {
    benchmark(conf, "Array frequencies", |text| <[u32; 256]>::with_counted_all(text))
}
