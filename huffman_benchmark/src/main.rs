#![doc = include_str!("../README.md")]
mod bench;
mod demo;

use std::error::Error;
use std::{hint::black_box, time::Instant};

use clap::{Parser, Subcommand};

use rand::prelude::*;
use rand::distributions::WeightedIndex;
use rand_pcg::Pcg64Mcg;
use tracing_subscriber::EnvFilter;

#[derive(Subcommand)]
pub enum Command {
    /// Benchmark of coding with frequencies counted in a hash map
    #[clap(visible_alias = "map")]
    Generic,
    /// Benchmark of coding with frequencies counted in an array indexed by bytes
    #[clap(visible_alias = "u8")]
    Bytes,
    /// Runs all benchmarks
    All,
    /// Reads text from the standard input and prints its codewords, encoding and decoding
    Demo
}

#[derive(Parser)]
#[command(author, version, about, long_about = None, infer_subcommands=true)]
/// Huffman coding benchmark.
pub struct Conf {
    /// What to do
    #[command(subcommand)]
    pub command: Command,

    /// Length of the test text
    #[arg(short = 'l', long, default_value_t = 1024*1024)]
    pub len: usize,

    /// Number of different symbols in the test text.
    #[arg(long, default_value_t = 256, value_parser = clap::value_parser!(u16).range(1..=256))]
    pub symbols: u16,

    /// The spread of the number of symbols (0 for all about equal).
    /// Each successive symbol occurs 1+SPREAD/1000 times more often than the previous one.
    #[arg(short = 'r', long, default_value_t = 100)]
    pub spread: u32,

    /// Time (in seconds) of measuring and warming up the CPU cache before measuring
    #[arg(short='t', long, default_value_t = 5)]
    pub time: u16,

    /// Whether to check the validity
    #[arg(long, default_value_t = false)]
    pub verify: bool,

    /// Seed for random number generators
    #[arg(short='s', long, default_value_t = 1234)]
    pub seed: u64,
}

impl Conf {
    /// Returns pseudo-random text for testing, which contains each of `symbols` first bytes at least once
    /// (if it is long enough).
    fn text(&self) -> Result<Box<[u8]>, rand::distributions::WeightedError> {
        if self.len <= self.symbols as usize { return Ok((0..self.len).map(|v| v as u8).collect()); }
        let spread = 1.0 + self.spread as f64*0.001;
        let weights: Vec<_> = (1..=self.symbols as i32).map(|v| spread.powi(v)).collect();
        let dist = WeightedIndex::new(weights)?;
        let rng = Pcg64Mcg::seed_from_u64(self.seed);
        Ok((0..self.symbols).map(|v| v as u8).chain(
            dist.sample_iter(rng).map(|v| v as u8).take(self.len - self.symbols as usize)
        ).collect())
    }

    /// Returns average time (in seconds) of calling `f`.
    #[inline(always)] fn measure<R, F>(&self, mut f: F) -> f64
     where F: FnMut() -> R
    {
        let mut iters = 1;
        if self.time > 0 {
            let time = Instant::now();
            loop {
                black_box(f());
                if time.elapsed().as_secs() > self.time as u64 { break; }
                iters += 1;
            }
        }
        let start_moment = Instant::now();
        for _ in 0..iters { black_box(f()); }
        start_moment.elapsed().as_secs_f64() / iters as f64
    }

    fn print_speed(&self, label: &str, sec: f64) {
        let mb = self.len as f64 / (1024 * 1024) as f64;
        println!("{}: {:.0} mb/sec", label, mb / sec);
    }
}

/// Checks whether `decoded` equals `original`, reports the first difference and returns the verdict.
fn compare_texts(original: &[u8], decoded: &[u8]) -> bool {
    if original.len() != decoded.len() {
        tracing::error!(decoded = decoded.len(), original = original.len(), "decoded text has different length");
        println!("FAIL");
        return false;
    }
    if let Some(index) = original.iter().zip(decoded).position(|(e, g)| e != g) {
        tracing::error!(index, decoded = decoded[index], original = original[index], "decoded text differs");
        println!("FAIL");
        return false;
    }
    println!("DONE");
    true
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let conf: Conf = Conf::parse();
    match conf.command {
        Command::Generic => bench::benchmark_generic(&conf)?,
        Command::Bytes => bench::benchmark_bytes(&conf)?,
        Command::All => {
            bench::benchmark_generic(&conf)?;
            bench::benchmark_bytes(&conf)?;
        },
        Command::Demo => demo::run(std::io::stdin().lock(), std::io::stdout().lock())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdicts() {
        assert!(compare_texts(b"abc", b"abc"));
        assert!(!compare_texts(b"abc", b"abd"));
        assert!(!compare_texts(b"abc", b"ab"));
    }
}
