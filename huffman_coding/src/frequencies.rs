//! Tools to count frequencies of symbols.

use std::collections::{BTreeMap, HashMap};
use fsum::FSum;
use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

/// The default frequency table: a map from symbols to the numbers of their occurrences.
pub type FrequencyTable<S> = HashMap<S, u32>;

/// Counts occurrences of all symbols exposed by `sequence`.
///
/// Empty `sequence` gives an empty table.
///
/// # Example
///
/// ```
/// use huffman_coding::{count, Frequencies};
///
/// let freq = count("abbccc".chars());
/// assert_eq!(freq[&'c'], 3);
/// assert_eq!(freq.total(), 6);
/// ```
pub fn count<S, Iter>(sequence: Iter) -> FrequencyTable<S>
    where Iter: IntoIterator, Iter::Item: Borrow<S>, S: Hash + Eq + Clone
{
    FrequencyTable::with_counted_all(sequence)
}

/// Types that implement this trait can count number of occurrences of values.
pub trait Frequencies {
    /// Type of value.
    type Value;

    /// Constructs `Self` that counts occurrences of all values exposed by `iter`.
    fn with_counted_all<Iter: IntoIterator>(iter: Iter) -> Self
        where Iter::Item: Borrow<Self::Value>, Self: Sized, Self::Value: Clone;

    /// Adds one to the stored number of `value` occurrences.
    fn count(&mut self, value: Self::Value);

    /// Calls `count` for all items exposed by `iter`.
    fn count_all<Iter: IntoIterator>(&mut self, iter: Iter) where Iter::Item: Borrow<Self::Value>, Self::Value: Clone {
        for v in iter { self.count(v.borrow().clone()); }
    }

    /// Returns the number of different values with non-zero number of occurrences.
    fn number_of_occurring_values(&self) -> usize;

    /// Returns the total number of occurrences of all values.
    fn total(&self) -> u64;

    /// Returns the Shannon entropy (in bits per value) of the values counted so far.
    fn entropy(&self) -> f64;

    /// Converts `self` to the pair of boxed slices that contain
    /// distinct values and numbers of their (non-zero) occurrences respectively.
    fn into_unsorted(self) -> (Box<[Self::Value]>, Box<[u32]>);

    /// Converts `self` to the pair of boxed slices that contain
    /// distinct values and numbers of their occurrences respectively,
    /// ordered by the number of occurrences and then by values.
    fn into_sorted(self) -> (Box<[Self::Value]>, Box<[u32]>) where Self: Sized, Self::Value: Ord {
        let (values, freq) = self.into_unsorted();
        let mut pairs: Vec<_> = freq.into_vec().into_iter().zip(values.into_vec()).collect();
        pairs.sort_unstable();
        pairs.into_iter().map(|(f, v)| (v, f)).unzip::<_, _, Vec<_>, Vec<_>>()
            .into_boxed()
    }
}

trait IntoBoxed<A, B> { fn into_boxed(self) -> (Box<[A]>, Box<[B]>); }

impl<A, B> IntoBoxed<A, B> for (Vec<A>, Vec<B>) {
    #[inline] fn into_boxed(self) -> (Box<[A]>, Box<[B]>) { (self.0.into_boxed_slice(), self.1.into_boxed_slice()) }
}

/// Returns the entropy of the distribution given by `counts` (zeros are ignored).
fn entropy_of<'a, I: Iterator<Item = &'a u32> + Clone>(counts: I) -> f64 {
    let sum = counts.clone().map(|v| *v as u64).sum::<u64>() as f64;
    if sum == 0.0 { return 0.0; }
    - FSum::with_all(counts.filter(|v| **v != 0)
        .map(|v| { let p = *v as f64 / sum; p * p.log2() })).value()
}

impl<Value: Eq + Hash, S: BuildHasher + Default> Frequencies for HashMap<Value, u32, S> {
    type Value = Value;

    fn with_counted_all<Iter: IntoIterator>(iter: Iter) -> Self where Iter::Item: Borrow<Value>, Value: Clone {
        let mut result = Self::default();
        result.count_all(iter);
        result
    }

    fn count(&mut self, value: Value) {
        *self.entry(value).or_insert(0) += 1;
    }

    fn number_of_occurring_values(&self) -> usize {
        self.values().filter(|v| **v != 0).count()
    }

    fn total(&self) -> u64 {
        self.values().map(|v| *v as u64).sum()
    }

    fn entropy(&self) -> f64 {
        entropy_of(self.values())
    }

    fn into_unsorted(mut self) -> (Box<[Self::Value]>, Box<[u32]>) {
        let len = self.len();
        let mut freq = Vec::<u32>::with_capacity(len);
        let mut values = Vec::<Self::Value>::with_capacity(len);
        for (val, fr) in self.drain().filter(|(_, fr)| *fr != 0) {
            freq.push(fr);
            values.push(val);
        }
        (values.into_boxed_slice(), freq.into_boxed_slice())
    }
}

impl<Value: Ord> Frequencies for BTreeMap<Value, u32> {
    type Value = Value;

    fn with_counted_all<Iter: IntoIterator>(iter: Iter) -> Self where Iter::Item: Borrow<Value>, Value: Clone {
        let mut result = Self::new();
        result.count_all(iter);
        result
    }

    fn count(&mut self, value: Value) {
        *self.entry(value).or_insert(0) += 1;
    }

    fn number_of_occurring_values(&self) -> usize {
        self.values().filter(|v| **v != 0).count()
    }

    fn total(&self) -> u64 {
        self.values().map(|v| *v as u64).sum()
    }

    fn entropy(&self) -> f64 {
        entropy_of(self.values())
    }

    fn into_unsorted(self) -> (Box<[Self::Value]>, Box<[u32]>) {
        self.into_iter().filter(|(_, fr)| *fr != 0).unzip::<_, _, Vec<_>, Vec<_>>().into_boxed()
    }
}

/// Byte frequencies, indexed by byte value.
impl Frequencies for [u32; 256] {
    type Value = u8;

    #[inline] fn count(&mut self, value: u8) {
        self[value as usize] += 1;
    }

    fn with_counted_all<Iter: IntoIterator>(iter: Iter) -> Self where Iter::Item: Borrow<u8> {
        let mut result = [0; 256];
        for v in iter { result[*v.borrow() as usize] += 1; }
        result
    }

    fn number_of_occurring_values(&self) -> usize {
        self.iter().filter(|v| **v != 0).count()
    }

    fn total(&self) -> u64 {
        self.iter().map(|v| *v as u64).sum()
    }

    fn entropy(&self) -> f64 {
        entropy_of(self.iter())
    }

    fn into_unsorted(self) -> (Box<[u8]>, Box<[u32]>) {
        self.iter().enumerate().filter(|(_, fr)| **fr != 0)
            .map(|(v, fr)| (v as u8, *fr))
            .unzip::<_, _, Vec<_>, Vec<_>>().into_boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::{btreemap, hashmap};

    #[test]
    fn count_chars() {
        assert_eq!(count("abbccc".chars()), hashmap!('a' => 1, 'b' => 2, 'c' => 3));
        assert!(count(std::iter::empty::<char>()).is_empty());
    }

    #[test]
    fn count_borrowed() {
        let words = ["x", "y", "x"];
        let freq: FrequencyTable<&str> = count(words.iter());
        assert_eq!(freq, hashmap!("x" => 2, "y" => 1));
        assert_eq!(freq.number_of_occurring_values(), 2);
        assert_eq!(freq.total(), 3);
    }

    #[test]
    fn btree_counting() {
        let freq = BTreeMap::<u16, u32>::with_counted_all([7u16, 3, 7, 7]);
        assert_eq!(freq, btreemap!(3 => 1, 7 => 3));
        assert_eq!(freq.into_unsorted(), (vec![3u16, 7].into_boxed_slice(), vec![1u32, 3].into_boxed_slice()));
    }

    #[test]
    fn bytes_counting() {
        let freq = <[u32; 256]>::with_counted_all(b"hello");
        assert_eq!(freq[b'l' as usize], 2);
        assert_eq!(freq.number_of_occurring_values(), 4);
        assert_eq!(freq.total(), 5);
        let (values, counts) = freq.into_unsorted();
        assert_eq!(values.as_ref(), b"ehlo");
        assert_eq!(counts.as_ref(), [1, 1, 2, 1]);
    }

    #[test]
    fn sorted_by_count_then_value() {
        let freq = hashmap!('d' => 2u32, 'a' => 5, 'c' => 2, 'b' => 1);
        let (values, counts) = freq.into_sorted();
        assert_eq!(values.as_ref(), ['b', 'c', 'd', 'a']);
        assert_eq!(counts.as_ref(), [1, 2, 2, 5]);
    }

    #[test]
    fn zero_counts_are_skipped() {
        let freq = hashmap!('a' => 0u32, 'b' => 4);
        assert_eq!(freq.number_of_occurring_values(), 1);
        assert_eq!(freq.into_unsorted(), (vec!['b'].into_boxed_slice(), vec![4].into_boxed_slice()));
    }

    #[test]
    fn entropy() {
        assert_eq!(hashmap!('a' => 8u32).entropy(), 0.0);
        assert_eq!(FrequencyTable::<char>::new().entropy(), 0.0);
        assert!((hashmap!('a' => 1u32, 'b' => 1).entropy() - 1.0).abs() < 1e-12);
        assert!((hashmap!('a' => 1u32, 'b' => 1, 'c' => 1, 'd' => 1).entropy() - 2.0).abs() < 1e-12);
        let mut bytes = [0u32; 256];
        bytes[1] = 2; bytes[2] = 1; bytes[3] = 1;
        assert!((bytes.entropy() - 1.5).abs() < 1e-12);
    }
}
