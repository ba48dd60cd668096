//! Tools to deal with codewords.

use std::collections::HashMap;
use std::collections::hash_map;
use std::hash::Hash;
use dyn_size_of::GetSize;

use crate::{BitString, Frequencies, HuffmanTree};

/// Map from symbols to their codewords.
///
/// Codewords are non-empty and no codeword is a prefix of another one.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct CodeTable<S: Hash + Eq> {
    codes: HashMap<S, BitString>
}

impl<S: Hash + Eq + Clone> CodeTable<S> {
    /// Derives the codewords from `tree` by depth-first traversal,
    /// appending `0` for each step to the left child and `1` to the right one.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        let mut codes = HashMap::with_capacity(tree.symbols_count());
        tree.for_each_leaf(|symbol, _, code| { codes.insert(symbol.clone(), code.clone()); });
        tracing::trace!(symbols = codes.len(), "code table derived");
        Self { codes }
    }
}

impl<S: Hash + Eq> CodeTable<S> {
    /// Constructs the table from `codes` that has to be prefix-free and contain no empty codeword.
    pub(crate) fn from_map(codes: HashMap<S, BitString>) -> Self {
        Self { codes }
    }

    /// Returns the codeword of `symbol`.
    #[inline] pub fn get(&self, symbol: &S) -> Option<&BitString> { self.codes.get(symbol) }

    /// Returns the number of symbols.
    #[inline] pub fn len(&self) -> usize { self.codes.len() }

    /// Returns whether the table has no symbols.
    #[inline] pub fn is_empty(&self) -> bool { self.codes.is_empty() }

    /// Returns an iterator over symbol-codeword pairs, in arbitrary order.
    #[inline] pub fn iter(&self) -> hash_map::Iter<'_, S, BitString> { self.codes.iter() }

    /// Returns the length of the longest codeword.
    pub fn max_len(&self) -> usize {
        self.codes.values().map(BitString::len).max().unwrap_or(0)
    }

    /// Returns the exact number of bits needed to encode the sequence counted by `frequencies`,
    /// or `None` if some counted value has no codeword.
    pub fn encoded_len<F: Frequencies<Value = S>>(&self, frequencies: F) -> Option<usize> {
        let (values, counts) = frequencies.into_unsorted();
        values.iter().zip(counts.iter()).try_fold(0usize, |acc, (v, c)|
            self.codes.get(v).map(|code| acc + code.len() * *c as usize))
    }

    /// Returns whether no codeword is a prefix of another one.
    ///
    /// Runs in *O(n log n)* time, where *n* is the number of codewords.
    pub fn is_prefix_free(&self) -> bool {
        // after sorting, a codeword that prefixes others is immediately followed by one of them
        let mut codes: Vec<String> = self.codes.values().map(BitString::to_string).collect();
        codes.sort_unstable();
        codes.windows(2).all(|w| !w[1].starts_with(w[0].as_str()))
    }
}

impl<S: Hash + Eq + Ord> CodeTable<S> {
    /// Returns symbol-codeword pairs ordered by symbols.
    pub fn sorted(&self) -> Vec<(&S, &BitString)> {
        let mut result: Vec<_> = self.codes.iter().collect();
        result.sort_unstable_by(|a, b| a.0.cmp(b.0));
        result
    }
}

impl<'a, S: Hash + Eq> IntoIterator for &'a CodeTable<S> {
    type Item = (&'a S, &'a BitString);
    type IntoIter = hash_map::Iter<'a, S, BitString>;

    #[inline] fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<S: Hash + Eq + GetSize> GetSize for CodeTable<S> {
    fn size_bytes_dyn(&self) -> usize {
        self.codes.capacity() * std::mem::size_of::<(S, BitString)>() +
            self.codes.iter().map(|(s, c)| s.size_bytes_dyn() + c.size_bytes_dyn()).sum::<usize>()
    }
    fn size_bytes_content_dyn(&self) -> usize {
        self.codes.len() * std::mem::size_of::<(S, BitString)>() +
            self.codes.iter().map(|(s, c)| s.size_bytes_content_dyn() + c.size_bytes_content_dyn()).sum::<usize>()
    }
    const USES_DYN_MEM: bool = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn codes_of(text: &str) -> CodeTable<char> {
        HuffmanTree::from_iter(text.chars()).unwrap().code_table()
    }

    fn as_strings(codes: &CodeTable<char>) -> HashMap<char, String> {
        codes.iter().map(|(s, c)| (*s, c.to_string())).collect()
    }

    #[test]
    fn three_symbols() {
        let codes = codes_of("abbccc");
        assert_eq!(as_strings(&codes), hashmap!(
            'c' => "0".to_string(),
            'a' => "10".to_string(),
            'b' => "11".to_string()
        ));
        assert_eq!(codes.len(), 3);
        assert_eq!(codes.max_len(), 2);
        assert!(codes.is_prefix_free());
        assert_eq!(codes.encoded_len(hashmap!('a' => 1, 'b' => 2, 'c' => 3)), Some(9));
        assert_eq!(codes.encoded_len(hashmap!('z' => 1)), None);
    }

    #[test]
    fn six_symbols() {
        //        root
        //       /    \
        //      /\     /\
        //     /\ f   e  d
        //    a /\
        //     c  b
        let tree = HuffmanTree::from_frequencies(hashmap!('d' => 12, 'e' => 11, 'f' => 10, 'a' => 3, 'b' => 2, 'c' => 1)).unwrap();
        let codes = tree.code_table();
        assert!(codes.is_prefix_free());
        let lens: HashMap<char, usize> = codes.iter().map(|(s, c)| (*s, c.len())).collect();
        assert_eq!(lens, hashmap!('a' => 3, 'b' => 4, 'c' => 4, 'd' => 2, 'e' => 2, 'f' => 2));
        assert_eq!(as_strings(&codes), hashmap!(
            'a' => "000".to_string(),
            'c' => "0010".to_string(),
            'b' => "0011".to_string(),
            'f' => "01".to_string(),
            'e' => "10".to_string(),
            'd' => "11".to_string()
        ));
    }

    #[test]
    fn single_symbol() {
        let codes = codes_of("aaaa");
        assert_eq!(as_strings(&codes), hashmap!('a' => "0".to_string()));
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn sorted_entries() {
        let codes = codes_of("abbccc");
        let symbols: Vec<char> = codes.sorted().into_iter().map(|(s, _)| *s).collect();
        assert_eq!(symbols, ['a', 'b', 'c']);
    }

    #[test]
    fn prefix_freedom_on_text() {
        let codes = codes_of("the quick brown fox jumps over the lazy dog, again and again");
        for (a, code_a) in &codes {
            for (b, code_b) in &codes {
                if a != b {
                    assert!(!code_a.is_prefix_of(code_b), "{a:?}={code_a} prefixes {b:?}={code_b}");
                }
            }
        }
    }

    #[test]
    fn detects_prefix() {
        let codes = CodeTable::from_map(hashmap!(
            'a' => "0".parse().unwrap(),
            'b' => "01".parse().unwrap()
        ));
        assert!(!codes.is_prefix_free());
    }
}
