//! Huffman tree stored as an arena of nodes.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::borrow::Borrow;
use dyn_size_of::GetSize;

use crate::{BitString, CodeTable, Decoder, Error, Frequencies, FrequencyTable};

/// Node of the trie built by [`HuffmanTree::from_codes`].
enum TrieNode<'c, S> {
    Branch([Option<usize>; 2]),
    Leaf(&'c S)
}

/// Node of the Huffman tree.
///
/// Children of internal nodes are indices into [`HuffmanTree::nodes`].
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Node<S> {
    /// Leaf that holds a symbol and the number of its occurrences.
    Leaf { symbol: S, weight: u64 },
    /// Internal node whose weight is the sum of its children weights.
    Internal { weight: u64, left: u32, right: u32 }
}

impl<S> Node<S> {
    /// Returns the weight of `self`.
    #[inline] pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight
        }
    }

    /// Returns whether `self` is a leaf.
    #[inline] pub fn is_leaf(&self) -> bool { matches!(self, Node::Leaf { .. }) }

    /// Returns index of the child selected by `bit` (`false` = left, `true` = right),
    /// or `None` for leaves.
    #[inline] pub fn child(&self, bit: bool) -> Option<u32> {
        match self {
            Node::Internal { left, right, .. } => Some(if bit { *right } else { *left }),
            Node::Leaf { .. } => None
        }
    }
}

impl<S: GetSize> GetSize for Node<S> {
    fn size_bytes_content_dyn(&self) -> usize {
        if let Node::Leaf { symbol, .. } = self { symbol.size_bytes_content_dyn() } else { 0 }
    }
    const USES_DYN_MEM: bool = S::USES_DYN_MEM;
}

/// Binary Huffman tree.
///
/// Children always precede their parents in `nodes`, so the root is the last node.
/// A tree built for a single symbol consists of one leaf, and the symbol gets the codeword `0`.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct HuffmanTree<S> {
    nodes: Box<[Node<S>]>
}

impl<S: Ord> HuffmanTree<S> {
    /// Constructs the Huffman tree for the given `frequencies` of symbols.
    ///
    /// The two lightest nodes are merged repeatedly, the first extracted one becoming the left child.
    /// Ties are broken by node creation order, and leaves are created in the order of
    /// their weights and then symbols, so the same frequencies always give the same tree.
    ///
    /// Fails with [`Error::EmptyInput`] if `frequencies` is empty.
    /// Runs in *O(n log n)* time, where *n* is the number of distinct symbols.
    pub fn from_frequencies<F: Frequencies<Value = S>>(frequencies: F) -> Result<Self, Error> {
        let (symbols, weights) = frequencies.into_sorted();
        let mut nodes = Vec::with_capacity((2 * symbols.len()).saturating_sub(1));
        let mut queue = BinaryHeap::with_capacity(symbols.len());
        for (symbol, weight) in symbols.into_vec().into_iter().zip(weights.iter()) {
            queue.push(Reverse((*weight as u64, nodes.len() as u32)));
            nodes.push(Node::Leaf { symbol, weight: *weight as u64 });
        }
        loop {
            let Some(Reverse((left_weight, left))) = queue.pop() else { return Err(Error::EmptyInput) };
            let Some(Reverse((right_weight, right))) = queue.pop() else { break };
            let weight = left_weight + right_weight;
            queue.push(Reverse((weight, nodes.len() as u32)));
            nodes.push(Node::Internal { weight, left, right });
        }
        let result = Self { nodes: nodes.into_boxed_slice() };
        tracing::debug!(symbols = result.symbols_count(), depth = result.depth(), weight = result.weight(),
            "Huffman tree constructed");
        Ok(result)
    }

    /// Counts occurrences of all symbols exposed by `iter` and constructs the tree for obtained frequencies.
    pub fn from_iter<Iter>(iter: Iter) -> Result<Self, Error>
        where Iter: IntoIterator, Iter::Item: Borrow<S>, S: Hash + Clone
    {
        Self::from_frequencies(FrequencyTable::<S>::with_counted_all(iter))
    }
}

impl<S> HuffmanTree<S> {
    /// Constructs the tree directly from `nodes`, which must satisfy the invariants of the tree.
    pub(crate) fn from_nodes(nodes: Box<[Node<S>]>) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes }
    }

    /// Returns all nodes, children before parents, root at the end.
    #[inline] pub fn nodes(&self) -> &[Node<S>] { &self.nodes }

    /// Returns the node with given `index`.
    #[inline] pub fn node(&self, index: u32) -> &Node<S> { &self.nodes[index as usize] }

    /// Returns index of the root.
    #[inline] pub fn root_index(&self) -> u32 { (self.nodes.len() - 1) as u32 }

    /// Returns the root.
    #[inline] pub fn root(&self) -> &Node<S> { self.node(self.root_index()) }

    /// Returns the total number of nodes.
    #[inline] pub fn len(&self) -> usize { self.nodes.len() }

    /// Always `false`, as a tree has at least one node.
    #[inline] pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Returns the number of symbols (leaves).
    #[inline] pub fn symbols_count(&self) -> usize { (self.nodes.len() + 1) / 2 }

    /// Returns the weight of the root, i.e. the total weight of all symbols.
    #[inline] pub fn weight(&self) -> u64 { self.root().weight() }

    /// Returns whether the tree consists of a single leaf.
    #[inline] pub fn is_single_leaf(&self) -> bool { self.nodes.len() == 1 }

    /// Returns the length of the longest codeword.
    pub fn depth(&self) -> u32 {
        if self.is_single_leaf() { return 1; }
        let mut depths = vec![0u32; self.nodes.len()];
        let mut result = 0;
        for index in (0..self.nodes.len()).rev() {
            if let Node::Internal { left, right, .. } = self.nodes[index] {
                let d = depths[index] + 1;
                depths[left as usize] = d;
                depths[right as usize] = d;
                result = result.max(d);
            }
        }
        result
    }

    /// Calls `f` for each leaf of the tree, from the leftmost one.
    /// Arguments of `f` are: symbol, weight of the leaf and its codeword.
    pub fn for_each_leaf<F>(&self, mut f: F) where F: FnMut(&S, u64, &BitString) {
        let mut stack = vec![(self.root_index(), BitString::new())];
        while let Some((index, prefix)) = stack.pop() {
            match self.node(index) {
                Node::Leaf { symbol, weight } => {
                    if prefix.is_empty() {
                        f(symbol, *weight, &BitString::from_iter([false]))
                    } else {
                        f(symbol, *weight, &prefix)
                    }
                }
                Node::Internal { left, right, .. } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push(true);
                    let mut left_prefix = prefix;
                    left_prefix.push(false);
                    stack.push((*right, right_prefix));
                    stack.push((*left, left_prefix));
                }
            }
        }
    }

    /// Returns decoder that walks `self`, consuming one bit at a time.
    #[inline] pub fn decoder(&self) -> Decoder<'_, S> { Decoder::new(self) }
}

impl<S: Hash + Eq + Clone> HuffmanTree<S> {
    /// Returns a map from symbols to their codewords.
    #[inline] pub fn code_table(&self) -> CodeTable<S> { CodeTable::from_tree(self) }
}

impl<S: Hash + Eq + Ord + Clone> HuffmanTree<S> {
    /// Rebuilds the decoding tree from `codes`, e.g. read by [`CodeTable::read`].
    ///
    /// Weights are not recorded in code tables, so all weights of the result are `0`.
    /// Fails with [`Error::EmptyInput`] if `codes` is empty, or with [`Error::InvalidCodeTable`]
    /// if some codeword is empty or prefixes another one, or if the code is incomplete
    /// (some internal node would have a single child). A single codeword must be `0`.
    pub fn from_codes(codes: &CodeTable<S>) -> Result<Self, Error> {
        if codes.is_empty() { return Err(Error::EmptyInput); }
        if codes.len() == 1 {
            let (symbol, code) = codes.sorted()[0];
            return if code.len() == 1 && code.get(0) == Some(false) {
                Ok(Self::from_nodes(Box::new([Node::Leaf { symbol: symbol.clone(), weight: 0 }])))
            } else {
                Err(Error::InvalidCodeTable("the only codeword must be 0"))
            };
        }
        let mut trie = vec![TrieNode::Branch([None, None])];
        for (symbol, code) in codes.sorted() {
            if code.is_empty() { return Err(Error::InvalidCodeTable("empty codeword")); }
            let mut current = 0;
            for (i, bit) in code.iter().enumerate() {
                let last = i + 1 == code.len();
                let free = trie.len();
                let (child, existed) = match &mut trie[current] {
                    TrieNode::Leaf(_) => return Err(Error::InvalidCodeTable("codeword prefixed by another one")),
                    TrieNode::Branch(children) => match children[bit as usize] {
                        Some(child) => (child, true),
                        None => { children[bit as usize] = Some(free); (free, false) }
                    }
                };
                if existed {
                    if last { return Err(Error::InvalidCodeTable("codeword prefixes another one")); }
                } else {
                    trie.push(if last { TrieNode::Leaf(symbol) } else { TrieNode::Branch([None, None]) });
                }
                current = child;
            }
        }
        // post-order, so children precede their parents and the root is the last
        let mut index = vec![0u32; trie.len()];
        let mut nodes = Vec::with_capacity(trie.len());
        let mut stack = vec![(0, false)];
        while let Some((t, expanded)) = stack.pop() {
            match trie[t] {
                TrieNode::Leaf(symbol) => {
                    index[t] = nodes.len() as u32;
                    nodes.push(Node::Leaf { symbol: symbol.clone(), weight: 0 });
                }
                TrieNode::Branch([Some(left), Some(right)]) => if expanded {
                    index[t] = nodes.len() as u32;
                    nodes.push(Node::Internal { weight: 0, left: index[left], right: index[right] });
                } else {
                    stack.push((t, true));
                    stack.push((right, false));
                    stack.push((left, false));
                }
                TrieNode::Branch(_) => return Err(Error::InvalidCodeTable("incomplete code"))
            }
        }
        let result = Self::from_nodes(nodes.into_boxed_slice());
        tracing::debug!(symbols = result.symbols_count(), depth = result.depth(), "Huffman tree rebuilt from codes");
        Ok(result)
    }
}

impl<S: GetSize> GetSize for HuffmanTree<S> {
    fn size_bytes_content_dyn(&self) -> usize {
        self.nodes.len() * std::mem::size_of::<Node<S>>() +
            if S::USES_DYN_MEM { self.nodes.iter().map(Node::size_bytes_content_dyn).sum::<usize>() } else { 0 }
    }
    const USES_DYN_MEM: bool = true;
}
