//! Huffman encoder.
//!
//! The code tree is built from symbol frequencies with a min-heap, then laid
//! out in the node-pair table read by
//! [`HuffmanDecoder`](crate::decode::HuffmanDecoder). Each internal node can
//! only point 63 pairs ahead of its own pair, so the layout places child pairs
//! depth-first and switches to the oldest pending node whenever that one is
//! about to run out of reach. Alphabets of up to 64 symbols (and so every
//! 4-bit alphabet) always fit. When a larger, skewed alphabet does not, the
//! tree is rebuilt from frequency-ranked chunks of 64 symbols, which trades a
//! little code length for a shape whose table always fits.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::io::Write;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::debug;

use super::Encoder;
use crate::decode::huffman::{NibbleOrder, SymbolDepth, WordOrder};
use crate::error::{Error, Result};

/// Largest child-pair offset a node byte can hold.
const MAX_OFFSET: usize = 0x3F;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Node {
    Leaf(u8),
    /// Children for bit 0 and bit 1.
    Internal(usize, usize),
}

/// Code tree in an arena; the root is the last node.
#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
}

/// Symbols per subtree of a chunked tree; a node over at most this many
/// leaves has fewer than [`MAX_OFFSET`] internal nodes below it.
const CHUNK_LEAVES: usize = MAX_OFFSET + 1;

impl Tree {
    /// Build from the frequency of each symbol. Fewer than two used symbols
    /// are padded with zero-frequency partners so the root always has two
    /// children.
    fn build(frequencies: &[u64]) -> Tree {
        let mut nodes = Vec::new();
        huffman(&mut nodes, &leaves(frequencies));
        Tree { nodes }
    }

    /// Build a tree whose table always fits: symbols are ranked by frequency
    /// and cut into chunks of [`CHUNK_LEAVES`], each chunk gets its own
    /// Huffman subtree, and the subtrees hang off a chain with the most
    /// frequent chunk nearest the root.
    fn build_chunked(frequencies: &[u64]) -> Tree {
        let mut ranked = leaves(frequencies);
        ranked.sort_by_key(|&(freq, symbol)| (Reverse(freq), symbol));

        let mut nodes = Vec::new();
        let roots: Vec<usize> = ranked
            .chunks(CHUNK_LEAVES)
            .filter_map(|chunk| huffman(&mut nodes, chunk))
            .collect();
        if let Some((&last, rest)) = roots.split_last() {
            let mut tail = last;
            for &head in rest.iter().rev() {
                nodes.push(Node::Internal(head, tail));
                tail = nodes.len() - 1;
            }
        }
        Tree { nodes }
    }

    fn root(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Code of every symbol, indexed by symbol value.
    fn codes(&self) -> Vec<Vec<bool>> {
        let mut codes = vec![Vec::new(); 256];
        let mut stack = vec![(self.root(), Vec::new())];
        while let Some((index, path)) = stack.pop() {
            match self.nodes[index] {
                Node::Leaf(symbol) => codes[symbol as usize] = path,
                Node::Internal(zero, one) => {
                    let mut left = path.clone();
                    left.push(false);
                    let mut right = path;
                    right.push(true);
                    stack.push((zero, left));
                    stack.push((one, right));
                }
            }
        }
        codes
    }

    fn is_leaf(&self, index: usize) -> bool {
        matches!(self.nodes[index], Node::Leaf(_))
    }

    /// Append the child pair of the internal node stored at `address` and
    /// point the node at it. Returns the children that still need a pair.
    fn place_pair(&self, table: &mut Vec<u8>, index: usize, address: usize) -> Result<[Option<usize>; 2]> {
        let pair = table.len();
        let offset = (pair - (address & !1) - 2) / 2;
        if offset > MAX_OFFSET {
            return Err(Error::HuffmanTreeTooWide);
        }
        let Node::Internal(zero, one) = self.nodes[index] else {
            return Err(Error::HuffmanTreeTooWide);
        };

        table[address] = offset as u8 | (u8::from(self.is_leaf(zero)) << 7) | (u8::from(self.is_leaf(one)) << 6);
        table.extend_from_slice(&[0, 0]);
        let mut pending = [None, None];
        for (slot, child) in [zero, one].into_iter().enumerate() {
            match self.nodes[child] {
                Node::Leaf(symbol) => table[pair + slot] = symbol,
                Node::Internal(..) => pending[slot] = Some(child),
            }
        }
        Ok(pending)
    }

    /// Serialised table: pair count, root node, then the node pairs.
    ///
    /// Child pairs go depth-first; the oldest pending node is placed first
    /// whenever it is about to run out of reach.
    fn layout(&self) -> Result<Vec<u8>> {
        let mut table = vec![0u8; 2];
        // Internal nodes whose child pair is not placed yet, with their address.
        let mut open: VecDeque<(usize, usize)> = VecDeque::new();
        open.push_back((self.root(), 1));

        while let Some(&(_, oldest_address)) = open.front() {
            let pair = table.len();
            let oldest_offset = (pair - (oldest_address & !1) - 2) / 2;
            let next = if oldest_offset + open.len() + 2 > MAX_OFFSET {
                open.pop_front()
            } else {
                open.pop_back()
            };
            let (index, address) = next.ok_or(Error::HuffmanTreeTooWide)?;

            let children = self.place_pair(&mut table, index, address)?;
            for (slot, child) in children.into_iter().enumerate() {
                if let Some(child) = child {
                    open.push_back((child, pair + slot));
                }
            }
        }

        table[0] = ((table.len() - 2) / 2) as u8;
        Ok(table)
    }

    /// Serialised table with every subtree laid out contiguously, the smaller
    /// child subtree first. The smaller child's pair then directly follows
    /// its parent's, and the larger one sits just past the smaller subtree,
    /// so a tree fits whenever every node has a child with at most
    /// [`MAX_OFFSET`] internal nodes. Trees from
    /// [`build_chunked`](Self::build_chunked) always do.
    fn layout_depth_first(&self) -> Result<Vec<u8>> {
        // Internal nodes in each subtree; children precede parents in the arena.
        let mut internal = vec![0usize; self.nodes.len()];
        for (index, node) in self.nodes.iter().enumerate() {
            if let Node::Internal(zero, one) = *node {
                internal[index] = 1 + internal[zero] + internal[one];
            }
        }

        let mut table = vec![0u8; 2];
        let mut pending = vec![(self.root(), 1)];
        while let Some((index, address)) = pending.pop() {
            let pair = table.len();
            let mut children: Vec<(usize, usize)> = self
                .place_pair(&mut table, index, address)?
                .into_iter()
                .enumerate()
                .filter_map(|(slot, child)| child.map(|child| (child, pair + slot)))
                .collect();
            // Larger subtree pushed first, so the smaller one is placed next.
            children.sort_by_key(|&(child, _)| Reverse(internal[child]));
            pending.extend(children);
        }

        table[0] = ((table.len() - 2) / 2) as u8;
        Ok(table)
    }
}

/// Used symbols in symbol order with their frequencies, padded with
/// zero-frequency partners up to two entries.
fn leaves(frequencies: &[u64]) -> Vec<(u64, u8)> {
    let mut leaves: Vec<(u64, u8)> = frequencies
        .iter()
        .enumerate()
        .filter(|&(_, &freq)| freq > 0)
        .map(|(symbol, &freq)| (freq, symbol as u8))
        .collect();
    match leaves.as_slice() {
        [] => leaves.extend([(0, 0), (0, 1)]),
        [(_, only)] => {
            let partner = only ^ 1;
            leaves.push((0, partner));
        }
        _ => {}
    }
    leaves
}

/// Append a Huffman tree over `leaves` to `nodes` and return its root.
fn huffman(nodes: &mut Vec<Node>, leaves: &[(u64, u8)]) -> Option<usize> {
    let mut heap = BinaryHeap::new();
    for &(freq, symbol) in leaves {
        heap.push(Reverse((freq, nodes.len())));
        nodes.push(Node::Leaf(symbol));
    }
    while heap.len() > 1 {
        let (Some(Reverse((fa, a))), Some(Reverse((fb, b)))) = (heap.pop(), heap.pop()) else {
            break;
        };
        heap.push(Reverse((fa + fb, nodes.len())));
        nodes.push(Node::Internal(a, b));
    }
    heap.pop().map(|Reverse((_, root))| root)
}

// ─────────────────────────────────────────────────────────────────────────────
// Bit packing
// ─────────────────────────────────────────────────────────────────────────────

/// Packs bits most significant first into 32-bit words.
struct WordWriter {
    word: u32,
    used: u32,
    bytes: Vec<u8>,
}

impl WordWriter {
    fn new() -> Self {
        WordWriter {
            word: 0,
            used: 0,
            bytes: Vec::new(),
        }
    }

    #[inline]
    fn push<B: ByteOrder>(&mut self, bit: bool) {
        if bit {
            self.word |= 1 << (31 - self.used);
        }
        self.used += 1;
        if self.used == 32 {
            self.flush::<B>();
        }
    }

    fn flush<B: ByteOrder>(&mut self) {
        let mut buf = [0u8; 4];
        B::write_u32(&mut buf, self.word);
        self.bytes.extend_from_slice(&buf);
        self.word = 0;
        self.used = 0;
    }

    /// Packed words, the last one zero-padded.
    fn finish<B: ByteOrder>(mut self) -> Vec<u8> {
        if self.used > 0 {
            self.flush::<B>();
        }
        self.bytes
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HuffmanEncoder
// ─────────────────────────────────────────────────────────────────────────────

/// Encoder producing headerless Huffman data; decoding needs the input length.
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanEncoder {
    depth: SymbolDepth,
    nibble_order: NibbleOrder,
    word_order: WordOrder,
}

impl HuffmanEncoder {
    pub fn new(depth: SymbolDepth) -> Self {
        HuffmanEncoder {
            depth,
            ..Default::default()
        }
    }

    pub fn with_nibble_order(mut self, order: NibbleOrder) -> Self {
        self.nibble_order = order;
        self
    }

    pub fn with_word_order(mut self, order: WordOrder) -> Self {
        self.word_order = order;
        self
    }

    fn symbols(&self, input: &[u8]) -> Vec<u8> {
        match self.depth {
            SymbolDepth::Eight => input.to_vec(),
            SymbolDepth::Four => input.iter().flat_map(|&b| self.nibble_order.split(b)).collect(),
        }
    }

    fn pack<B: ByteOrder>(symbols: &[u8], codes: &[Vec<bool>]) -> Vec<u8> {
        let mut writer = WordWriter::new();
        for &symbol in symbols {
            for &bit in &codes[symbol as usize] {
                writer.push::<B>(bit);
            }
        }
        writer.finish::<B>()
    }
}

impl Encoder for HuffmanEncoder {
    fn encode(&self, input: &[u8], output: &mut dyn Write) -> Result<()> {
        let symbols = self.symbols(input);
        let mut frequencies = [0u64; 256];
        for &s in &symbols {
            frequencies[s as usize] += 1;
        }

        let mut tree = Tree::build(&frequencies);
        let table = match tree.layout() {
            Ok(table) => table,
            Err(Error::HuffmanTreeTooWide) => {
                debug!("huffman: tree too deep for the table, rebuilding in chunks of {CHUNK_LEAVES}");
                tree = Tree::build_chunked(&frequencies);
                tree.layout_depth_first()?
            }
            Err(e) => return Err(e),
        };
        let codes = tree.codes();
        let data = match self.word_order {
            WordOrder::LittleEndian => Self::pack::<LittleEndian>(&symbols, &codes),
            WordOrder::BigEndian => Self::pack::<BigEndian>(&symbols, &codes),
        };

        output.write_all(&table)?;
        output.write_all(&data)?;
        debug!(
            "huffman: {} symbols of {} bits, {} tree pairs, {} data bytes",
            symbols.len(),
            self.depth.bits(),
            table[0],
            data.len()
        );
        Ok(())
    }
}
