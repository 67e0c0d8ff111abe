use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;
use crate::frequency::{display_symbol, FrequencyTable};
use crate::tree::Node;

/// Bit string for one symbol, first bit first.
pub type Code = BitVec<u8, Msb0>;

/// Symbol to code mapping derived from a coding tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SerializableCodeTable", into = "SerializableCodeTable")]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Walks the tree depth first, `0` for left and `1` for right.
    ///
    /// A tree that is a single leaf has no edges to walk, so its symbol gets
    /// the one-bit code `0`.
    pub fn from_tree(root: &Node) -> Self {
        fn traverse(node: &Node, v: &mut Code, codes: &mut BTreeMap<u8, Code>) {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes.insert(*symbol, v.clone());
                }
                Node::Internal { left, right, .. } => {
                    v.push(false);
                    traverse(left, v, codes);
                    v.pop();

                    v.push(true);
                    traverse(right, v, codes);
                    v.pop();
                }
            }
        }

        let mut codes = BTreeMap::new();
        if let Node::Leaf { symbol, .. } = root {
            codes.insert(*symbol, bitvec![u8, Msb0; 0]);
        } else {
            traverse(root, &mut Code::new(), &mut codes);
        }

        Self { codes }
    }

    /// Builds the tree for `freq` and derives its codes.
    pub fn from_frequencies(freq: &FrequencyTable) -> Result<Self> {
        Node::from_frequencies(freq).map(|root| Self::from_tree(&root))
    }

    /// Takes codes as they are, without checking that they form a usable
    /// table. The container decoder does its own validation.
    pub(crate) fn from_codes(codes: BTreeMap<u8, Code>) -> Self {
        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|c| c.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c.as_bitslice()))
    }

    /// True if no code is a prefix of another and none is empty.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().all(|c| !c.is_empty())
            && codes.iter().enumerate().all(|(i, a)| {
                codes
                    .iter()
                    .enumerate()
                    .all(|(j, b)| i == j || !b.starts_with(a.as_bitslice()))
            })
    }

    /// Number of payload bits `freq` would encode to, before padding.
    ///
    /// Symbols missing from the table count as zero bits.
    pub fn encoded_bit_len(&self, freq: &FrequencyTable) -> u64 {
        freq.iter()
            .filter_map(|(s, count)| self.codes.get(&s).map(|c| c.len() as u64 * count))
            .sum()
    }
}

/// Renders a code as ASCII `0` and `1`.
pub fn code_to_string(code: &BitSlice<u8, Msb0>) -> String {
    code.iter()
        .by_vals()
        .map(|b| if b { '1' } else { '0' })
        .collect()
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self.iter() {
            writeln!(f, "'{}' : {}", display_symbol(symbol), code_to_string(code))?;
        }
        Ok(())
    }
}

/// Serde form of a [`CodeTable`]: each code as its bit length plus the
/// packed bytes holding it.
#[derive(Serialize, Deserialize)]
struct SerializableCodeTable {
    codes: BTreeMap<u8, (usize, Box<[u8]>)>,
}

impl From<CodeTable> for SerializableCodeTable {
    fn from(other: CodeTable) -> Self {
        Self {
            codes: other
                .codes
                .into_iter()
                .map(|(k, v)| {
                    let len = v.len();
                    (k, (len, v.into_vec().into_boxed_slice()))
                })
                .collect(),
        }
    }
}

impl From<SerializableCodeTable> for CodeTable {
    fn from(other: SerializableCodeTable) -> Self {
        Self {
            codes: other
                .codes
                .into_iter()
                .map(|(k, (len, bs))| {
                    let mut bv = Code::from_vec(bs.into_vec());
                    bv.resize(len, false);
                    (k, bv)
                })
                .collect(),
        }
    }
}
