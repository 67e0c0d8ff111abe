use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use crate::error::{Error, Result};

/// Occurrence count of every byte value seen in an input.
///
/// Iteration is always in ascending symbol order; the tree builder relies on
/// that order to break ties between equal weights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyTable {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::default();
        table.extend(bytes);
        table
    }

    /// Counts every byte produced by `reader` until end of input.
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut table = Self::default();
        let mut buf = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::source_unavailable(None, e)),
            };
            table.extend(&buf[..n]);
        }
        Ok(table)
    }

    fn extend(&mut self, bytes: &[u8]) {
        for &b in bytes {
            *self.counts.entry(b).or_default() += 1;
        }
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&s, &c)| (s, c))
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (s, c) in iter {
            if c > 0 {
                *counts.entry(s).or_default() += c;
            }
        }
        Self { counts }
    }
}

/// Renders a byte the way the reports print it: printable ASCII as-is,
/// everything else escaped.
pub(crate) fn display_symbol(symbol: u8) -> String {
    match symbol {
        b' ' => " ".to_string(),
        s if s.is_ascii_graphic() => (s as char).to_string(),
        s => std::ascii::escape_default(s).to_string(),
    }
}

impl fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, count) in self.iter() {
            writeln!(f, "'{}' : {}", display_symbol(symbol), count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_abracadabra() {
        let t = FrequencyTable::from_bytes(b"abracadabra");
        assert_eq!(t.len(), 5);
        assert_eq!(t.get(b'a'), Some(5));
        assert_eq!(t.get(b'b'), Some(2));
        assert_eq!(t.get(b'r'), Some(2));
        assert_eq!(t.get(b'c'), Some(1));
        assert_eq!(t.get(b'd'), Some(1));
        assert_eq!(t.get(b'z'), None);
        assert_eq!(t.total(), 11);
    }

    #[test]
    fn counts_whitespace_and_control_bytes() {
        let t = FrequencyTable::from_bytes(b"a b\n\n\0\t");
        assert_eq!(t.get(b' '), Some(1));
        assert_eq!(t.get(b'\n'), Some(2));
        assert_eq!(t.get(0), Some(1));
        assert_eq!(t.get(b'\t'), Some(1));
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let t = FrequencyTable::from_bytes(&[]);
        assert!(t.is_empty());
        assert_eq!(t.total(), 0);
    }

    #[test]
    fn iterates_in_ascending_symbol_order() {
        let t = FrequencyTable::from_bytes(b"zyxcba");
        let symbols: Vec<u8> = t.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, b"abcxyz".to_vec());
    }

    #[test]
    fn from_reader_matches_from_bytes() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let t = FrequencyTable::from_reader(&data[..]).unwrap();
        assert_eq!(t, FrequencyTable::from_bytes(&data));
    }

    #[test]
    fn from_iter_drops_zero_counts() {
        let t: FrequencyTable = vec![(b'a', 3), (b'b', 0), (b'a', 2)].into_iter().collect();
        assert_eq!(t.len(), 1);
        assert_eq!(t.get(b'a'), Some(5));
    }

    #[test]
    fn display_escapes_non_printable() {
        let t = FrequencyTable::from_bytes(b"a\na");
        assert_eq!(t.to_string(), "'\\n' : 1\n'a' : 2\n");
    }
}
