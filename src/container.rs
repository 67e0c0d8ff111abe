//! The on-disk container: a code table header, a padding marker and the
//! packed payload.
//!
//! ```text
//! [entry count: u64 LE]
//! entry count times, ascending symbol:
//!     [symbol: u8] [code length: u64 LE] [code: one ASCII '0' / '1' per bit]
//! [padding: u8, 0..=7]
//! [payload: bits packed MSB first, `padding` zero bits at the end]
//! ```

use bitvec::prelude::*;
use log::{debug, trace};
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use crate::code::{Code, CodeTable};
use crate::error::{Error, Result};

/// Largest alphabet a container can describe.
pub const MAX_ENTRIES: usize = 256;

/// Longest code a tree over `MAX_ENTRIES` leaves can produce.
pub const MAX_CODE_LEN: usize = MAX_ENTRIES - 1;

const COUNT_LEN: usize = 8;
const ENTRY_FIXED_LEN: usize = 1 + 8;

/// Translates bytes into a container using a fixed code table.
#[derive(Debug, Clone)]
pub struct Encoder {
    table: CodeTable,
}

impl Encoder {
    pub fn new(table: CodeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Concatenates the code of every input byte.
    pub fn encode_bits(&self, input: &[u8]) -> Result<BitVec<u8, Msb0>> {
        let mut out = BitVec::new();
        for &b in input {
            let code = self.table.get(b).ok_or(Error::UnknownSymbol(b))?;
            out.extend_from_bitslice(code);
        }

        Ok(out)
    }

    /// Writes the full container for `input` to `out`.
    ///
    /// Nothing is cleaned up if a write fails part way; whatever reached
    /// `out` is not a valid container.
    pub fn write_container<W: Write>(&self, input: &[u8], mut out: W) -> Result<()> {
        let mut bits = self.encode_bits(input)?;
        let padding = (8 - bits.len() % 8) % 8;
        debug!(
            "encoding {} bytes into {} payload bits, {} padding",
            input.len(),
            bits.len(),
            padding
        );
        bits.resize(bits.len() + padding, false);

        put(&mut out, &self.header())?;
        put(&mut out, &[padding as u8])?;
        put(&mut out, bits.as_raw_slice())?;
        out.flush().map_err(|e| Error::sink_unavailable(None, e))
    }

    /// Returns the container for `input` as a byte vector.
    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_container(input, &mut out)?;
        Ok(out)
    }

    fn header(&self) -> Vec<u8> {
        let mut header = Vec::with_capacity(COUNT_LEN + self.table.len() * (ENTRY_FIXED_LEN + 8));
        header.extend_from_slice(&(self.table.len() as u64).to_le_bytes());
        for (symbol, code) in self.table.iter() {
            header.push(symbol);
            header.extend_from_slice(&(code.len() as u64).to_le_bytes());
            header.extend(code.iter().by_vals().map(|b| if b { b'1' } else { b'0' }));
        }
        header
    }
}

fn put<W: Write>(out: &mut W, bytes: &[u8]) -> Result<()> {
    out.write_all(bytes).map_err(|e| Error::sink_unavailable(None, e))
}

/// Inverts a container using only the code table it carries.
#[derive(Debug, Clone)]
pub struct Decoder {
    decode_table: HashMap<Code, u8>,
    max_code_len: usize,
}

impl Decoder {
    /// Builds the reverse lookup for `table`.
    ///
    /// Fails if the table is empty, has an empty code, or is not prefix free.
    pub fn from_table(table: &CodeTable) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::malformed("code table has no entries"));
        }

        let mut decode_table = HashMap::with_capacity(table.len());
        let mut max_code_len = 0;
        for (symbol, code) in table.iter() {
            if code.is_empty() || code.len() > MAX_CODE_LEN {
                return Err(Error::malformed(format!(
                    "symbol {symbol:#04x} has a {} bit code, outside 1..={MAX_CODE_LEN}",
                    code.len()
                )));
            }
            if let Some(other) = decode_table.insert(code.to_bitvec(), symbol) {
                return Err(Error::malformed(format!(
                    "symbols {other:#04x} and {symbol:#04x} share a code"
                )));
            }
            max_code_len = max_code_len.max(code.len());
        }

        let decoder = Self {
            decode_table,
            max_code_len,
        };
        if let Some(code) = decoder.code_with_proper_prefix() {
            return Err(Error::malformed(format!(
                "code {} has another code as a prefix",
                crate::code::code_to_string(&code)
            )));
        }

        Ok(decoder)
    }

    fn code_with_proper_prefix(&self) -> Option<Code> {
        self.decode_table
            .keys()
            .find(|code| {
                (1..code.len()).any(|n| self.decode_table.contains_key(&code[..n].to_bitvec()))
            })
            .cloned()
    }

    /// Parses the header and padding marker of `container`.
    ///
    /// Returns the decoder and the payload bits with the padding already
    /// dropped.
    pub fn parse(container: &[u8]) -> Result<(Self, &BitSlice<u8, Msb0>)> {
        let mut reader = Reader::new(container);

        let count = reader.read_len("entry count")?;
        if count == 0 || count > MAX_ENTRIES {
            return Err(Error::malformed(format!(
                "entry count {count} is outside 1..={MAX_ENTRIES}"
            )));
        }
        if count * ENTRY_FIXED_LEN > reader.remaining() {
            return Err(Error::malformed(format!(
                "entry count {count} needs more than the {} bytes left",
                reader.remaining()
            )));
        }

        let mut codes = BTreeMap::new();
        for i in 0..count {
            let symbol = reader.take(1, "entry symbol")?[0];
            let len = reader.read_len("code length")?;
            if len > MAX_CODE_LEN {
                return Err(Error::malformed(format!(
                    "entry {i}: code length {len} exceeds {MAX_CODE_LEN}"
                )));
            }
            let raw = reader.take(len, "code bits")?;
            let mut code = Code::with_capacity(len);
            for &c in raw {
                match c {
                    b'0' => code.push(false),
                    b'1' => code.push(true),
                    other => {
                        return Err(Error::malformed(format!(
                            "entry {i}: code byte {other:#04x} is not '0' or '1'"
                        )))
                    }
                }
            }
            trace!("entry {i}: symbol {symbol:#04x}, {len} bit code");
            if codes.insert(symbol, code).is_some() {
                return Err(Error::malformed(format!(
                    "symbol {symbol:#04x} appears twice"
                )));
            }
        }
        let decoder = Self::from_table(&CodeTable::from_codes(codes))?;

        let padding = reader.take(1, "padding marker")?[0] as usize;
        let payload = reader.rest().view_bits::<Msb0>();
        if padding > 7 || padding > payload.len() {
            return Err(Error::malformed(format!(
                "padding {padding} does not fit a {} bit payload",
                payload.len()
            )));
        }
        debug!(
            "parsed {count} codes, {} payload bits, {padding} padding",
            payload.len()
        );

        Ok((decoder, &payload[..payload.len() - padding]))
    }

    /// Greedily matches `input` against the code table.
    pub fn decode(&self, input: &BitSlice<u8, Msb0>) -> Result<Vec<u8>> {
        let mut out = Vec::new();

        let mut cursor = Code::with_capacity(self.max_code_len);
        for (i, b) in input.iter().by_vals().enumerate() {
            cursor.push(b);
            if let Some(&sym) = self.decode_table.get(&cursor) {
                cursor.clear();
                out.push(sym);
            } else if cursor.len() >= self.max_code_len {
                // no code is longer, so nothing from here on can match
                return Err(Error::UndecodableTail {
                    bits: input.len() - (i + 1 - cursor.len()),
                });
            }
        }

        if !cursor.is_empty() {
            return Err(Error::UndecodableTail { bits: cursor.len() });
        }

        Ok(out)
    }

    /// Recovers the code table the decoder was built from.
    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_codes(
            self.decode_table
                .iter()
                .map(|(code, &sym)| (sym, code.clone()))
                .collect(),
        )
    }
}

/// Bounds-checked cursor over header bytes.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::malformed(format!(
                "{what} needs {n} bytes at offset {}, {} left",
                self.pos,
                self.remaining()
            )));
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn read_len(&mut self, what: &str) -> Result<usize> {
        let raw = self.take(8, what)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(raw);
        let value = u64::from_le_bytes(buf);
        usize::try_from(value)
            .map_err(|_| Error::malformed(format!("{what} {value} does not fit in memory")))
    }

    fn rest(self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}
