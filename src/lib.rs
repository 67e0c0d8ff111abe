//! # huffman
//!
//! Lossless byte-stream compression with Huffman codes, stored in a
//! self-describing container that carries its own code table.
//!
//! ```rust
//! let data = b"abracadabra";
//! let container = huffman::compress(data)?;
//! assert_eq!(huffman::decompress(&container)?, data);
//! # Ok::<(), huffman::Error>(())
//! ```
//!
//! The pipeline is also available piece by piece:
//!
//! ```rust
//! use huffman::{CodeTable, Decoder, Encoder, FrequencyTable};
//!
//! let freq = FrequencyTable::from_bytes(b"mississippi");
//! let table = CodeTable::from_frequencies(&freq)?;
//! let container = Encoder::new(table).encode(b"mississippi")?;
//!
//! let (decoder, payload) = Decoder::parse(&container)?;
//! assert_eq!(decoder.decode(payload)?, b"mississippi");
//! # Ok::<(), huffman::Error>(())
//! ```

pub mod code;
pub mod container;
pub mod error;
pub mod files;
pub mod frequency;
pub mod tree;

use log::warn;

pub use code::{Code, CodeTable};
pub use container::{Decoder, Encoder};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use tree::{build_tree, Node};

/// Counts `data`, builds its tree and returns an encoder for its codes.
pub fn encoder_for(data: &[u8]) -> Result<Encoder> {
    let freq = FrequencyTable::from_bytes(data);
    let table = CodeTable::from_frequencies(&freq)?;
    Ok(Encoder::new(table))
}

/// Compresses `data` into a container.
///
/// Empty input has no alphabet and fails with [`Error::EmptyAlphabet`].
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    encoder_for(data)?.encode(data)
}

/// Restores the bytes held in `container`.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    let result = Decoder::parse(container).and_then(|(decoder, payload)| decoder.decode(payload));
    if let Err(e) = &result {
        if e.is_corrupt_input() {
            warn!("rejected container of {} bytes: {e}", container.len());
        }
    }
    result
}
