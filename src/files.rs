//! File helpers for the command line front end.
//!
//! Each handle lives for the duration of one call and is closed when it goes
//! out of scope, on success and on error alike.

use log::info;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Extension given to compressed files.
pub const EXTENSION: &str = "huf";

/// Byte counts on both sides of a file operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub input_len: usize,
    pub output_len: usize,
}

impl Summary {
    /// Output size as a fraction of input size.
    pub fn ratio(&self) -> f64 {
        if self.input_len == 0 {
            0.0
        } else {
            self.output_len as f64 / self.input_len as f64
        }
    }
}

pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    let fail = |e| Error::source_unavailable(Some(path.to_path_buf()), e);

    let mut file = File::open(path).map_err(fail)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).map_err(fail)?;
    Ok(data)
}

pub fn write_sink(path: &Path, data: &[u8]) -> Result<()> {
    let fail = |e| Error::sink_unavailable(Some(path.to_path_buf()), e);

    let mut out = BufWriter::new(File::create(path).map_err(fail)?);
    out.write_all(data).map_err(fail)?;
    out.flush().map_err(fail)
}

pub fn compress_file(input: &Path, output: &Path) -> Result<Summary> {
    let data = read_source(input)?;
    let encoder = crate::encoder_for(&data)?;

    let fail = |e| Error::sink_unavailable(Some(output.to_path_buf()), e);
    let mut out = BufWriter::new(File::create(output).map_err(fail)?);
    encoder
        .write_container(&data, &mut out)
        .map_err(|e| with_sink_path(e, output))?;
    let output_len = out.get_ref().metadata().map_err(fail)?.len() as usize;

    let summary = Summary {
        input_len: data.len(),
        output_len,
    };
    info!(
        "compressed {} ({} bytes) into {} ({} bytes)",
        input.display(),
        summary.input_len,
        output.display(),
        summary.output_len
    );
    Ok(summary)
}

pub fn decompress_file(input: &Path, output: &Path) -> Result<Summary> {
    let container = read_source(input)?;
    let data = crate::decompress(&container)?;
    write_sink(output, &data)?;

    let summary = Summary {
        input_len: container.len(),
        output_len: data.len(),
    };
    info!(
        "decompressed {} ({} bytes) into {} ({} bytes)",
        input.display(),
        summary.input_len,
        output.display(),
        summary.output_len
    );
    Ok(summary)
}

fn with_sink_path(err: Error, path: &Path) -> Error {
    match err {
        Error::SinkUnavailable { path: None, source } => {
            Error::sink_unavailable(Some(path.to_path_buf()), source)
        }
        other => other,
    }
}

/// Default name for the compressed form of `input`: `.huf` appended.
pub fn compressed_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

/// Default name for the decompressed form of `input`: a trailing `.huf`
/// stripped, otherwise `.out` appended.
pub fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == EXTENSION) {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("huffman-files-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn file_roundtrip() {
        let original = scratch("roundtrip.txt");
        let compressed = compressed_path(&original);
        let restored = scratch("roundtrip.restored");

        let text = "It was the best of times, it was the worst of times.\n".repeat(40);
        fs::write(&original, &text).unwrap();

        let c = compress_file(&original, &compressed).unwrap();
        assert_eq!(c.input_len, text.len());
        assert_eq!(c.output_len as u64, fs::metadata(&compressed).unwrap().len());
        assert!(c.ratio() < 1.0);

        let d = decompress_file(&compressed, &restored).unwrap();
        assert_eq!(d.output_len, text.len());
        assert_eq!(fs::read_to_string(&restored).unwrap(), text);
    }

    #[test]
    fn missing_input_is_source_unavailable() {
        let missing = scratch("does-not-exist.txt");
        let err = compress_file(&missing, &scratch("never.huf")).unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable { path: Some(ref p), .. } if *p == missing));
    }

    #[test]
    fn unwritable_output_is_sink_unavailable() {
        let input = scratch("sink.txt");
        fs::write(&input, "abc").unwrap();
        let bad = scratch("no-such-dir").join("out.huf");

        let err = compress_file(&input, &bad).unwrap_err();
        assert!(matches!(err, Error::SinkUnavailable { path: Some(_), .. }));
    }

    #[test]
    fn empty_file_is_empty_alphabet() {
        let input = scratch("empty.txt");
        fs::write(&input, "").unwrap();
        let err = compress_file(&input, &scratch("empty.txt.huf")).unwrap_err();
        assert!(matches!(err, Error::EmptyAlphabet));
    }

    #[test]
    fn default_names() {
        assert_eq!(compressed_path(Path::new("a/input.txt")), PathBuf::from("a/input.txt.huf"));
        assert_eq!(decompressed_path(Path::new("a/input.txt.huf")), PathBuf::from("a/input.txt"));
        assert_eq!(decompressed_path(Path::new("blob.bin")), PathBuf::from("blob.bin.out"));
    }
}
