//! Error types for building codes and reading or writing containers.

use std::io;
use std::path::PathBuf;

/// Error type for every fallible operation in the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input could not be opened or read.
    #[error("cannot read input {}", display_path(.path))]
    SourceUnavailable {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// The output could not be opened or written.
    #[error("cannot write output {}", display_path(.path))]
    SinkUnavailable {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    /// The frequency table has no entries, so there is no tree to build.
    #[error("empty alphabet: nothing to encode")]
    EmptyAlphabet,

    /// The container header or padding marker is inconsistent.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// Bits left over after the payload that never match a code.
    #[error("undecodable tail: {bits} trailing bit(s) match no code")]
    UndecodableTail { bits: usize },

    /// The encoder was handed a byte its code table has no entry for.
    #[error("symbol {0:#04x} has no code")]
    UnknownSymbol(u8),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedContainer(reason.into())
    }

    pub(crate) fn source_unavailable(path: Option<PathBuf>, source: io::Error) -> Self {
        Error::SourceUnavailable { path, source }
    }

    pub(crate) fn sink_unavailable(path: Option<PathBuf>, source: io::Error) -> Self {
        Error::SinkUnavailable { path, source }
    }

    /// Returns true if the error comes from the bytes of a container rather
    /// than from the environment.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            Error::MalformedContainer(_) | Error::UndecodableTail { .. }
        )
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "<stream>".to_string(),
    }
}
