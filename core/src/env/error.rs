//! Configuration error types.

use std::io;

use derive_more::{Display, Error};

/// Errors raised while loading and remapping configuration.
///
/// `Load` and `Parse` are fatal at startup. `UnknownKey` is a programming
/// error: callers check `is_supported` before calling `remap`.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    /// The property file is missing or unreadable.
    #[display("cannot read property file {path}: {source}")]
    Load { path: String, source: io::Error },

    /// A line is neither blank, a comment, nor `key=value`.
    #[display("malformed property at {path}:{line}: {content:?}")]
    Parse {
        path: String,
        line: usize,
        content: String,
    },

    /// `remap` was called for a key the remapper does not support.
    #[display("unsupported property key {key}")]
    UnknownKey {
        #[error(not(source))]
        key: String,
    },
}

impl From<ConfigError> for io::Error {
    fn from(err: ConfigError) -> Self {
        let kind = match &err {
            ConfigError::Load { source, .. } => source.kind(),
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err.to_string())
    }
}
