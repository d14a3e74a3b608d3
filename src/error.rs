//! Errors raised while resolving options.

use std::io;

use thiserror::Error;

/// Broad class of an [`OptionError`], used to pick diagnostics and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    Schema,
    Arity,
}

/// Fatal option error. Resolution stops at the first one.
#[derive(Error, Debug)]
pub enum OptionError {
    #[error("{source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: io::Error,
    },

    #[error("{source_name}: {source}")]
    Parse {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{source_name}: contents are not a JSON object")]
    NotAnObject { source_name: String },

    #[error("{source_name}: {fragment}: option is not a string")]
    OptionNotString {
        source_name: String,
        fragment: String,
    },

    #[error("{source_name}: {fragment}: option argument is not a string, number, or null")]
    InvalidArgument {
        source_name: String,
        fragment: String,
    },

    #[error("{name} requires an argument but one was not specified")]
    MissingArgument { name: &'static str },

    #[error("{name} does not require an argument but one was specified")]
    UnexpectedArgument { name: &'static str },

    #[error("failed to write diagnostic: {0}")]
    Diagnostic(#[source] io::Error),
}

impl OptionError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } | Self::Diagnostic(_) => ErrorKind::Io,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::NotAnObject { .. }
            | Self::OptionNotString { .. }
            | Self::InvalidArgument { .. } => ErrorKind::Schema,
            Self::MissingArgument { .. } | Self::UnexpectedArgument { .. } => ErrorKind::Arity,
        }
    }
}

pub type Result<T> = std::result::Result<T, OptionError>;
