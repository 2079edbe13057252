//! Error types for zcomp

use std::io;
use thiserror::Error;

/// Result type alias for zcomp operations
pub type Result<T> = std::result::Result<T, ZcompError>;

/// Main error type for zcomp
#[derive(Error, Debug)]
pub enum ZcompError {
    /// Completion attachment errors
    #[error("Attachment error: {0}")]
    Attach(#[from] AttachError),

    /// Dynamic completion protocol errors
    #[error("Completion error: {0}")]
    Complete(#[from] CompleteError),

    /// Command spec file errors
    #[error("Spec error: {0}")]
    Spec(#[from] SpecError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Misuse of the completion attachment operation.
///
/// These are programmer mistakes in declaring completions and fail at
/// definition time, not at completion time.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AttachError {
    #[error("attaching to a switch requires exactly one descriptor (none given)")]
    NoDescriptor,

    #[error("attaching to a switch requires exactly one descriptor ({0} given)")]
    AmbiguousDescriptor(usize),

    #[error("attaching to an entry point requires a parameter-name map, not bare descriptors")]
    EntryPointNeedsTable,

    #[error("attaching to an entry point requires at least one named descriptor")]
    EmptyTable,
}

/// Dynamic completion protocol errors
#[derive(Error, Debug)]
pub enum CompleteError {
    #[error("malformed completion request '{0}' (expected <target>:<index>)")]
    MalformedRequest(String),

    #[error("switch '{switch}' failed during replay: {source}")]
    Replay {
        switch: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Command spec validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpecError {
    #[error("switch spelling '{0}' is declared more than once")]
    DuplicateSpelling(String),

    #[error("completion attached to unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("switch must declare at least one spelling")]
    UnnamedSwitch,

    #[error("entry point declares more defaults ({defaults}) than parameters ({params})")]
    TooManyDefaults { defaults: usize, params: usize },
}

/// Specialized result type for attachment operations
pub type AttachResult<T> = std::result::Result<T, AttachError>;

/// Specialized result type for dynamic completion operations
pub type CompleteResult<T> = std::result::Result<T, CompleteError>;

/// Specialized result type for spec loading operations
pub type SpecResult<T> = std::result::Result<T, SpecError>;
