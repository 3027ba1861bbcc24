use thiserror::Error;

/// The error taxonomy for the core: configuration, framing, and protocol
/// violations. Redundant packets are not an error — `Decoder::ingest`
/// reports them as `Ok(false)` with no state change.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CoreError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("frame: {0}")]
    Frame(#[from] FrameError),

    #[error("protocol: {0}")]
    Protocol(#[from] ProtocolError),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("block_size must be > 0, got {0}")]
    ZeroBlockSize(usize),

    #[error("file_size must be > 0")]
    ZeroFileSize,

    #[error("max_payload_size must be >= 2, got {0}")]
    PayloadTooSmall(usize),

    #[error("no block_size satisfies ceil(K/8) + block_size <= {max_payload_size} for file_size {file_size}")]
    Infeasible {
        file_size: usize,
        max_payload_size: usize,
    },

    #[error("decoder requires K >= 1")]
    ZeroBlockCount,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FrameError {
    #[error("header is not well-formed: {0:?}")]
    Malformed(String),

    #[error("header field count mismatch: expected 5 colon-separated fields, got {0}")]
    FieldCount(usize),

    #[error("header integer field {field:?} is not a valid decimal integer: {value:?}")]
    NotAnInteger { field: &'static str, value: String },

    #[error("file_name must not contain ':'")]
    NameContainsColon,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ProtocolError {
    #[error("index {index} out of range for K={k}")]
    IndexOutOfRange { index: usize, k: usize },

    #[error("payload length {actual} does not match block_size {expected}")]
    PayloadLengthMismatch { expected: usize, actual: usize },

    #[error("reconstruct() called before decoding completed: {recovered}/{k} blocks recovered")]
    DecodingIncomplete { recovered: usize, k: usize },
}

pub type CoreResult<T> = Result<T, CoreError>;
