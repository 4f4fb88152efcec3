use thiserror::Error;

/// Longest accepted input, `xxx.xxx.xxx.xxx/xx`.
pub const MAX_INPUT_LEN: usize = 18;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("Invalid argument: input is {len} bytes, longer than 18")]
    TooLong { len: usize },
    #[error("Invalid argument: bad IPv4 address {0:?}")]
    InvalidAddress(String),
    #[error("Invalid argument: bad prefix length {0:?}")]
    InvalidPrefix(String),
    #[error("Invalid argument: unknown selector {0:?}")]
    InvalidSelector(String),
}
