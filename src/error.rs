use thiserror::Error;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
/// Enum for the failures raised by the byte cursors.
pub enum CodecError {
    #[error("Buffer underrun. Needed {needed} bytes, {remaining} remaining.")]
    BufferUnderrun { needed: usize, remaining: usize },

    #[error("Varint exceeds {max_bytes} bytes")]
    VarintTooLong { max_bytes: usize },

    #[error("Invalid bit width {0}. At most 32 bits can be packed at once.")]
    InvalidBitWidth(u32),

    #[error("Length {0} does not fit a 32-bit length prefix")]
    LengthTooLarge(usize),

    #[error("Length {length} exceeds configured limit of {limit}")]
    LengthLimitExceeded { length: u32, limit: u32 },

    #[error("String is not valid UTF-8")]
    InvalidUtf8,

    #[error("Invalid {type_name} discriminant: {value}")]
    InvalidDiscriminant {
        type_name: &'static str,
        value: u64,
    },

    #[error("{0}")]
    General(String),
}

pub type CodecResult<T = ()> = Result<T, CodecError>;

impl From<&str> for CodecError {
    fn from(s: &str) -> Self {
        CodecError::General(s.to_string())
    }
}

impl From<String> for CodecError {
    fn from(s: String) -> Self {
        CodecError::General(s)
    }
}

impl From<std::str::Utf8Error> for CodecError {
    fn from(_: std::str::Utf8Error) -> Self {
        CodecError::InvalidUtf8
    }
}

impl CodecError {
    pub(crate) fn underrun(needed: usize, remaining: usize) -> Self {
        CodecError::BufferUnderrun { needed, remaining }
    }
}
