use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KmerError {
    #[error("failed to load/read/write file: {0:?}")]
    Io(#[from] std::io::Error),
    #[error("expected the k-mer size to be between {min} and {max}, got {k}")]
    InvalidKmerLength { k: usize, min: usize, max: usize },
    #[error("the input is too long ({len} bytes, at most {max} are supported)")]
    OversizedInput { len: usize, max: usize },
    #[error("the k-mer size ({k}) is larger than the input ({len} bytes)")]
    KmerLongerThanInput { k: usize, len: usize },
    #[error("the minimum frequency must be a non-negative number, got {0}")]
    InvalidFrequency(f64),
    #[error("failed to parse as integer: {0}")]
    IntError(#[from] core::num::ParseIntError),
    #[error("failed to parse as float: {0}")]
    FloatError(#[from] core::num::ParseFloatError),
    #[error("json error: {0:?}")]
    Json(#[from] serde_json::Error),
    #[error("kmerfreq error: {0}")]
    Message(String),
}

pub type KmerResult<T> = StdResult<T, KmerError>;

/// Build a `KmerError::Message` from format arguments.
#[doc(hidden)]
#[macro_export]
macro_rules! format_err {
    ($($arg:tt)*) => {
        $crate::errors::KmerError::Message(format!($($arg)*))
    };
}

/// Return early with a `KmerError::Message`.
#[doc(hidden)]
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::format_err!($($arg)*))
    };
}
