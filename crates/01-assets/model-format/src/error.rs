use asset_store::AssetPath;
use std::io;
use thiserror::Error;

use crate::layout::{MAX_FILE_SIZE, MIN_FILE_SIZE};

pub type ModelResult<T> = Result<T, ModelError>;

/// Reasons a model cannot be parsed.
///
/// None of these are fatal to the host; callers treat any of them as
/// "inspection unsupported for this asset".
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("asset {0} not found")]
    NotFound(AssetPath),

    #[error("asset size {size} outside [{}, {}] bytes", MIN_FILE_SIZE, MAX_FILE_SIZE)]
    OutOfSizeBounds { size: u64 },

    #[error("bad magic {found:#010x}")]
    BadMagic { found: u32 },

    #[error("invalid sequence table header (count {count}, offset {offset})")]
    BadHeader { count: i32, offset: i32 },

    #[error("asset truncated: needs {needed} bytes, has {size}")]
    Truncated { needed: u64, size: u64 },

    #[error("sequence {index} out of range (count {count})")]
    SequenceOutOfRange { index: u32, count: u32 },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl ModelError {
    /// True for failures caused by the file's contents rather than by the
    /// environment (missing file, read error).
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ModelError::OutOfSizeBounds { .. }
                | ModelError::BadMagic { .. }
                | ModelError::BadHeader { .. }
                | ModelError::Truncated { .. }
        )
    }
}
