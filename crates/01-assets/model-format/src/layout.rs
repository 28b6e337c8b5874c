//! Byte layout of the GoldSrc studio model (`.mdl`) pieces the parser touches.
//!
//! These offsets were recovered from shipped viewmodels rather than from a
//! published schema. Only the header's sequence table fields and a handful of
//! per-sequence fields are read; everything else in the file is opaque.
//! All integers are 32-bit little-endian.

/// `IDST` read as a little-endian `u32`.
pub const MAGIC: u32 = u32::from_le_bytes(*b"IDST");

/// Smallest file accepted as a model.
pub const MIN_FILE_SIZE: u64 = 1024;
/// Largest file accepted as a model (5 MiB).
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Header offset of the magic identifier.
pub const HEADER_MAGIC: u64 = 0;
/// Header offset of the sequence count (`numseq`).
pub const HEADER_SEQ_COUNT: u64 = 164;
/// Header offset of the sequence table's file offset (`seqindex`).
pub const HEADER_SEQ_TABLE: u64 = 168;

/// Size of one sequence descriptor record.
pub const SEQ_RECORD_SIZE: u64 = 176;
/// Offset of the NUL-padded sequence label within a record.
pub const SEQ_NAME: usize = 0;
/// Length of the sequence label field.
pub const SEQ_NAME_LEN: usize = 32;
/// Offset of the playback rate field within a record.
pub const SEQ_FPS: u64 = 32;
/// Offset of the primary frame count field (`numframes`).
pub const SEQ_FRAMES_A: u64 = 56;
/// Offset of the alternate frame count field seen in other format revisions.
pub const SEQ_FRAMES_B: u64 = 60;

/// Location and size of the sequence descriptor table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceTable {
    /// Number of descriptor records.
    pub count: u32,
    /// File offset of the first record.
    pub offset: u32,
}

impl SequenceTable {
    /// File offset of the record at `index`.
    pub fn record_offset(&self, index: u32) -> u64 {
        u64::from(self.offset) + u64::from(index) * SEQ_RECORD_SIZE
    }

    /// File offset one past the final record.
    pub fn end(&self) -> u64 {
        self.record_offset(self.count)
    }

    /// Returns whether `index` names a record in the table.
    pub fn contains(&self, index: u32) -> bool {
        index < self.count
    }
}
