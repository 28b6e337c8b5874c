#![allow(missing_docs)]

//! Minimal reader for GoldSrc studio models.
//!
//! Only the sequence table is of interest: labels for classification and the
//! per-sequence timing fields used to estimate playback length. Parsing is
//! bounded to fixed-size reads at fixed offsets, see [`layout`].

mod error;
pub mod layout;
mod parser;

pub use error::{ModelError, ModelResult};
pub use layout::SequenceTable;
pub use parser::{
    extract_sequences, is_valid, read_table, read_timing, validate, SequenceEntry, SequenceTiming,
};
