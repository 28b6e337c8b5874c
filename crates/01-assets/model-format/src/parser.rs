//! Header validation and sequence-table extraction.

use asset_store::{AssetPath, AssetStore};
use log::trace;
use std::io::{self, BufReader, Read, Seek, SeekFrom};

use crate::error::{ModelError, ModelResult};
use crate::layout::{
    SequenceTable, HEADER_MAGIC, HEADER_SEQ_COUNT, HEADER_SEQ_TABLE, MAGIC, MAX_FILE_SIZE,
    MIN_FILE_SIZE, SEQ_FPS, SEQ_FRAMES_A, SEQ_FRAMES_B, SEQ_NAME, SEQ_NAME_LEN, SEQ_RECORD_SIZE,
};

/// One entry of the sequence table: its stable index and label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceEntry {
    /// Position in the table; the handle used for playback and timing lookups.
    pub index: u32,
    /// Label with NUL padding removed.
    pub name: String,
}

/// Raw timing fields of a single sequence record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequenceTiming {
    /// Raw 32 bits of the playback rate field.
    pub fps: i32,
    /// Primary frame count candidate.
    pub frames_a: i32,
    /// Alternate frame count candidate.
    pub frames_b: i32,
}

/// Checks existence, size bounds and magic. Returns the file size on success.
pub fn validate<S: AssetStore>(store: &S, path: &AssetPath) -> ModelResult<u64> {
    let size = store
        .size(path)?
        .ok_or_else(|| ModelError::NotFound(path.clone()))?;
    if !(MIN_FILE_SIZE..=MAX_FILE_SIZE).contains(&size) {
        return Err(ModelError::OutOfSizeBounds { size });
    }
    let mut reader = store.open(path)?;
    let found = read_u32_at(&mut reader, HEADER_MAGIC, size)?;
    if found != MAGIC {
        return Err(ModelError::BadMagic { found });
    }
    Ok(size)
}

/// Boolean form of [`validate`].
pub fn is_valid<S: AssetStore>(store: &S, path: &AssetPath) -> bool {
    match validate(store, path) {
        Ok(_) => true,
        Err(err) => {
            trace!("model {path} rejected: {err}");
            false
        }
    }
}

/// Reads every sequence label in table order.
pub fn extract_sequences<S: AssetStore>(
    store: &S,
    path: &AssetPath,
) -> ModelResult<Vec<SequenceEntry>> {
    let size = asset_size(store, path)?;
    let mut reader = BufReader::new(store.open(path)?);
    let table = read_table(&mut reader, size)?;
    if table.end() > size {
        return Err(ModelError::Truncated {
            needed: table.end(),
            size,
        });
    }

    reader.seek(SeekFrom::Start(table.record_offset(0)))?;
    let mut record = [0u8; SEQ_RECORD_SIZE as usize];
    let mut out = Vec::with_capacity(table.count as usize);
    for index in 0..table.count {
        read_exact(&mut reader, &mut record, table.end(), size)?;
        out.push(SequenceEntry {
            index,
            name: decode_name(&record[SEQ_NAME..SEQ_NAME + SEQ_NAME_LEN]),
        });
    }
    trace!("model {path}: {} sequences", out.len());
    Ok(out)
}

/// Reads the timing fields of one sequence, re-opening the resource.
pub fn read_timing<S: AssetStore>(
    store: &S,
    path: &AssetPath,
    index: u32,
) -> ModelResult<SequenceTiming> {
    let size = asset_size(store, path)?;
    let mut reader = store.open(path)?;
    let table = read_table(&mut reader, size)?;
    if !table.contains(index) {
        return Err(ModelError::SequenceOutOfRange {
            index,
            count: table.count,
        });
    }
    let base = table.record_offset(index);
    Ok(SequenceTiming {
        fps: read_i32_at(&mut reader, base + SEQ_FPS, size)?,
        frames_a: read_i32_at(&mut reader, base + SEQ_FRAMES_A, size)?,
        frames_b: read_i32_at(&mut reader, base + SEQ_FRAMES_B, size)?,
    })
}

/// Reads the header's sequence count and table offset.
pub fn read_table<R: Read + Seek>(reader: &mut R, size: u64) -> ModelResult<SequenceTable> {
    let count = read_i32_at(reader, HEADER_SEQ_COUNT, size)?;
    let offset = read_i32_at(reader, HEADER_SEQ_TABLE, size)?;
    if count <= 0 || offset <= 0 {
        return Err(ModelError::BadHeader { count, offset });
    }
    Ok(SequenceTable {
        count: count as u32,
        offset: offset as u32,
    })
}

fn asset_size<S: AssetStore>(store: &S, path: &AssetPath) -> ModelResult<u64> {
    store
        .size(path)?
        .ok_or_else(|| ModelError::NotFound(path.clone()))
}

fn decode_name(field: &[u8]) -> String {
    let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..len]).into_owned()
}

fn read_u32_at<R: Read + Seek>(reader: &mut R, offset: u64, size: u64) -> ModelResult<u32> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut buf = [0u8; 4];
    read_exact(reader, &mut buf, offset + 4, size)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_i32_at<R: Read + Seek>(reader: &mut R, offset: u64, size: u64) -> ModelResult<i32> {
    read_u32_at(reader, offset, size).map(|v| v as i32)
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8], needed: u64, size: u64) -> ModelResult<()> {
    reader.read_exact(buf).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => ModelError::Truncated { needed, size },
        _ => ModelError::Io(err),
    })
}
