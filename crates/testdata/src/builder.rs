//! Programmatic studio-model builder for tests that need bespoke tables.
//!
//! Offsets are written out literally instead of borrowing the parser's layout
//! constants, so a drift in either side shows up as a test failure.

const HEADER_SIZE: usize = 244;
const RECORD_SIZE: usize = 176;
const MIN_SIZE: usize = 1024;

#[derive(Clone, Debug)]
struct SeqSpec {
    name: String,
    fps_bits: i32,
    frames_a: i32,
    frames_b: i32,
}

/// Builds `IDST` models with a chosen sequence table.
#[derive(Clone, Debug, Default)]
pub struct ModelBuilder {
    sequences: Vec<SeqSpec>,
    magic: Option<[u8; 4]>,
    count_override: Option<i32>,
    table_offset_override: Option<i32>,
    truncate_to: Option<usize>,
}

impl ModelBuilder {
    /// Starts an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sequence with a float rate of 30 fps and 31 frames.
    pub fn sequence(self, name: &str) -> Self {
        self.sequence_float(name, 30.0, 31, 0)
    }

    /// Adds a sequence whose rate field holds a float, as shipped models do.
    pub fn sequence_float(self, name: &str, fps: f32, frames_a: i32, frames_b: i32) -> Self {
        self.sequence_raw(name, fps.to_bits() as i32, frames_a, frames_b)
    }

    /// Adds a sequence whose rate field holds the given raw 32 bits.
    pub fn sequence_raw(mut self, name: &str, fps_bits: i32, frames_a: i32, frames_b: i32) -> Self {
        self.sequences.push(SeqSpec {
            name: name.to_owned(),
            fps_bits,
            frames_a,
            frames_b,
        });
        self
    }

    /// Adds several sequences with default timing.
    pub fn sequences<'a>(self, names: impl IntoIterator<Item = &'a str>) -> Self {
        names.into_iter().fold(self, |b, name| b.sequence(name))
    }

    /// Overrides the 4-byte magic.
    pub fn magic(mut self, magic: [u8; 4]) -> Self {
        self.magic = Some(magic);
        self
    }

    /// Writes a different sequence count than the table holds.
    pub fn declared_count(mut self, count: i32) -> Self {
        self.count_override = Some(count);
        self
    }

    /// Writes a different table offset than the real one.
    pub fn declared_table_offset(mut self, offset: i32) -> Self {
        self.table_offset_override = Some(offset);
        self
    }

    /// Cuts the output to `len` bytes after building.
    pub fn truncate(mut self, len: usize) -> Self {
        self.truncate_to = Some(len);
        self
    }

    /// Serialises the model.
    pub fn build(&self) -> Vec<u8> {
        let body = HEADER_SIZE + RECORD_SIZE * self.sequences.len();
        let mut bytes = vec![0u8; body.max(MIN_SIZE)];

        bytes[0..4].copy_from_slice(&self.magic.unwrap_or(*b"IDST"));
        bytes[4..8].copy_from_slice(&10i32.to_le_bytes());
        let total = bytes.len() as i32;
        bytes[72..76].copy_from_slice(&total.to_le_bytes());
        let count = self
            .count_override
            .unwrap_or(self.sequences.len() as i32);
        let offset = self.table_offset_override.unwrap_or(HEADER_SIZE as i32);
        bytes[164..168].copy_from_slice(&count.to_le_bytes());
        bytes[168..172].copy_from_slice(&offset.to_le_bytes());

        for (i, seq) in self.sequences.iter().enumerate() {
            let rec = HEADER_SIZE + i * RECORD_SIZE;
            let name = seq.name.as_bytes();
            let len = name.len().min(31);
            bytes[rec..rec + len].copy_from_slice(&name[..len]);
            bytes[rec + 32..rec + 36].copy_from_slice(&seq.fps_bits.to_le_bytes());
            bytes[rec + 56..rec + 60].copy_from_slice(&seq.frames_a.to_le_bytes());
            bytes[rec + 60..rec + 64].copy_from_slice(&seq.frames_b.to_le_bytes());
        }

        if let Some(len) = self.truncate_to {
            bytes.truncate(len);
        }
        bytes
    }
}
