//! Word-addressable data memory.
//!
//! Memory is a flat array of signed 32-bit words, indexed directly by the
//! effective address (`rs1 + imm`) with no byte/word scaling. Bounds are
//! reported to the caller via `Option`/`bool`; whether an out-of-range
//! access is an error or a silent no-op is the executor's policy decision,
//! not the memory's.

/// Flat word-addressable data memory.
#[derive(Clone, Debug)]
pub struct DataMemory {
    words: Vec<i32>,
}

impl DataMemory {
    /// Creates a zero-filled memory of `words` 32-bit words.
    pub fn new(words: usize) -> Self {
        Self {
            words: vec![0; words],
        }
    }

    /// Memory size in words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if the memory has zero words (never the case in practice).
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Reads the word at `index`, or `None` if out of range.
    ///
    /// The index is signed because the effective address is computed from
    /// register values and may be negative.
    pub fn read(&self, index: i64) -> Option<i32> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.words.get(i).copied())
    }

    /// Writes the word at `index`; returns false if out of range.
    pub fn write(&mut self, index: i64, val: i32) -> bool {
        match usize::try_from(index).ok().and_then(|i| self.words.get_mut(i)) {
            Some(slot) => {
                *slot = val;
                true
            }
            None => false,
        }
    }

    /// Zero-fills the whole memory.
    pub fn reset(&mut self) {
        self.words.fill(0);
    }

    /// The full memory contents, for display layers.
    pub fn words(&self) -> &[i32] {
        &self.words
    }
}
