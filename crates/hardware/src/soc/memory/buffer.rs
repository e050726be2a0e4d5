//! RAM Buffer Implementation.
//!
//! This module provides the backing store for guest physical memory. It provides:
//! 1. **Storage:** A zero-initialised, fixed-size byte buffer.
//! 2. **Bounds:** Slice accessors that report out-of-range requests as `None` instead of panicking.

/// Fixed-size guest RAM.
#[derive(Clone, Debug)]
pub struct RamBuffer {
    bytes: Vec<u8>,
}

impl RamBuffer {
    /// Creates a zero-filled buffer of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Returns the size of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the buffer has no storage.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `len` bytes starting at `offset`, or `None` if the range is out of bounds.
    pub fn read_slice(&self, offset: u64, len: usize) -> Option<&[u8]> {
        let start = usize::try_from(offset).ok()?;
        let end = start.checked_add(len)?;
        self.bytes.get(start..end)
    }

    /// Copies `data` to `offset`. Returns `false` (writing nothing) if the range is out of bounds.
    pub fn write_slice(&mut self, offset: u64, data: &[u8]) -> bool {
        let Ok(start) = usize::try_from(offset) else {
            return false;
        };
        let Some(end) = start.checked_add(data.len()) else {
            return false;
        };
        match self.bytes.get_mut(start..end) {
            Some(dest) => {
                dest.copy_from_slice(data);
                true
            }
            None => false,
        }
    }
}
