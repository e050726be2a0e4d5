//! Segmented System Memory.
//!
//! This module implements the guest memory the CPU's operand accesses land in. It provides:
//! 1. **Buffer:** Backing storage (`RamBuffer`) for RAM contents.
//! 2. **Segments:** A base/limit descriptor per segment register.
//! 3. **Bus:** A `MemoryBus` implementation that limit-checks every access and
//!    translates `segment:offset` to a linear RAM address.

/// RAM buffer implementation for raw byte storage.
pub mod buffer;

use self::buffer::RamBuffer;
use crate::common::{AccessType, MemResult, MemoryFault, SegmentReg, SegmentedAddr};
use crate::config::MemoryConfig;
use crate::soc::traits::MemoryBus;

/// Base and limit of one segment, as loaded into the hidden descriptor cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentDescriptor {
    /// Linear base address.
    pub base: u32,
    /// Highest valid offset (inclusive).
    pub limit: u32,
}

impl SegmentDescriptor {
    /// Real-mode style descriptor: `base = selector << 4`, 64 KiB limit.
    pub const fn real_mode(selector: u16) -> Self {
        Self {
            base: (selector as u32) << 4,
            limit: 0xFFFF,
        }
    }
}

/// Guest RAM addressed through segment descriptors.
#[derive(Clone, Debug)]
pub struct SegmentedMemory {
    ram: RamBuffer,
    segments: [SegmentDescriptor; 6],
}

impl SegmentedMemory {
    /// Creates `ram_size` bytes of RAM with every segment at base 0 and the given limit.
    pub fn new(ram_size: usize, segment_limit: u32) -> Self {
        Self {
            ram: RamBuffer::new(ram_size),
            segments: [SegmentDescriptor {
                base: 0,
                limit: segment_limit,
            }; 6],
        }
    }

    /// Creates memory sized and limited according to `config`.
    pub fn from_config(config: &MemoryConfig) -> Self {
        Self::new(config.ram_size, config.segment_limit)
    }

    /// Loads a segment descriptor.
    pub fn set_segment(&mut self, seg: SegmentReg, desc: SegmentDescriptor) {
        self.segments[seg.index()] = desc;
    }

    /// Returns the descriptor currently loaded for `seg`.
    pub fn segment(&self, seg: SegmentReg) -> SegmentDescriptor {
        self.segments[seg.index()]
    }

    /// Copies `data` into RAM at a linear address, bypassing segmentation.
    ///
    /// Returns `false` if the range is not backed by RAM.
    pub fn load(&mut self, linear: u64, data: &[u8]) -> bool {
        self.ram.write_slice(linear, data)
    }

    /// Returns `len` bytes of RAM at a linear address, bypassing segmentation.
    pub fn peek(&self, linear: u64, len: usize) -> Option<&[u8]> {
        self.ram.read_slice(linear, len)
    }

    /// Limit-checks an access and returns its linear address.
    fn translate(&self, addr: SegmentedAddr, width: u32, access: AccessType) -> MemResult<u64> {
        let desc = self.segments[addr.segment.index()];
        let last = u64::from(addr.offset) + u64::from(width.max(1)) - 1;
        if last > u64::from(desc.limit) {
            return Err(MemoryFault::SegmentLimit {
                addr,
                width,
                limit: desc.limit,
                access,
            });
        }
        let linear = u64::from(desc.base) + u64::from(addr.offset);
        if linear + u64::from(width) > self.ram.len() as u64 {
            return Err(MemoryFault::Unmapped {
                linear,
                width,
                access,
            });
        }
        Ok(linear)
    }

    fn read_array<const N: usize>(&self, addr: SegmentedAddr) -> MemResult<[u8; N]> {
        let linear = self.translate(addr, N as u32, AccessType::Read)?;
        let mut out = [0u8; N];
        match self.ram.read_slice(linear, N) {
            Some(bytes) => out.copy_from_slice(bytes),
            None => {
                return Err(MemoryFault::Unmapped {
                    linear,
                    width: N as u32,
                    access: AccessType::Read,
                });
            }
        }
        Ok(out)
    }

    fn write_array<const N: usize>(&mut self, addr: SegmentedAddr, data: [u8; N]) -> MemResult<()> {
        let linear = self.translate(addr, N as u32, AccessType::Write)?;
        if self.ram.write_slice(linear, &data) {
            Ok(())
        } else {
            Err(MemoryFault::Unmapped {
                linear,
                width: N as u32,
                access: AccessType::Write,
            })
        }
    }
}

impl MemoryBus for SegmentedMemory {
    fn read_u8(&mut self, addr: SegmentedAddr) -> MemResult<u8> {
        self.read_array::<1>(addr).map(|b| b[0])
    }

    fn read_u16(&mut self, addr: SegmentedAddr) -> MemResult<u16> {
        self.read_array(addr).map(u16::from_le_bytes)
    }

    fn read_u32(&mut self, addr: SegmentedAddr) -> MemResult<u32> {
        self.read_array(addr).map(u32::from_le_bytes)
    }

    fn read_u64(&mut self, addr: SegmentedAddr) -> MemResult<u64> {
        self.read_array(addr).map(u64::from_le_bytes)
    }

    fn write_u8(&mut self, addr: SegmentedAddr, val: u8) -> MemResult<()> {
        self.write_array(addr, [val])
    }

    fn write_u16(&mut self, addr: SegmentedAddr, val: u16) -> MemResult<()> {
        self.write_array(addr, val.to_le_bytes())
    }

    fn write_u32(&mut self, addr: SegmentedAddr, val: u32) -> MemResult<()> {
        self.write_array(addr, val.to_le_bytes())
    }

    fn write_u64(&mut self, addr: SegmentedAddr, val: u64) -> MemResult<()> {
        self.write_array(addr, val.to_le_bytes())
    }

    fn check_access(
        &mut self,
        addr: SegmentedAddr,
        len: u32,
        access: AccessType,
    ) -> MemResult<()> {
        self.translate(addr, len, access).map(|_| ())
    }
}
