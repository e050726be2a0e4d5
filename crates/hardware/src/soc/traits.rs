//! Memory bus trait consumed by the CPU.
//!
//! This module defines the `MemoryBus` trait implemented by anything the FPU can load from
//! or store to. It provides:
//! 1. **Access:** Byte, word, dword and qword reads/writes at segmented addresses.
//! 2. **Probing:** `check_access` to validate a whole multi-access operand before touching it.
//!
//! Every accessor is atomic at its own width: it either completes or returns a
//! `MemoryFault` without side effects.

use crate::common::{AccessType, MemResult, SegmentedAddr};

/// Segmented memory interface used by the x87 load/store handlers.
pub trait MemoryBus {
    /// Reads one byte.
    fn read_u8(&mut self, addr: SegmentedAddr) -> MemResult<u8>;
    /// Reads two bytes (little-endian).
    fn read_u16(&mut self, addr: SegmentedAddr) -> MemResult<u16>;
    /// Reads four bytes (little-endian).
    fn read_u32(&mut self, addr: SegmentedAddr) -> MemResult<u32>;
    /// Reads eight bytes (little-endian).
    fn read_u64(&mut self, addr: SegmentedAddr) -> MemResult<u64>;
    /// Writes one byte.
    fn write_u8(&mut self, addr: SegmentedAddr, val: u8) -> MemResult<()>;
    /// Writes two bytes (little-endian).
    fn write_u16(&mut self, addr: SegmentedAddr, val: u16) -> MemResult<()>;
    /// Writes four bytes (little-endian).
    fn write_u32(&mut self, addr: SegmentedAddr, val: u32) -> MemResult<()>;
    /// Writes eight bytes (little-endian).
    fn write_u64(&mut self, addr: SegmentedAddr, val: u64) -> MemResult<()>;

    /// Verifies that `len` bytes starting at `addr` are accessible for `access`
    /// without performing the access.
    fn check_access(&mut self, addr: SegmentedAddr, len: u32, access: AccessType)
    -> MemResult<()>;
}

impl<B: MemoryBus + ?Sized> MemoryBus for &mut B {
    fn read_u8(&mut self, addr: SegmentedAddr) -> MemResult<u8> {
        (**self).read_u8(addr)
    }
    fn read_u16(&mut self, addr: SegmentedAddr) -> MemResult<u16> {
        (**self).read_u16(addr)
    }
    fn read_u32(&mut self, addr: SegmentedAddr) -> MemResult<u32> {
        (**self).read_u32(addr)
    }
    fn read_u64(&mut self, addr: SegmentedAddr) -> MemResult<u64> {
        (**self).read_u64(addr)
    }
    fn write_u8(&mut self, addr: SegmentedAddr, val: u8) -> MemResult<()> {
        (**self).write_u8(addr, val)
    }
    fn write_u16(&mut self, addr: SegmentedAddr, val: u16) -> MemResult<()> {
        (**self).write_u16(addr, val)
    }
    fn write_u32(&mut self, addr: SegmentedAddr, val: u32) -> MemResult<()> {
        (**self).write_u32(addr, val)
    }
    fn write_u64(&mut self, addr: SegmentedAddr, val: u64) -> MemResult<()> {
        (**self).write_u64(addr, val)
    }
    fn check_access(
        &mut self,
        addr: SegmentedAddr,
        len: u32,
        access: AccessType,
    ) -> MemResult<()> {
        (**self).check_access(addr, len, access)
    }
}
