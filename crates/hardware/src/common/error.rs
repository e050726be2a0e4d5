//! Memory fault definitions.
//!
//! This module defines the single error kind native to the FPU load/store path. It provides:
//! 1. **Fault Representation:** Why a bus access could not complete.
//! 2. **Result Alias:** `MemResult<T>` returned by every bus accessor and FPU handler.
//!
//! A fault is observed by the handler, never generated by it. Handlers stop
//! mutating FPU state as soon as an access returns `Err` and hand the fault to
//! the dispatch loop, which owns guest-visible exception delivery.

use thiserror::Error;

use super::addr::SegmentedAddr;
use super::data::AccessType;

/// A memory access that aborted the current instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MemoryFault {
    /// The access extends past the segment limit (general-protection / stack fault).
    #[error("{access} of {width} bytes at {addr} exceeds segment limit {limit:#x}")]
    SegmentLimit {
        /// Segmented address of the first byte accessed.
        addr: SegmentedAddr,
        /// Access width in bytes.
        width: u32,
        /// Limit of the segment the access was checked against.
        limit: u32,
        /// Direction of the access.
        access: AccessType,
    },

    /// The linear address is not backed by physical memory.
    #[error("{access} of {width} bytes at linear {linear:#x} is outside physical memory")]
    Unmapped {
        /// Linear address of the first byte accessed.
        linear: u64,
        /// Access width in bytes.
        width: u32,
        /// Direction of the access.
        access: AccessType,
    },
}

impl MemoryFault {
    /// Returns the direction of the faulting access.
    pub const fn access(&self) -> AccessType {
        match self {
            Self::SegmentLimit { access, .. } | Self::Unmapped { access, .. } => *access,
        }
    }
}

/// Result of a memory access or of an FPU handler built on memory accesses.
pub type MemResult<T> = Result<T, MemoryFault>;
