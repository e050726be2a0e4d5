//! System-on-Chip (SoC) Components.
//!
//! This module organizes the memory side of the simulated system: the bus
//! trait the CPU accesses operands through and a segmented RAM behind it.

/// Segmented guest memory.
pub mod memory;

/// Memory bus trait definitions.
pub mod traits;

pub use memory::SegmentedMemory;
pub use traits::MemoryBus;
