//! Common utilities and types used throughout the emulator.
//!
//! This module provides fundamental building blocks that are shared across all components.
//! It includes:
//! 1. **Address Types:** Segment registers, segmented addresses and address-size modes.
//! 2. **Memory Access:** Definitions for categorizing memory operations (Read/Write).
//! 3. **Error Handling:** The memory fault that aborts an in-flight instruction.

/// Address type definitions (segments, segmented addresses, address size).
pub mod addr;

/// Memory access type definitions.
pub mod data;

/// Memory fault definitions.
pub mod error;

pub use addr::{AddressSize, SegmentReg, SegmentedAddr};
pub use data::AccessType;
pub use error::{MemResult, MemoryFault};
