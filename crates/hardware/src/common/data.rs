//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used by the bus and the FPU.
//! These types are used for the following:
//! 1. **Limit Validation:** Segment checks are performed per access direction.
//! 2. **Fault Reporting:** Every `MemoryFault` records which direction failed.

use std::fmt;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// Data read access (operand loads).
    Read,

    /// Data write access (operand stores).
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}
