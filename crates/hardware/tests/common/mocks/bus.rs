use mockall::mock;
use pcsim_core::common::{AccessType, MemResult, MemoryFault, SegmentedAddr};
use pcsim_core::soc::MemoryBus;

mock! {
    pub Bus {}
    impl MemoryBus for Bus {
        fn read_u8(&mut self, addr: SegmentedAddr) -> MemResult<u8>;
        fn read_u16(&mut self, addr: SegmentedAddr) -> MemResult<u16>;
        fn read_u32(&mut self, addr: SegmentedAddr) -> MemResult<u32>;
        fn read_u64(&mut self, addr: SegmentedAddr) -> MemResult<u64>;
        fn write_u8(&mut self, addr: SegmentedAddr, val: u8) -> MemResult<()>;
        fn write_u16(&mut self, addr: SegmentedAddr, val: u16) -> MemResult<()>;
        fn write_u32(&mut self, addr: SegmentedAddr, val: u32) -> MemResult<()>;
        fn write_u64(&mut self, addr: SegmentedAddr, val: u64) -> MemResult<()>;
        fn check_access(&mut self, addr: SegmentedAddr, len: u32, access: AccessType) -> MemResult<()>;
    }
}

/// The fault mocks hand back for any access they are told to reject.
pub fn unmapped(access: AccessType) -> MemoryFault {
    MemoryFault::Unmapped {
        linear: 0xDEAD_0000,
        width: 0,
        access,
    }
}
