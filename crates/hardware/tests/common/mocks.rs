use mockall::mock;

use tomasim_core::common::error::MemoryError;
use tomasim_core::core::pipeline::signals::MemWidth;
use tomasim_core::soc::MemoryPort;

// Memory port whose traffic is scripted per test.
mock! {
    pub Port {}

    impl MemoryPort for Port {
        fn read(&mut self, addr: u32, width: MemWidth) -> Result<u32, MemoryError>;
        fn write(&mut self, addr: u32, width: MemWidth, value: u32) -> Result<(), MemoryError>;
    }
}
