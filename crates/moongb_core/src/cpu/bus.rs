/// Abstraction over the Game Boy address space as seen by the CPU.
///
/// The memory map implements this; tests use a flat 64 KiB array.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
}
