use super::error::Error;
use super::interrupt::{NMI_VECTOR_ADDRESS, RESET_VECTOR_ADDRESS};
use super::Result;

/// `Bus` is the host-supplied capability the core needs from memory: read a byte, write a
/// byte. Every CPU entry point (`step`, `reset`, `irq`, `nmi`) is generic over `impl Bus`,
/// so a host can substitute its own memory map (ROM/RAM/PPU/APU regions) in place of the
/// reference `Memory` implementation below.
pub trait Bus {
    fn write_u8(&mut self, address: u16, data: u8);

    fn read_u8(&self, address: u16) -> u8;

    /// Read a `u16` from the bus from `address`. Assumes the values are in _little endian_ order.
    fn read_u16(&self, address: u16) -> u16 {
        let lo = self.read_u8(address);
        let hi = self.read_u8(address.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Write a `u16` to the bus starting at `address` in _little endian_ order.
    fn write_u16(&mut self, address: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write_u8(address, lo);
        self.write_u8(address.wrapping_add(1), hi);
    }
}

/// The canonical, owned implementation of `Bus`: an exact 65,536-byte flat array. Also
/// the host-facing surface of §6/§7 of the spec (`loadMemory`, the memory-overflow error,
/// and the hex dump format).
#[derive(Clone, Debug)]
pub struct Memory {
    pub bytes: [u8; Memory::SIZE],
}

impl Memory {
    /// A 16-bit address bus can address exactly 65,536 bytes.
    pub const SIZE: usize = 65536;

    pub fn new() -> Memory {
        Memory {
            bytes: [0; Memory::SIZE],
        }
    }

    /// Copies `data` into memory starting at `offset`. Fails without mutating state if
    /// `offset + data.len()` would run past the end of the address space.
    pub fn load(&mut self, data: &[u8], offset: u16) -> Result<()> {
        let start = offset as usize;
        let end = start
            .checked_add(data.len())
            .filter(|&end| end <= Memory::SIZE)
            .ok_or(Error::MemoryOverflow {
                offset,
                length: data.len(),
            })?;

        self.bytes[start..end].copy_from_slice(data);
        Ok(())
    }

    /// Renders the full 65,536-byte address space as space-separated, two-digit lowercase
    /// hex - the byte-exact dump format of §6. Writing this to a file is a host concern.
    pub fn dump_hex(&self) -> String {
        self.bytes
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn with_nmi_vector_address(mut self, address: u16) -> Memory {
        self.write_u16(NMI_VECTOR_ADDRESS, address);
        self
    }

    /// Places `bytes` as far towards the end of the address space as possible, leaving
    /// the NMI/RESET/IRQ vectors intact, and points the reset vector at the start of it.
    pub fn with_program(mut self, bytes: Vec<u8>) -> Memory {
        let program_end = NMI_VECTOR_ADDRESS as usize;
        let program_start = program_end - bytes.len();
        self.bytes[program_start..program_end].copy_from_slice(&bytes[..]);
        self.write_u16(RESET_VECTOR_ADDRESS, program_start as u16);
        self
    }

    /// Writes memory into RAM starting from address `0x0000`
    pub fn with_memory(self, bytes: Vec<u8>) -> Memory {
        self.with_memory_at(0, bytes)
    }

    pub fn with_memory_at(mut self, start: usize, bytes: Vec<u8>) -> Memory {
        let end = start + bytes.len();
        self.bytes[start..end].copy_from_slice(&bytes[..]);
        self
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}

impl Bus for Memory {
    fn write_u8(&mut self, address: u16, data: u8) {
        self.bytes[address as usize] = data;
    }

    fn read_u8(&self, address: u16) -> u8 {
        self.bytes[address as usize]
    }
}
