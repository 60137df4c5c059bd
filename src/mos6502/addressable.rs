use super::bus::Bus;
use super::error::Error;
use super::register::Register;
use super::status::StatusFlag;
use super::{Address, MOS6502, Result};

/// An `Addressable` is the fully-resolved target an opcode handler reads, writes, or
/// modifies: either the accumulator, an immediate operand byte baked into the
/// instruction stream, or a memory cell. Unifying these three behind one read/write/modify
/// interface means the shift/rotate/load/store handlers are written once instead of once
/// per target, matching the "accumulator-vs-memory" re-architecture called for in the spec.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum AddressableTarget {
    /// Also used for `Implied` addressing, where the target is never actually read/written.
    Accumulator,
    Immediate(u8),
    Memory(Address),
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Addressable {
    pub target: AddressableTarget,
}

impl Addressable {
    pub fn new(target: AddressableTarget) -> Addressable {
        Addressable { target }
    }

    pub fn address(&self) -> Result<Address> {
        match self.target {
            AddressableTarget::Accumulator => Err(Error::InvalidAddressAttempt(self.target)),
            AddressableTarget::Immediate(_) => Err(Error::InvalidAddressAttempt(self.target)),
            AddressableTarget::Memory(address) => Ok(address),
        }
    }

    pub fn read(&self, cpu: &MOS6502, bus: &impl Bus) -> u8 {
        match self.target {
            AddressableTarget::Accumulator => cpu.a,
            AddressableTarget::Immediate(value) => value,
            AddressableTarget::Memory(address) => bus.read_u8(address),
        }
    }

    pub fn try_write(&self, cpu: &mut MOS6502, bus: &mut impl Bus, value: u8) -> Result<()> {
        match self.target {
            AddressableTarget::Immediate(_) => {
                Err(Error::InvalidAddressableWrite(self.target, value))
            }
            AddressableTarget::Accumulator => {
                cpu.write_register(Register::A, value);
                Ok(())
            }
            AddressableTarget::Memory(address) => {
                bus.write_u8(address, value);
                Ok(())
            }
        }
    }

    /// Read-modify-write: read the current value, pass it through `f`, write the result
    /// back, and set `Zero`/`Negative` from the result regardless of whether the target
    /// was the accumulator or a memory cell.
    pub fn try_modify(
        &self,
        cpu: &mut MOS6502,
        bus: &mut impl Bus,
        f: impl FnOnce(u8) -> u8,
    ) -> Result<(u8, u8)> {
        let (input, output) = match self.target {
            AddressableTarget::Immediate(_) => Err(Error::InvalidAddressableModify(self.target)),

            AddressableTarget::Accumulator => {
                let input = cpu.a;
                let output = f(input);
                cpu.write_register(Register::A, output);
                Ok((input, output))
            }

            AddressableTarget::Memory(address) => {
                let input = bus.read_u8(address);
                let output = f(input);
                bus.write_u8(address, output);
                Ok((input, output))
            }
        }?;

        cpu.p.set(StatusFlag::Zero, output == 0);
        cpu.p.set(StatusFlag::Negative, output & 0b1000_0000 > 0);

        Ok((input, output))
    }
}
