/// Status represents the processor status flag, `p` on the `MOS6502`
///
/// Each bit in `p` has a different meaning:
///
/// ```text
/// +---+---+---+---+---+---+---+---+
/// | N | V | U | B | D | I | Z | C |
/// +---+---+---+---+---+---+---+---+
///   |   |   |   |   |   |   |   |
///   |   |   |   |   |   |   |   \-------- CARRY
///   |   |   |   |   |   |   |
///   |   |   |   |   |   |   \------------ ZERO RESULT
///   |   |   |   |   |   |
///   |   |   |   |   |   \---------------- INTERRUPT DISABLE
///   |   |   |   |   |
///   |   |   |   |   \-------------------- DECIMAL MODE
///   |   |   |   |
///   |   |   |   \------------------------ BREAK COMMAND
///   |   |   |
///   |   |   \---------------------------- UNUSED (always reads 1)
///   |   |
///   |   \-------------------------------- OVERFLOW
///   |
///   \------------------------------------ NEGATIVE RESULT
/// ```
///
/// Gotchas:
///
/// - `B` doesn't exist as a latch in `P`. It is only ever observed in the copy of `P`
///   pushed to the stack by `BRK` or `PHP`, and popped copies never let it disturb the
///   live flag state.
/// - `U` (unused) always reads as 1.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct Status(pub u8);

impl Status {
    pub fn get(&self, flag: StatusFlag) -> bool {
        let bit = flag as u8;

        (self.0 & (1 << bit)) != 0
    }

    pub fn set(&mut self, flag: StatusFlag, value: bool) {
        let bit = flag as u8;
        if value {
            self.0 |= 1 << bit;
        } else {
            self.0 &= !(1 << bit);
        }
    }

    pub fn with(&mut self, flag: StatusFlag, value: bool) -> &mut Self {
        self.set(flag, value);
        self
    }

    /// The whole status byte, with `Unused` forced to 1 as it always reads.
    pub fn bits(&self) -> u8 {
        self.0 | (1 << StatusFlag::Unused as u8)
    }

    /// Overwrite the whole status byte, as RTI/PLP do when popping a previously-pushed
    /// copy of P. `Unused` is forced back to 1 and `Break` is forced back to 0 regardless
    /// of the incoming value - `P` itself has no storage for either bit, so popped copies
    /// must never let a stale pushed `B`/`U` disturb the live flag state.
    pub fn set_bits(&mut self, value: u8) {
        self.0 = value;
        self.set(StatusFlag::Unused, true);
        self.set(StatusFlag::Break, false);
    }
}

impl Default for Status {
    fn default() -> Self {
        Status(0)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum StatusFlag {
    Carry = 0,
    Zero = 1,
    InterruptDisable = 2,
    DecimalMode = 3,
    Break = 4,
    Unused = 5,
    Overflow = 6,
    Negative = 7,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn set_does_not_disturb_other_bits() {
        let mut status = Status(0b1010_1010);
        status.set(StatusFlag::Carry, true);
        assert_eq!(status.0, 0b1010_1011);

        status.set(StatusFlag::Negative, false);
        assert_eq!(status.0, 0b0010_1011);
    }

    #[test]
    pub fn bits_always_reports_unused_as_set() {
        let status = Status(0b0000_0000);
        assert_eq!(status.bits() & 0b0010_0000, 0b0010_0000);
    }

    #[test]
    pub fn set_bits_forces_unused_bit() {
        let mut status = Status(0);
        status.set_bits(0b0000_0000);
        assert!(status.get(StatusFlag::Unused));
    }

    #[test]
    pub fn set_bits_clears_break_bit() {
        let mut status = Status(0);
        status.set_bits(0b0011_0000); // popped byte with stale B and U bits set
        assert!(!status.get(StatusFlag::Break));
        assert!(status.get(StatusFlag::Unused));
    }
}
