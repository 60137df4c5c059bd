use thiserror::Error;

use super::addressable::AddressableTarget;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    #[error("memory overflow: offset {offset:#06x} + {length} byte(s) exceeds the 65536-byte address space")]
    MemoryOverflow { offset: u16, length: usize },

    #[error("attempted to read an address from {0:?}, which has no addressable memory location")]
    InvalidAddressAttempt(AddressableTarget),

    #[error("attempted to write {1:#04x} to {0:?}, which cannot be written to")]
    InvalidAddressableWrite(AddressableTarget, u8),

    #[error("attempted to modify {0:?} in place, which cannot be modified")]
    InvalidAddressableModify(AddressableTarget),
}
