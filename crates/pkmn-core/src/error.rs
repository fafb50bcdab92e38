//! Codec errors.

use thiserror::Error;

use crate::choice::Player;

/// A structured value cannot be laid out in the buffer, or the buffer itself
/// has the wrong shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("side {side} has {count} creatures, capacity is {capacity}")]
    TooManyCreatures {
        side: usize,
        count: usize,
        capacity: usize,
    },

    #[error("{path} has {count} moves, capacity is {capacity}")]
    TooManyMoves {
        path: String,
        count: usize,
        capacity: usize,
    },

    #[error("buffer is {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("{field} = {value} does not fit in {bits} bits")]
    FieldOverflow {
        field: String,
        value: i64,
        bits: u32,
    },

    #[error("invalid team order on side {side}: {reason}")]
    InvalidOrder { side: usize, reason: String },

    #[error("{path} uses move id 0")]
    EmptyMoveSlot { path: String },

    #[error("scratch is {actual} bytes, expected 0 or {expected}")]
    ScratchLength { expected: usize, actual: usize },

    #[error("{what} index {index} out of range (< {limit})")]
    SlotOutOfRange {
        what: &'static str,
        index: usize,
        limit: usize,
    },
}

/// Decoded bytes that no valid battle could contain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field} = {value:#x}: {reason}")]
pub struct ProtocolMismatchError {
    pub field: String,
    pub value: u64,
    pub reason: &'static str,
}

impl ProtocolMismatchError {
    pub fn new(field: impl Into<String>, value: u64, reason: &'static str) -> Self {
        Self {
            field: field.into(),
            value,
            reason,
        }
    }
}

/// Anything a decode can fail with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("protocol mismatch: {0}")]
    Mismatch(#[from] ProtocolMismatchError),
}

/// A protocol log that cannot be read or written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogError {
    #[error("log ends inside a {message} message (byte {offset})")]
    Truncated { message: &'static str, offset: usize },

    #[error("unknown message type {byte} at byte {offset}")]
    UnknownMessage { byte: u8, offset: usize },

    #[error("{message} has no reason {reason}")]
    UnknownReason { message: &'static str, reason: u8 },

    #[error("unknown {what} id {id}")]
    UnknownId { what: &'static str, id: u8 },

    #[error("no creature named for {player} slot {slot}")]
    UnknownSlot { player: Player, slot: u8 },

    #[error("{message} with no earlier move to attach to")]
    NoMoveToAmend { message: &'static str },

    #[error("log buffer of {capacity} bytes is full")]
    Overflow { capacity: usize },
}
