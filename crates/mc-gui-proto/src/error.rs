//! Protocol-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("buffer too short: need {needed} more bytes, have {remaining}")]
    BufferTooShort { needed: usize, remaining: usize },

    #[error("VarInt encoding error: {0}")]
    VarInt(#[from] crate::types::VarIntError),

    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    #[error("unexpected packet id: expected 0x{expected:02X}, got 0x{got:02X}")]
    UnexpectedPacketId { expected: u32, got: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
