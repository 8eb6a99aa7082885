//! ContainerClose (0x2F) — Bidirectional.
//!
//! Sent by the client when the player closes a window, or by the server to
//! force one closed.

use bytes::{Buf, BufMut};

use crate::codec::{ProtoDecode, ProtoEncode};
use crate::error::ProtoError;

#[derive(Debug, Clone)]
pub struct ContainerClose {
    pub window_id: u8,
    pub server_initiated: bool,
}

impl ProtoEncode for ContainerClose {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.window_id);
        buf.put_u8(self.server_initiated as u8);
    }
}

impl ProtoDecode for ContainerClose {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        if buf.remaining() < 2 {
            return Err(ProtoError::BufferTooShort {
                needed: 2,
                remaining: buf.remaining(),
            });
        }
        Ok(Self {
            window_id: buf.get_u8(),
            server_initiated: buf.get_u8() != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_client_close() {
        let data: &[u8] = &[5, 0];
        let pkt = ContainerClose::proto_decode(&mut &data[..]).unwrap();
        assert_eq!(pkt.window_id, 5);
        assert!(!pkt.server_initiated);
    }

    #[test]
    fn decode_short_buffer() {
        let data: &[u8] = &[5];
        assert!(ContainerClose::proto_decode(&mut &data[..]).is_err());
    }
}
