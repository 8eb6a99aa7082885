//! Protocol encoding/decoding traits and helpers.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::ProtoError;
use crate::types::VarUInt32;

/// Encode a value onto a buffer.
pub trait ProtoEncode {
    fn proto_encode(&self, buf: &mut impl BufMut);
}

/// Decode a value from a buffer.
pub trait ProtoDecode: Sized {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError>;
}

/// Write a Bedrock protocol string (VarUInt32 length + UTF-8).
pub fn write_string(buf: &mut impl BufMut, s: &str) {
    VarUInt32(s.len() as u32).proto_encode(buf);
    buf.put_slice(s.as_bytes());
}

/// Read a Bedrock protocol string (VarUInt32 length + UTF-8).
pub fn read_string(buf: &mut impl Buf) -> Result<String, ProtoError> {
    let len = VarUInt32::proto_decode(buf)?.0 as usize;
    if buf.remaining() < len {
        return Err(ProtoError::BufferTooShort {
            needed: len,
            remaining: buf.remaining(),
        });
    }
    let data = buf.copy_to_bytes(len);
    String::from_utf8(data.to_vec()).map_err(|_| ProtoError::InvalidUtf8)
}

/// Frame a packet as a game sub-packet: `VarUInt32(packet_id) + body`.
pub fn encode_packet(packet_id: u32, packet: &impl ProtoEncode) -> Bytes {
    let mut buf = BytesMut::new();
    VarUInt32(packet_id).proto_encode(&mut buf);
    packet.proto_encode(&mut buf);
    buf.freeze()
}

/// Strip the packet id from a sub-packet, checking it matches `expected`.
pub fn expect_packet_id(buf: &mut impl Buf, expected: u32) -> Result<(), ProtoError> {
    let got = VarUInt32::proto_decode(buf)?.0;
    if got != expected {
        return Err(ProtoError::UnexpectedPacketId { expected, got });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_roundtrip() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "Grindstone");
        let result = read_string(&mut buf.freeze()).unwrap();
        assert_eq!(result, "Grindstone");
    }

    #[test]
    fn string_buffer_too_short() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "Hello");
        let truncated = buf.freeze().slice(..3);
        assert!(read_string(&mut truncated.clone()).is_err());
    }

    #[test]
    fn packet_id_prefix() {
        struct Empty;
        impl ProtoEncode for Empty {
            fn proto_encode(&self, _buf: &mut impl BufMut) {}
        }

        let framed = encode_packet(0x2E, &Empty);
        assert_eq!(&framed[..], &[0x2E]);
        assert!(expect_packet_id(&mut &framed[..], 0x2E).is_ok());
        assert!(matches!(
            expect_packet_id(&mut &framed[..], 0x2F),
            Err(ProtoError::UnexpectedPacketId { expected: 0x2F, got: 0x2E })
        ));
    }
}
