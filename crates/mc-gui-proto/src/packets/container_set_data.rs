//! ContainerSetData (0x33) — Server → Client.
//!
//! Updates a single property of an open container (anvil repair cost,
//! enchanting table level requirements).

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::types::VarInt;

/// Anvil property: repair cost in levels.
pub const ANVIL_REPAIR_COST: i32 = 0;
/// Enchanting table properties: level requirement of the three offers.
pub const ENCHANT_LEVEL_TOP: i32 = 0;
pub const ENCHANT_LEVEL_MIDDLE: i32 = 1;
pub const ENCHANT_LEVEL_BOTTOM: i32 = 2;

#[derive(Debug, Clone)]
pub struct ContainerSetData {
    pub window_id: u8,
    pub property: i32,
    pub value: i32,
}

impl ProtoEncode for ContainerSetData {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.window_id);
        VarInt(self.property).proto_encode(buf);
        VarInt(self.value).proto_encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_repair_cost() {
        let pkt = ContainerSetData {
            window_id: 2,
            property: ANVIL_REPAIR_COST,
            value: 5,
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[..], &[2, 0, 10]);
    }
}
