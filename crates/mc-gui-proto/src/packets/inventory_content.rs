//! InventoryContent (0x31) — Server → Client.
//!
//! Replaces every slot of a window at once.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::item_stack::encode_slot;
use crate::item_stack::ItemStack;
use crate::types::VarUInt32;

pub struct InventoryContent {
    pub window_id: u32,
    /// One entry per slot; `None` is sent as air.
    pub items: Vec<Option<ItemStack>>,
}

impl ProtoEncode for InventoryContent {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.window_id).proto_encode(buf);
        VarUInt32(self.items.len() as u32).proto_encode(buf);
        for item in &self.items {
            encode_slot(item.as_ref(), buf);
            // FullContainerName: container_id + dynamic_container_id
            buf.put_u8(0);
            VarUInt32(0).proto_encode(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_empty_slots() {
        let pkt = InventoryContent {
            window_id: 7,
            items: vec![None, None],
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[..], &[7, 2, 0, 0, 0, 0, 0, 0]);
    }
}
