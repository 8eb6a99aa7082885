//! InventorySlot (0x32) — Server → Client.
//!
//! Updates a single slot in a window.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::item_stack::{encode_slot, ItemStack};
use crate::types::VarUInt32;

pub struct InventorySlot {
    pub window_id: u32,
    pub slot: u32,
    pub item: Option<ItemStack>,
}

impl ProtoEncode for InventorySlot {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarUInt32(self.window_id).proto_encode(buf);
        VarUInt32(self.slot).proto_encode(buf);
        buf.put_u8(0);
        VarUInt32(0).proto_encode(buf);
        encode_slot(self.item.as_ref(), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_cursor_clear() {
        let pkt = InventorySlot {
            window_id: crate::packets::window::UI,
            slot: crate::packets::window::CURSOR_SLOT,
            item: None,
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[..], &[124, 0, 0, 0, 0]);
    }
}
