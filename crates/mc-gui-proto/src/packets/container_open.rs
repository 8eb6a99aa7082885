//! ContainerOpen (0x2E) — Server → Client.
//!
//! Opens a container window on the client.

use bytes::BufMut;

use crate::codec::ProtoEncode;
use crate::types::{BlockPos, VarLong};

/// Container kinds understood by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ContainerType {
    Container = 0,
    Workbench = 1,
    Furnace = 2,
    Enchantment = 3,
    Anvil = 5,
    Dispenser = 6,
    Dropper = 7,
    Hopper = 8,
    Grindstone = 26,
    BlastFurnace = 27,
    Smoker = 28,
    Cartography = 30,
    Crafter = 36,
}

/// Opens a container window for the player.
#[derive(Debug, Clone)]
pub struct ContainerOpen {
    /// Window id for this container session.
    pub window_id: u8,
    pub container_type: ContainerType,
    /// Position of the backing block.
    pub position: BlockPos,
    /// Entity unique id (-1 for block containers).
    pub entity_unique_id: i64,
}

impl ProtoEncode for ContainerOpen {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.window_id);
        buf.put_u8(self.container_type as u8);
        self.position.proto_encode(buf);
        VarLong(self.entity_unique_id).proto_encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_grindstone_open() {
        let pkt = ContainerOpen {
            window_id: 3,
            container_type: ContainerType::Grindstone,
            position: BlockPos::default(),
            entity_unique_id: -1,
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(&buf[..], &[3, 26, 0, 0, 0, 0x01]);
    }
}
