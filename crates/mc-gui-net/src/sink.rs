//! Where encoded packets go.

use bytes::Bytes;
use mc_gui_core::ViewerId;

use crate::error::NetError;

/// Delivers framed sub-packets (`VarUInt32 id + body`) to a viewer's
/// connection. Batching, compression and encryption are the host's job.
pub trait PacketSink {
    fn send(&mut self, viewer: ViewerId, packet: Bytes) -> Result<(), NetError>;
}

/// Sink that keeps every packet, in send order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<(ViewerId, Bytes)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packet ids sent to `viewer`, in order.
    pub fn packet_ids(&self, viewer: ViewerId) -> Vec<u8> {
        self.sent
            .iter()
            .filter(|(v, _)| *v == viewer)
            .filter_map(|(_, packet)| packet.first().copied())
            .collect()
    }
}

impl PacketSink for RecordingSink {
    fn send(&mut self, viewer: ViewerId, packet: Bytes) -> Result<(), NetError> {
        self.sent.push((viewer, packet));
        Ok(())
    }
}

impl<S: PacketSink + ?Sized> PacketSink for &mut S {
    fn send(&mut self, viewer: ViewerId, packet: Bytes) -> Result<(), NetError> {
        (**self).send(viewer, packet)
    }
}
