//! Inventory adapter that drives Bedrock container windows with packets.

pub mod adapter;
pub mod error;
pub mod sink;

pub use adapter::{container_type, PacketAdapter};
pub use error::NetError;
pub use sink::{PacketSink, RecordingSink};
