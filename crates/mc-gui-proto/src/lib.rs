//! Item stacks and the container packets a GUI backend sends to a client.

pub mod codec;
pub mod error;
pub mod item_stack;
pub mod nbt;
pub mod packets;
pub mod types;
