//! Container packets sent while a GUI is on screen.

pub mod container_close;
pub mod container_open;
pub mod container_set_data;
pub mod inventory_content;
pub mod inventory_slot;

pub use container_close::ContainerClose;
pub use container_open::{ContainerOpen, ContainerType};
pub use container_set_data::ContainerSetData;
pub use inventory_content::InventoryContent;
pub use inventory_slot::InventorySlot;

/// Packet ids.
pub mod id {
    pub const CONTAINER_OPEN: u32 = 0x2E;
    pub const CONTAINER_CLOSE: u32 = 0x2F;
    pub const INVENTORY_CONTENT: u32 = 0x31;
    pub const INVENTORY_SLOT: u32 = 0x32;
    pub const CONTAINER_SET_DATA: u32 = 0x33;
}

/// Fixed window ids that are not allocated per container.
pub mod window {
    /// The player's own inventory.
    pub const INVENTORY: u32 = 0;
    /// UI container; slot 0 holds the cursor item.
    pub const UI: u32 = 124;
    pub const CURSOR_SLOT: u32 = 0;
}
