//! Slot-grid inventory GUIs: components, rotation, composite routing and
//! the adapter contract a host backend implements.
//!
//! Everything here runs on the host's event thread. Handlers are `Rc`
//! callbacks, so a [`gui::CompositeGui`] is neither `Send` nor `Sync`.

pub mod adapter;
pub mod anvil;
pub mod click;
pub mod component;
pub mod dirty;
pub mod error;
pub mod gui;
pub mod kind;
pub mod rotation;
pub mod viewer;

pub use adapter::{InventoryAdapter, MemoryAdapter, ViewHandle};
pub use anvil::AnvilState;
pub use click::{Area, ClickAction, ClickEvent, ClickOutcome, SlotRef};
pub use component::Component;
pub use error::{GuiError, SlotPosition};
pub use gui::CompositeGui;
pub use kind::GuiKind;
pub use rotation::Rotation;
pub use viewer::{ViewerId, ViewerInventoryCache};
