//! Click events delivered by the host and the outcome of routing them.

use std::rc::Rc;

use mc_gui_proto::item_stack::ItemStack;

use crate::viewer::ViewerId;

/// Raw slot the host reports for clicks outside every window.
pub const OUTSIDE_SLOT: i32 = -999;

/// Handler for clicks; may cancel the event.
pub type ClickHandler = Rc<dyn Fn(&mut ClickEvent)>;

/// Handler for a viewer closing the GUI.
pub type CloseHandler = Rc<dyn Fn(ViewerId)>;

/// Which half of the screen a slot lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    /// The container window.
    Top,
    /// The viewer's own inventory.
    Bottom,
}

/// What the click does to the target slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Put the item into the slot. Stacks onto an identical item.
    Place(ItemStack),
    /// Remove whatever is in the slot.
    Take,
    /// Replace the slot's content, handing back the previous item.
    Swap(ItemStack),
    /// Read-only click.
    Inspect,
}

/// A resolved slot: which registered component and where inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRef {
    /// Position of the component in placement order.
    pub component: usize,
    pub local: usize,
    pub area: Area,
}

#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub raw_slot: i32,
    pub action: ClickAction,
    pub viewer: ViewerId,
    /// Filled in by the GUI before handlers run.
    pub target: Option<SlotRef>,
    cancelled: bool,
}

impl ClickEvent {
    pub fn new(raw_slot: i32, action: ClickAction, viewer: ViewerId) -> Self {
        Self {
            raw_slot,
            action,
            viewer,
            target: None,
            cancelled: false,
        }
    }

    pub fn outside(viewer: ViewerId) -> Self {
        Self::new(OUTSIDE_SLOT, ClickAction::Inspect, viewer)
    }

    pub fn is_outside(&self) -> bool {
        self.raw_slot == OUTSIDE_SLOT
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Result of [`crate::gui::CompositeGui::click`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    pub target: Option<SlotRef>,
    /// The slot's content before the action (or a copy of it for `Inspect`).
    pub previous: Option<ItemStack>,
    /// False when a handler cancelled the click or it landed outside.
    pub applied: bool,
}

impl ClickOutcome {
    pub(crate) fn skipped(target: Option<SlotRef>) -> Self {
        Self {
            target,
            previous: None,
            applied: false,
        }
    }
}
