//! Rename text and repair cost of an anvil GUI.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

pub type RenameListener = Rc<dyn Fn(&str)>;

/// Observable anvil state. Listeners only fire when the text actually changes.
#[derive(Clone, Default)]
pub struct AnvilState {
    rename_text: String,
    cost: i32,
    listeners: Vec<RenameListener>,
}

impl fmt::Debug for AnvilState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnvilState")
            .field("rename_text", &self.rename_text)
            .field("cost", &self.cost)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl AnvilState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename_text(&self) -> &str {
        &self.rename_text
    }

    /// Update the text typed by the viewer. Returns whether it changed.
    pub fn set_rename_text(&mut self, text: &str) -> bool {
        if self.rename_text == text {
            return false;
        }
        self.rename_text = text.to_owned();
        trace!(text, "Anvil rename text changed");
        for listener in &self.listeners {
            listener(&self.rename_text);
        }
        true
    }

    pub fn on_rename(&mut self, listener: RenameListener) {
        self.listeners.push(listener);
    }

    /// Experience cost shown in the repair screen.
    pub fn cost(&self) -> i32 {
        self.cost
    }

    pub fn set_cost(&mut self, cost: i32) {
        self.cost = cost.max(0);
    }
}
