//! The contract between a [`CompositeGui`] and whatever actually shows it.

use std::collections::HashMap;

use mc_gui_proto::item_stack::ItemStack;
use tracing::debug;

use crate::click::{ClickEvent, ClickOutcome};
use crate::component::Component;
use crate::error::GuiError;
use crate::gui::CompositeGui;
use crate::kind::GuiKind;
use crate::viewer::ViewerId;

/// Opaque handle to a view created by an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(pub u32);

/// A host backend able to display a GUI.
///
/// Host services (connections, registries) are passed in when the adapter
/// is constructed, never looked up globally.
pub trait InventoryAdapter {
    /// Create a fresh view with `size` top slots.
    fn create_view(&mut self, kind: GuiKind, size: usize, title: &str) -> Result<ViewHandle, GuiError>;

    /// Empty every top slot of the view.
    fn clear_view(&mut self, view: ViewHandle) -> Result<(), GuiError>;

    /// Write the non-empty slots of `component` into the view starting at `offset`.
    fn display_component(
        &mut self,
        view: ViewHandle,
        component: &Component,
        offset: usize,
    ) -> Result<(), GuiError>;

    /// Show the view to a viewer.
    fn open_view(&mut self, view: ViewHandle, viewer: ViewerId) -> Result<(), GuiError>;

    fn close_view(&mut self, view: ViewHandle, viewer: ViewerId) -> Result<(), GuiError>;

    /// Forget a view the GUI replaced with a fresh one. The handle is not
    /// used again.
    fn release_view(&mut self, _view: ViewHandle) -> Result<(), GuiError> {
        Ok(())
    }

    /// Route a host click into the GUI.
    fn route_click(
        &mut self,
        gui: &mut CompositeGui,
        event: &mut ClickEvent,
    ) -> Result<ClickOutcome, GuiError> {
        gui.click(event)
    }
}

/// State of one view held by [`MemoryAdapter`].
#[derive(Debug, Clone)]
pub struct MemoryView {
    pub kind: GuiKind,
    pub title: String,
    pub slots: Vec<Option<ItemStack>>,
    pub viewers: Vec<ViewerId>,
}

/// Adapter that keeps views in memory. Useful for headless hosts and tests.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    views: HashMap<ViewHandle, MemoryView>,
    next_id: u32,
    created: usize,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, view: ViewHandle) -> Option<&MemoryView> {
        self.views.get(&view)
    }

    /// Number of views created so far.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Number of views currently held.
    pub fn live(&self) -> usize {
        self.views.len()
    }

    fn view_mut(&mut self, view: ViewHandle) -> Result<&mut MemoryView, GuiError> {
        self.views
            .get_mut(&view)
            .ok_or_else(|| GuiError::Adapter(format!("unknown view {}", view.0)))
    }
}

impl InventoryAdapter for MemoryAdapter {
    fn create_view(&mut self, kind: GuiKind, size: usize, title: &str) -> Result<ViewHandle, GuiError> {
        self.next_id += 1;
        self.created += 1;
        let handle = ViewHandle(self.next_id);
        self.views.insert(
            handle,
            MemoryView {
                kind,
                title: title.to_owned(),
                slots: vec![None; size],
                viewers: Vec::new(),
            },
        );
        debug!("Created {kind} view {} with {size} slots", handle.0);
        Ok(handle)
    }

    fn clear_view(&mut self, view: ViewHandle) -> Result<(), GuiError> {
        self.view_mut(view)?.slots.iter_mut().for_each(|s| *s = None);
        Ok(())
    }

    fn display_component(
        &mut self,
        view: ViewHandle,
        component: &Component,
        offset: usize,
    ) -> Result<(), GuiError> {
        let state = self.view_mut(view)?;
        if offset + component.size() > state.slots.len() {
            return Err(GuiError::Adapter(format!(
                "component at offset {offset} does not fit {} slots",
                state.slots.len()
            )));
        }
        component.place_into(&mut state.slots, offset);
        Ok(())
    }

    fn open_view(&mut self, view: ViewHandle, viewer: ViewerId) -> Result<(), GuiError> {
        let state = self.view_mut(view)?;
        if !state.viewers.contains(&viewer) {
            state.viewers.push(viewer);
        }
        Ok(())
    }

    fn close_view(&mut self, view: ViewHandle, viewer: ViewerId) -> Result<(), GuiError> {
        self.view_mut(view)?.viewers.retain(|v| *v != viewer);
        Ok(())
    }

    fn release_view(&mut self, view: ViewHandle) -> Result<(), GuiError> {
        if self.views.remove(&view).is_some() {
            debug!("Released view {}", view.0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_outside_view_fails() {
        let mut adapter = MemoryAdapter::new();
        let view = adapter.create_view(GuiKind::Hopper, 5, "Hopper").unwrap();
        let wide = Component::new(3, 2).unwrap();
        assert!(matches!(
            adapter.display_component(view, &wide, 0),
            Err(GuiError::Adapter(_))
        ));
        let row = Component::new(3, 1).unwrap();
        assert!(adapter.display_component(view, &row, 2).is_ok());
    }

    #[test]
    fn unknown_view_is_an_error() {
        let mut adapter = MemoryAdapter::new();
        assert!(adapter.clear_view(ViewHandle(42)).is_err());
        assert!(adapter.open_view(ViewHandle(42), ViewerId(1)).is_err());
    }

    #[test]
    fn open_and_close_track_viewers() {
        let mut adapter = MemoryAdapter::new();
        let view = adapter.create_view(GuiKind::Crafter, 9, "Crafter").unwrap();
        adapter.open_view(view, ViewerId(1)).unwrap();
        adapter.open_view(view, ViewerId(1)).unwrap();
        assert_eq!(adapter.view(view).unwrap().viewers, vec![ViewerId(1)]);
        adapter.close_view(view, ViewerId(1)).unwrap();
        assert!(adapter.view(view).unwrap().viewers.is_empty());

        adapter.release_view(view).unwrap();
        assert!(adapter.view(view).is_none());
        assert_eq!(adapter.live(), 0);
        assert!(adapter.close_view(view, ViewerId(1)).is_err());
    }
}
