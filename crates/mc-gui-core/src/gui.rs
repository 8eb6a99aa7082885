//! A GUI assembled from named components laid out over one flat slot space.
//!
//! Components are ordered by their placement order. Top-area components
//! come first and fill the container window; bottom-area components follow
//! and are drawn into the viewer's own inventory. A raw slot reported by
//! the host maps onto exactly one `(component, local index)` pair.

use std::fmt;

use mc_gui_proto::item_stack::ItemStack;
use tracing::debug;

use crate::adapter::{InventoryAdapter, ViewHandle};
use crate::anvil::AnvilState;
use crate::click::{Area, ClickEvent, ClickHandler, ClickOutcome, CloseHandler, SlotRef};
use crate::component::Component;
use crate::dirty::DirtyTracker;
use crate::error::{GuiError, SlotPosition};
use crate::kind::{GuiKind, PLAYER_INVENTORY, PLAYER_INVENTORY_ORDER};
use crate::viewer::{self, ViewerId, ViewerInventoryCache};

#[derive(Clone)]
struct Entry {
    name: String,
    order: i32,
    area: Area,
    component: Component,
}

#[derive(Clone, Default)]
struct Handlers {
    top: Option<ClickHandler>,
    bottom: Option<ClickHandler>,
    global: Option<ClickHandler>,
    outside: Option<ClickHandler>,
    close: Option<CloseHandler>,
}

pub struct CompositeGui {
    kind: GuiKind,
    title: String,
    entries: Vec<Entry>,
    dirty: DirtyTracker,
    view: Option<ViewHandle>,
    viewers: Vec<ViewerId>,
    inventory_cache: ViewerInventoryCache,
    anvil: Option<AnvilState>,
    handlers: Handlers,
}

impl fmt::Debug for CompositeGui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeGui")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field(
                "components",
                &self.entries.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            )
            .field("dirty", &self.dirty.is_dirty())
            .field("view", &self.view)
            .field("viewers", &self.viewers)
            .finish()
    }
}

impl CompositeGui {
    /// Create a GUI with the kind's top layout and a 9×4 player inventory.
    pub fn new(kind: GuiKind, title: impl Into<String>) -> Result<Self, GuiError> {
        kind.validate()?;
        let mut gui = Self {
            kind,
            title: title.into(),
            entries: Vec::new(),
            dirty: DirtyTracker::new(),
            view: None,
            viewers: Vec::new(),
            inventory_cache: ViewerInventoryCache::new(),
            anvil: (kind == GuiKind::Anvil).then(AnvilState::new),
            handlers: Handlers::default(),
        };
        for (order, entry) in kind.layout().into_iter().enumerate() {
            let component = Component::new(entry.width, entry.height)?;
            gui.register_component(entry.name, component, order as i32, Area::Top)?;
        }
        gui.register_component(
            PLAYER_INVENTORY,
            Component::new(9, 4)?,
            PLAYER_INVENTORY_ORDER,
            Area::Bottom,
        )?;
        Ok(gui)
    }

    /// A GUI with only the player inventory; top components are registered by hand.
    pub fn custom(title: impl Into<String>) -> Result<Self, GuiError> {
        Self::new(GuiKind::Custom, title)
    }

    pub fn kind(&self) -> GuiKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Change the title. The view is recreated on the next show.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if title != self.title {
            self.title = title;
            self.dirty.mark();
        }
    }

    /// Add a component at `order`. Equal orders keep registration order.
    ///
    /// Every top component must come before every bottom one.
    pub fn register_component(
        &mut self,
        name: impl Into<String>,
        component: Component,
        order: i32,
        area: Area,
    ) -> Result<(), GuiError> {
        let name = name.into();
        if self.entries.iter().any(|e| e.name == name) {
            return Err(GuiError::InvalidArgument(format!(
                "component '{name}' is already registered"
            )));
        }
        let position = self.entries.partition_point(|e| e.order <= order);
        let misplaced = match area {
            Area::Top => self.entries[..position].iter().any(|e| e.area == Area::Bottom),
            Area::Bottom => self.entries[position..].iter().any(|e| e.area == Area::Top),
        };
        if misplaced {
            return Err(GuiError::InvalidArgument(format!(
                "component '{name}' at order {order} would mix top and bottom slots"
            )));
        }
        debug!(
            "Registered {}x{} component '{name}' at order {order} ({area:?})",
            component.width(),
            component.height()
        );
        self.entries.insert(
            position,
            Entry {
                name,
                order,
                area,
                component,
            },
        );
        self.dirty.mark();
        Ok(())
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.component)
    }

    pub fn component_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.entries
            .iter_mut()
            .find(|e| e.name == name)
            .map(|e| &mut e.component)
    }

    /// Component names in placement order, with their area.
    pub fn components(&self) -> impl Iterator<Item = (&str, Area, &Component)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.area, &e.component))
    }

    /// First flat slot of the named component.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let mut offset = 0;
        for entry in &self.entries {
            if entry.name == name {
                return Some(offset);
            }
            offset += entry.component.size();
        }
        None
    }

    /// Slots in the container window.
    pub fn top_size(&self) -> usize {
        self.area_size(Area::Top)
    }

    pub fn total_size(&self) -> usize {
        self.entries.iter().map(|e| e.component.size()).sum()
    }

    fn area_size(&self, area: Area) -> usize {
        self.entries
            .iter()
            .filter(|e| e.area == area)
            .map(|e| e.component.size())
            .sum()
    }

    /// Map a flat slot to the component owning it.
    pub fn slot_ref(&self, flat: i32) -> Result<SlotRef, GuiError> {
        let out_of_bounds = || {
            GuiError::OutOfBounds(SlotPosition::Index {
                index: flat as i64,
                size: self.total_size(),
            })
        };
        let mut remaining = usize::try_from(flat).map_err(|_| out_of_bounds())?;
        for (index, entry) in self.entries.iter().enumerate() {
            let size = entry.component.size();
            if remaining < size {
                return Ok(SlotRef {
                    component: index,
                    local: remaining,
                    area: entry.area,
                });
            }
            remaining -= size;
        }
        Err(out_of_bounds())
    }

    /// Name of the owning component and the local index inside it.
    pub fn resolve(&self, flat: i32) -> Result<(&str, usize), GuiError> {
        let slot = self.slot_ref(flat)?;
        Ok((self.entries[slot.component].name.as_str(), slot.local))
    }

    /// Route a click through the handlers and apply it unless cancelled.
    ///
    /// Handlers run global, then area, then the component's own handler.
    /// Outside clicks only reach the outside handler.
    pub fn click(&mut self, event: &mut ClickEvent) -> Result<ClickOutcome, GuiError> {
        if event.is_outside() {
            if let Some(handler) = &self.handlers.outside {
                handler(event);
            }
            return Ok(ClickOutcome::skipped(None));
        }

        let slot = self.slot_ref(event.raw_slot)?;
        event.target = Some(slot);
        let area_handler = match slot.area {
            Area::Top => &self.handlers.top,
            Area::Bottom => &self.handlers.bottom,
        };
        let entry = &self.entries[slot.component];
        for handler in [&self.handlers.global, area_handler]
            .into_iter()
            .flatten()
            .chain(entry.component.handler())
        {
            handler(event);
        }

        if event.is_cancelled() {
            debug!(
                "Click on raw slot {} ('{}' #{}) cancelled",
                event.raw_slot, entry.name, slot.local
            );
            return Ok(ClickOutcome::skipped(Some(slot)));
        }
        let previous = self.entries[slot.component]
            .component
            .apply(slot.local, &event.action)?;
        Ok(ClickOutcome {
            target: Some(slot),
            previous,
            applied: true,
        })
    }

    /// Route a click through an adapter, which may intercept it.
    pub fn handle_click<A: InventoryAdapter + ?Sized>(
        &mut self,
        adapter: &mut A,
        event: &mut ClickEvent,
    ) -> Result<ClickOutcome, GuiError> {
        adapter.route_click(self, event)
    }

    pub fn mark_dirty(&mut self) {
        self.dirty.mark();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }

    pub fn on_top_click(&mut self, handler: Option<ClickHandler>) {
        self.handlers.top = handler;
    }

    pub fn on_bottom_click(&mut self, handler: Option<ClickHandler>) {
        self.handlers.bottom = handler;
    }

    pub fn on_global_click(&mut self, handler: Option<ClickHandler>) {
        self.handlers.global = handler;
    }

    pub fn on_outside_click(&mut self, handler: Option<ClickHandler>) {
        self.handlers.outside = handler;
    }

    pub fn on_close(&mut self, handler: Option<CloseHandler>) {
        self.handlers.close = handler;
    }

    /// Rename text and cost, for anvil GUIs only.
    pub fn anvil(&self) -> Option<&AnvilState> {
        self.anvil.as_ref()
    }

    pub fn anvil_mut(&mut self) -> Option<&mut AnvilState> {
        self.anvil.as_mut()
    }

    /// Handle of the view created by the last show, if any.
    pub fn view(&self) -> Option<ViewHandle> {
        self.view
    }

    pub fn viewers(&self) -> &[ViewerId] {
        &self.viewers
    }

    /// Flat snapshot of the container window.
    pub fn top_items(&self) -> Vec<Option<ItemStack>> {
        let mut items = vec![None; self.top_size()];
        let mut offset = 0;
        for entry in self.entries.iter().filter(|e| e.area == Area::Top) {
            entry.component.place_into(&mut items, offset);
            offset += entry.component.size();
        }
        items
    }

    /// Whether any bottom component holds an item.
    pub fn is_player_inventory_used(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.area == Area::Bottom && e.component.has_item())
    }

    /// Show the GUI to `viewer`.
    ///
    /// A dirty GUI gets a fresh view first. When the bottom area is used,
    /// the viewer's inventory is saved and replaced until [`Self::close`].
    pub fn show<A: InventoryAdapter + ?Sized>(
        &mut self,
        adapter: &mut A,
        viewer: ViewerId,
        viewer_inventory: &mut [Option<ItemStack>],
    ) -> Result<(), GuiError> {
        let view = match self.view {
            Some(view) if !self.dirty.is_dirty() => view,
            stale => {
                let view = adapter.create_view(self.kind, self.top_size(), &self.title)?;
                if let Some(stale) = stale {
                    adapter.release_view(stale)?;
                }
                debug!("Recreated view {} for '{}'", view.0, self.title);
                self.view = Some(view);
                self.dirty.clear();
                view
            }
        };

        adapter.clear_view(view)?;
        let mut offset = 0;
        for entry in self.entries.iter().filter(|e| e.area == Area::Top) {
            adapter.display_component(view, &entry.component, offset)?;
            offset += entry.component.size();
        }

        if self.is_player_inventory_used() {
            if self.inventory_cache.contains(viewer) {
                viewer_inventory.iter_mut().for_each(|slot| *slot = None);
            } else {
                self.inventory_cache.store_and_clear(viewer, viewer_inventory);
            }
            let mut bottom_offset = 0;
            for entry in self.entries.iter().filter(|e| e.area == Area::Bottom) {
                viewer::place_bottom_items(&entry.component, bottom_offset, viewer_inventory);
                bottom_offset += entry.component.size();
            }
        }

        adapter.open_view(view, viewer)?;
        if !self.viewers.contains(&viewer) {
            self.viewers.push(viewer);
        }
        Ok(())
    }

    /// Close the GUI for `viewer`, restoring a saved inventory.
    ///
    /// The viewer is released even when the adapter fails to close the
    /// view; that failure is returned afterwards.
    pub fn close<A: InventoryAdapter + ?Sized>(
        &mut self,
        adapter: &mut A,
        viewer: ViewerId,
        viewer_inventory: &mut [Option<ItemStack>],
    ) -> Result<(), GuiError> {
        let closed = match self.view {
            Some(view) => adapter.close_view(view, viewer),
            None => Ok(()),
        };
        self.viewers.retain(|v| *v != viewer);
        self.inventory_cache.restore(viewer, viewer_inventory);
        if let Some(handler) = &self.handlers.close {
            handler(viewer);
        }
        closed
    }

    /// Independent copy with the same components and shared handlers.
    ///
    /// The copy has no view or viewers yet and starts dirty.
    pub fn copy(&self) -> Self {
        Self {
            kind: self.kind,
            title: self.title.clone(),
            entries: self.entries.clone(),
            dirty: DirtyTracker::new(),
            view: None,
            viewers: Vec::new(),
            inventory_cache: ViewerInventoryCache::new(),
            anvil: self.anvil.clone(),
            handlers: self.handlers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::adapter::MemoryAdapter;
    use crate::click::ClickAction;
    use crate::viewer::VIEWER_INVENTORY_SIZE;

    fn item(id: i32) -> ItemStack {
        ItemStack::new(id, 1)
    }

    fn two_part() -> CompositeGui {
        let mut gui = CompositeGui::custom("Two part").unwrap();
        gui.register_component("a", Component::new(1, 2).unwrap(), 0, Area::Top)
            .unwrap();
        gui
    }

    #[test]
    fn resolve_walks_components_in_order() {
        let gui = two_part();
        assert_eq!(gui.resolve(0).unwrap(), ("a", 0));
        assert_eq!(gui.resolve(1).unwrap(), ("a", 1));
        assert_eq!(gui.resolve(2).unwrap(), ("player", 0));
        assert_eq!(gui.resolve(37).unwrap(), ("player", 35));
        assert!(gui.resolve(38).unwrap_err().is_out_of_bounds());
        assert!(matches!(
            gui.resolve(-1),
            Err(GuiError::OutOfBounds(SlotPosition::Index { index: -1, size: 38 }))
        ));
        assert_eq!(gui.total_size(), 38);
        assert_eq!(gui.top_size(), 2);
    }

    #[test]
    fn resolve_is_a_bijection() {
        let gui = CompositeGui::new(GuiKind::BlastFurnace, "Blast").unwrap();
        let mut seen = std::collections::HashSet::new();
        for flat in 0..gui.total_size() as i32 {
            let (name, local) = gui.resolve(flat).unwrap();
            assert_eq!(gui.offset_of(name).unwrap() + local, flat as usize);
            assert!(seen.insert((name.to_owned(), local)));
        }
    }

    #[test]
    fn grindstone_routing() {
        let gui = CompositeGui::new(GuiKind::Grindstone, "Grindstone").unwrap();
        assert_eq!(gui.resolve(0).unwrap(), ("items", 0));
        assert_eq!(gui.resolve(1).unwrap(), ("items", 1));
        assert_eq!(gui.resolve(2).unwrap(), ("result", 0));
        for raw in 3..39 {
            assert_eq!(gui.resolve(raw).unwrap(), ("player", raw as usize - 3));
        }
    }

    #[test]
    fn crafter_routing() {
        let gui = CompositeGui::new(GuiKind::Crafter, "Crafter").unwrap();
        assert_eq!(gui.resolve(8).unwrap(), ("input", 8));
        assert_eq!(gui.resolve(9).unwrap(), ("player", 0));
    }

    #[test]
    fn registration_rules() {
        let mut gui = two_part();
        assert!(matches!(
            gui.register_component("a", Component::new(1, 1).unwrap(), 5, Area::Top),
            Err(GuiError::InvalidArgument(_))
        ));
        assert!(matches!(
            gui.register_component("late", Component::new(1, 1).unwrap(), 2000, Area::Top),
            Err(GuiError::InvalidArgument(_))
        ));
        gui.register_component("first", Component::new(1, 1).unwrap(), -1, Area::Top)
            .unwrap();
        assert_eq!(gui.resolve(0).unwrap(), ("first", 0));
        assert_eq!(gui.offset_of("a"), Some(1));
        assert_eq!(gui.offset_of("missing"), None);
    }

    #[test]
    fn equal_orders_keep_registration_order() {
        let mut gui = CompositeGui::custom("Ties").unwrap();
        gui.register_component("x", Component::new(1, 1).unwrap(), 3, Area::Top)
            .unwrap();
        gui.register_component("y", Component::new(1, 1).unwrap(), 3, Area::Top)
            .unwrap();
        assert_eq!(gui.resolve(0).unwrap().0, "x");
        assert_eq!(gui.resolve(1).unwrap().0, "y");
    }

    #[test]
    fn chest_rows_checked() {
        assert!(CompositeGui::new(GuiKind::Chest { rows: 7 }, "Big").is_err());
        let chest = CompositeGui::new(GuiKind::Chest { rows: 3 }, "Chest").unwrap();
        assert_eq!(chest.top_size(), 27);
        assert!(chest.anvil().is_none());
        assert!(CompositeGui::new(GuiKind::Anvil, "Anvil").unwrap().anvil().is_some());
    }

    #[test]
    fn click_applies_action() {
        let mut gui = CompositeGui::new(GuiKind::Grindstone, "Grindstone").unwrap();
        let mut event = ClickEvent::new(2, ClickAction::Place(item(5)), ViewerId(1));
        let outcome = gui.click(&mut event).unwrap();
        assert!(outcome.applied);
        assert_eq!(outcome.previous, None);
        assert_eq!(event.target.map(|t| t.area), Some(Area::Top));
        assert_eq!(
            gui.component("result").unwrap().get(0, 0).unwrap().map(|i| i.runtime_id),
            Some(5)
        );
    }

    #[test]
    fn handler_order_and_cancellation() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut gui = CompositeGui::new(GuiKind::Hopper, "Hopper").unwrap();

        let l = log.clone();
        gui.on_global_click(Some(Rc::new(move |e: &mut ClickEvent| {
            l.borrow_mut().push("global");
            e.cancel();
        })));
        let l = log.clone();
        gui.on_top_click(Some(Rc::new(move |_: &mut ClickEvent| l.borrow_mut().push("top"))));
        let l = log.clone();
        gui.on_bottom_click(Some(Rc::new(move |_: &mut ClickEvent| {
            l.borrow_mut().push("bottom")
        })));
        let l = log.clone();
        gui.component_mut("items")
            .unwrap()
            .set_handler(Some(Rc::new(move |_: &mut ClickEvent| {
                l.borrow_mut().push("slot")
            })));

        let mut event = ClickEvent::new(0, ClickAction::Place(item(1)), ViewerId(1));
        let outcome = gui.click(&mut event).unwrap();
        assert!(!outcome.applied);
        assert_eq!(*log.borrow(), vec!["global", "top", "slot"]);
        assert!(!gui.component("items").unwrap().has_item());

        log.borrow_mut().clear();
        let mut event = ClickEvent::new(5, ClickAction::Inspect, ViewerId(1));
        gui.click(&mut event).unwrap();
        assert_eq!(*log.borrow(), vec!["global", "bottom"]);
    }

    #[test]
    fn later_handler_can_uncancel() {
        let mut gui = CompositeGui::new(GuiKind::Hopper, "Hopper").unwrap();
        gui.on_global_click(Some(Rc::new(|e: &mut ClickEvent| e.cancel())));
        gui.on_top_click(Some(Rc::new(|e: &mut ClickEvent| e.set_cancelled(false))));
        let mut event = ClickEvent::new(4, ClickAction::Place(item(2)), ViewerId(1));
        assert!(gui.click(&mut event).unwrap().applied);
    }

    #[test]
    fn outside_click_only_reaches_outside_handler() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut gui = CompositeGui::new(GuiKind::Dropper, "Dropper").unwrap();
        let h = hits.clone();
        gui.on_outside_click(Some(Rc::new(move |_: &mut ClickEvent| h.borrow_mut().push("outside"))));
        let h = hits.clone();
        gui.on_global_click(Some(Rc::new(move |_: &mut ClickEvent| h.borrow_mut().push("global"))));

        let mut event = ClickEvent::outside(ViewerId(3));
        let outcome = gui.click(&mut event).unwrap();
        assert_eq!(outcome.target, None);
        assert!(!outcome.applied);
        assert_eq!(*hits.borrow(), vec!["outside"]);
    }

    #[test]
    fn click_out_of_range_fails() {
        let mut gui = CompositeGui::new(GuiKind::Hopper, "Hopper").unwrap();
        let mut event = ClickEvent::new(41, ClickAction::Take, ViewerId(1));
        assert!(gui.click(&mut event).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn dirty_lifecycle() {
        let mut gui = CompositeGui::new(GuiKind::Hopper, "Hopper").unwrap();
        assert!(gui.is_dirty());
        gui.clear_dirty();
        gui.clear_dirty();
        assert!(!gui.is_dirty());
        gui.set_title("Hopper");
        assert!(!gui.is_dirty());
        gui.set_title("Renamed");
        assert!(gui.is_dirty());
        gui.clear_dirty();
        gui.mark_dirty();
        assert!(gui.is_dirty());
    }

    #[test]
    fn show_recreates_view_only_when_dirty() {
        let mut adapter = MemoryAdapter::new();
        let mut gui = CompositeGui::new(GuiKind::Dispenser, "Dispenser").unwrap();
        gui.component_mut("items")
            .unwrap()
            .set(1, 1, Some(item(9)))
            .unwrap();
        let mut inventory = vec![None; VIEWER_INVENTORY_SIZE];

        gui.show(&mut adapter, ViewerId(1), &mut inventory).unwrap();
        assert!(!gui.is_dirty());
        assert_eq!(adapter.created(), 1);
        let view = gui.view().unwrap();
        let state = adapter.view(view).unwrap();
        assert_eq!(state.slots.len(), 9);
        assert_eq!(state.slots[4].as_ref().map(|i| i.runtime_id), Some(9));
        assert_eq!(state.viewers, vec![ViewerId(1)]);

        gui.show(&mut adapter, ViewerId(2), &mut inventory).unwrap();
        assert_eq!(adapter.created(), 1);

        gui.set_title("Renamed");
        gui.show(&mut adapter, ViewerId(1), &mut inventory).unwrap();
        assert_eq!(adapter.created(), 2);
        assert_eq!(adapter.view(gui.view().unwrap()).unwrap().title, "Renamed");
    }

    #[test]
    fn show_redraws_after_clear() {
        let mut adapter = MemoryAdapter::new();
        let mut gui = CompositeGui::new(GuiKind::Hopper, "Hopper").unwrap();
        let mut inventory = vec![None; VIEWER_INVENTORY_SIZE];
        gui.component_mut("items").unwrap().set(0, 0, Some(item(1))).unwrap();
        gui.show(&mut adapter, ViewerId(1), &mut inventory).unwrap();

        gui.component_mut("items").unwrap().clear();
        gui.show(&mut adapter, ViewerId(1), &mut inventory).unwrap();
        let state = adapter.view(gui.view().unwrap()).unwrap();
        assert!(state.slots.iter().all(Option::is_none));
    }

    #[test]
    fn player_inventory_saved_and_restored() {
        let closed = Rc::new(RefCell::new(Vec::new()));
        let mut adapter = MemoryAdapter::new();
        let mut gui = CompositeGui::new(GuiKind::Hopper, "Hopper").unwrap();
        let c = closed.clone();
        gui.on_close(Some(Rc::new(move |viewer: ViewerId| c.borrow_mut().push(viewer))));
        gui.component_mut(PLAYER_INVENTORY)
            .unwrap()
            .set(3, 0, Some(item(42)))
            .unwrap();

        let mut inventory = vec![None; VIEWER_INVENTORY_SIZE];
        inventory[20] = Some(item(7));
        let viewer = ViewerId(5);
        gui.show(&mut adapter, viewer, &mut inventory).unwrap();
        assert!(gui.is_player_inventory_used());
        assert_eq!(inventory[0].as_ref().map(|i| i.runtime_id), Some(42));
        assert!(inventory[20].is_none());

        gui.show(&mut adapter, viewer, &mut inventory).unwrap();
        gui.close(&mut adapter, viewer, &mut inventory).unwrap();
        assert_eq!(inventory[20].as_ref().map(|i| i.runtime_id), Some(7));
        assert!(inventory[0].is_none());
        assert!(gui.viewers().is_empty());
        assert_eq!(*closed.borrow(), vec![viewer]);
    }

    struct RefusingClose(MemoryAdapter);

    impl InventoryAdapter for RefusingClose {
        fn create_view(&mut self, kind: GuiKind, size: usize, title: &str) -> Result<ViewHandle, GuiError> {
            self.0.create_view(kind, size, title)
        }

        fn clear_view(&mut self, view: ViewHandle) -> Result<(), GuiError> {
            self.0.clear_view(view)
        }

        fn display_component(&mut self, view: ViewHandle, component: &Component, offset: usize) -> Result<(), GuiError> {
            self.0.display_component(view, component, offset)
        }

        fn open_view(&mut self, view: ViewHandle, viewer: ViewerId) -> Result<(), GuiError> {
            self.0.open_view(view, viewer)
        }

        fn close_view(&mut self, _view: ViewHandle, _viewer: ViewerId) -> Result<(), GuiError> {
            Err(GuiError::Adapter("connection gone".into()))
        }
    }

    #[test]
    fn failed_close_still_releases_viewer() {
        let closed = Rc::new(RefCell::new(Vec::new()));
        let mut adapter = RefusingClose(MemoryAdapter::new());
        let mut gui = CompositeGui::new(GuiKind::Hopper, "Hopper").unwrap();
        let c = closed.clone();
        gui.on_close(Some(Rc::new(move |viewer: ViewerId| c.borrow_mut().push(viewer))));
        gui.component_mut(PLAYER_INVENTORY)
            .unwrap()
            .set(0, 0, Some(item(42)))
            .unwrap();

        let viewer = ViewerId(1);
        let mut inventory = vec![None; VIEWER_INVENTORY_SIZE];
        inventory[20] = Some(item(7));
        gui.show(&mut adapter, viewer, &mut inventory).unwrap();
        assert!(inventory[20].is_none());

        assert!(matches!(
            gui.close(&mut adapter, viewer, &mut inventory),
            Err(GuiError::Adapter(_))
        ));
        assert_eq!(inventory[20].as_ref().map(|i| i.runtime_id), Some(7));
        assert!(gui.viewers().is_empty());
        assert_eq!(*closed.borrow(), vec![viewer]);
    }

    #[test]
    fn recreated_view_releases_the_old_one() {
        let mut adapter = MemoryAdapter::new();
        let mut gui = CompositeGui::new(GuiKind::Hopper, "Hopper").unwrap();
        let mut inventory = vec![None; VIEWER_INVENTORY_SIZE];
        gui.show(&mut adapter, ViewerId(1), &mut inventory).unwrap();
        let first = gui.view().unwrap();

        for _ in 0..5 {
            gui.mark_dirty();
            gui.show(&mut adapter, ViewerId(1), &mut inventory).unwrap();
        }
        assert!(adapter.view(first).is_none());
        assert!(adapter.view(gui.view().unwrap()).is_some());
        assert_eq!(adapter.created(), 6);
        assert_eq!(adapter.live(), 1);
    }

    #[test]
    fn copy_is_independent_and_shares_handlers() {
        let mut adapter = MemoryAdapter::new();
        let mut original = CompositeGui::new(GuiKind::Crafter, "Crafter").unwrap();
        original.on_global_click(Some(Rc::new(|_: &mut ClickEvent| {})));
        let input = original.component_mut("input").unwrap();
        input.set(0, 0, Some(item(3))).unwrap();
        input.set_rotation(90).unwrap();
        let mut inventory = vec![None; VIEWER_INVENTORY_SIZE];
        original.show(&mut adapter, ViewerId(1), &mut inventory).unwrap();

        let mut copy = original.copy();
        assert!(copy.is_dirty());
        assert!(copy.view().is_none());
        assert!(copy.viewers().is_empty());
        assert_eq!(copy.component("input").unwrap().rotation(), 90);
        assert!(Rc::ptr_eq(
            original.handlers.global.as_ref().unwrap(),
            copy.handlers.global.as_ref().unwrap()
        ));

        copy.component_mut("input").unwrap().clear();
        assert!(original.component("input").unwrap().has_item());
    }

    #[test]
    fn top_items_follow_offsets() {
        let mut gui = CompositeGui::new(GuiKind::Anvil, "Anvil").unwrap();
        gui.component_mut("second").unwrap().set(0, 0, Some(item(8))).unwrap();
        let top = gui.top_items();
        assert_eq!(top.len(), 3);
        assert!(top[0].is_none());
        assert_eq!(top[1].as_ref().map(|i| i.runtime_id), Some(8));
    }

    #[test]
    fn handle_click_goes_through_adapter() {
        let mut adapter = MemoryAdapter::new();
        let mut gui = CompositeGui::new(GuiKind::Hopper, "Hopper").unwrap();
        let mut event = ClickEvent::new(0, ClickAction::Swap(item(4)), ViewerId(1));
        let outcome = gui.handle_click(&mut adapter, &mut event).unwrap();
        assert!(outcome.applied);
        assert!(gui.component("items").unwrap().has_item());
    }
}
