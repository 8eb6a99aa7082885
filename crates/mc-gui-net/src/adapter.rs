//! [`InventoryAdapter`] backed by Bedrock container packets.
//!
//! Plain kinds get their top slots through `InventoryContent` on the
//! allocated window. Anvils, grindstones, cartography and enchanting tables
//! keep their inputs in the client's UI window, so their slots are pushed
//! one by one with `InventorySlot` at fixed UI offsets.

use std::collections::HashMap;

use bytes::Buf;
use mc_gui_core::{
    Area, ClickEvent, ClickOutcome, Component, CompositeGui, GuiError, GuiKind, InventoryAdapter,
    ViewHandle, ViewerId,
};
use mc_gui_proto::codec::{encode_packet, expect_packet_id, ProtoDecode, ProtoEncode};
use mc_gui_proto::item_stack::ItemStack;
use mc_gui_proto::packets::container_set_data::{
    ANVIL_REPAIR_COST, ENCHANT_LEVEL_BOTTOM, ENCHANT_LEVEL_MIDDLE, ENCHANT_LEVEL_TOP,
};
use mc_gui_proto::packets::{
    id, window, ContainerClose, ContainerOpen, ContainerSetData, ContainerType, InventoryContent,
    InventorySlot,
};
use mc_gui_proto::types::BlockPos;
use tracing::{debug, warn};

use crate::error::NetError;
use crate::sink::PacketSink;

/// Highest window id handed out before wrapping back to 1.
const MAX_WINDOW_ID: u8 = 99;

/// UI window slots of the custom-container kinds.
mod ui_slot {
    pub const ANVIL_INPUT: u32 = 1;
    pub const ANVIL_MATERIAL: u32 = 2;
    pub const CARTOGRAPHY_INPUT: u32 = 12;
    pub const CARTOGRAPHY_ADDITIONAL: u32 = 13;
    pub const ENCHANTING_INPUT: u32 = 14;
    pub const ENCHANTING_MATERIAL: u32 = 15;
    pub const GRINDSTONE_INPUT: u32 = 16;
    pub const GRINDSTONE_ADDITIONAL: u32 = 17;
    pub const CREATED_OUTPUT: u32 = 50;
}

/// Client container type used to display `kind`.
pub fn container_type(kind: GuiKind) -> ContainerType {
    match kind {
        GuiKind::Chest { .. } | GuiKind::Custom => ContainerType::Container,
        GuiKind::Hopper => ContainerType::Hopper,
        GuiKind::Dispenser => ContainerType::Dispenser,
        GuiKind::Dropper => ContainerType::Dropper,
        GuiKind::Furnace => ContainerType::Furnace,
        GuiKind::BlastFurnace => ContainerType::BlastFurnace,
        GuiKind::Smoker => ContainerType::Smoker,
        GuiKind::Grindstone => ContainerType::Grindstone,
        GuiKind::Anvil => ContainerType::Anvil,
        GuiKind::CartographyTable => ContainerType::Cartography,
        GuiKind::EnchantingTable => ContainerType::Enchantment,
        GuiKind::Crafter => ContainerType::Crafter,
    }
}

/// UI slots backing the top area of a custom-container kind, in top order.
/// Empty for kinds drawn in their own window.
fn ui_slots(kind: GuiKind) -> &'static [u32] {
    use ui_slot::*;
    match kind {
        GuiKind::Anvil => &[ANVIL_INPUT, ANVIL_MATERIAL, CREATED_OUTPUT],
        GuiKind::Grindstone => &[GRINDSTONE_INPUT, GRINDSTONE_ADDITIONAL, CREATED_OUTPUT],
        GuiKind::CartographyTable => &[CARTOGRAPHY_INPUT, CARTOGRAPHY_ADDITIONAL, CREATED_OUTPUT],
        GuiKind::EnchantingTable => &[ENCHANTING_INPUT, ENCHANTING_MATERIAL],
        _ => &[],
    }
}

#[derive(Debug, Clone)]
struct Window {
    window_id: u8,
    kind: GuiKind,
    slots: Vec<Option<ItemStack>>,
    viewers: Vec<ViewerId>,
}

pub struct PacketAdapter<S: PacketSink> {
    sink: S,
    /// Block position reported in `ContainerOpen`.
    position: BlockPos,
    next_window_id: u8,
    next_handle: u32,
    windows: HashMap<ViewHandle, Window>,
}

impl<S: PacketSink> PacketAdapter<S> {
    pub fn new(sink: S, position: BlockPos) -> Self {
        Self {
            sink,
            position,
            next_window_id: 1,
            next_handle: 0,
            windows: HashMap::new(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Window id allocated for a view.
    pub fn window_id(&self, view: ViewHandle) -> Option<u8> {
        self.windows.get(&view).map(|w| w.window_id)
    }

    /// Next window id not held by a live window.
    fn allocate_window_id(&mut self) -> u8 {
        for _ in 0..MAX_WINDOW_ID {
            let id = self.advance_window_id();
            if !self.windows.values().any(|w| w.window_id == id) {
                return id;
            }
        }
        let id = self.advance_window_id();
        warn!("All {MAX_WINDOW_ID} window ids are in use, reusing {id}");
        id
    }

    fn advance_window_id(&mut self) -> u8 {
        let id = self.next_window_id;
        self.next_window_id = if id >= MAX_WINDOW_ID { 1 } else { id + 1 };
        id
    }

    /// Number of windows currently tracked.
    pub fn live_windows(&self) -> usize {
        self.windows.len()
    }

    fn window(&self, view: ViewHandle) -> Result<&Window, NetError> {
        self.windows.get(&view).ok_or(NetError::UnknownView(view.0))
    }

    fn send(&mut self, viewer: ViewerId, packet_id: u32, packet: &impl ProtoEncode) -> Result<(), NetError> {
        self.sink.send(viewer, encode_packet(packet_id, packet))
    }

    fn send_ui_slot(&mut self, viewer: ViewerId, slot: u32, item: Option<ItemStack>) -> Result<(), NetError> {
        self.send(
            viewer,
            id::INVENTORY_SLOT,
            &InventorySlot {
                window_id: window::UI,
                slot,
                item,
            },
        )
    }

    /// Push a full set of top items to the viewer.
    ///
    /// Anvils always take exactly three items: first, second and result.
    pub fn send_items(
        &mut self,
        view: ViewHandle,
        viewer: ViewerId,
        items: &[Option<ItemStack>],
    ) -> Result<(), NetError> {
        let window = self.window(view)?;
        let (window_id, kind) = (window.window_id, window.kind);
        if kind == GuiKind::Anvil && items.len() != 3 {
            return Err(NetError::InvalidArgument(format!(
                "an anvil takes 3 items, got {}",
                items.len()
            )));
        }
        if kind.requires_custom_container() {
            for (slot, item) in ui_slots(kind).iter().zip(items) {
                self.send_ui_slot(viewer, *slot, item.clone())?;
            }
        } else {
            self.send(
                viewer,
                id::INVENTORY_CONTENT,
                &InventoryContent {
                    window_id: window_id as u32,
                    items: items.to_vec(),
                },
            )?;
        }
        debug!("Sent {} {kind} items to {viewer}", items.len());
        Ok(())
    }

    /// Update one top slot of an open view.
    pub fn send_slot(
        &mut self,
        view: ViewHandle,
        viewer: ViewerId,
        index: usize,
        item: Option<ItemStack>,
    ) -> Result<(), NetError> {
        let window = self.window(view)?;
        let (window_id, kind) = (window.window_id, window.kind);
        if kind.requires_custom_container() {
            let slot = ui_slots(kind).get(index).copied().ok_or_else(|| {
                NetError::InvalidArgument(format!("{kind} has no top slot {index}"))
            })?;
            self.send_ui_slot(viewer, slot, item)
        } else {
            self.send(
                viewer,
                id::INVENTORY_SLOT,
                &InventorySlot {
                    window_id: window_id as u32,
                    slot: index as u32,
                    item,
                },
            )
        }
    }

    pub fn send_first_item(&mut self, view: ViewHandle, viewer: ViewerId, item: Option<ItemStack>) -> Result<(), NetError> {
        self.send_slot(view, viewer, 0, item)
    }

    pub fn send_second_item(&mut self, view: ViewHandle, viewer: ViewerId, item: Option<ItemStack>) -> Result<(), NetError> {
        self.send_slot(view, viewer, 1, item)
    }

    /// Result slot of a three-slot workstation.
    pub fn send_result_item(&mut self, view: ViewHandle, viewer: ViewerId, item: Option<ItemStack>) -> Result<(), NetError> {
        self.send_slot(view, viewer, 2, item)
    }

    pub fn clear_result_item(&mut self, view: ViewHandle, viewer: ViewerId) -> Result<(), NetError> {
        self.send_result_item(view, viewer, None)
    }

    pub fn set_cursor(&mut self, viewer: ViewerId, item: ItemStack) -> Result<(), NetError> {
        self.send_ui_slot(viewer, window::CURSOR_SLOT, Some(item).filter(|i| !i.is_empty()))
    }

    pub fn clear_cursor(&mut self, viewer: ViewerId) -> Result<(), NetError> {
        self.send_ui_slot(viewer, window::CURSOR_SLOT, None)
    }

    fn set_data(&mut self, view: ViewHandle, viewer: ViewerId, property: i32, value: i32) -> Result<(), NetError> {
        let window_id = self.window(view)?.window_id;
        self.send(
            viewer,
            id::CONTAINER_SET_DATA,
            &ContainerSetData {
                window_id,
                property,
                value,
            },
        )
    }

    pub fn set_repair_cost(&mut self, view: ViewHandle, viewer: ViewerId, cost: i32) -> Result<(), NetError> {
        if self.window(view)?.kind != GuiKind::Anvil {
            return Err(NetError::InvalidArgument("repair cost needs an anvil".into()));
        }
        self.set_data(view, viewer, ANVIL_REPAIR_COST, cost)
    }

    /// Level requirements of the three enchanting offers, top to bottom.
    pub fn set_enchant_levels(&mut self, view: ViewHandle, viewer: ViewerId, levels: [i32; 3]) -> Result<(), NetError> {
        if self.window(view)?.kind != GuiKind::EnchantingTable {
            return Err(NetError::InvalidArgument("enchant levels need an enchanting table".into()));
        }
        for (property, level) in [ENCHANT_LEVEL_TOP, ENCHANT_LEVEL_MIDDLE, ENCHANT_LEVEL_BOTTOM]
            .into_iter()
            .zip(levels)
        {
            self.set_data(view, viewer, property, level)?;
        }
        Ok(())
    }

    /// Handle a client `ContainerClose` sub-packet.
    ///
    /// Returns the view the viewer left, or `None` when the window id does
    /// not belong to any view that viewer has open.
    pub fn handle_container_close(
        &mut self,
        viewer: ViewerId,
        mut packet: impl Buf,
    ) -> Result<Option<ViewHandle>, NetError> {
        expect_packet_id(&mut packet, id::CONTAINER_CLOSE)?;
        let close = ContainerClose::proto_decode(&mut packet)?;
        let found = self
            .windows
            .iter_mut()
            .find(|(_, w)| w.window_id == close.window_id && w.viewers.contains(&viewer));
        match found {
            Some((handle, window)) => {
                window.viewers.retain(|v| *v != viewer);
                debug!("{viewer} closed window {}", close.window_id);
                Ok(Some(*handle))
            }
            None => {
                warn!("{viewer} closed unknown window {}", close.window_id);
                Ok(None)
            }
        }
    }
}

impl<S: PacketSink> InventoryAdapter for PacketAdapter<S> {
    fn create_view(&mut self, kind: GuiKind, size: usize, title: &str) -> Result<ViewHandle, GuiError> {
        self.next_handle += 1;
        let handle = ViewHandle(self.next_handle);
        let window_id = self.allocate_window_id();
        self.windows.insert(
            handle,
            Window {
                window_id,
                kind,
                slots: vec![None; size],
                viewers: Vec::new(),
            },
        );
        debug!("Allocated window {window_id} for {kind} '{title}'");
        Ok(handle)
    }

    fn clear_view(&mut self, view: ViewHandle) -> Result<(), GuiError> {
        let window = self
            .windows
            .get_mut(&view)
            .ok_or(NetError::UnknownView(view.0))?;
        window.slots.iter_mut().for_each(|s| *s = None);
        Ok(())
    }

    fn display_component(&mut self, view: ViewHandle, component: &Component, offset: usize) -> Result<(), GuiError> {
        let window = self
            .windows
            .get_mut(&view)
            .ok_or(NetError::UnknownView(view.0))?;
        if offset + component.size() > window.slots.len() {
            return Err(GuiError::Adapter(format!(
                "component at offset {offset} overflows window {}",
                window.window_id
            )));
        }
        component.place_into(&mut window.slots, offset);
        Ok(())
    }

    fn open_view(&mut self, view: ViewHandle, viewer: ViewerId) -> Result<(), GuiError> {
        let window = self.window(view)?;
        let open = ContainerOpen {
            window_id: window.window_id,
            container_type: container_type(window.kind),
            position: self.position,
            entity_unique_id: -1,
        };
        let items = window.slots.clone();
        self.send(viewer, id::CONTAINER_OPEN, &open)?;
        self.send_items(view, viewer, &items)?;
        if let Some(window) = self.windows.get_mut(&view) {
            if !window.viewers.contains(&viewer) {
                window.viewers.push(viewer);
            }
        }
        Ok(())
    }

    fn close_view(&mut self, view: ViewHandle, viewer: ViewerId) -> Result<(), GuiError> {
        let window_id = self.window(view)?.window_id;
        self.send(
            viewer,
            id::CONTAINER_CLOSE,
            &ContainerClose {
                window_id,
                server_initiated: true,
            },
        )?;
        if let Some(window) = self.windows.get_mut(&view) {
            window.viewers.retain(|v| *v != viewer);
        }
        Ok(())
    }

    fn release_view(&mut self, view: ViewHandle) -> Result<(), GuiError> {
        if let Some(window) = self.windows.remove(&view) {
            debug!("Released window {} ({})", window.window_id, window.kind);
        }
        Ok(())
    }

    /// Custom-container kinds get their top slots re-sent after every
    /// in-window click so the client drops its predicted state. A cancelled
    /// top click also clears the cursor.
    fn route_click(
        &mut self,
        gui: &mut CompositeGui,
        event: &mut ClickEvent,
    ) -> Result<ClickOutcome, GuiError> {
        let outcome = gui.click(event)?;
        if !gui.kind().requires_custom_container() {
            return Ok(outcome);
        }
        if let (Some(view), Some(target)) = (gui.view(), outcome.target) {
            self.send_items(view, event.viewer, &gui.top_items())?;
            if target.area == Area::Top && event.is_cancelled() {
                self.clear_cursor(event.viewer)?;
            }
        }
        Ok(outcome)
    }
}
