//! Viewer identity and the cache that keeps a viewer's own inventory safe
//! while a GUI draws into it.

use std::collections::HashMap;
use std::fmt;

use mc_gui_proto::item_stack::ItemStack;
use tracing::debug;

use crate::component::Component;

/// Size of a viewer's main inventory (27 storage + 9 hotbar).
pub const VIEWER_INVENTORY_SIZE: usize = 36;

pub const HOTBAR_SIZE: usize = 9;

/// Host-assigned identifier of whoever is looking at a GUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewerId(pub u64);

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewer#{}", self.0)
    }
}

/// Saved viewer inventories, restored when the GUI closes.
#[derive(Debug, Clone, Default)]
pub struct ViewerInventoryCache {
    saved: HashMap<ViewerId, Vec<Option<ItemStack>>>,
}

impl ViewerInventoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, viewer: ViewerId) -> bool {
        self.saved.contains_key(&viewer)
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Save `inventory` for `viewer` and empty it.
    pub fn store_and_clear(&mut self, viewer: ViewerId, inventory: &mut [Option<ItemStack>]) {
        let snapshot = inventory.iter_mut().map(Option::take).collect();
        self.saved.insert(viewer, snapshot);
        debug!("Stored inventory of {viewer}");
    }

    /// Write the saved inventory back. Returns false if nothing was stored.
    pub fn restore(&mut self, viewer: ViewerId, inventory: &mut [Option<ItemStack>]) -> bool {
        let Some(saved) = self.saved.remove(&viewer) else {
            return false;
        };
        for (slot, item) in inventory.iter_mut().zip(saved) {
            *slot = item;
        }
        debug!("Restored inventory of {viewer}");
        true
    }

    /// Hand every saved inventory to `restore` and empty the cache.
    pub fn restore_all(&mut self, mut restore: impl FnMut(ViewerId, Vec<Option<ItemStack>>)) {
        for (viewer, saved) in self.saved.drain() {
            restore(viewer, saved);
        }
    }

    /// Forget every saved inventory without restoring it.
    pub fn clear_cache(&mut self) {
        self.saved.clear();
    }
}

/// Viewer inventory slot behind a bottom-area index.
///
/// Bottom indices run row-major over a 9×4 grid whose last row is the
/// hotbar (inventory slots 0..9); the rows above are storage slots 9..36.
pub fn inventory_slot(bottom_index: usize) -> usize {
    const STORAGE: usize = VIEWER_INVENTORY_SIZE - HOTBAR_SIZE;
    if bottom_index >= STORAGE {
        bottom_index - STORAGE
    } else {
        bottom_index + HOTBAR_SIZE
    }
}

/// Write a bottom-area component into a viewer inventory. `bottom_offset`
/// is the component's first index within the bottom area.
pub fn place_bottom_items(
    component: &Component,
    bottom_offset: usize,
    inventory: &mut [Option<ItemStack>],
) {
    for (local, item) in component.items().into_iter().enumerate() {
        let Some(item) = item else { continue };
        let index = bottom_offset + local;
        if index >= VIEWER_INVENTORY_SIZE {
            continue;
        }
        if let Some(target) = inventory.get_mut(inventory_slot(index)) {
            *target = Some(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_clear_restore() {
        let mut cache = ViewerInventoryCache::new();
        let viewer = ViewerId(7);
        let mut inventory = vec![None; VIEWER_INVENTORY_SIZE];
        inventory[4] = Some(ItemStack::new(1, 12));

        cache.store_and_clear(viewer, &mut inventory);
        assert!(cache.contains(viewer));
        assert!(inventory.iter().all(Option::is_none));

        inventory[0] = Some(ItemStack::new(2, 1));
        assert!(cache.restore(viewer, &mut inventory));
        assert!(inventory[0].is_none());
        assert_eq!(inventory[4].as_ref().map(|i| i.count), Some(12));
        assert!(!cache.contains(viewer));
        assert!(!cache.restore(viewer, &mut inventory));
    }

    #[test]
    fn restore_all_empties_cache() {
        let mut cache = ViewerInventoryCache::new();
        let mut a = vec![Some(ItemStack::new(1, 1)); 2];
        let mut b = vec![Some(ItemStack::new(2, 1)); 2];
        cache.store_and_clear(ViewerId(1), &mut a);
        cache.store_and_clear(ViewerId(2), &mut b);
        assert_eq!(cache.len(), 2);

        let mut seen = Vec::new();
        cache.restore_all(|viewer, items| seen.push((viewer, items.len())));
        seen.sort();
        assert_eq!(seen, vec![(ViewerId(1), 2), (ViewerId(2), 2)]);
        assert!(cache.is_empty());

        cache.store_and_clear(ViewerId(3), &mut a);
        cache.clear_cache();
        assert!(!cache.contains(ViewerId(3)));
    }

    #[test]
    fn bottom_row_goes_to_hotbar() {
        let mut player = Component::new(9, 4).unwrap();
        player.set(3, 0, Some(ItemStack::new(5, 1))).unwrap();
        player.set(0, 0, Some(ItemStack::new(6, 1))).unwrap();
        player.set(2, 8, Some(ItemStack::new(7, 1))).unwrap();

        let mut inventory = vec![None; VIEWER_INVENTORY_SIZE];
        place_bottom_items(&player, 0, &mut inventory);
        assert_eq!(inventory[0].as_ref().map(|i| i.runtime_id), Some(5));
        assert_eq!(inventory[9].as_ref().map(|i| i.runtime_id), Some(6));
        assert_eq!(inventory[35].as_ref().map(|i| i.runtime_id), Some(7));
    }
}
