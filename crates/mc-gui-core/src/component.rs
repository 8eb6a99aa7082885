//! Fixed-size grid of item slots.
//!
//! Dimensions never change after construction. Empty stacks are never
//! stored: setting one leaves the cell empty.

use std::fmt;

use mc_gui_proto::item_stack::ItemStack;

use crate::click::{ClickAction, ClickHandler};
use crate::error::{GuiError, SlotPosition};
use crate::rotation::Rotation;

/// Stack limit of a component unless changed with
/// [`Component::set_max_stack_size`].
pub const DEFAULT_MAX_STACK: u16 = 64;

/// A `width × height` grid addressed by `(row, col)`.
///
/// Cloning is a deep copy of the slots; the click handler is shared by
/// reference.
#[derive(Clone)]
pub struct Component {
    width: usize,
    height: usize,
    /// Row-major storage, independent of rotation.
    slots: Vec<Option<ItemStack>>,
    rotation: Rotation,
    max_stack: u16,
    handler: Option<ClickHandler>,
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("items", &self.item_count())
            .field("rotation", &self.rotation.degrees())
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl Component {
    pub fn new(width: usize, height: usize) -> Result<Self, GuiError> {
        if width == 0 || height == 0 {
            return Err(GuiError::InvalidArgument(format!(
                "component dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            slots: vec![None; width * height],
            rotation: Rotation::NONE,
            max_stack: DEFAULT_MAX_STACK,
            handler: None,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of slots.
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Storage index behind a logical cell.
    fn storage_index(&self, row: usize, col: usize) -> Result<usize, GuiError> {
        if row >= self.height || col >= self.width {
            return Err(GuiError::OutOfBounds(SlotPosition::Cell {
                row,
                col,
                width: self.width,
                height: self.height,
            }));
        }
        let (r, c) = self.rotation.to_storage(row, col, self.width);
        Ok(r * self.width + c)
    }

    /// Logical `(row, col)` of a local flat index.
    pub fn cell_of(&self, local: usize) -> Result<(usize, usize), GuiError> {
        if local >= self.size() {
            return Err(GuiError::OutOfBounds(SlotPosition::Index {
                index: local as i64,
                size: self.size(),
            }));
        }
        Ok((local / self.width, local % self.width))
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Option<&ItemStack>, GuiError> {
        let index = self.storage_index(row, col)?;
        Ok(self.slots[index].as_ref())
    }

    /// Overwrite a cell. `None` or an empty stack clears it.
    pub fn set(&mut self, row: usize, col: usize, item: Option<ItemStack>) -> Result<(), GuiError> {
        self.replace(row, col, item).map(|_| ())
    }

    /// Overwrite a cell and return what was there.
    pub fn replace(
        &mut self,
        row: usize,
        col: usize,
        item: Option<ItemStack>,
    ) -> Result<Option<ItemStack>, GuiError> {
        let index = self.storage_index(row, col)?;
        let item = item.filter(|i| !i.is_empty());
        Ok(std::mem::replace(&mut self.slots[index], item))
    }

    /// Remove and return a cell's item.
    pub fn take(&mut self, row: usize, col: usize) -> Result<Option<ItemStack>, GuiError> {
        self.replace(row, col, None)
    }

    pub fn get_index(&self, local: usize) -> Result<Option<&ItemStack>, GuiError> {
        let (row, col) = self.cell_of(local)?;
        self.get(row, col)
    }

    pub fn set_index(&mut self, local: usize, item: Option<ItemStack>) -> Result<(), GuiError> {
        let (row, col) = self.cell_of(local)?;
        self.set(row, col, item)
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    pub fn has_item(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    pub fn item_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Logical row-major snapshot of every slot.
    pub fn items(&self) -> Vec<Option<ItemStack>> {
        (0..self.size())
            .map(|local| {
                let (row, col) = (local / self.width, local % self.width);
                let (r, c) = self.rotation.to_storage(row, col, self.width);
                self.slots[r * self.width + c].clone()
            })
            .collect()
    }

    /// Copy every non-empty slot into `target` starting at `offset`, in logical order.
    /// Slots that fall past the end of `target` are skipped.
    pub fn place_into(&self, target: &mut [Option<ItemStack>], offset: usize) {
        for (local, item) in self.items().into_iter().enumerate() {
            if let (Some(item), Some(slot)) = (item, target.get_mut(offset + local)) {
                *slot = Some(item);
            }
        }
    }

    /// Turn the component a further `degrees` clockwise. Four turns of 90
    /// bring every cell back to where it started.
    pub fn set_rotation(&mut self, degrees: i32) -> Result<(), GuiError> {
        if !self.is_square() {
            return Err(GuiError::UnsupportedOperation(format!(
                "cannot rotate a {}x{} component",
                self.width, self.height
            )));
        }
        let step = Rotation::new(degrees)?;
        self.rotation = self.rotation.then(step);
        Ok(())
    }

    pub fn reset_rotation(&mut self) {
        self.rotation = Rotation::default();
    }

    /// Rotation in degrees, 0 if never set.
    pub fn rotation(&self) -> i32 {
        self.rotation.degrees()
    }

    /// Largest count a click may stack into one slot.
    pub fn max_stack_size(&self) -> u16 {
        self.max_stack
    }

    pub fn set_max_stack_size(&mut self, max: u16) {
        self.max_stack = max.max(1);
    }

    pub fn set_handler(&mut self, handler: Option<ClickHandler>) {
        self.handler = handler;
    }

    pub fn handler(&self) -> Option<&ClickHandler> {
        self.handler.as_ref()
    }

    /// Independent deep copy. Shares only the handler reference.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Apply a click action to a local slot and return the prior content.
    pub fn apply(&mut self, local: usize, action: &ClickAction) -> Result<Option<ItemStack>, GuiError> {
        let (row, col) = self.cell_of(local)?;
        match action {
            ClickAction::Inspect => Ok(self.get(row, col)?.cloned()),
            ClickAction::Take => self.take(row, col),
            ClickAction::Swap(item) => self.replace(row, col, Some(item.clone())),
            ClickAction::Place(item) => {
                let index = self.storage_index(row, col)?;
                let previous = self.slots[index].clone();
                match &previous {
                    None => self.slots[index] = Some(item.clone()).filter(|i| !i.is_empty()),
                    Some(existing) if stacks_with(existing, item) => {
                        let total = u32::from(existing.count) + u32::from(item.count);
                        if total > u32::from(self.max_stack) {
                            return Err(GuiError::InvalidArgument(format!(
                                "slot {local} cannot stack {total} items, limit is {}",
                                self.max_stack
                            )));
                        }
                        if let Some(slot) = self.slots[index].as_mut() {
                            slot.count = total as u16;
                        }
                    }
                    Some(_) => {
                        return Err(GuiError::InvalidArgument(format!(
                            "slot {local} holds a different item"
                        )));
                    }
                }
                Ok(previous)
            }
        }
    }
}

fn stacks_with(a: &ItemStack, b: &ItemStack) -> bool {
    a.runtime_id == b.runtime_id && a.metadata == b.metadata && a.meta == b.meta
}
