use mc_gui_proto::item_stack::{Enchantment, ItemStack};

use crate::error::BuildError;
use crate::item::{material_of, obtainable, ItemMetaBuilder};
use crate::material::{MaterialRegistry, MetaKind};

/// Builder for items that store enchantments instead of applying them.
#[derive(Debug, Clone)]
pub struct EnchantmentStorageBuilder {
    stack: ItemStack,
    max_stack: u16,
}

impl EnchantmentStorageBuilder {
    pub fn of(registry: &MaterialRegistry, stack: ItemStack) -> Result<Self, BuildError> {
        let max_stack = material_of(registry, &stack, Some(MetaKind::EnchantedBook))?.max_stack;
        Ok(Self { stack, max_stack })
    }

    pub fn of_type(registry: &MaterialRegistry, material: &str) -> Result<Self, BuildError> {
        let material = obtainable(registry, material, Some(MetaKind::EnchantedBook))?;
        Ok(Self {
            stack: ItemStack::new(material.runtime_id, 1),
            max_stack: material.max_stack,
        })
    }

    pub fn of_enchanted_book(registry: &MaterialRegistry) -> Result<Self, BuildError> {
        Self::of_type(registry, "minecraft:enchanted_book")
    }

    pub fn stored_enchants(&self) -> &[Enchantment] {
        &self.stack.meta.stored_enchantments
    }

    /// Replace every stored enchantment. Later duplicates of an id win.
    pub fn set_stored_enchants(mut self, enchants: impl IntoIterator<Item = Enchantment>) -> Self {
        self.stack.meta.stored_enchantments.clear();
        for enchant in enchants {
            self = self.add_stored_enchant(enchant.id, enchant.level);
        }
        self
    }

    pub fn add_stored_enchant(mut self, id: i16, level: i16) -> Self {
        let stored = &mut self.stack.meta.stored_enchantments;
        match stored.iter_mut().find(|e| e.id == id) {
            Some(existing) => existing.level = level,
            None => stored.push(Enchantment { id, level }),
        }
        self
    }

    pub fn remove_stored_enchant(mut self, ids: &[i16]) -> Self {
        self.stack
            .meta
            .stored_enchantments
            .retain(|e| !ids.contains(&e.id));
        self
    }
}

impl ItemMetaBuilder for EnchantmentStorageBuilder {
    fn stack(&self) -> &ItemStack {
        &self.stack
    }

    fn stack_mut(&mut self) -> &mut ItemStack {
        &mut self.stack
    }

    fn max_stack(&self) -> u16 {
        self.max_stack
    }

    fn build(self) -> ItemStack {
        self.stack
    }
}
