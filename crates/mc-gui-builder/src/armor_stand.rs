use mc_gui_proto::item_stack::{ArmorStandFlags, ItemStack};

use crate::error::BuildError;
use crate::item::{material_of, obtainable, ItemMetaBuilder};
use crate::material::{MaterialRegistry, MetaKind};

/// Builder for armor stand items and the pose flags they spawn with.
#[derive(Debug, Clone)]
pub struct ArmorStandBuilder {
    stack: ItemStack,
    max_stack: u16,
}

impl ArmorStandBuilder {
    /// Fails unless the stack's material carries armor stand meta.
    pub fn of(registry: &MaterialRegistry, mut stack: ItemStack) -> Result<Self, BuildError> {
        let max_stack = material_of(registry, &stack, Some(MetaKind::ArmorStand))?.max_stack;
        stack.meta.armor_stand.get_or_insert_with(ArmorStandFlags::default);
        Ok(Self { stack, max_stack })
    }

    pub fn of_type(registry: &MaterialRegistry, material: &str) -> Result<Self, BuildError> {
        let material = obtainable(registry, material, Some(MetaKind::ArmorStand))?;
        let mut stack = ItemStack::new(material.runtime_id, 1);
        stack.meta.armor_stand = Some(ArmorStandFlags::default());
        Ok(Self {
            stack,
            max_stack: material.max_stack,
        })
    }

    pub fn of_armor_stand(registry: &MaterialRegistry) -> Result<Self, BuildError> {
        Self::of_type(registry, "minecraft:armor_stand")
    }

    fn flags(&self) -> ArmorStandFlags {
        self.stack.meta.armor_stand.unwrap_or_default()
    }

    fn update(mut self, f: impl FnOnce(&mut ArmorStandFlags)) -> Self {
        f(self.stack.meta.armor_stand.get_or_insert_with(ArmorStandFlags::default));
        self
    }

    pub fn is_invisible(&self) -> bool {
        self.flags().invisible
    }

    pub fn invisible(self, invisible: bool) -> Self {
        self.update(|f| f.invisible = invisible)
    }

    pub fn is_small(&self) -> bool {
        self.flags().small
    }

    pub fn small(self, small: bool) -> Self {
        self.update(|f| f.small = small)
    }

    pub fn has_arms(&self) -> bool {
        self.flags().show_arms
    }

    pub fn show_arms(self, show_arms: bool) -> Self {
        self.update(|f| f.show_arms = show_arms)
    }

    pub fn has_no_base_plate(&self) -> bool {
        self.flags().no_base_plate
    }

    pub fn no_base_plate(self, no_base_plate: bool) -> Self {
        self.update(|f| f.no_base_plate = no_base_plate)
    }

    pub fn is_marker(&self) -> bool {
        self.flags().marker
    }

    pub fn marker(self, marker: bool) -> Self {
        self.update(|f| f.marker = marker)
    }
}

impl ItemMetaBuilder for ArmorStandBuilder {
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
