//! Fluent builders producing [`ItemStack`]s with typed meta.

use mc_gui_proto::item_stack::{Enchantment, ItemStack};

use crate::error::BuildError;
use crate::material::{Material, MaterialRegistry, MetaKind};

/// Setters shared by every item builder.
pub trait ItemMetaBuilder: Sized {
    fn stack(&self) -> &ItemStack;

    fn stack_mut(&mut self) -> &mut ItemStack;

    fn max_stack(&self) -> u16;

    fn build(self) -> ItemStack;

    fn name(mut self, name: impl Into<String>) -> Self {
        self.stack_mut().meta.display_name = Some(name.into());
        self
    }

    fn clear_name(mut self) -> Self {
        self.stack_mut().meta.display_name = None;
        self
    }

    fn lore(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.stack_mut().meta.lore = lines.into_iter().collect();
        self
    }

    fn add_lore(mut self, line: impl Into<String>) -> Self {
        self.stack_mut().meta.lore.push(line.into());
        self
    }

    /// Stack size, clamped to `1..=max_stack`.
    fn amount(mut self, amount: u16) -> Self {
        let max = self.max_stack();
        self.stack_mut().count = amount.clamp(1, max.max(1));
        self
    }

    fn damage(mut self, damage: u16) -> Self {
        self.stack_mut().metadata = damage;
        self
    }

    /// Add an enchantment, replacing any existing level of the same id.
    fn enchant(mut self, id: i16, level: i16) -> Self {
        let enchantments = &mut self.stack_mut().meta.enchantments;
        match enchantments.iter_mut().find(|e| e.id == id) {
            Some(existing) => existing.level = level,
            None => enchantments.push(Enchantment { id, level }),
        }
        self
    }

    fn remove_enchant(mut self, id: i16) -> Self {
        self.stack_mut().meta.enchantments.retain(|e| e.id != id);
        self
    }

    fn unbreakable(mut self, unbreakable: bool) -> Self {
        self.stack_mut().meta.unbreakable = unbreakable;
        self
    }
}

/// Resolve the material behind an existing stack and check its meta kind.
pub(crate) fn material_of<'r>(
    registry: &'r MaterialRegistry,
    stack: &ItemStack,
    expected: Option<MetaKind>,
) -> Result<&'r Material, BuildError> {
    let material = registry
        .get_by_id(stack.runtime_id)
        .ok_or_else(|| BuildError::UnknownMaterial(format!("runtime id {}", stack.runtime_id)))?;
    check_meta(material, expected)?;
    Ok(material)
}

/// Look up an obtainable material by name and check its meta kind.
pub(crate) fn obtainable<'r>(
    registry: &'r MaterialRegistry,
    name: &str,
    expected: Option<MetaKind>,
) -> Result<&'r Material, BuildError> {
    let material = registry
        .get(name)
        .ok_or_else(|| BuildError::UnknownMaterial(name.to_owned()))?;
    if !material.obtainable {
        return Err(BuildError::NotObtainable(material.name.clone()));
    }
    check_meta(material, expected)?;
    Ok(material)
}

fn check_meta(material: &Material, expected: Option<MetaKind>) -> Result<(), BuildError> {
    match expected {
        Some(kind) if material.meta_kind != kind => Err(BuildError::WrongMeta {
            material: material.name.clone(),
            expected: kind,
        }),
        _ => Ok(()),
    }
}

/// Builder for plain items.
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    stack: ItemStack,
    max_stack: u16,
}

impl ItemBuilder {
    /// Modify a copy of an existing stack.
    pub fn of(registry: &MaterialRegistry, stack: ItemStack) -> Result<Self, BuildError> {
        let max_stack = material_of(registry, &stack, None)?.max_stack;
        Ok(Self { stack, max_stack })
    }

    /// A single item of the named material.
    pub fn of_type(registry: &MaterialRegistry, material: &str) -> Result<Self, BuildError> {
        let material = obtainable(registry, material, None)?;
        Ok(Self {
            stack: ItemStack::new(material.runtime_id, 1),
            max_stack: material.max_stack,
        })
    }
}

impl ItemMetaBuilder for ItemBuilder {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enchantment::enchantment_id;

    fn registry() -> MaterialRegistry {
        MaterialRegistry::builtin().unwrap()
    }

    #[test]
    fn of_type_builds_named_item() {
        let registry = registry();
        let item = ItemBuilder::of_type(&registry, "minecraft:diamond")
            .unwrap()
            .name("Shiny")
            .add_lore("line one")
            .add_lore("line two")
            .amount(10)
            .build();
        assert_eq!(item.runtime_id, registry.get("diamond").unwrap().runtime_id);
        assert_eq!(item.count, 10);
        assert_eq!(item.meta.display_name.as_deref(), Some("Shiny"));
        assert_eq!(item.meta.lore, vec!["line one", "line two"]);
    }

    #[test]
    fn unobtainable_and_unknown_rejected() {
        let registry = registry();
        assert!(matches!(
            ItemBuilder::of_type(&registry, "minecraft:air"),
            Err(BuildError::NotObtainable(_))
        ));
        assert!(matches!(
            ItemBuilder::of_type(&registry, "minecraft:not_an_item"),
            Err(BuildError::UnknownMaterial(_))
        ));
        assert!(ItemBuilder::of(&registry, ItemStack::new(-9999, 1)).is_err());
    }

    #[test]
    fn amount_clamped_to_max_stack() {
        let registry = registry();
        let sword = ItemBuilder::of_type(&registry, "diamond_sword")
            .unwrap()
            .amount(5)
            .build();
        assert_eq!(sword.count, 1);
        let pearls = ItemBuilder::of_type(&registry, "ender_pearl")
            .unwrap()
            .amount(0)
            .build();
        assert_eq!(pearls.count, 1);
    }

    #[test]
    fn enchant_replaces_level() {
        let registry = registry();
        let sword = ItemBuilder::of_type(&registry, "diamond_sword")
            .unwrap()
            .enchant(enchantment_id::SHARPNESS, 2)
            .enchant(enchantment_id::UNBREAKING, 1)
            .enchant(enchantment_id::SHARPNESS, 5)
            .remove_enchant(enchantment_id::UNBREAKING)
            .unbreakable(true)
            .build();
        assert_eq!(
            sword.meta.enchantments,
            vec![Enchantment {
                id: enchantment_id::SHARPNESS,
                level: 5
            }]
        );
        assert!(sword.meta.unbreakable);
    }

    #[test]
    fn of_keeps_existing_meta() {
        let registry = registry();
        let named = ItemBuilder::of_type(&registry, "stone")
            .unwrap()
            .name("Rock")
            .build();
        let renamed = ItemBuilder::of(&registry, named.clone())
            .unwrap()
            .damage(3)
            .build();
        assert_eq!(renamed.meta.display_name.as_deref(), Some("Rock"));
        assert_eq!(renamed.metadata, 3);
        assert_eq!(
            ItemBuilder::of(&registry, named).unwrap().clear_name().build().meta.display_name,
            None
        );
    }
}
