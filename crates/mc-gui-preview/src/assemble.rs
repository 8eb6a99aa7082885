//! Turn a [`PreviewConfig`] into a populated GUI and click events.

use mc_gui_builder::enchantment::enchantment_by_name;
use mc_gui_builder::{ItemBuilder, ItemMetaBuilder, MaterialRegistry};
use mc_gui_core::{Area, ClickAction, Component, CompositeGui, GuiKind};
use mc_gui_proto::item_stack::ItemStack;
use tracing::debug;

use crate::config::{ActionKind, ClickEntry, GuiSection, ItemEntry};
use crate::error::PreviewError;

pub fn build_gui(section: &GuiSection, registry: &MaterialRegistry) -> Result<CompositeGui, PreviewError> {
    let kind = section.gui_kind()?;
    let mut gui = CompositeGui::new(kind, section.title.as_str())?;

    for entry in &section.components {
        if kind != GuiKind::Custom {
            return Err(PreviewError::Config(format!(
                "component '{}' can only be added to a custom gui",
                entry.name
            )));
        }
        let mut component = Component::new(entry.width, entry.height)?;
        if entry.rotation != 0 {
            component.set_rotation(entry.rotation)?;
        }
        gui.register_component(entry.name.as_str(), component, entry.order, Area::Top)?;
    }

    for entry in &section.items {
        let item = build_item(entry, registry)?;
        let component = gui.component_mut(&entry.component).ok_or_else(|| {
            PreviewError::Config(format!("no component named '{}'", entry.component))
        })?;
        component.set(entry.row, entry.col, Some(item))?;
        debug!(
            "Placed {} at {}({}, {})",
            entry.material, entry.component, entry.row, entry.col
        );
    }

    if let (Some(cost), Some(anvil)) = (section.repair_cost, gui.anvil_mut()) {
        anvil.set_cost(cost);
    }
    Ok(gui)
}

fn build_item(entry: &ItemEntry, registry: &MaterialRegistry) -> Result<ItemStack, PreviewError> {
    let mut builder = ItemBuilder::of_type(registry, &entry.material)?
        .amount(entry.amount)
        .lore(entry.lore.iter().cloned());
    if let Some(name) = &entry.name {
        builder = builder.name(name.as_str());
    }
    for (name, level) in &entry.enchantments {
        let info = enchantment_by_name(name)
            .ok_or_else(|| PreviewError::Config(format!("unknown enchantment '{name}'")))?;
        builder = builder.enchant(info.id, *level);
    }
    Ok(builder.build())
}

pub fn click_action(click: &ClickEntry, registry: &MaterialRegistry) -> Result<ClickAction, PreviewError> {
    let item = || -> Result<ItemStack, PreviewError> {
        let material = click.material.as_deref().ok_or_else(|| {
            PreviewError::Config(format!("click on slot {} needs a material", click.slot))
        })?;
        Ok(ItemBuilder::of_type(registry, material)?
            .amount(click.amount)
            .build())
    };
    Ok(match click.action {
        ActionKind::Inspect => ClickAction::Inspect,
        ActionKind::Take => ClickAction::Take,
        ActionKind::Place => ClickAction::Place(item()?),
        ActionKind::Swap => ClickAction::Swap(item()?),
    })
}
