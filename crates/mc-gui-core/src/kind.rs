//! Built-in GUI kinds and the component layout each one registers.

use std::fmt;

use crate::error::GuiError;

/// Name of the bottom component every kind registers.
pub const PLAYER_INVENTORY: &str = "player";

/// Placement order given to the player inventory component.
pub const PLAYER_INVENTORY_ORDER: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuiKind {
    /// 9 columns by 1..=6 rows.
    Chest { rows: u8 },
    Hopper,
    Dispenser,
    Dropper,
    Furnace,
    BlastFurnace,
    Smoker,
    Grindstone,
    Anvil,
    CartographyTable,
    EnchantingTable,
    Crafter,
    /// No pre-registered top components.
    Custom,
}

/// One top component of a kind's layout: name, width, height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    pub name: &'static str,
    pub width: usize,
    pub height: usize,
}

const fn entry(name: &'static str, width: usize, height: usize) -> LayoutEntry {
    LayoutEntry {
        name,
        width,
        height,
    }
}

const FURNACE_LAYOUT: &[LayoutEntry] = &[
    entry("ingredient", 1, 1),
    entry("fuel", 1, 1),
    entry("output", 1, 1),
];

impl GuiKind {
    pub fn validate(&self) -> Result<(), GuiError> {
        match self {
            GuiKind::Chest { rows } if !(1..=6).contains(rows) => Err(GuiError::InvalidArgument(
                format!("chest rows must be within 1..=6, got {rows}"),
            )),
            _ => Ok(()),
        }
    }

    /// Top components in placement order.
    pub fn layout(&self) -> Vec<LayoutEntry> {
        match self {
            GuiKind::Chest { rows } => vec![entry("items", 9, *rows as usize)],
            GuiKind::Hopper => vec![entry("items", 5, 1)],
            GuiKind::Dispenser | GuiKind::Dropper => vec![entry("items", 3, 3)],
            GuiKind::Furnace | GuiKind::BlastFurnace | GuiKind::Smoker => FURNACE_LAYOUT.to_vec(),
            GuiKind::Grindstone => vec![entry("items", 1, 2), entry("result", 1, 1)],
            GuiKind::Anvil => vec![
                entry("first", 1, 1),
                entry("second", 1, 1),
                entry("result", 1, 1),
            ],
            GuiKind::CartographyTable => vec![
                entry("map", 1, 1),
                entry("paper", 1, 1),
                entry("output", 1, 1),
            ],
            GuiKind::EnchantingTable => vec![entry("input", 2, 1)],
            GuiKind::Crafter => vec![entry("input", 3, 3)],
            GuiKind::Custom => Vec::new(),
        }
    }

    /// Slots in the container window.
    pub fn top_size(&self) -> usize {
        self.layout().iter().map(|e| e.width * e.height).sum()
    }

    /// Kinds whose host container logic must be bypassed: the backend opens
    /// its own container and pushes slot contents by hand.
    pub fn requires_custom_container(&self) -> bool {
        matches!(
            self,
            GuiKind::Anvil
                | GuiKind::Grindstone
                | GuiKind::CartographyTable
                | GuiKind::EnchantingTable
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            GuiKind::Chest { .. } => "chest",
            GuiKind::Hopper => "hopper",
            GuiKind::Dispenser => "dispenser",
            GuiKind::Dropper => "dropper",
            GuiKind::Furnace => "furnace",
            GuiKind::BlastFurnace => "blast_furnace",
            GuiKind::Smoker => "smoker",
            GuiKind::Grindstone => "grindstone",
            GuiKind::Anvil => "anvil",
            GuiKind::CartographyTable => "cartography_table",
            GuiKind::EnchantingTable => "enchanting_table",
            GuiKind::Crafter => "crafter",
            GuiKind::Custom => "custom",
        }
    }
}

impl fmt::Display for GuiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuiKind::Chest { rows } => write!(f, "chest({rows})"),
            other => f.write_str(other.name()),
        }
    }
}
