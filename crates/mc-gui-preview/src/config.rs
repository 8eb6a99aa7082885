use std::path::Path;

use mc_gui_core::GuiKind;
use mc_gui_proto::types::BlockPos;
use serde::Deserialize;

use crate::error::PreviewError;

#[derive(Debug, Deserialize)]
pub struct PreviewConfig {
    #[serde(default)]
    pub logging: LoggingSection,
    pub gui: GuiSection,
    #[serde(default)]
    pub viewer: ViewerSection,
    #[serde(default)]
    pub clicks: Vec<ClickEntry>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GuiSection {
    /// `chest`, `hopper`, `anvil`, ... or `custom`.
    pub kind: String,
    /// Chest rows. Ignored by other kinds.
    #[serde(default = "default_rows")]
    pub rows: u8,
    pub title: String,
    #[serde(default)]
    pub position: BlockPos,
    /// Anvil repair cost shown on open.
    #[serde(default)]
    pub repair_cost: Option<i32>,
    #[serde(default)]
    pub components: Vec<ComponentEntry>,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

fn default_rows() -> u8 {
    3
}

/// Extra top component for `custom` GUIs.
#[derive(Debug, Deserialize)]
pub struct ComponentEntry {
    pub name: String,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub rotation: i32,
}

#[derive(Debug, Deserialize)]
pub struct ItemEntry {
    pub component: String,
    pub row: usize,
    pub col: usize,
    pub material: String,
    #[serde(default = "default_amount")]
    pub amount: u16,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub lore: Vec<String>,
    /// Enchantment names with levels, e.g. `{ sharpness = 5 }`.
    #[serde(default)]
    pub enchantments: std::collections::BTreeMap<String, i16>,
}

fn default_amount() -> u16 {
    1
}

#[derive(Debug, Deserialize)]
pub struct ViewerSection {
    #[serde(default = "default_viewer_id")]
    pub id: u64,
}

fn default_viewer_id() -> u64 {
    1
}

impl Default for ViewerSection {
    fn default() -> Self {
        Self {
            id: default_viewer_id(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    #[default]
    Inspect,
    Take,
    Place,
    Swap,
}

#[derive(Debug, Deserialize)]
pub struct ClickEntry {
    /// Raw slot; -999 clicks outside the window.
    pub slot: i32,
    #[serde(default)]
    pub action: ActionKind,
    /// Item carried by `place` and `swap`.
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default = "default_amount")]
    pub amount: u16,
}

impl PreviewConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PreviewError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}

impl GuiSection {
    pub fn gui_kind(&self) -> Result<GuiKind, PreviewError> {
        let kind = match self.kind.as_str() {
            "chest" => GuiKind::Chest { rows: self.rows },
            "hopper" => GuiKind::Hopper,
            "dispenser" => GuiKind::Dispenser,
            "dropper" => GuiKind::Dropper,
            "furnace" => GuiKind::Furnace,
            "blast_furnace" => GuiKind::BlastFurnace,
            "smoker" => GuiKind::Smoker,
            "grindstone" => GuiKind::Grindstone,
            "anvil" => GuiKind::Anvil,
            "cartography_table" => GuiKind::CartographyTable,
            "enchanting_table" => GuiKind::EnchantingTable,
            "crafter" => GuiKind::Crafter,
            "custom" => GuiKind::Custom,
            other => return Err(PreviewError::Config(format!("unknown gui kind '{other}'"))),
        };
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let toml_str = r#"
            [logging]
            level = "debug"

            [gui]
            kind = "grindstone"
            title = "Repair"
            position = { x = 1, y = 64, z = -3 }

            [[gui.items]]
            component = "items"
            row = 1
            col = 0
            material = "diamond_sword"
            name = "Old blade"
            enchantments = { sharpness = 3 }

            [[clicks]]
            slot = 2
            action = "place"
            material = "stone"
            amount = 4

            [[clicks]]
            slot = -999
        "#;
        let config: PreviewConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.gui.gui_kind().unwrap(), GuiKind::Grindstone);
        assert_eq!(config.gui.position, BlockPos::new(1, 64, -3));
        assert_eq!(config.gui.items[0].enchantments.get("sharpness"), Some(&3));
        assert_eq!(config.gui.items[0].amount, 1);
        assert_eq!(config.clicks[0].action, ActionKind::Place);
        assert_eq!(config.clicks[1].action, ActionKind::Inspect);
        assert_eq!(config.viewer.id, 1);
    }

    #[test]
    fn defaults_apply() {
        let config: PreviewConfig = toml::from_str(
            r#"
            [gui]
            kind = "chest"
            title = "Chest"
            "#,
        )
        .unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.gui.gui_kind().unwrap(), GuiKind::Chest { rows: 3 });
        assert!(config.clicks.is_empty());
        assert_eq!(config.gui.repair_cost, None);
    }

    #[test]
    fn unknown_kind_rejected() {
        let config: PreviewConfig = toml::from_str(
            r#"
            [gui]
            kind = "loom"
            title = "Loom"
            "#,
        )
        .unwrap();
        assert!(matches!(config.gui.gui_kind(), Err(PreviewError::Config(_))));
    }
}
