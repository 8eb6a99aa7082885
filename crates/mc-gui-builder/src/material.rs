//! Material registry mapping namespaced item names to runtime ids and
//! builder-relevant properties.
//!
//! The built-in table covers the items GUIs typically decorate with.
//! Hosts add their own entries through [`MaterialRegistry::register`].

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::BuildError;

const MATERIALS_JSON: &str = include_str!("../data/materials.json");

/// Which specialised meta an item carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaKind {
    #[default]
    Plain,
    ArmorStand,
    EnchantedBook,
}

#[derive(Deserialize)]
struct RawMaterial {
    runtime_id: i32,
    #[serde(default)]
    max_stack: Option<u16>,
    #[serde(default)]
    meta: MetaKind,
    #[serde(default = "default_obtainable")]
    obtainable: bool,
}

fn default_obtainable() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    /// Namespaced identifier, e.g. `"minecraft:stone"`.
    pub name: String,
    pub runtime_id: i32,
    pub max_stack: u16,
    pub meta_kind: MetaKind,
    /// Whether an item of this material can exist in an inventory.
    pub obtainable: bool,
}

#[derive(Debug, Clone)]
pub struct MaterialRegistry {
    by_name: HashMap<String, Material>,
    by_id: HashMap<i32, String>,
}

impl MaterialRegistry {
    /// Registry loaded from the built-in material table.
    pub fn builtin() -> Result<Self, BuildError> {
        Self::from_json(MATERIALS_JSON)
    }

    /// Parse a `{ "name": { "runtime_id": .. } }` table.
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let raw: HashMap<String, RawMaterial> = serde_json::from_str(json)?;
        let mut registry = Self {
            by_name: HashMap::with_capacity(raw.len()),
            by_id: HashMap::with_capacity(raw.len()),
        };
        for (name, entry) in raw {
            let max_stack = entry.max_stack.unwrap_or_else(|| max_stack_size_for(&name));
            registry.register(Material {
                name,
                runtime_id: entry.runtime_id,
                max_stack,
                meta_kind: entry.meta,
                obtainable: entry.obtainable,
            });
        }
        debug!("Loaded {} materials", registry.len());
        Ok(registry)
    }

    /// Add or replace a material.
    pub fn register(&mut self, material: Material) {
        if let Some(old) = self.by_name.get(&material.name) {
            self.by_id.remove(&old.runtime_id);
        }
        self.by_id.insert(material.runtime_id, material.name.clone());
        self.by_name.insert(material.name.clone(), material);
    }

    /// Look up by namespaced name. A bare name gets the `minecraft:` prefix.
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.by_name.get(name).or_else(|| {
            if name.contains(':') {
                None
            } else {
                self.by_name.get(&format!("minecraft:{name}"))
            }
        })
    }

    pub fn get_by_id(&self, runtime_id: i32) -> Option<&Material> {
        self.by_id
            .get(&runtime_id)
            .and_then(|name| self.by_name.get(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Stack size by name pattern. Anything not listed stacks to 64.
fn max_stack_size_for(name: &str) -> u16 {
    let short = name.strip_prefix("minecraft:").unwrap_or(name);

    if short.ends_with("_sword")
        || short.ends_with("_pickaxe")
        || short.ends_with("_axe")
        || short.ends_with("_shovel")
        || short.ends_with("_hoe")
        || short.ends_with("_helmet")
        || short.ends_with("_chestplate")
        || short.ends_with("_leggings")
        || short.ends_with("_boots")
    {
        return 1;
    }
    if matches!(short, "bow" | "crossbow" | "shield" | "enchanted_book" | "filled_map") {
        return 1;
    }
    if short.ends_with("_sign") || matches!(short, "ender_pearl" | "snowball" | "egg" | "armor_stand") {
        return 16;
    }
    64
}
