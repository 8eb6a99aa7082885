//! Item builders for decorating GUI slots.

pub mod armor_stand;
pub mod enchanted_book;
pub mod enchantment;
pub mod error;
pub mod item;
pub mod material;

pub use armor_stand::ArmorStandBuilder;
pub use enchanted_book::EnchantmentStorageBuilder;
pub use error::BuildError;
pub use item::{ItemBuilder, ItemMetaBuilder};
pub use material::{Material, MaterialRegistry, MetaKind};
