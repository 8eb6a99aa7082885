//! ItemStack type and its `NetworkItemStackDescriptor` encoding.
//!
//! Item meta (display name, lore, enchantments, armor stand flags) is kept
//! typed on the stack and serialized to NBT user data only on the wire.

use bytes::{BufMut, BytesMut};

use crate::codec::ProtoEncode;
use crate::nbt::{self, NbtCompound, NbtTag};
use crate::types::{VarInt, VarUInt32};

/// A single enchantment entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Enchantment {
    /// Bedrock enchantment id.
    pub id: i16,
    pub level: i16,
}

/// Flags carried by an armor stand item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArmorStandFlags {
    pub invisible: bool,
    pub small: bool,
    pub show_arms: bool,
    pub no_base_plate: bool,
    pub marker: bool,
}

/// Typed item meta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemMeta {
    pub display_name: Option<String>,
    pub lore: Vec<String>,
    pub enchantments: Vec<Enchantment>,
    /// Enchantments stored in a book rather than applied to the item.
    pub stored_enchantments: Vec<Enchantment>,
    pub unbreakable: bool,
    pub armor_stand: Option<ArmorStandFlags>,
}

impl ItemMeta {
    /// Whether this meta carries nothing worth sending.
    pub fn is_empty(&self) -> bool {
        *self == ItemMeta::default()
    }

    /// Build the NBT root for this meta.
    pub fn to_nbt(&self) -> NbtCompound {
        let mut root = NbtCompound::new();

        let mut display = NbtCompound::new();
        if let Some(name) = &self.display_name {
            display.insert("Name".into(), NbtTag::String(name.clone()));
        }
        if !self.lore.is_empty() {
            let lore = self.lore.iter().cloned().map(NbtTag::String).collect();
            display.insert("Lore".into(), NbtTag::List(lore));
        }
        if !display.is_empty() {
            root.insert("display".into(), NbtTag::Compound(display));
        }

        if !self.enchantments.is_empty() {
            root.insert("ench".into(), enchantment_list(&self.enchantments));
        }
        if !self.stored_enchantments.is_empty() {
            root.insert(
                "StoredEnchantments".into(),
                enchantment_list(&self.stored_enchantments),
            );
        }
        if self.unbreakable {
            root.insert("Unbreakable".into(), NbtTag::Byte(1));
        }
        if let Some(flags) = &self.armor_stand {
            let mut stand = NbtCompound::new();
            stand.insert("Invisible".into(), NbtTag::Byte(flags.invisible as i8));
            stand.insert("Small".into(), NbtTag::Byte(flags.small as i8));
            stand.insert("ShowArms".into(), NbtTag::Byte(flags.show_arms as i8));
            stand.insert("NoBasePlate".into(), NbtTag::Byte(flags.no_base_plate as i8));
            stand.insert("Marker".into(), NbtTag::Byte(flags.marker as i8));
            root.insert("ArmorStand".into(), NbtTag::Compound(stand));
        }
        root
    }
}

fn enchantment_list(enchantments: &[Enchantment]) -> NbtTag {
    let entries = enchantments
        .iter()
        .map(|e| {
            let mut entry = NbtCompound::new();
            entry.insert("id".into(), NbtTag::Short(e.id));
            entry.insert("lvl".into(), NbtTag::Short(e.level));
            NbtTag::Compound(entry)
        })
        .collect();
    NbtTag::List(entries)
}

/// A single item stack.
///
/// `runtime_id == 0` means air.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    /// Item runtime id. 0 = air/empty.
    pub runtime_id: i32,
    pub count: u16,
    /// Damage/variant.
    pub metadata: u16,
    /// Block runtime id if this item places a block.
    pub block_runtime_id: i32,
    pub meta: ItemMeta,
    /// Server-assigned id for stack tracking. 0 = none.
    pub stack_network_id: i32,
}

impl ItemStack {
    /// An empty slot (air).
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// Create a plain stack with no meta.
    pub fn new(runtime_id: i32, count: u16) -> Self {
        Self {
            runtime_id,
            count,
            metadata: 0,
            block_runtime_id: 0,
            meta: ItemMeta::default(),
            stack_network_id: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runtime_id == 0 || self.count == 0
    }
}

/// Encode an optional slot: `None` goes out as air.
pub fn encode_slot(slot: Option<&ItemStack>, buf: &mut impl BufMut) {
    match slot {
        Some(item) => item.proto_encode(buf),
        None => ItemStack::empty().proto_encode(buf),
    }
}

/// Wire format:
/// ```text
/// VarInt(runtime_id)  (0 = empty, stop)
/// u16_le(count)
/// VarUInt32(metadata)
/// u8(has_stack_id) + optional VarInt(stack_network_id)
/// VarInt(block_runtime_id)
/// VarUInt32(user data marker) + optional u8(version) + LE NBT
/// VarInt(0) can_place_on, VarInt(0) can_destroy
/// ```
impl ProtoEncode for ItemStack {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        if self.is_empty() {
            VarInt(0).proto_encode(buf);
            return;
        }
        VarInt(self.runtime_id).proto_encode(buf);
        buf.put_u16_le(self.count);
        VarUInt32(self.metadata as u32).proto_encode(buf);

        if self.stack_network_id != 0 {
            buf.put_u8(1);
            VarInt(self.stack_network_id).proto_encode(buf);
        } else {
            buf.put_u8(0);
        }

        VarInt(self.block_runtime_id).proto_encode(buf);

        if self.meta.is_empty() {
            VarUInt32(0).proto_encode(buf);
        } else {
            let mut user_data = BytesMut::new();
            nbt::write_root(&mut user_data, &self.meta.to_nbt());
            VarUInt32(0xFFFF_FFFF).proto_encode(buf);
            buf.put_u8(1);
            buf.put_slice(&user_data);
        }

        VarInt(0).proto_encode(buf);
        VarInt(0).proto_encode(buf);
    }
}
