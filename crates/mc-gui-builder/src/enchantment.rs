//! Bedrock enchantment ids and their maximum levels.

/// Well-known Bedrock enchantment ids.
pub mod enchantment_id {
    pub const PROTECTION: i16 = 0;
    pub const FIRE_PROTECTION: i16 = 1;
    pub const FEATHER_FALLING: i16 = 2;
    pub const BLAST_PROTECTION: i16 = 3;
    pub const PROJECTILE_PROTECTION: i16 = 4;
    pub const THORNS: i16 = 5;
    pub const RESPIRATION: i16 = 6;
    pub const DEPTH_STRIDER: i16 = 7;
    pub const AQUA_AFFINITY: i16 = 8;
    pub const SHARPNESS: i16 = 9;
    pub const SMITE: i16 = 10;
    pub const BANE_OF_ARTHROPODS: i16 = 11;
    pub const KNOCKBACK: i16 = 12;
    pub const FIRE_ASPECT: i16 = 13;
    pub const LOOTING: i16 = 14;
    pub const EFFICIENCY: i16 = 15;
    pub const SILK_TOUCH: i16 = 16;
    pub const UNBREAKING: i16 = 17;
    pub const FORTUNE: i16 = 18;
    pub const POWER: i16 = 19;
    pub const PUNCH: i16 = 20;
    pub const FLAME: i16 = 21;
    pub const INFINITY: i16 = 22;
    pub const LUCK_OF_THE_SEA: i16 = 23;
    pub const LURE: i16 = 24;
    pub const FROST_WALKER: i16 = 25;
    pub const MENDING: i16 = 26;
    pub const BINDING_CURSE: i16 = 27;
    pub const VANISHING_CURSE: i16 = 28;
    pub const IMPALING: i16 = 29;
    pub const RIPTIDE: i16 = 30;
    pub const LOYALTY: i16 = 31;
    pub const CHANNELING: i16 = 32;
    pub const MULTISHOT: i16 = 33;
    pub const PIERCING: i16 = 34;
    pub const QUICK_CHARGE: i16 = 35;
    pub const SOUL_SPEED: i16 = 36;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnchantmentInfo {
    pub id: i16,
    pub name: &'static str,
    pub max_level: i16,
}

const fn info(id: i16, name: &'static str, max_level: i16) -> EnchantmentInfo {
    EnchantmentInfo {
        id,
        name,
        max_level,
    }
}

pub const ENCHANTMENT_LIST: &[EnchantmentInfo] = &[
    info(0, "protection", 4),
    info(1, "fire_protection", 4),
    info(2, "feather_falling", 4),
    info(3, "blast_protection", 4),
    info(4, "projectile_protection", 4),
    info(5, "thorns", 3),
    info(6, "respiration", 3),
    info(7, "depth_strider", 3),
    info(8, "aqua_affinity", 1),
    info(9, "sharpness", 5),
    info(10, "smite", 5),
    info(11, "bane_of_arthropods", 5),
    info(12, "knockback", 2),
    info(13, "fire_aspect", 2),
    info(14, "looting", 3),
    info(15, "efficiency", 5),
    info(16, "silk_touch", 1),
    info(17, "unbreaking", 3),
    info(18, "fortune", 3),
    info(19, "power", 5),
    info(20, "punch", 2),
    info(21, "flame", 1),
    info(22, "infinity", 1),
    info(23, "luck_of_the_sea", 3),
    info(24, "lure", 3),
    info(25, "frost_walker", 2),
    info(26, "mending", 1),
    info(27, "binding_curse", 1),
    info(28, "vanishing_curse", 1),
    info(29, "impaling", 5),
    info(30, "riptide", 3),
    info(31, "loyalty", 3),
    info(32, "channeling", 1),
    info(33, "multishot", 1),
    info(34, "piercing", 4),
    info(35, "quick_charge", 3),
    info(36, "soul_speed", 3),
];

pub fn enchantment_by_id(id: i16) -> Option<&'static EnchantmentInfo> {
    ENCHANTMENT_LIST.iter().find(|e| e.id == id)
}

/// Accepts both `"sharpness"` and `"minecraft:sharpness"`.
pub fn enchantment_by_name(name: &str) -> Option<&'static EnchantmentInfo> {
    let short = name.strip_prefix("minecraft:").unwrap_or(name);
    ENCHANTMENT_LIST.iter().find(|e| e.name == short)
}
