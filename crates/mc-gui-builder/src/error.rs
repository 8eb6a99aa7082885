use thiserror::Error;

use crate::material::MetaKind;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    #[error("material {0} cannot be held as an item")]
    NotObtainable(String),

    #[error("{material} does not carry {expected:?} meta")]
    WrongMeta { material: String, expected: MetaKind },

    #[error("invalid material table: {0}")]
    Table(#[from] serde_json::Error),
}
