//! Raw inventory payload - a user's collection as delivered by the inventory source

use serde::{Deserialize, Serialize};

use crate::entities::ident;

/// One owned color of a piece and how many of it are owned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVariant {
    /// Color id (`color` on the wire)
    #[serde(rename = "color", deserialize_with = "ident::deserialize")]
    pub variant: String,

    /// Owned count
    pub count: u32,
}

/// One owned piece design with all its owned colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPiece {
    /// Design id (`pieceId` on the wire)
    #[serde(rename = "pieceId", deserialize_with = "ident::deserialize")]
    pub design_id: String,

    pub variants: Vec<RawVariant>,
}

/// The full collection payload: `{"collection": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInventory {
    pub collection: Vec<RawPiece>,
}

impl RawPiece {
    pub fn new(design_id: impl Into<String>, variants: Vec<RawVariant>) -> Self {
        Self {
            design_id: design_id.into(),
            variants,
        }
    }
}

impl RawVariant {
    pub fn new(variant: impl Into<String>, count: u32) -> Self {
        Self {
            variant: variant.into(),
            count,
        }
    }
}
