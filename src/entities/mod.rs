//! Entity type definitions and their wire formats

pub mod assembly;
pub mod ident;
pub mod inventory;
pub mod part;

pub use assembly::{Assembly, CatalogEntry, CatalogPayload};
pub use inventory::{RawInventory, RawPiece, RawVariant};
pub use part::{DetailPayload, PartRef, PartRequirement, PieceLine};
