//! Inventory normalization - raw collection payload to an indexed lookup
//!
//! The index maps design id -> variant -> owned count. Designs and variants
//! keep the order they were listed in, since substitute selection scans
//! variants in that order.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

use crate::core::error::{MalformedInputError, PayloadKind};
use crate::entities::inventory::{RawInventory, RawPiece, RawVariant};

/// Owned variants of a single design, in listing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignStock {
    variants: Vec<(String, u32)>,
}

impl DesignStock {
    /// Owned count of a variant, if the variant is listed at all
    pub fn get(&self, variant: &str) -> Option<u32> {
        self.variants
            .iter()
            .find(|(v, _)| v == variant)
            .map(|(_, count)| *count)
    }

    pub fn contains(&self, variant: &str) -> bool {
        self.get(variant).is_some()
    }

    /// Variants with counts, in listing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.variants.iter().map(|(v, count)| (v.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.variants.iter().map(|(_, count)| u64::from(*count)).sum()
    }

    /// Set a count; a repeated variant overwrites in place
    fn set(&mut self, variant: String, count: u32) {
        match self.variants.iter_mut().find(|(v, _)| *v == variant) {
            Some(slot) => slot.1 = count,
            None => self.variants.push((variant, count)),
        }
    }
}

/// Read-only lookup of owned parts: design -> variant -> count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryIndex {
    designs: Vec<(String, DesignStock)>,
    positions: HashMap<String, usize>,
}

impl InventoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from an already-parsed collection
    ///
    /// A variant repeated under one design keeps the last count. A design
    /// listed twice is replaced wholesale by its later listing.
    pub fn from_raw(raw: &RawInventory) -> Self {
        let mut index = Self::new();
        for piece in &raw.collection {
            let mut stock = DesignStock::default();
            for variant in &piece.variants {
                stock.set(variant.variant.clone(), variant.count);
            }
            index.replace_design(piece.design_id.clone(), stock);
        }
        index
    }

    /// Build an index from `(design, [(variant, count)])` pairs
    pub fn from_designs<D, V, S1, S2>(designs: D) -> Self
    where
        D: IntoIterator<Item = (S1, V)>,
        V: IntoIterator<Item = (S2, u32)>,
        S1: Into<String>,
        S2: Into<String>,
    {
        let raw = RawInventory {
            collection: designs
                .into_iter()
                .map(|(design, variants)| {
                    RawPiece::new(
                        design,
                        variants
                            .into_iter()
                            .map(|(variant, count)| RawVariant::new(variant, count))
                            .collect(),
                    )
                })
                .collect(),
        };
        Self::from_raw(&raw)
    }

    fn replace_design(&mut self, design_id: String, stock: DesignStock) {
        match self.positions.get(&design_id) {
            Some(&pos) => self.designs[pos].1 = stock,
            None => {
                self.positions.insert(design_id.clone(), self.designs.len());
                self.designs.push((design_id, stock));
            }
        }
    }

    /// Re-express the index as a raw collection payload
    pub fn to_raw(&self) -> RawInventory {
        RawInventory {
            collection: self
                .designs
                .iter()
                .map(|(design, stock)| {
                    RawPiece::new(
                        design.clone(),
                        stock
                            .iter()
                            .map(|(variant, count)| RawVariant::new(variant, count))
                            .collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn design(&self, design_id: &str) -> Option<&DesignStock> {
        self.positions
            .get(design_id)
            .map(|&pos| &self.designs[pos].1)
    }

    pub fn count(&self, design_id: &str, variant: &str) -> Option<u32> {
        self.design(design_id).and_then(|stock| stock.get(variant))
    }

    /// Designs with their stock, in listing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DesignStock)> {
        self.designs.iter().map(|(d, stock)| (d.as_str(), stock))
    }

    /// Number of distinct designs
    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    /// Sum of all counts across all designs and variants
    pub fn total_pieces(&self) -> u64 {
        self.designs.iter().map(|(_, stock)| stock.total()).sum()
    }
}

/// Normalize a raw inventory payload into an index
///
/// `{"collection": []}` is a valid, empty inventory. A payload without the
/// `collection` key is an error.
pub fn normalize_inventory(payload: &serde_json::Value) -> Result<InventoryIndex, MalformedInputError> {
    let kind = PayloadKind::Inventory;
    let object = payload
        .as_object()
        .ok_or_else(|| MalformedInputError::invalid(kind, "expected a JSON object"))?;
    if !object.contains_key(kind.required_key()) {
        return Err(MalformedInputError::missing_key(kind));
    }

    let raw: RawInventory = serde_json::from_value(payload.clone())
        .map_err(|e| MalformedInputError::invalid(kind, e.to_string()))?;

    let index = InventoryIndex::from_raw(&raw);
    tracing::debug!(
        designs = index.len(),
        pieces = index.total_pieces(),
        "normalized inventory"
    );
    Ok(index)
}

impl Serialize for DesignStock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.variants.len()))?;
        for (variant, count) in &self.variants {
            map.serialize_entry(variant, count)?;
        }
        map.end()
    }
}

impl Serialize for InventoryIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.designs.len()))?;
        for (design, stock) in &self.designs {
            map.serialize_entry(design, stock)?;
        }
        map.end()
    }
}
