//! Piece-count prefilter
//!
//! Drops sets that need more pieces in total than the inventory holds, so
//! detail is only fetched for sets that could possibly fit.

use std::collections::{BTreeMap, HashMap};

use crate::core::error::{MalformedInputError, PayloadKind};
use crate::entities::assembly::{Assembly, CatalogPayload};

/// Sets that passed the prefilter, in catalog order
#[derive(Debug, Clone, Default)]
pub struct Candidates<'a> {
    assemblies: Vec<&'a Assembly>,
}

impl<'a> Candidates<'a> {
    pub fn len(&self) -> usize {
        self.assemblies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assemblies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Assembly> + '_ {
        self.assemblies.iter().copied()
    }

    /// Set id -> set name for every candidate
    pub fn names(&self) -> BTreeMap<&'a str, &'a str> {
        self.assemblies
            .iter()
            .map(|a| (a.id.as_str(), a.name.as_str()))
            .collect()
    }
}

impl<'a> IntoIterator for Candidates<'a> {
    type Item = &'a Assembly;
    type IntoIter = std::vec::IntoIter<&'a Assembly>;

    fn into_iter(self) -> Self::IntoIter {
        self.assemblies.into_iter()
    }
}

/// Keep every set whose `total_pieces` is at most `owned_total`
///
/// A set id listed twice is kept once, at its first position, with its last
/// fitting listing winning. An empty catalog, or one where nothing fits,
/// yields empty candidates.
pub fn prefilter(catalog: &[Assembly], owned_total: u64) -> Candidates<'_> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut assemblies: Vec<&Assembly> = Vec::new();

    for assembly in catalog.iter().filter(|a| a.total_pieces <= owned_total) {
        match positions.get(assembly.id.as_str()) {
            Some(&pos) => assemblies[pos] = assembly,
            None => {
                positions.insert(assembly.id.as_str(), assemblies.len());
                assemblies.push(assembly);
            }
        }
    }

    tracing::debug!(
        catalog = catalog.len(),
        candidates = assemblies.len(),
        owned_total,
        "prefiltered catalog"
    );
    Candidates { assemblies }
}

/// Parse a raw catalog payload into assemblies without requirement detail
pub fn parse_catalog(payload: &serde_json::Value) -> Result<Vec<Assembly>, MalformedInputError> {
    let kind = PayloadKind::Catalog;
    let object = payload
        .as_object()
        .ok_or_else(|| MalformedInputError::invalid(kind, "expected a JSON object"))?;
    if !object.contains_key(kind.required_key()) {
        return Err(MalformedInputError::missing_key(kind));
    }

    let catalog: CatalogPayload = serde_json::from_value(payload.clone())
        .map_err(|e| MalformedInputError::invalid(kind, e.to_string()))?;
    Ok(catalog.into_assemblies())
}
