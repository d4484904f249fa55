//! Assembly (set) entity type - a buildable set and its bill of materials

use serde::{Deserialize, Serialize};

use crate::entities::ident;
use crate::entities::part::PartRequirement;

/// A catalog listing as delivered by the catalog source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(deserialize_with = "ident::deserialize")]
    pub id: String,

    pub name: String,

    #[serde(rename = "totalPieces")]
    pub total_pieces: u64,
}

/// The catalog payload: `{"Sets": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPayload {
    #[serde(rename = "Sets")]
    pub sets: Vec<CatalogEntry>,
}

/// A set that could be built from parts
///
/// `requirements` stays `None` until detail has been fetched; only sets that
/// survive the prefilter ever get loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    pub id: String,

    pub name: String,

    pub total_pieces: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<PartRequirement>>,
}

impl Assembly {
    /// Create an assembly without requirement detail
    pub fn new(id: impl Into<String>, name: impl Into<String>, total_pieces: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_pieces,
            requirements: None,
        }
    }

    pub fn with_requirements(mut self, requirements: Vec<PartRequirement>) -> Self {
        self.requirements = Some(requirements);
        self
    }

    /// Requirement detail, if it has been loaded
    pub fn requirements(&self) -> Option<&[PartRequirement]> {
        self.requirements.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.requirements.is_some()
    }
}

impl From<CatalogEntry> for Assembly {
    fn from(entry: CatalogEntry) -> Self {
        Self::new(entry.id, entry.name, entry.total_pieces)
    }
}

impl CatalogPayload {
    pub fn into_assemblies(self) -> Vec<Assembly> {
        self.sets.into_iter().map(Assembly::from).collect()
    }
}
