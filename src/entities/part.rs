//! Part requirements - one line of a set's bill of materials

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::ident;

/// A single bill-of-materials line in canonical naming
///
/// `design_id` is the shape, `variant` the color. Everything past the
/// payload boundary works with this type only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartRequirement {
    pub design_id: String,
    pub variant: String,
    pub quantity: u32,
}

impl PartRequirement {
    pub fn new(design_id: impl Into<String>, variant: impl Into<String>, quantity: u32) -> Self {
        Self {
            design_id: design_id.into(),
            variant: variant.into(),
            quantity,
        }
    }
}

impl fmt::Display for PartRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}/{}", self.quantity, self.design_id, self.variant)
    }
}

/// Part reference inside a set detail line (`designID` + `material`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRef {
    #[serde(rename = "designID", deserialize_with = "ident::deserialize")]
    pub design_id: String,

    #[serde(deserialize_with = "ident::deserialize")]
    pub material: String,
}

/// One entry of a set detail's `pieces` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceLine {
    pub part: PartRef,
    pub quantity: u32,
}

/// A set detail payload: `{"pieces": [{"part": {...}, "quantity": n}, ...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailPayload {
    pub pieces: Vec<PieceLine>,
}

impl From<PieceLine> for PartRequirement {
    fn from(line: PieceLine) -> Self {
        Self {
            design_id: line.part.design_id,
            variant: line.part.material,
            quantity: line.quantity,
        }
    }
}

impl DetailPayload {
    /// Convert wire lines into canonical requirements, keeping listed order
    pub fn into_requirements(self) -> Vec<PartRequirement> {
        self.pieces.into_iter().map(PartRequirement::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_normalizes_field_names() {
        let json = r#"{
            "id": "6000-1",
            "pieces": [
                {"part": {"designID": "1234", "material": 5, "name": "Brick 2x4"}, "quantity": 2},
                {"part": {"designID": 5678, "material": "3"}, "quantity": 1}
            ]
        }"#;
        let detail: DetailPayload = serde_json::from_str(json).unwrap();
        let reqs = detail.into_requirements();

        assert_eq!(
            reqs,
            vec![
                PartRequirement::new("1234", "5", 2),
                PartRequirement::new("5678", "3", 1),
            ]
        );
    }

    #[test]
    fn test_requirement_display() {
        let req = PartRequirement::new("3001", "21", 4);
        assert_eq!(req.to_string(), "4 x 3001/21");
    }
}
