//! Requirement detail sources
//!
//! The scanner asks a `DetailFetcher` for each candidate set's bill of
//! materials. Failures are per set and never abort a scan.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::error::{DetailUnavailable, MalformedInputError, PayloadKind};
use crate::entities::assembly::Assembly;
use crate::entities::part::{DetailPayload, PartRequirement};
use crate::payload::read_payload;

/// Supplies the requirement list of one set
pub trait DetailFetcher {
    fn fetch(&self, assembly: &Assembly) -> Result<Vec<PartRequirement>, DetailUnavailable>;
}

impl<F> DetailFetcher for F
where
    F: Fn(&Assembly) -> Result<Vec<PartRequirement>, DetailUnavailable>,
{
    fn fetch(&self, assembly: &Assembly) -> Result<Vec<PartRequirement>, DetailUnavailable> {
        self(assembly)
    }
}

/// Pre-fetched details keyed by set id
impl DetailFetcher for HashMap<String, Vec<PartRequirement>> {
    fn fetch(&self, assembly: &Assembly) -> Result<Vec<PartRequirement>, DetailUnavailable> {
        self.get(&assembly.id)
            .cloned()
            .ok_or_else(|| DetailUnavailable::new(&assembly.id, "no detail recorded"))
    }
}

/// Extensions tried, in order, when looking up a detail file
const DETAIL_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Reads `<dir>/<set id>.json` (or `.yaml`/`.yml`) detail payloads
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    dir: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the detail file for a set, if one exists
    pub fn detail_path(&self, assembly_id: &str) -> Option<PathBuf> {
        DETAIL_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", assembly_id, ext)))
            .find(|path| path.is_file())
    }
}

impl DetailFetcher for DirectoryFetcher {
    fn fetch(&self, assembly: &Assembly) -> Result<Vec<PartRequirement>, DetailUnavailable> {
        // Ids become file names; refuse anything that could leave the directory.
        if assembly.id.contains(|c: char| c == '/' || c == '\\') || assembly.id.starts_with('.') {
            return Err(DetailUnavailable::new(&assembly.id, "set id is not a valid file name"));
        }

        let path = self.detail_path(&assembly.id).ok_or_else(|| {
            DetailUnavailable::new(
                &assembly.id,
                format!("no detail file in {}", self.dir.display()),
            )
        })?;

        let payload =
            read_payload(&path).map_err(|e| DetailUnavailable::new(&assembly.id, e.to_string()))?;
        parse_detail(&payload).map_err(|e| DetailUnavailable::new(&assembly.id, e.to_string()))
    }
}

/// Parse a raw set detail payload into canonical requirements
pub fn parse_detail(payload: &serde_json::Value) -> Result<Vec<PartRequirement>, MalformedInputError> {
    let kind = PayloadKind::Detail;
    let object = payload
        .as_object()
        .ok_or_else(|| MalformedInputError::invalid(kind, "expected a JSON object"))?;
    if !object.contains_key(kind.required_key()) {
        return Err(MalformedInputError::missing_key(kind));
    }

    let detail: DetailPayload = serde_json::from_value(payload.clone())
        .map_err(|e| MalformedInputError::invalid(kind, e.to_string()))?;
    Ok(detail.into_requirements())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_detail() {
        let payload = json!({"pieces": [{"part": {"designID": "3001", "material": 5}, "quantity": 2}]});
        let reqs = parse_detail(&payload).unwrap();
        assert_eq!(reqs, vec![PartRequirement::new("3001", "5", 2)]);
    }

    #[test]
    fn test_parse_detail_missing_pieces() {
        let err = parse_detail(&json!({"id": "x"})).unwrap_err();
        assert_eq!(err, MalformedInputError::missing_key(PayloadKind::Detail));
    }

    #[test]
    fn test_directory_fetcher_reads_json_and_yaml() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("a.json"),
            r#"{"pieces": [{"part": {"designID": "1", "material": "2"}, "quantity": 3}]}"#,
        )
        .unwrap();
        fs::write(
            tmp.path().join("b.yaml"),
            "pieces:\n  - part:\n      designID: '4'\n      material: 5\n    quantity: 6\n",
        )
        .unwrap();

        let fetcher = DirectoryFetcher::new(tmp.path());
        assert_eq!(
            fetcher.fetch(&Assembly::new("a", "A", 3)).unwrap(),
            vec![PartRequirement::new("1", "2", 3)]
        );
        assert_eq!(
            fetcher.fetch(&Assembly::new("b", "B", 6)).unwrap(),
            vec![PartRequirement::new("4", "5", 6)]
        );
    }

    #[test]
    fn test_directory_fetcher_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = DirectoryFetcher::new(tmp.path())
            .fetch(&Assembly::new("nope", "Nope", 1))
            .unwrap_err();
        assert_eq!(err.assembly_id, "nope");
    }

    #[test]
    fn test_directory_fetcher_rejects_path_ids() {
        let tmp = TempDir::new().unwrap();
        let err = DirectoryFetcher::new(tmp.path())
            .fetch(&Assembly::new("../etc", "Bad", 1))
            .unwrap_err();
        assert!(err.reason.contains("file name"));
    }

    #[test]
    fn test_directory_fetcher_malformed_detail() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bad.json"), r#"{"parts": []}"#).unwrap();
        let err = DirectoryFetcher::new(tmp.path())
            .fetch(&Assembly::new("bad", "Bad", 1))
            .unwrap_err();
        assert!(err.reason.contains("pieces"));
    }

    #[test]
    fn test_map_fetcher() {
        let mut details = HashMap::new();
        details.insert("a".to_string(), vec![PartRequirement::new("1", "1", 1)]);

        assert!(details.fetch(&Assembly::new("a", "A", 1)).is_ok());
        assert!(details.fetch(&Assembly::new("b", "B", 1)).is_err());
    }
}
