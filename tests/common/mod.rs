//! Shared test helpers for integration tests
//!
//! Builds a small on-disk fixture: an inventory, a catalog and a directory
//! of set details, laid out the way `brickyard scan` expects them.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to get a brickyard command
///
/// Points `BRICKYARD_CONFIG` at a missing file so a developer's own config
/// never leaks into test runs.
pub fn brickyard() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("brickyard"));
    cmd.env("BRICKYARD_CONFIG", "/nonexistent/brickyard.yaml");
    cmd.env("XDG_CONFIG_HOME", "/nonexistent/xdg");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a JSON payload into `dir` and return its path
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

/// A detail payload from `(design, color, quantity)` lines
pub fn detail(lines: &[(&str, &str, u32)]) -> Value {
    let pieces: Vec<Value> = lines
        .iter()
        .map(|(design, color, qty)| {
            json!({"part": {"designID": design, "material": color}, "quantity": qty})
        })
        .collect();
    json!({ "pieces": pieces })
}

/// Inventory with 26 pieces: design 3001 in colors 5 and 4, design 3002 in 3 and 2
pub fn sample_inventory() -> Value {
    json!({
        "collection": [
            {"pieceId": "3001", "variants": [{"color": "5", "count": 5}, {"color": "4", "count": 10}]},
            {"pieceId": "3002", "variants": [{"color": "3", "count": 3}, {"color": "2", "count": 8}]}
        ]
    })
}

/// Catalog of five sets; `3000-1` is too big and `4000-1` has no detail file
pub fn sample_catalog() -> Value {
    json!({
        "Sets": [
            {"id": "1000-1", "name": "Exact Fit", "totalPieces": 3},
            {"id": "2000-1", "name": "Needs Swap", "totalPieces": 4},
            {"id": "3000-1", "name": "Too Big", "totalPieces": 500},
            {"id": "4000-1", "name": "Missing Detail", "totalPieces": 2},
            {"id": "5000-1", "name": "Unknown Part", "totalPieces": 1}
        ]
    })
}

/// On-disk fixture with inventory, catalog and details directory
pub struct Fixture {
    pub tmp: TempDir,
    pub inventory: PathBuf,
    pub catalog: PathBuf,
    pub details: PathBuf,
}

impl Fixture {
    pub fn path(&self) -> &Path {
        self.tmp.path()
    }
}

/// Helper to create the standard scan fixture in a temp directory
pub fn setup_fixture() -> Fixture {
    let tmp = TempDir::new().unwrap();
    let inventory = write_json(tmp.path(), "inventory.json", &sample_inventory());
    let catalog = write_json(tmp.path(), "catalog.json", &sample_catalog());

    let details = tmp.path().join("details");
    fs::create_dir(&details).unwrap();
    write_json(&details, "1000-1.json", &detail(&[("3001", "5", 2), ("3002", "3", 1)]));
    write_json(&details, "2000-1.json", &detail(&[("3001", "9", 4)]));
    write_json(&details, "3000-1.json", &detail(&[("3001", "5", 500)]));
    write_json(&details, "5000-1.json", &detail(&[("9999", "1", 1)]));

    Fixture {
        tmp,
        inventory,
        catalog,
        details,
    }
}
