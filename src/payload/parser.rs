//! Payload reading - files (or stdin) to engine input

use std::io::Read;
use std::path::Path;

use crate::core::fetch::parse_detail;
use crate::core::inventory::{normalize_inventory, InventoryIndex};
use crate::core::prefilter::parse_catalog;
use crate::entities::assembly::Assembly;
use crate::entities::part::PartRequirement;
use crate::payload::diagnostics::{PayloadError, PayloadSyntaxError};

/// Path that means "read standard input"
pub const STDIN_PATH: &str = "-";

/// Encoding of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Json,
    Yaml,
}

impl PayloadFormat {
    /// `.yaml`/`.yml` are YAML, anything else is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => PayloadFormat::Yaml,
            _ => PayloadFormat::Json,
        }
    }
}

/// Parse payload text into a JSON value with nice error messages
pub fn parse_payload(
    content: &str,
    filename: &str,
    format: PayloadFormat,
) -> Result<serde_json::Value, PayloadError> {
    match format {
        PayloadFormat::Json => serde_json::from_str(content)
            .map_err(|e| PayloadSyntaxError::from_json_error(&e, content, filename).into()),
        PayloadFormat::Yaml => serde_yml::from_str(content)
            .map_err(|e| PayloadSyntaxError::from_yaml_error(&e, content, filename).into()),
    }
}

/// Read and parse a payload file, or stdin when the path is `-`
pub fn read_payload(path: &Path) -> Result<serde_json::Value, PayloadError> {
    let filename = path.display().to_string();
    let io_err = |source| PayloadError::Io {
        path: filename.clone(),
        source,
    };

    let content = if path == Path::new(STDIN_PATH) {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(io_err)?
    };

    parse_payload(&content, &filename, PayloadFormat::from_path(path))
}

/// Read an inventory payload and normalize it
pub fn load_inventory(path: &Path) -> Result<InventoryIndex, PayloadError> {
    let payload = read_payload(path)?;
    Ok(normalize_inventory(&payload)?)
}

/// Read a catalog payload
pub fn load_catalog(path: &Path) -> Result<Vec<Assembly>, PayloadError> {
    let payload = read_payload(path)?;
    Ok(parse_catalog(&payload)?)
}

/// Read a single set detail payload
pub fn load_detail(path: &Path) -> Result<Vec<PartRequirement>, PayloadError> {
    let payload = read_payload(path)?;
    Ok(parse_detail(&payload)?)
}
