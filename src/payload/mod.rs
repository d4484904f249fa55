//! Payload parsing and error handling

pub mod diagnostics;
pub mod parser;

pub use diagnostics::{PayloadError, PayloadSyntaxError};
pub use parser::{
    load_catalog, load_detail, load_inventory, parse_payload, read_payload, PayloadFormat,
};
