//! Core module - the matching engine and its supporting types

pub mod config;
pub mod error;
pub mod fetch;
pub mod inventory;
pub mod matcher;
pub mod prefilter;
pub mod scanner;
pub mod substitution;

pub use config::{Config, ConfigError};
pub use error::{DetailUnavailable, MalformedInputError, PayloadKind};
pub use fetch::{parse_detail, DetailFetcher, DirectoryFetcher};
pub use inventory::{normalize_inventory, DesignStock, InventoryIndex};
pub use matcher::{exact_match, Evaluation, MatchMode, Matcher};
pub use prefilter::{parse_catalog, prefilter, Candidates};
pub use scanner::{
    evaluate_buildability, scan_catalog, scan_catalog_with, BuildableAssembly, MatchResult,
    ScanOptions, SkippedAssembly,
};
pub use substitution::{
    can_build_with_substitutions, substitution_match, Substitution, SubstitutionOutcome,
    SubstitutionPlan, SubstitutionStrategy,
};
