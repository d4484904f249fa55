//! Error types shared by the matching engine

use miette::Diagnostic;
use thiserror::Error;

/// Which external payload a malformed-input error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Inventory,
    Catalog,
    Detail,
}

impl PayloadKind {
    /// Top-level key this payload must carry
    pub fn required_key(&self) -> &'static str {
        match self {
            PayloadKind::Inventory => "collection",
            PayloadKind::Catalog => "Sets",
            PayloadKind::Detail => "pieces",
        }
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadKind::Inventory => write!(f, "inventory"),
            PayloadKind::Catalog => write!(f, "catalog"),
            PayloadKind::Detail => write!(f, "set detail"),
        }
    }
}

/// A raw payload is missing required structure
///
/// Never collapsed into an empty result: an empty inventory and an invalid
/// one must stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum MalformedInputError {
    #[error("malformed {kind} payload: missing top-level key `{key}`")]
    #[diagnostic(
        code(brickyard::malformed::missing_key),
        help("the {kind} payload must be an object with a `{key}` field")
    )]
    MissingKey { kind: PayloadKind, key: &'static str },

    #[error("malformed {kind} payload: {message}")]
    #[diagnostic(code(brickyard::malformed::invalid))]
    Invalid { kind: PayloadKind, message: String },
}

impl MalformedInputError {
    pub fn missing_key(kind: PayloadKind) -> Self {
        MalformedInputError::MissingKey {
            kind,
            key: kind.required_key(),
        }
    }

    pub fn invalid(kind: PayloadKind, message: impl Into<String>) -> Self {
        MalformedInputError::Invalid {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            MalformedInputError::MissingKey { kind, .. } => *kind,
            MalformedInputError::Invalid { kind, .. } => *kind,
        }
    }
}

/// Requirement detail for one set could not be obtained
///
/// The scanner recovers from this by skipping the set.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("detail unavailable for set '{assembly_id}': {reason}")]
#[diagnostic(code(brickyard::detail_unavailable))]
pub struct DetailUnavailable {
    pub assembly_id: String,
    pub reason: String,
}

impl DetailUnavailable {
    pub fn new(assembly_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            assembly_id: assembly_id.into(),
            reason: reason.into(),
        }
    }
}
