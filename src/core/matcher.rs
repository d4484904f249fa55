//! Buildability checks - exact matching and the mode switch over both matchers

use serde::{Deserialize, Serialize};

use crate::core::inventory::InventoryIndex;
use crate::core::substitution::{substitution_match, SubstitutionOutcome, SubstitutionStrategy};
use crate::entities::part::PartRequirement;

/// Which question is being asked of a set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum MatchMode {
    /// Buildable with exactly the owned parts
    #[default]
    Strict,
    /// Not buildable exactly, but buildable once colors are swapped
    #[serde(alias = "substitution-tolerant")]
    Substitution,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Strict => write!(f, "strict"),
            MatchMode::Substitution => write!(f, "substitution"),
        }
    }
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" | "exact" => Ok(MatchMode::Strict),
            "substitution" | "substitution-tolerant" | "flexible" => Ok(MatchMode::Substitution),
            _ => Err(format!(
                "Invalid match mode: {}. Use 'strict' or 'substitution'",
                s
            )),
        }
    }
}

/// Check whether the inventory covers every requirement with no substitution
///
/// Requirements are checked in listed order and the first shortfall ends the
/// check. An empty inventory never matches, not even an empty requirement
/// list. Zero-quantity requirements are always satisfied.
pub fn exact_match(index: &InventoryIndex, requirements: &[PartRequirement]) -> bool {
    if index.is_empty() {
        return false;
    }

    requirements
        .iter()
        .filter(|req| req.quantity > 0)
        .all(|req| {
            index
                .count(&req.design_id, &req.variant)
                .is_some_and(|owned| owned >= req.quantity)
        })
}

/// Result of evaluating one set
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub buildable: bool,
    /// Present in substitution mode only
    pub substitution: Option<SubstitutionOutcome>,
}

/// A configured buildability check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Matcher {
    pub mode: MatchMode,
    pub strategy: SubstitutionStrategy,
}

impl Matcher {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            strategy: SubstitutionStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: SubstitutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn is_buildable(&self, index: &InventoryIndex, requirements: &[PartRequirement]) -> bool {
        match self.mode {
            MatchMode::Strict => exact_match(index, requirements),
            MatchMode::Substitution => {
                substitution_match(index, requirements, self.strategy).buildable
            }
        }
    }

    /// Like `is_buildable`, keeping the substitution plan for reporting
    pub fn evaluate(&self, index: &InventoryIndex, requirements: &[PartRequirement]) -> Evaluation {
        match self.mode {
            MatchMode::Strict => Evaluation {
                buildable: exact_match(index, requirements),
                substitution: None,
            },
            MatchMode::Substitution => {
                let outcome = substitution_match(index, requirements, self.strategy);
                Evaluation {
                    buildable: outcome.buildable,
                    substitution: Some(outcome),
                }
            }
        }
    }
}
