//! Color substitution matching
//!
//! Answers "buildable only if some colors are swapped". A set that already
//! matches exactly is reported as not needing (and so not getting) a
//! substitution.
//!
//! Allocation is greedy: the first owned variant that is unclaimed and has
//! enough pieces gets taken, and a claim is never given back. Some sets an
//! optimal assignment could build are therefore reported unbuildable.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::core::inventory::{DesignStock, InventoryIndex};
use crate::core::matcher::exact_match;
use crate::entities::part::PartRequirement;

/// How substitutes are allocated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[derive(Default)]
pub enum SubstitutionStrategy {
    /// First pass until something cannot be placed, then a second pass over
    /// every requirement not yet in the plan. Claims are keyed by variant
    /// alone and a direct match only needs the variant to be listed.
    #[default]
    TwoPhase,
    /// Every requirement visited once: direct match or substitute, never
    /// revisited. A direct match is checked against the pieces already taken
    /// of that color. Claims are scoped per design.
    SinglePass,
}

impl SubstitutionStrategy {
    fn scope(&self) -> ClaimScope {
        match self {
            SubstitutionStrategy::TwoPhase => ClaimScope::Shared,
            SubstitutionStrategy::SinglePass => ClaimScope::PerDesign,
        }
    }
}

impl std::fmt::Display for SubstitutionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubstitutionStrategy::TwoPhase => write!(f, "two-phase"),
            SubstitutionStrategy::SinglePass => write!(f, "single-pass"),
        }
    }
}

impl std::str::FromStr for SubstitutionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "two-phase" | "two_phase" | "legacy" => Ok(SubstitutionStrategy::TwoPhase),
            "single-pass" | "single_pass" => Ok(SubstitutionStrategy::SinglePass),
            _ => Err(format!(
                "Invalid substitution strategy: {}. Use 'two-phase' or 'single-pass'",
                s
            )),
        }
    }
}

/// Whether a claimed variant blocks that color for every design or only its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClaimScope {
    Shared,
    PerDesign,
}

/// One required variant replaced by an owned one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub design_id: String,
    pub required: String,
    pub substitute: String,
    pub quantity: u32,
}

/// Substitutions chosen while evaluating one set, plus every variant claimed
///
/// Built fresh for each evaluation and never shared between sets.
#[derive(Debug, Clone)]
pub struct SubstitutionPlan {
    scope: ClaimScope,
    substitutions: Vec<Substitution>,
    used: HashSet<(String, String)>,
}

impl SubstitutionPlan {
    fn new(scope: ClaimScope) -> Self {
        Self {
            scope,
            substitutions: Vec::new(),
            used: HashSet::new(),
        }
    }

    fn claim_key(&self, design_id: &str, variant: &str) -> (String, String) {
        match self.scope {
            ClaimScope::Shared => (String::new(), variant.to_string()),
            ClaimScope::PerDesign => (design_id.to_string(), variant.to_string()),
        }
    }

    /// Whether `variant` has already been claimed (for `design_id`, when claims are per design)
    pub fn is_used(&self, design_id: &str, variant: &str) -> bool {
        self.used.contains(&self.claim_key(design_id, variant))
    }

    fn mark_used(&mut self, design_id: &str, variant: &str) {
        let key = self.claim_key(design_id, variant);
        self.used.insert(key);
    }

    fn commit(&mut self, req: &PartRequirement, substitute: &str) {
        self.mark_used(&req.design_id, substitute);
        self.substitutions.push(Substitution {
            design_id: req.design_id.clone(),
            required: req.variant.clone(),
            substitute: substitute.to_string(),
            quantity: req.quantity,
        });
    }

    /// First listed variant that is unclaimed and has at least `quantity` pieces
    fn first_available<'s>(
        &self,
        stock: &'s DesignStock,
        design_id: &str,
        quantity: u32,
    ) -> Option<&'s str> {
        stock
            .iter()
            .find(|(variant, count)| *count >= quantity && !self.is_used(design_id, variant))
            .map(|(variant, _)| variant)
    }

    /// Substitute chosen for a required variant, latest choice winning
    pub fn substitute_for(&self, design_id: &str, variant: &str) -> Option<&str> {
        self.substitutions
            .iter()
            .rev()
            .find(|s| {
                s.required == variant
                    && (self.scope == ClaimScope::Shared || s.design_id == design_id)
            })
            .map(|s| s.substitute.as_str())
    }

    fn covers(&self, req: &PartRequirement) -> bool {
        self.substitute_for(&req.design_id, &req.variant).is_some()
    }

    pub fn substitutions(&self) -> &[Substitution] {
        &self.substitutions
    }

    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }

    /// Required variant -> substitute variant
    pub fn variant_map(&self) -> BTreeMap<&str, &str> {
        self.substitutions
            .iter()
            .map(|s| (s.required.as_str(), s.substitute.as_str()))
            .collect()
    }

    /// Every variant claimed so far, sorted
    pub fn used_variants(&self) -> Vec<&str> {
        let mut variants: Vec<&str> = self.used.iter().map(|(_, v)| v.as_str()).collect();
        variants.sort_unstable();
        variants.dedup();
        variants
    }

    /// One line per requirement whose variant was substituted
    ///
    /// Lines read `"<qty> x <required> (substituted with <substitute>)"`.
    pub fn report(&self, requirements: &[PartRequirement]) -> Vec<String> {
        requirements
            .iter()
            .filter_map(|req| {
                self.substitute_for(&req.design_id, &req.variant).map(|sub| {
                    format!("{} x {} (substituted with {})", req.quantity, req.variant, sub)
                })
            })
            .collect()
    }
}

/// Result of a substitution check
#[derive(Debug, Clone)]
pub struct SubstitutionOutcome {
    pub buildable: bool,
    pub plan: SubstitutionPlan,
}

impl SubstitutionOutcome {
    fn buildable(plan: SubstitutionPlan) -> Self {
        Self {
            buildable: true,
            plan,
        }
    }

    fn unbuildable(plan: SubstitutionPlan) -> Self {
        Self {
            buildable: false,
            plan,
        }
    }
}

/// Decide whether a set needs, and can be completed by, color substitution
///
/// Returns unbuildable for an empty inventory and for sets that already
/// match exactly.
pub fn substitution_match(
    index: &InventoryIndex,
    requirements: &[PartRequirement],
    strategy: SubstitutionStrategy,
) -> SubstitutionOutcome {
    let plan = SubstitutionPlan::new(strategy.scope());
    if index.is_empty() || exact_match(index, requirements) {
        return SubstitutionOutcome::unbuildable(plan);
    }

    match strategy {
        SubstitutionStrategy::TwoPhase => two_phase(index, requirements, plan),
        SubstitutionStrategy::SinglePass => single_pass(index, requirements, plan),
    }
}

/// Shorthand for `substitution_match` with the default strategy
pub fn can_build_with_substitutions(index: &InventoryIndex, requirements: &[PartRequirement]) -> bool {
    substitution_match(index, requirements, SubstitutionStrategy::default()).buildable
}

fn two_phase(
    index: &InventoryIndex,
    requirements: &[PartRequirement],
    mut plan: SubstitutionPlan,
) -> SubstitutionOutcome {
    let active = || requirements.iter().filter(|req| req.quantity > 0);

    let mut stalled = false;
    for req in active() {
        let Some(stock) = index.design(&req.design_id) else {
            stalled = true;
            break;
        };

        // Listed is enough here; the count is not checked.
        if stock.contains(&req.variant) {
            plan.mark_used(&req.design_id, &req.variant);
            continue;
        }

        match plan.first_available(stock, &req.design_id, req.quantity) {
            Some(substitute) => plan.commit(req, substitute),
            None => {
                stalled = true;
                break;
            }
        }
    }

    if !stalled {
        return SubstitutionOutcome::buildable(plan);
    }

    // Direct matches never entered the plan, so they are revisited here too.
    for req in active() {
        if plan.covers(req) {
            continue;
        }

        let substitute = index
            .design(&req.design_id)
            .and_then(|stock| plan.first_available(stock, &req.design_id, req.quantity));
        match substitute {
            Some(substitute) => plan.commit(req, substitute),
            None => {
                tracing::trace!(requirement = %req, "no substitute in second pass");
                return SubstitutionOutcome::unbuildable(plan);
            }
        }
    }

    SubstitutionOutcome::buildable(plan)
}

fn single_pass(
    index: &InventoryIndex,
    requirements: &[PartRequirement],
    mut plan: SubstitutionPlan,
) -> SubstitutionOutcome {
    // Pieces taken so far per (design, variant), direct and substituted.
    let mut consumed: HashMap<(&str, &str), u32> = HashMap::new();

    for req in requirements.iter().filter(|req| req.quantity > 0) {
        let Some(stock) = index.design(&req.design_id) else {
            return SubstitutionOutcome::unbuildable(plan);
        };

        let key = (req.design_id.as_str(), req.variant.as_str());
        let taken = consumed.get(&key).copied().unwrap_or(0);
        let direct = stock
            .get(&req.variant)
            .is_some_and(|owned| u64::from(owned) >= u64::from(taken) + u64::from(req.quantity));
        if direct {
            plan.mark_used(&req.design_id, &req.variant);
            *consumed.entry(key).or_insert(0) += req.quantity;
            continue;
        }

        match plan.first_available(stock, &req.design_id, req.quantity) {
            Some(substitute) => {
                plan.commit(req, substitute);
                *consumed.entry((req.design_id.as_str(), substitute)).or_insert(0) += req.quantity;
            }
            None => return SubstitutionOutcome::unbuildable(plan),
        }
    }

    if plan.is_empty() {
        SubstitutionOutcome::unbuildable(plan)
    } else {
        SubstitutionOutcome::buildable(plan)
    }
}
