//! Catalog scanning - run a matcher over every candidate set
//!
//! The scanner does not prefilter; hand it the candidates you want checked.

use serde::Serialize;
use std::collections::HashSet;
use std::time::Instant;

use crate::core::fetch::DetailFetcher;
use crate::core::inventory::InventoryIndex;
use crate::core::matcher::{MatchMode, Matcher};
use crate::core::substitution::SubstitutionStrategy;
use crate::entities::assembly::Assembly;

/// Settings for one scan
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub matcher: Matcher,
    /// Stop submitting sets once this instant has passed
    pub deadline: Option<Instant>,
}

impl ScanOptions {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            matcher: Matcher::new(mode),
            deadline: None,
        }
    }

    pub fn with_strategy(mut self, strategy: SubstitutionStrategy) -> Self {
        self.matcher = self.matcher.with_strategy(strategy);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// A set judged buildable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildableAssembly {
    pub id: String,
    pub name: String,
}

/// A set left out because its detail could not be obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAssembly {
    pub id: String,
    pub name: String,
    pub reason: String,
}

/// Outcome of a scan
///
/// An empty `buildable` list is a valid answer ("nothing buildable"), not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub mode: MatchMode,
    /// Buildable sets in catalog order, each at most once
    pub buildable: Vec<BuildableAssembly>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedAssembly>,
    /// Number of sets actually evaluated
    pub evaluated: usize,
    /// True when the deadline cut the scan short
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

impl MatchResult {
    fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            buildable: Vec::new(),
            skipped: Vec::new(),
            evaluated: 0,
            truncated: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buildable.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buildable.len()
    }

    pub fn contains(&self, assembly_id: &str) -> bool {
        self.buildable.iter().any(|a| a.id == assembly_id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.buildable.iter().map(|a| a.id.as_str()).collect()
    }

    /// Render as `{"buildable_sets": {<name>: {"id": <id>}}}`
    ///
    /// A scan cut short by its deadline also carries `"truncated": true`.
    pub fn to_buildable_sets_json(&self) -> serde_json::Value {
        let sets: serde_json::Map<String, serde_json::Value> = self
            .buildable
            .iter()
            .map(|a| (a.name.clone(), serde_json::json!({ "id": a.id })))
            .collect();
        if self.truncated {
            serde_json::json!({ "buildable_sets": sets, "truncated": true })
        } else {
            serde_json::json!({ "buildable_sets": sets })
        }
    }
}

/// Decide a single set under `mode` with the default substitution strategy
///
/// A set whose requirements were never loaded is not buildable.
pub fn evaluate_buildability(index: &InventoryIndex, assembly: &Assembly, mode: MatchMode) -> bool {
    match assembly.requirements() {
        Some(requirements) => Matcher::new(mode).is_buildable(index, requirements),
        None => {
            tracing::debug!(set = %assembly.id, "requirements not loaded");
            false
        }
    }
}

/// Scan sets under `mode`, fetching each set's detail through `fetcher`
pub fn scan_catalog<'a, I, F>(
    index: &InventoryIndex,
    catalog: I,
    mode: MatchMode,
    fetcher: &F,
) -> MatchResult
where
    I: IntoIterator<Item = &'a Assembly>,
    F: DetailFetcher + ?Sized,
{
    scan_catalog_with(index, catalog, &ScanOptions::new(mode), fetcher)
}

/// Scan sets with explicit options
///
/// Sets that already carry requirements are evaluated without fetching. A
/// fetch failure skips that set only. Each set id is evaluated once.
#[tracing::instrument(
    name = "scan",
    skip_all,
    fields(mode = %options.matcher.mode, strategy = %options.matcher.strategy)
)]
pub fn scan_catalog_with<'a, I, F>(
    index: &InventoryIndex,
    catalog: I,
    options: &ScanOptions,
    fetcher: &F,
) -> MatchResult
where
    I: IntoIterator<Item = &'a Assembly>,
    F: DetailFetcher + ?Sized,
{
    let matcher = options.matcher;
    let mut result = MatchResult::new(matcher.mode);
    let mut seen: HashSet<&str> = HashSet::new();

    for assembly in catalog {
        if options.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            tracing::warn!(evaluated = result.evaluated, "scan deadline reached, returning partial result");
            result.truncated = true;
            break;
        }

        if !seen.insert(assembly.id.as_str()) {
            continue;
        }

        let fetched;
        let requirements = match assembly.requirements() {
            Some(requirements) => requirements,
            None => match fetcher.fetch(assembly) {
                Ok(requirements) => {
                    fetched = requirements;
                    fetched.as_slice()
                }
                Err(err) => {
                    tracing::warn!(set = %assembly.id, "skipping set: {}", err.reason);
                    result.skipped.push(SkippedAssembly {
                        id: assembly.id.clone(),
                        name: assembly.name.clone(),
                        reason: err.reason,
                    });
                    continue;
                }
            },
        };

        result.evaluated += 1;
        let buildable = matcher.is_buildable(index, requirements);
        tracing::debug!(set = %assembly.id, buildable, lines = requirements.len(), "evaluated set");

        if buildable {
            result.buildable.push(BuildableAssembly {
                id: assembly.id.clone(),
                name: assembly.name.clone(),
            });
        }
    }

    tracing::info!(
        buildable = result.buildable.len(),
        evaluated = result.evaluated,
        skipped = result.skipped.len(),
        "scan finished"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DetailUnavailable;
    use crate::entities::part::PartRequirement;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::time::Duration;

    fn inventory() -> InventoryIndex {
        InventoryIndex::from_designs([
            ("3001", vec![("5", 4), ("3", 6)]),
            ("3003", vec![("1", 10)]),
        ])
    }

    fn details() -> HashMap<String, Vec<PartRequirement>> {
        HashMap::from([
            ("exact".to_string(), vec![PartRequirement::new("3001", "5", 4)]),
            ("swap".to_string(), vec![PartRequirement::new("3003", "9", 2)]),
            ("never".to_string(), vec![PartRequirement::new("9999", "1", 1)]),
        ])
    }

    fn catalog() -> Vec<Assembly> {
        vec![
            Assembly::new("exact", "Exact Set", 4),
            Assembly::new("swap", "Swap Set", 2),
            Assembly::new("never", "Never Set", 1),
        ]
    }

    #[test]
    fn test_strict_scan() {
        let result = scan_catalog(&inventory(), &catalog(), MatchMode::Strict, &details());
        assert_eq!(result.ids(), vec!["exact"]);
        assert_eq!(result.evaluated, 3);
        assert!(!result.truncated);
    }

    #[test]
    fn test_substitution_scan() {
        let result = scan_catalog(&inventory(), &catalog(), MatchMode::Substitution, &details());
        assert_eq!(result.ids(), vec!["swap"]);
    }

    #[test]
    fn test_fetch_failure_skips_only_that_set() {
        let mut details = details();
        details.remove("exact");
        let mut catalog = catalog();
        catalog.push(Assembly::new("late", "Late Set", 1));
        details.insert("late".to_string(), vec![PartRequirement::new("3003", "1", 1)]);

        let result = scan_catalog(&inventory(), &catalog, MatchMode::Strict, &details);
        assert_eq!(result.ids(), vec!["late"]);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].id, "exact");
    }

    #[test]
    fn test_duplicate_sets_evaluated_once() {
        let mut catalog = catalog();
        catalog.push(Assembly::new("exact", "Exact Set", 4));
        let calls = Cell::new(0);
        let details = details();
        let fetcher = |asm: &Assembly| -> Result<Vec<PartRequirement>, DetailUnavailable> {
            calls.set(calls.get() + 1);
            details
                .get(&asm.id)
                .cloned()
                .ok_or_else(|| DetailUnavailable::new(&asm.id, "missing"))
        };

        let result = scan_catalog(&inventory(), &catalog, MatchMode::Strict, &fetcher);
        assert_eq!(result.ids(), vec!["exact"]);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_preloaded_requirements_not_fetched() {
        let catalog = vec![Assembly::new("pre", "Preloaded", 1)
            .with_requirements(vec![PartRequirement::new("3003", "1", 1)])];
        let fetcher = |asm: &Assembly| -> Result<Vec<PartRequirement>, DetailUnavailable> {
            Err(DetailUnavailable::new(&asm.id, "should not be called"))
        };

        let result = scan_catalog(&inventory(), &catalog, MatchMode::Strict, &fetcher);
        assert_eq!(result.ids(), vec!["pre"]);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_expired_deadline_returns_partial_result() {
        let options = ScanOptions::new(MatchMode::Strict)
            .with_deadline(Instant::now() - Duration::from_millis(1));
        let result = scan_catalog_with(&inventory(), &catalog(), &options, &details());

        assert!(result.truncated);
        assert!(result.is_empty());
        assert_eq!(result.evaluated, 0);
        assert_eq!(
            result.to_buildable_sets_json(),
            serde_json::json!({"buildable_sets": {}, "truncated": true})
        );
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let result = scan_catalog(&InventoryIndex::new(), &catalog(), MatchMode::Strict, &details());
        assert!(result.is_empty());
        assert_eq!(result.evaluated, 3);
    }

    #[test]
    fn test_evaluate_buildability() {
        let loaded = Assembly::new("s", "S", 1).with_requirements(vec![PartRequirement::new("3001", "7", 1)]);
        assert!(!evaluate_buildability(&inventory(), &loaded, MatchMode::Strict));
        assert!(evaluate_buildability(&inventory(), &loaded, MatchMode::Substitution));

        let unloaded = Assembly::new("u", "U", 1);
        assert!(!evaluate_buildability(&inventory(), &unloaded, MatchMode::Strict));
    }

    #[test]
    fn test_buildable_sets_json_shape() {
        let result = scan_catalog(&inventory(), &catalog(), MatchMode::Strict, &details());
        let json = result.to_buildable_sets_json();
        assert_eq!(json["buildable_sets"]["Exact Set"]["id"], "exact");
    }
}
