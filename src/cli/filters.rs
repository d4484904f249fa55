//! Value enums for mode and strategy flags
//!
//! Kept separate from the engine types so the library does not depend on clap.

use clap::ValueEnum;

use crate::core::{MatchMode, SubstitutionStrategy};

/// `--mode` values
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    /// Only exact matches with owned colors
    Strict,
    /// Sets that become buildable once colors are swapped
    #[value(alias = "flexible")]
    Substitution,
}

impl From<ModeArg> for MatchMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Strict => MatchMode::Strict,
            ModeArg::Substitution => MatchMode::Substitution,
        }
    }
}

/// `--strategy` values
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StrategyArg {
    /// Two passes, compatible with the classic allocation
    TwoPhase,
    /// One pass, direct match first, claims per design
    SinglePass,
}

impl From<StrategyArg> for SubstitutionStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::TwoPhase => SubstitutionStrategy::TwoPhase,
            StrategyArg::SinglePass => SubstitutionStrategy::SinglePass,
        }
    }
}

/// Resolve flag values against configured defaults
pub fn resolve_mode(flag: Option<ModeArg>, configured: MatchMode) -> MatchMode {
    flag.map(MatchMode::from).unwrap_or(configured)
}

pub fn resolve_strategy(
    flag: Option<StrategyArg>,
    configured: SubstitutionStrategy,
) -> SubstitutionStrategy {
    flag.map(SubstitutionStrategy::from).unwrap_or(configured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_config() {
        assert_eq!(
            resolve_mode(Some(ModeArg::Substitution), MatchMode::Strict),
            MatchMode::Substitution
        );
        assert_eq!(resolve_mode(None, MatchMode::Substitution), MatchMode::Substitution);
        assert_eq!(
            resolve_strategy(Some(StrategyArg::SinglePass), SubstitutionStrategy::TwoPhase),
            SubstitutionStrategy::SinglePass
        );
        assert_eq!(
            resolve_strategy(None, SubstitutionStrategy::TwoPhase),
            SubstitutionStrategy::TwoPhase
        );
    }
}
