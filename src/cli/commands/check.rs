//! `brickyard check` command - evaluate a single set

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::filters::{resolve_mode, resolve_strategy, ModeArg, StrategyArg};
use crate::cli::output::{effective_format, print_structured};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, MatchMode, Matcher, Substitution, SubstitutionStrategy};
use crate::payload::{load_detail, load_inventory};

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Inventory payload
    #[arg(long, short = 'i')]
    pub inventory: PathBuf,

    /// Set detail payload (`{"pieces": [...]}`)
    #[arg(long, short = 'd')]
    pub detail: PathBuf,

    /// Match mode (default from config, else strict)
    #[arg(long, short = 'm', value_enum)]
    pub mode: Option<ModeArg>,

    /// Substitution strategy (default from config, else two-phase)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// List each color substitution made
    #[arg(long)]
    pub explain: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    buildable: bool,
    mode: MatchMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    strategy: Option<SubstitutionStrategy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    substitutions: Vec<Substitution>,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mode = resolve_mode(args.mode, config.mode);
    let strategy = resolve_strategy(args.strategy, config.strategy);

    let index = load_inventory(&args.inventory)?;
    let requirements = load_detail(&args.detail)?;

    let evaluation = Matcher::new(mode)
        .with_strategy(strategy)
        .evaluate(&index, &requirements);
    let plan = evaluation.substitution.as_ref().map(|outcome| &outcome.plan);

    let format = effective_format(global.output, false);
    match format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let report = CheckReport {
                buildable: evaluation.buildable,
                mode,
                strategy: (mode == MatchMode::Substitution).then_some(strategy),
                substitutions: plan
                    .filter(|_| evaluation.buildable)
                    .map(|p| p.substitutions().to_vec())
                    .unwrap_or_default(),
            };
            print_structured(&report, format)?;
        }
        _ => {
            if evaluation.buildable {
                println!("{} Buildable ({})", style("✓").green(), mode);
            } else {
                println!("{} Not buildable ({})", style("✗").red(), mode);
            }

            if args.explain && evaluation.buildable {
                if let Some(plan) = plan {
                    for line in plan.report(&requirements) {
                        println!("  {}", line);
                    }
                }
            }
        }
    }

    Ok(())
}
