//! `brickyard scan` command - find every buildable set in a catalog

use miette::Result;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::cli::filters::{resolve_mode, resolve_strategy, ModeArg, StrategyArg};
use crate::cli::helpers::plural;
use crate::cli::output::{effective_format, print_rows, print_structured, SetRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{prefilter, scan_catalog_with, Config, DirectoryFetcher, ScanOptions};
use crate::payload::{load_catalog, load_inventory};

const NOTHING_FOUND: &str = "No buildable sets found.";

#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    /// Inventory payload
    #[arg(long, short = 'i')]
    pub inventory: PathBuf,

    /// Catalog payload (`{"Sets": [...]}`)
    #[arg(long, short = 'c')]
    pub catalog: PathBuf,

    /// Directory holding one `<set id>.json` detail file per set
    #[arg(long, short = 'd')]
    pub details: Option<PathBuf>,

    /// Match mode (default from config, else strict)
    #[arg(long, short = 'm', value_enum)]
    pub mode: Option<ModeArg>,

    /// Substitution strategy (default from config, else two-phase)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Give up after this many seconds and report what was found so far
    #[arg(long)]
    pub timeout: Option<u64>,
}

pub fn run(args: ScanArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mode = resolve_mode(args.mode, config.mode);
    let strategy = resolve_strategy(args.strategy, config.strategy);

    let index = load_inventory(&args.inventory)?;
    let catalog = load_catalog(&args.catalog)?;
    let candidates = prefilter(&catalog, index.total_pieces());
    tracing::info!(
        catalog = catalog.len(),
        candidates = candidates.len(),
        owned = index.total_pieces(),
        "prefiltered catalog"
    );

    let format = effective_format(global.output, true);

    if candidates.is_empty() {
        match format {
            OutputFormat::Json | OutputFormat::Yaml => {
                print_structured(&serde_json::json!({ "message": NOTHING_FOUND }), format)?
            }
            _ => println!("{}", NOTHING_FOUND),
        }
        return Ok(());
    }

    let details_dir = args.details.or(config.details_dir.clone()).ok_or_else(|| {
        miette::miette!(
            help = "pass --details <DIR> or set details_dir in brickyard.yaml",
            "No set detail directory configured"
        )
    })?;
    if !details_dir.is_dir() {
        return Err(miette::miette!(
            "Set detail directory not found: {}",
            details_dir.display()
        ));
    }
    let fetcher = DirectoryFetcher::new(details_dir);

    let mut options = ScanOptions::new(mode).with_strategy(strategy);
    let timeout = args.timeout.map(Duration::from_secs).or(config.scan_timeout());
    if let Some(timeout) = timeout {
        options = options.with_deadline(Instant::now() + timeout);
    }

    let result = scan_catalog_with(&index, candidates.iter(), &options, &fetcher);

    match format {
        OutputFormat::Json => {
            print_structured(&result.to_buildable_sets_json(), format)?;
        }
        OutputFormat::Yaml => {
            print_structured(&result, format)?;
        }
        _ => {
            if result.is_empty() && !result.truncated && format != OutputFormat::Csv {
                println!("{}", NOTHING_FOUND);
                return Ok(());
            }

            let rows: Vec<SetRow> = result
                .buildable
                .iter()
                .map(|a| {
                    let row = SetRow::new(&a.id, &a.name);
                    if format == OutputFormat::Table {
                        row.for_table()
                    } else {
                        row
                    }
                })
                .collect();
            print_rows(&rows, format)?;

            if format != OutputFormat::Csv {
                println!(
                    "{} buildable ({} mode, {} evaluated{})",
                    plural(result.len() as u64, "set"),
                    mode,
                    result.evaluated,
                    if result.truncated { ", timed out" } else { "" }
                );
            }
        }
    }

    Ok(())
}
