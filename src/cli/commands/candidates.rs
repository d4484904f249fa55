//! `brickyard candidates` command - piece-count prefilter over a catalog

use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::plural;
use crate::cli::output::{effective_format, print_rows, SetRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::prefilter;
use crate::payload::{load_catalog, load_inventory};

#[derive(clap::Args, Debug)]
pub struct CandidatesArgs {
    /// Inventory payload
    #[arg(long, short = 'i')]
    pub inventory: PathBuf,

    /// Catalog payload
    #[arg(long, short = 'c')]
    pub catalog: PathBuf,

    /// Only print the number of candidates
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: CandidatesArgs, global: &GlobalOpts) -> Result<()> {
    let index = load_inventory(&args.inventory)?;
    let catalog = load_catalog(&args.catalog)?;

    let owned_total = index.total_pieces();
    let candidates = prefilter(&catalog, owned_total);

    if args.count {
        println!("{}", candidates.len());
        return Ok(());
    }

    let format = effective_format(global.output, true);
    let text_output = matches!(format, OutputFormat::Tsv | OutputFormat::Table);

    if candidates.is_empty() && text_output {
        println!("No buildable sets found.");
        return Ok(());
    }

    let rows: Vec<SetRow> = candidates
        .iter()
        .map(|a| {
            let row = SetRow::new(&a.id, &a.name).with_pieces(a.total_pieces);
            if format == OutputFormat::Table {
                row.for_table()
            } else {
                row
            }
        })
        .collect();
    print_rows(&rows, format)?;

    if text_output {
        println!(
            "{} of {} fit within {}",
            plural(candidates.len() as u64, "set"),
            catalog.len(),
            plural(owned_total, "owned piece")
        );
    }

    Ok(())
}
