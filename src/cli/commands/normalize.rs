//! `brickyard normalize` command - show an inventory as the engine sees it

use miette::Result;
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

use crate::cli::helpers::plural;
use crate::cli::output::{effective_format, print_rows, print_structured};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::payload::load_inventory;

#[derive(clap::Args, Debug)]
pub struct NormalizeArgs {
    /// Inventory payload (JSON, or YAML by extension; `-` reads stdin)
    pub inventory: PathBuf,
}

/// One owned design/color pair
#[derive(Debug, Serialize, Tabled)]
struct StockRow {
    #[tabled(rename = "DESIGN")]
    design: String,
    #[tabled(rename = "VARIANT")]
    variant: String,
    #[tabled(rename = "COUNT")]
    count: u32,
}

pub fn run(args: NormalizeArgs, global: &GlobalOpts) -> Result<()> {
    let index = load_inventory(&args.inventory)?;
    let format = effective_format(global.output, false);

    match format {
        OutputFormat::Json | OutputFormat::Yaml => print_structured(&index, format)?,
        _ => {
            let rows: Vec<StockRow> = index
                .iter()
                .flat_map(|(design, stock)| {
                    stock.iter().map(move |(variant, count)| StockRow {
                        design: design.to_string(),
                        variant: variant.to_string(),
                        count,
                    })
                })
                .collect();
            print_rows(&rows, format)?;

            if matches!(format, OutputFormat::Tsv | OutputFormat::Table) {
                println!(
                    "{}, {}",
                    plural(index.len() as u64, "design"),
                    plural(index.total_pieces(), "piece")
                );
            }
        }
    }

    Ok(())
}
