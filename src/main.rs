use brickyard::cli::commands;
use brickyard::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    brickyard::logging::init(cli.global.verbose, cli.global.quiet);

    let global = cli.global;
    match cli.command {
        Commands::Normalize(args) => commands::normalize::run(args, &global),
        Commands::Candidates(args) => commands::candidates::run(args, &global),
        Commands::Check(args) => commands::check::run(args, &global),
        Commands::Scan(args) => commands::scan::run(args, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
