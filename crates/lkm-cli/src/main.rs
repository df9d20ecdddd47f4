use clap::Parser;

mod cli;
mod cmd;
mod error;
mod source;

use cli::{Cli, Command};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Ingest {
            source,
            format,
            out,
            crew_schema,
            area,
            since,
            until,
            sort,
        } => {
            let areas: Vec<_> = area.iter().map(|a| a.to_area()).collect();
            cmd::ingest::run(
                &source,
                format,
                out.as_deref(),
                crew_schema.to_schema(),
                &areas,
                since,
                until,
                sort,
            )
        }
        Command::Inspect {
            source,
            crew_schema,
        } => cmd::inspect::run(&source, crew_schema.to_schema()),
        Command::Version => {
            println!("{}", lkm_core::version());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}
