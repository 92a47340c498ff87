//! Command-line entry point.

mod cli;

use anyhow::{Context, Result, anyhow};
use cli::Command;
use planscale_core::{FurnitureLibrary, ProjectData};
use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let command = cli::parse_args(std::env::args().skip(1))
        .map_err(|e| anyhow!("{}\n\n{}", e, cli::USAGE))?;

    match command {
        Command::Help => println!("{}", cli::USAGE),
        Command::Inspect { path } => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let project = ProjectData::from_json(&json)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            print!("{}", cli::project_report(&project));
        }
        Command::Migrate { input, output } => {
            let json = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let project = ProjectData::from_json(&json)
                .with_context(|| format!("Failed to load {}", input.display()))?;
            fs::write(&output, project.to_json()?)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            log::info!("Wrote {} entities to {}", project.entity_count(), output.display());
        }
        Command::ScaleBar { scale, unit, zoom } => {
            let report = cli::scale_bar_report(scale, &unit, zoom)
                .ok_or_else(|| anyhow!("No scale bar for scale {} at zoom {}", scale, zoom))?;
            println!("{}", report);
        }
        Command::Templates { query } => {
            let library = FurnitureLibrary::new();
            print!("{}", cli::templates_report(&library, query.as_deref()));
        }
    }
    Ok(())
}
