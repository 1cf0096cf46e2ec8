// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! PartGraph CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // -v/--verbose wins over --log-level; RUST_LOG can still refine either
    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Commands::Version = cli.command {
        println!("{} {}", "PartGraph".bold().green(), partgraph::VERSION);
        println!("Partitioned graph store");
        return Ok(());
    }

    let result = cli::open_manager(cli.db, cli.config).and_then(|gm| match cli.command {
        Commands::Import { partition, file } => cli::handle_import(&gm, &partition, file),
        Commands::Export {
            partition,
            output,
            canonical,
        } => cli::handle_export(&gm, &partition, output, canonical),
        Commands::Dump { dir } => cli::handle_dump(&gm, dir),
        Commands::Load { dir } => cli::handle_load(&gm, dir),
        Commands::Info { format } => cli::handle_info(&gm, format),
        Commands::Version => Ok(()),
    });

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".bold().red(), e);
        std::process::exit(1);
    }
    Ok(())
}
