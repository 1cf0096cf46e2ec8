// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for PartGraph

use colored::Colorize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use super::commands::OutputFormat;
use super::output::{InfoFormatter, InfoRow};
use partgraph::{
    canonical_dump, export_partition, import_partition, large_scale_export_partition,
    large_scale_import_partition, DirectoryStreamFactory, EntityType, GraphConfig, GraphManager,
    StorageType, StreamFactory,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

const DEFAULT_DB: &str = "./partgraph_db";

/// Build the graph manager the command works on
///
/// The configuration file is read first and `--db` replaces its path. A
/// durable backend without any path falls back to `./partgraph_db`.
pub fn open_manager(
    db: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<GraphManager, Box<dyn std::error::Error>> {
    let mut config = match config {
        Some(file) => GraphConfig::from_file(file)?,
        None => GraphConfig::default(),
    };
    if let Some(db) = db {
        config.path = Some(db);
    }
    if config.path.is_none() && config.storage_type != StorageType::Memory {
        config.path = Some(PathBuf::from(DEFAULT_DB));
    }

    log::debug!(
        "Opening {} storage '{}' at {:?}",
        config.storage_type,
        config.storage_name,
        config.path
    );
    Ok(GraphManager::from_config(&config)?)
}

/// Handle the import command
pub fn handle_import(gm: &GraphManager, partition: &str, file: PathBuf) -> CliResult {
    let reader = BufReader::new(File::open(&file)?);
    import_partition(reader, partition, gm)?;
    gm.flush()?;

    println!(
        "{} {} into partition '{}'",
        "Imported".bold().green(),
        file.display(),
        partition
    );
    println!(
        "  {} nodes, {} edges",
        total(gm, partition, EntityType::Nodes)?,
        total(gm, partition, EntityType::Edges)?
    );
    Ok(())
}

/// Handle the export command
pub fn handle_export(
    gm: &GraphManager,
    partition: &str,
    output: Option<PathBuf>,
    canonical: bool,
) -> CliResult {
    let mut buffer = Vec::new();
    export_partition(&mut buffer, partition, gm)?;
    if canonical {
        buffer = canonical_dump(&String::from_utf8(buffer)?)?.into_bytes();
    }

    match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(&path)?);
            writer.write_all(&buffer)?;
            writer.flush()?;
            eprintln!(
                "{} partition '{}' to {}",
                "Exported".bold().green(),
                partition,
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&buffer)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

/// Handle the dump command
pub fn handle_dump(gm: &GraphManager, dir: PathBuf) -> CliResult {
    let mut factory = DirectoryStreamFactory::new(&dir)?;
    large_scale_export_partition(&mut factory, gm)?;

    let streams = factory.readers()?;
    println!(
        "{} {} streams to {}",
        "Dumped".bold().green(),
        streams.len(),
        dir.display()
    );
    for name in streams {
        println!("  → {}", name);
    }
    Ok(())
}

/// Handle the load command
pub fn handle_load(gm: &GraphManager, dir: PathBuf) -> CliResult {
    if !dir.is_dir() {
        println!(
            "{}",
            format!("No stream directory at {}", dir.display()).yellow()
        );
        return Err("Stream directory does not exist".into());
    }

    let factory = DirectoryStreamFactory::new(&dir)?;
    large_scale_import_partition(&factory, gm)?;
    gm.flush()?;

    println!(
        "{} {} partitions from {}",
        "Loaded".bold().green(),
        gm.partitions()?.len(),
        dir.display()
    );
    Ok(())
}

/// Handle the info command
pub fn handle_info(gm: &GraphManager, format: OutputFormat) -> CliResult {
    let mut rows = Vec::new();
    for partition in gm.partitions()? {
        for kind in gm.node_kinds(&partition)? {
            let count = gm.node_count(&partition, &kind)?;
            rows.push(InfoRow::new(&partition, &kind, EntityType::Nodes, count));
        }
        for kind in gm.edge_kinds(&partition)? {
            let count = gm.edge_count(&partition, &kind)?;
            rows.push(InfoRow::new(&partition, &kind, EntityType::Edges, count));
        }
    }

    println!("{}", InfoFormatter::format(&rows, format));
    Ok(())
}

fn total(gm: &GraphManager, partition: &str, entity: EntityType) -> partgraph::GraphResult<usize> {
    let mut sum = 0;
    match entity {
        EntityType::Nodes => {
            for kind in gm.node_kinds(partition)? {
                sum += gm.node_count(partition, &kind)?;
            }
        }
        EntityType::Edges => {
            for kind in gm.edge_kinds(partition)? {
                sum += gm.edge_count(partition, &kind)?;
            }
        }
    }
    Ok(sum)
}
