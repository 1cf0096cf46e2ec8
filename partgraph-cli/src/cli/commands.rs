// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "partgraph")]
#[command(about = "PartGraph - partitioned graph store", long_about = None)]
pub struct Cli {
    /// Database directory (overrides the path from --config)
    #[arg(long, global = true, value_name = "DIR")]
    pub db: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<log::Level>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a partition document into a partition
    Import {
        /// Target partition
        #[arg(short, long)]
        partition: String,

        /// Partition document ({"nodes": [...], "edges": [...]})
        file: PathBuf,
    },

    /// Export a partition as one document
    Export {
        /// Partition to export
        #[arg(short, long)]
        partition: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sort entities and keys so the output can be diffed
        #[arg(long)]
        canonical: bool,
    },

    /// Export every partition as per-kind streams into a directory
    Dump {
        /// Directory receiving <partition>-<kind>-<nodes|edges>.json streams
        dir: PathBuf,
    },

    /// Import every stream found in a directory
    Load {
        /// Directory holding streams written by dump
        dir: PathBuf,
    },

    /// Show partitions, kinds and entity counts
    Info {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
