// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for PartGraph
//!
//! Provides partition import and export, streaming dumps of a whole graph and
//! a summary of what a database holds.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_dump, handle_export, handle_import, handle_info, handle_load, open_manager,
};
