// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Output formatting for database summaries

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use partgraph::EntityType;

use super::commands::OutputFormat;

/// One line of the info summary
#[derive(Debug, Clone)]
pub struct InfoRow {
    pub partition: String,
    pub kind: String,
    pub entity: EntityType,
    pub count: usize,
}

impl InfoRow {
    pub fn new(partition: &str, kind: &str, entity: EntityType, count: usize) -> Self {
        Self {
            partition: partition.to_string(),
            kind: kind.to_string(),
            entity,
            count,
        }
    }
}

pub struct InfoFormatter;

impl InfoFormatter {
    pub fn format(rows: &[InfoRow], format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::format_table(rows),
            OutputFormat::Json => Self::format_json(rows),
        }
    }

    fn format_table(rows: &[InfoRow]) -> String {
        if rows.is_empty() {
            return format!("{}", "Database is empty".yellow());
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(
            ["Partition", "Kind", "Entity", "Count"]
                .iter()
                .map(|h| Cell::new(h).fg(Color::Green)),
        );
        for row in rows {
            table.add_row(vec![
                Cell::new(&row.partition),
                Cell::new(&row.kind),
                Cell::new(row.entity),
                Cell::new(row.count),
            ]);
        }

        let partitions = {
            let mut names: Vec<&str> = rows.iter().map(|r| r.partition.as_str()).collect();
            names.dedup();
            names.len()
        };

        let mut output = String::new();
        output.push_str(&format!("{}\n", "Graph Summary".bold().green()));
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n{} partitions, {} regions",
            partitions,
            rows.len()
        ));
        output
    }

    fn format_json(rows: &[InfoRow]) -> String {
        let json = serde_json::Value::Array(
            rows.iter()
                .map(|row| {
                    serde_json::json!({
                        "partition": row.partition,
                        "kind": row.kind,
                        "entity": row.entity.to_string(),
                        "count": row.count,
                    })
                })
                .collect(),
        );
        serde_json::to_string_pretty(&json)
            .unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_summary() {
        let rows = vec![
            InfoRow::new("main", "Author", EntityType::Nodes, 2),
            InfoRow::new("main", "Wrote", EntityType::Edges, 1),
        ];
        let value: serde_json::Value =
            serde_json::from_str(&InfoFormatter::format(&rows, OutputFormat::Json)).unwrap();
        assert_eq!(value[1]["entity"], "edges");
        assert_eq!(value[0]["count"], 2);
    }

    #[test]
    fn test_table_lists_every_region() {
        let rows = vec![
            InfoRow::new("main", "Author", EntityType::Nodes, 2),
            InfoRow::new("backup", "Author", EntityType::Nodes, 5),
        ];
        let table = InfoFormatter::format(&rows, OutputFormat::Table);
        assert!(table.contains("backup"));
        assert!(table.contains("2 partitions, 2 regions"));
    }
}
