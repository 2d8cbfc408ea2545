// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `tools` subcommand — list the available tools.

use fileforge_core::error::Result;
use fileforge_core::{ToolCategory, ToolKind};
use serde::Serialize;

#[derive(Serialize)]
struct ToolEntry {
    command: &'static str,
    name: &'static str,
    description: &'static str,
    category: ToolCategory,
}

fn entries() -> Vec<ToolEntry> {
    ToolKind::ALL
        .iter()
        .map(|kind| ToolEntry {
            command: kind.slug(),
            name: kind.display_name(),
            description: kind.description(),
            category: kind.category(),
        })
        .collect()
}

pub fn run(json: bool) -> Result<()> {
    let entries = entries();
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for (heading, category) in [
        ("Conversion", ToolCategory::Conversion),
        ("Utilities", ToolCategory::Utility),
    ] {
        println!("{heading}:");
        for entry in entries.iter().filter(|entry| entry.category == category) {
            println!("  {:<14} {}", entry.command, entry.description);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_is_listed_once() {
        let entries = entries();
        assert_eq!(entries.len(), ToolKind::ALL.len());
        let conversions = entries
            .iter()
            .filter(|entry| entry.category == ToolCategory::Conversion)
            .count();
        assert_eq!(conversions, 4);
    }
}
