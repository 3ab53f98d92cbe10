//! Functions command - list template functions and conditions

use crate::output::{print_json, print_text};
use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use warp_core::template::TemplateEngine;

pub fn run(json: bool) -> Result<()> {
    let engine = TemplateEngine::new();
    let functions: Vec<&str> = engine.functions().names().collect();
    let conditions: Vec<&str> = engine.conditions().names().collect();

    if json {
        let output = json!({
            "functions": functions,
            "conditions": conditions,
        });
        print_json(&serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    print_text(&format!("{} Functions ({{{{function:NAME:ARGS}}}}):", "→".cyan()))?;
    for name in functions {
        print_text(&format!("  - {}", name))?;
    }
    print_text(&format!("\n{} Conditions ({{{{#if_NAME}}}}):", "→".cyan()))?;
    for name in conditions {
        print_text(&format!("  - {}", name))?;
    }

    Ok(())
}
