use anyhow::Result;
use colored::Colorize;

use crate::demo;

pub fn execute() -> Result<()> {
    let router = demo::router()?;

    println!("{}", "Demo routes (matching order):".green().bold());
    println!();

    for (idx, entry) in router.table().iter().enumerate() {
        let mut flags = Vec::new();
        if let Some(name) = &entry.options.name {
            flags.push(format!("name={}", name));
        }
        if entry.options.with_view {
            flags.push("with_view".to_string());
        }

        println!(
            "{:>2}. {:<28} {}",
            idx + 1,
            entry.rule.rule().cyan(),
            entry.rule.as_regex().as_str().dimmed()
        );
        if !flags.is_empty() {
            println!("    {}", flags.join(", ").yellow());
        }
    }

    Ok(())
}
