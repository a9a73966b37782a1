use anyhow::{Context, Result};
use colored::Colorize;
use rusty_rules::RuleTable;
use std::path::Path;

pub fn execute(path: &Path) -> Result<()> {
    let table = RuleTable::load(path)
        .with_context(|| format!("Failed to load rule file: {:?}", path))?;

    println!(
        "{} {} fields",
        "Loaded".green().bold(),
        table.len().to_string().cyan()
    );
    println!();

    for (field, rules) in table.iter() {
        println!("{}", field.bold());
        for rule in rules {
            let directive = rule.directive.to_string();
            let directive = if rule.directive.is_unknown() {
                directive.red()
            } else {
                directive.cyan()
            };
            println!("  {:<28} {}", directive, rule.message);
        }
    }

    Ok(())
}
