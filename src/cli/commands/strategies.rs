//! List strategies command.

use anyhow::Result;
use sonicr_strategies::StrategyRegistry;

pub async fn run() -> Result<()> {
    let registry = StrategyRegistry::new();

    println!("Available Strategies");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    let mut names = registry.names();
    names.sort();
    for name in names {
        let Some(info) = registry.get(name) else {
            continue;
        };
        println!("  {} ({})", info.name, name);
        println!("  ───────────────────────────────────────────────────────");
        println!("  {}", info.description);
        println!();
        println!("  Default parameters:");
        println!("{}", indent(&serde_json::to_string_pretty(&info.default_config)?));
        println!();
    }

    println!("Use --strategy <name> to select a strategy.");

    Ok(())
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
