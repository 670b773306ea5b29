use anyhow::Result;
use colored::Colorize;

use ledplan::config::Config;

pub fn run(redundant_only: bool) -> Result<()> {
    let catalog = Config::load_or_default()?.catalog()?;
    let controllers = catalog.candidates(redundant_only);
    if controllers.is_empty() {
        println!("{}", "No matching controllers in the catalog.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<16} {:>5} {:>12} {:>6} {:>10}",
            "Controller", "Ports", "Capacity", "Kind", "Redundancy"
        )
        .bold()
    );
    for c in controllers {
        let redundancy = if c.supports_redundancy() {
            format!(">= {} ports", c.min_ports_for_redundancy)
        } else {
            "-".to_string()
        };
        println!(
            "{:<16} {:>5} {:>10.2} M {:>6} {:>10}",
            c.name,
            c.port_count,
            c.pixel_capacity_millions,
            c.kind.display_name(),
            redundancy
        );
    }
    Ok(())
}
