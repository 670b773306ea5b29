use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

use crate::cli::{OutputFormat, ProductArgs};
use ledplan::config::Config;
use ledplan::routing::serialize::graph_to_lines;
use ledplan::{GridSize, SelectionStatus, WallPlan, plan_wall};

pub fn run(
    product: &ProductArgs,
    columns: u32,
    rows: u32,
    redundancy: bool,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let product = super::load_product(product)?;
    let config = Config::load_or_default()?;
    let catalog = config.catalog()?;
    let plan = plan_wall(
        &product,
        GridSize::new(columns, rows),
        redundancy,
        &catalog,
        &config.planner,
    )?;

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&plan)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(&plan)?,
        OutputFormat::Text => render_text(&plan),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{}", format!("Plan written to {}", path.display()).green());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn render_text(plan: &WallPlan) -> String {
    let mut out = String::new();
    let size = plan.product.wall_size_mm(plan.grid);
    out.push_str(&format!(
        "{}\n",
        format!(
            "{} wall, {} x {} cabinets ({:.0} x {:.0} mm)",
            plan.product.name, plan.grid.columns, plan.grid.rows, size.width, size.height
        )
        .bold()
    ));
    out.push_str(&format!(
        "  Pixels:       {} ({} per cabinet)\n",
        plan.total_pixels, plan.pixels_per_cabinet
    ));
    out.push_str(&format!("  Data ports:   {}\n", plan.data_hub_ports));

    match &plan.selection {
        Some(sel) => {
            let status = match sel.status {
                SelectionStatus::Satisfied => "ok".green(),
                SelectionStatus::PixelShortfall => "pixel capacity exceeded".red().bold(),
                SelectionStatus::PortShortfall => {
                    format!("needs {} ports", sel.demanded_ports).red().bold()
                }
            };
            out.push_str(&format!(
                "  Controller:   {} ({} ports, {:.2} M pixels) {status}\n",
                sel.controller.name,
                sel.controller.port_count,
                sel.controller.pixel_capacity_millions
            ));
            if sel.redundancy {
                out.push_str(&format!(
                    "  Ports used:   {} ({} backup)\n",
                    sel.required_ports, sel.backup_ports
                ));
            }
            out.push_str(&format!(
                "  Utilization:  {:.0}% ports, {:.0}% pixels\n",
                sel.port_utilization() * 100.0,
                sel.pixel_utilization() * 100.0
            ));
        }
        None => out.push_str(&format!(
            "  Controller:   {}\n",
            "no eligible controller in catalog".red().bold()
        )),
    }

    out.push_str(&format!("\n{}\n", "Data hubs".bold()));
    for group in &plan.hub_groups {
        out.push_str(&format!("  hub-{}: {}\n", group.index + 1, join_ids(&group.ids())));
    }

    out.push_str(&format!(
        "\n{} (up to {} cabinets)\n",
        "Power runs".bold(),
        plan.power_run_length
    ));
    for run in &plan.power_runs {
        out.push_str(&format!("  power-{}: {}\n", run.index + 1, join_ids(&run.ids())));
    }

    out.push_str(&format!(
        "\n{} ({:.0} units)\n",
        "Data cabling".bold(),
        plan.data_wiring.cable_length(None)
    ));
    for line in graph_to_lines(&plan.data_wiring) {
        out.push_str(&format!("  {line}\n"));
    }

    out.push_str(&format!(
        "\n{} ({:.0} units)\n",
        "Power cabling".bold(),
        plan.power_wiring.cable_length(None)
    ));
    for line in graph_to_lines(&plan.power_wiring) {
        out.push_str(&format!("  {line}\n"));
    }
    out
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledplan::{ControllerCatalog, PlannerConfig, Product};

    #[test]
    fn text_report_lists_hubs_and_cables() {
        colored::control::set_override(false);
        let product = Product::new("P2.5", 200, 1000, 2.5);
        let plan = plan_wall(
            &product,
            GridSize::new(5, 1),
            false,
            &ControllerCatalog::builtin(),
            &PlannerConfig::default(),
        )
        .unwrap();
        let text = render_text(&plan);
        assert!(text.contains("hub-1: 1, 2\n"));
        assert!(text.contains("hub-2: 3, 4, 5\n"));
        assert!(text.contains("power-1: 1, 2, 3, 4, 5\n"));
        assert!(text.contains("hub-1 -> cabinet-1"));
        assert!(text.contains("TB40"));
    }

    #[test]
    fn join_ids_formats_list() {
        assert_eq!(join_ids(&[1, 2, 3]), "1, 2, 3");
        assert_eq!(join_ids(&[]), "");
    }
}
