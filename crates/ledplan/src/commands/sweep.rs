use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use crate::cli::ProductArgs;
use ledplan::config::Config;
use ledplan::selector::{self, ControllerSelection};
use ledplan::{ControllerCatalog, GridSize, Product};

/// Selection outcome for one grid size.
struct SweepRow {
    grid: GridSize,
    total_pixels: u64,
    data_hub_ports: u32,
    selection: Option<ControllerSelection>,
}

pub fn run(product: &ProductArgs, max_columns: u32, max_rows: u32, redundancy: bool) -> Result<()> {
    let product = super::load_product(product)?;
    let config = Config::load_or_default()?;
    config.planner.validate()?;
    let catalog = config.catalog()?;

    let rows = sweep(
        &product,
        &catalog,
        config.planner.pixel_limit_per_port,
        max_columns,
        max_rows,
        redundancy,
    );

    println!(
        "{}",
        format!(
            "{:>4} x {:<4} {:>12} {:>6}  {:<16} {:>6}  Status",
            "Cols", "Rows", "Pixels", "Ports", "Controller", "Used"
        )
        .bold()
    );
    for row in &rows {
        let (name, used, status) = match &row.selection {
            Some(sel) if sel.is_capacity_exceeded() => (
                sel.controller.name.as_str(),
                sel.required_ports,
                format!("{:?}", sel.status).red(),
            ),
            Some(sel) => (
                sel.controller.name.as_str(),
                sel.required_ports,
                "ok".green(),
            ),
            None => ("-", 0, "no controller".red()),
        };
        println!(
            "{:>4} x {:<4} {:>12} {:>6}  {:<16} {:>6}  {status}",
            row.grid.columns, row.grid.rows, row.total_pixels, row.data_hub_ports, name, used
        );
    }
    Ok(())
}

/// Evaluate every grid from 1x1 up to `max_columns` x `max_rows` in parallel.
///
/// Rows come back in column-major order regardless of scheduling.
fn sweep(
    product: &Product,
    catalog: &ControllerCatalog,
    pixel_limit_per_port: u64,
    max_columns: u32,
    max_rows: u32,
    redundancy: bool,
) -> Vec<SweepRow> {
    let grids: Vec<GridSize> = (1..=max_columns)
        .flat_map(|columns| (1..=max_rows).map(move |rows| GridSize::new(columns, rows)))
        .collect();

    grids
        .par_iter()
        .map(|&grid| {
            let total_pixels = product.total_pixels(grid);
            let data_hub_ports = selector::data_hub_ports(total_pixels, pixel_limit_per_port);
            SweepRow {
                grid,
                total_pixels,
                data_hub_ports,
                selection: selector::select(catalog, data_hub_ports, total_pixels, redundancy),
            }
        })
        .collect()
}
