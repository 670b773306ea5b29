//! One-shot planning of a whole wall: controller, hub groups, power runs and
//! both wiring graphs.
//!
//! Every call recomputes everything from its inputs; nothing is cached between
//! calls, so a changed grid, product or redundancy flag simply means a new
//! [`WallPlan`].

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::ControllerCatalog;
use crate::error::{PlanError, Result};
use crate::partition::{Group, PowerRunPolicy, partition_hubs, partition_power_runs};
use crate::product::Product;
use crate::routing::types::WiringGraph;
use crate::routing::{Layout, LayoutConfig, route_data, route_power};
use crate::selector::{self, ControllerSelection, PIXEL_LIMIT_PER_PORT};
use crate::traversal::{GridSize, row_major, serpentine};

/// Tunables for the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Pixels one data-hub port can address.
    pub pixel_limit_per_port: u64,
    pub layout: LayoutConfig,
    pub power: PowerRunPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            pixel_limit_per_port: PIXEL_LIMIT_PER_PORT,
            layout: LayoutConfig::default(),
            power: PowerRunPolicy::default(),
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.pixel_limit_per_port == 0 {
            return Err(PlanError::ZeroPixelLimit);
        }
        self.layout.validate()?;
        self.power.validate()
    }
}

/// Everything the renderer and the quotation side need for one wall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallPlan {
    pub product: Product,
    pub grid: GridSize,
    pub redundancy: bool,
    pub pixels_per_cabinet: u64,
    pub total_pixels: u64,
    pub data_hub_ports: u32,
    /// `None` when no controller in the catalog is eligible at all.
    pub selection: Option<ControllerSelection>,
    pub hub_groups: Vec<Group>,
    pub power_run_length: usize,
    pub power_runs: Vec<Group>,
    pub data_wiring: WiringGraph,
    pub power_wiring: WiringGraph,
}

impl WallPlan {
    /// True when the chosen controller cannot carry the wall, or none was found.
    pub fn is_capacity_exceeded(&self) -> bool {
        self.selection
            .as_ref()
            .is_none_or(ControllerSelection::is_capacity_exceeded)
    }
}

/// Plan a wall of `grid` cabinets of `product`.
pub fn plan_wall(
    product: &Product,
    grid: GridSize,
    redundancy: bool,
    catalog: &ControllerCatalog,
    config: &PlannerConfig,
) -> Result<WallPlan> {
    product.validate()?;
    config.validate()?;

    let pixels_per_cabinet = product.pixels_per_cabinet();
    let total_pixels = product.total_pixels(grid);
    let data_hub_ports = selector::data_hub_ports(total_pixels, config.pixel_limit_per_port);
    let selection = selector::select(catalog, data_hub_ports, total_pixels, redundancy);

    let hub_groups = partition_hubs(
        &serpentine(grid),
        pixels_per_cabinet,
        config.pixel_limit_per_port,
    );
    if hub_groups.len() > data_hub_ports as usize {
        // Cabinets are never split, so a wall of near-limit cabinets can need
        // more hubs than its pixel total suggests.
        warn!(
            hubs = hub_groups.len(),
            data_hub_ports, "Hub groups exceed the pixel-based port estimate"
        );
    }

    let power_run_length = config.power.max_cabinets_for(product.pixel_pitch);
    let power_runs = partition_power_runs(&row_major(grid), power_run_length);

    let layout = Layout::new(&config.layout, grid);
    let data_wiring = route_data(&layout, &hub_groups, redundancy);
    let power_wiring = route_power(&layout, &power_runs);

    info!(
        product = %product.name,
        columns = grid.columns,
        rows = grid.rows,
        total_pixels,
        hubs = hub_groups.len(),
        power_runs = power_runs.len(),
        controller = selection.as_ref().map_or("none", |s| s.controller.name.as_str()),
        "Planned wall"
    );

    Ok(WallPlan {
        product: product.clone(),
        grid,
        redundancy,
        pixels_per_cabinet,
        total_pixels,
        data_hub_ports,
        selection,
        hub_groups,
        power_run_length,
        power_runs,
        data_wiring,
        power_wiring,
    })
}
