use serde::{Deserialize, Serialize};

use super::types::{Handle, Point};
use crate::error::{PlanError, Result};
use crate::traversal::{Cabinet, GridSize};

/// Canvas geometry for the wiring diagram.
///
/// Cabinets sit on a fixed-pitch grid with the top-left cabinet's corner at
/// the origin. Hubs and power sources are stacked to the left of the grid;
/// backup hubs to the right, beyond the corridors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub cabinet_width: f64,
    pub cabinet_height: f64,
    pub column_gap: f64,
    pub row_gap: f64,
    /// Side length of hub and power-source nodes.
    pub hub_size: f64,
    /// Horizontal distance from the grid's left edge to the hub column centre.
    pub hub_margin: f64,
    /// Vertical distance between stacked hubs.
    pub hub_spacing: f64,
    /// Number of reserved vertical lanes for backup cabling. Hubs reuse lanes
    /// cyclically beyond this.
    pub corridor_count: usize,
    pub corridor_spacing: f64,
    /// Distance from the grid's right edge to the first corridor.
    pub corridor_margin: f64,
    /// Distance from the last corridor to the backup hub column centre.
    pub backup_hub_margin: f64,
    /// How far above or below a cabinet a backup cable runs before dropping in.
    pub backup_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cabinet_width: 100.0,
            cabinet_height: 60.0,
            column_gap: 40.0,
            row_gap: 40.0,
            hub_size: 40.0,
            hub_margin: 160.0,
            hub_spacing: 80.0,
            corridor_count: 4,
            corridor_spacing: 12.0,
            corridor_margin: 30.0,
            backup_hub_margin: 80.0,
            backup_offset: 10.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("cabinet_width", self.cabinet_width),
            ("cabinet_height", self.cabinet_height),
            ("hub_size", self.hub_size),
            ("hub_margin", self.hub_margin),
            ("hub_spacing", self.hub_spacing),
            ("corridor_spacing", self.corridor_spacing),
            ("corridor_margin", self.corridor_margin),
            ("backup_hub_margin", self.backup_hub_margin),
        ];
        let non_negative = [
            ("column_gap", self.column_gap),
            ("row_gap", self.row_gap),
            ("backup_offset", self.backup_offset),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(PlanError::InvalidLayout { name, value });
            }
        }
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PlanError::InvalidLayout { name, value });
            }
        }
        if self.corridor_count == 0 {
            return Err(PlanError::ZeroCorridors);
        }
        Ok(())
    }

    pub fn pitch_x(&self) -> f64 {
        self.cabinet_width + self.column_gap
    }

    pub fn pitch_y(&self) -> f64 {
        self.cabinet_height + self.row_gap
    }
}

/// Node positions for one grid.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub config: &'a LayoutConfig,
    pub grid: GridSize,
}

impl<'a> Layout<'a> {
    pub fn new(config: &'a LayoutConfig, grid: GridSize) -> Self {
        Self { config, grid }
    }

    /// x of the grid's right edge.
    pub fn grid_right(&self) -> f64 {
        self.grid.columns as f64 * self.config.pitch_x() - self.config.column_gap
    }

    pub fn is_right_edge(&self, cabinet: &Cabinet) -> bool {
        cabinet.column + 1 == self.grid.columns
    }

    pub fn cabinet_center(&self, cabinet: &Cabinet) -> Point {
        Point::new(
            cabinet.column as f64 * self.config.pitch_x() + self.config.cabinet_width / 2.0,
            cabinet.row as f64 * self.config.pitch_y() + self.config.cabinet_height / 2.0,
        )
    }

    pub fn cabinet_handle(&self, cabinet: &Cabinet, handle: Handle) -> Point {
        let c = self.cabinet_center(cabinet);
        handle_of(c, self.config.cabinet_width, self.config.cabinet_height, handle)
    }

    /// Primary hubs and power sources share the column left of the grid.
    pub fn feed_center(&self, index: usize) -> Point {
        Point::new(
            -self.config.hub_margin,
            index as f64 * self.config.hub_spacing + self.config.cabinet_height / 2.0,
        )
    }

    pub fn feed_handle(&self, index: usize, handle: Handle) -> Point {
        let s = self.config.hub_size;
        handle_of(self.feed_center(index), s, s, handle)
    }

    /// x where hub elbows turn vertical, halfway between the hub column and
    /// the grid's left edge at x = 0.
    pub fn feed_turn_x(&self) -> f64 {
        self.feed_handle(0, Handle::Right).x / 2.0
    }

    pub fn backup_hub_center(&self, index: usize) -> Point {
        let last_corridor = self.corridor_x(self.config.corridor_count.saturating_sub(1));
        Point::new(
            last_corridor + self.config.backup_hub_margin,
            index as f64 * self.config.hub_spacing + self.config.cabinet_height / 2.0,
        )
    }

    pub fn backup_hub_handle(&self, index: usize, handle: Handle) -> Point {
        let s = self.config.hub_size;
        handle_of(self.backup_hub_center(index), s, s, handle)
    }

    /// x of corridor lane `lane` (0-based, must be below `corridor_count`).
    pub fn corridor_x(&self, lane: usize) -> f64 {
        self.grid_right()
            + self.config.corridor_margin
            + lane as f64 * self.config.corridor_spacing
    }

    /// y midway between a cabinet's row and the row above it. For row 0 this
    /// lies half a pitch above the grid.
    pub fn gap_above(&self, cabinet: &Cabinet) -> f64 {
        self.cabinet_center(cabinet).y - self.config.pitch_y() / 2.0
    }

    /// y midway between a cabinet's row and the row below it.
    pub fn gap_below(&self, cabinet: &Cabinet) -> f64 {
        self.cabinet_center(cabinet).y + self.config.pitch_y() / 2.0
    }
}

fn handle_of(center: Point, width: f64, height: f64, handle: Handle) -> Point {
    match handle {
        Handle::Left => Point::new(center.x - width / 2.0, center.y),
        Handle::Right => Point::new(center.x + width / 2.0, center.y),
        Handle::Top => Point::new(center.x, center.y - height / 2.0),
        Handle::Bottom => Point::new(center.x, center.y + height / 2.0),
    }
}
