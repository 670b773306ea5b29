//! Controller sizing: the smallest controller that covers a workload's ports
//! and pixels.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{Controller, ControllerCatalog};

/// Pixels one data-hub port can address.
pub const PIXEL_LIMIT_PER_PORT: u64 = 655_000;

/// Number of data-hub ports needed to address `total_pixels`. Saturates at
/// `u32::MAX`.
pub fn data_hub_ports(total_pixels: u64, pixel_limit_per_port: u64) -> u32 {
    if pixel_limit_per_port == 0 {
        return 0;
    }
    u32::try_from(total_pixels.div_ceil(pixel_limit_per_port)).unwrap_or(u32::MAX)
}

/// Outcome of a selection against the capacity constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStatus {
    /// Ports and pixel capacity both suffice.
    Satisfied,
    /// Enough ports, but no candidate can address every pixel.
    PixelShortfall,
    /// No candidate has enough ports; the largest controller was returned.
    PortShortfall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSelection {
    pub controller: Controller,
    /// Ports the selection is sized for. On `PortShortfall` this is the
    /// controller's native port count.
    pub required_ports: u32,
    /// Ports the workload actually needs, primary plus backup.
    pub demanded_ports: u32,
    pub backup_ports: u32,
    pub data_hub_ports: u32,
    pub total_pixels: u64,
    pub redundancy: bool,
    pub status: SelectionStatus,
}

impl ControllerSelection {
    pub fn is_capacity_exceeded(&self) -> bool {
        self.status != SelectionStatus::Satisfied
    }

    /// Share of the controller's ports in use (may exceed 1.0 on shortfall).
    pub fn port_utilization(&self) -> f64 {
        self.demanded_ports as f64 / self.controller.port_count as f64
    }

    /// Share of the controller's pixel capacity in use.
    pub fn pixel_utilization(&self) -> f64 {
        let capacity = self.controller.pixel_capacity();
        if capacity <= 0.0 {
            return 0.0;
        }
        self.total_pixels as f64 / capacity
    }
}

/// Pick a controller for `data_hub_ports` primary ports and `total_pixels`.
///
/// Under redundancy every primary port needs a mirrored backup port and only
/// redundancy-capable controllers are considered. Returns `None` only when the
/// candidate set is empty.
pub fn select(
    catalog: &ControllerCatalog,
    data_hub_ports: u32,
    total_pixels: u64,
    redundancy: bool,
) -> Option<ControllerSelection> {
    let candidates = catalog.candidates(redundancy);
    if candidates.is_empty() {
        warn!(redundancy, "No controller in the catalog is eligible");
        return None;
    }

    let (demanded_ports, backup_ports) = if redundancy {
        (data_hub_ports.saturating_mul(2), data_hub_ports)
    } else {
        (data_hub_ports, 0)
    };

    let build = |controller: &Controller, required_ports: u32, status: SelectionStatus| {
        ControllerSelection {
            controller: controller.clone(),
            required_ports,
            demanded_ports,
            backup_ports,
            data_hub_ports,
            total_pixels,
            redundancy,
            status,
        }
    };

    // Candidates are in ascending port order, so the first match is the smallest.
    let port_match = candidates
        .iter()
        .copied()
        .find(|c| c.port_count >= demanded_ports);

    let selection = match port_match {
        Some(c) if c.can_drive(total_pixels) => {
            build(c, demanded_ports, SelectionStatus::Satisfied)
        }
        Some(c) => {
            let fallback = candidates
                .iter()
                .copied()
                .filter(|c| c.port_count >= demanded_ports && c.can_drive(total_pixels))
                .min_by(|a, b| {
                    a.port_count.cmp(&b.port_count).then_with(|| {
                        a.pixel_capacity_millions
                            .partial_cmp(&b.pixel_capacity_millions)
                            .unwrap_or(Ordering::Equal)
                    })
                });
            match fallback {
                Some(f) => {
                    debug!(
                        from = %c.name,
                        to = %f.name,
                        "Port match lacks pixel capacity, moved up"
                    );
                    build(f, demanded_ports, SelectionStatus::Satisfied)
                }
                None => build(c, demanded_ports, SelectionStatus::PixelShortfall),
            }
        }
        None => {
            let largest = candidates
                .iter()
                .copied()
                .max_by(|a, b| {
                    a.pixel_capacity_millions
                        .partial_cmp(&b.pixel_capacity_millions)
                        .unwrap_or(Ordering::Equal)
                        .then(a.port_count.cmp(&b.port_count))
                })
                .unwrap_or(candidates[0]);
            build(largest, largest.port_count, SelectionStatus::PortShortfall)
        }
    };

    if selection.is_capacity_exceeded() {
        warn!(
            controller = %selection.controller.name,
            demanded_ports,
            total_pixels,
            status = ?selection.status,
            "Workload exceeds controller capacity"
        );
    } else {
        debug!(
            controller = %selection.controller.name,
            required_ports = selection.required_ports,
            total_pixels,
            "Selected controller"
        );
    }

    Some(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ControllerKind;

    fn small_catalog() -> ControllerCatalog {
        ControllerCatalog::new(vec![
            Controller::new("TB2", 1, 0.65, ControllerKind::Asynchronous, 0),
            Controller::new("Two", 2, 0.65, ControllerKind::Synchronous, 2),
            Controller::new("TwoBig", 2, 1.3, ControllerKind::Synchronous, 0),
            Controller::new("Four", 4, 2.6, ControllerKind::Synchronous, 2),
        ])
        .unwrap()
    }

    #[test]
    fn hub_ports_round_up() {
        assert_eq!(data_hub_ports(0, PIXEL_LIMIT_PER_PORT), 0);
        assert_eq!(data_hub_ports(655_000, PIXEL_LIMIT_PER_PORT), 1);
        assert_eq!(data_hub_ports(655_001, PIXEL_LIMIT_PER_PORT), 2);
        assert_eq!(data_hub_ports(1_000_000, PIXEL_LIMIT_PER_PORT), 2);
        assert_eq!(data_hub_ports(10, 0), 0);
    }

    #[test]
    fn hub_ports_saturate_instead_of_wrapping() {
        assert_eq!(data_hub_ports(PIXEL_LIMIT_PER_PORT << 32, PIXEL_LIMIT_PER_PORT), u32::MAX);
        assert_eq!(data_hub_ports(u64::MAX, 1), u32::MAX);
    }

    #[test]
    fn redundant_port_demand_saturates() {
        let sel = select(&ControllerCatalog::builtin(), u32::MAX / 2 + 1, 1, true).unwrap();
        assert_eq!(sel.demanded_ports, u32::MAX);
        assert_eq!(sel.backup_ports, u32::MAX / 2 + 1);
        assert_eq!(sel.status, SelectionStatus::PortShortfall);
    }

    #[test]
    fn single_port_small_wall_picks_tb2() {
        let sel = select(&ControllerCatalog::builtin(), 1, 500_000, false).unwrap();
        assert_eq!(sel.controller.name, "TB2");
        assert_eq!(sel.required_ports, 1);
        assert_eq!(sel.backup_ports, 0);
        assert_eq!(sel.status, SelectionStatus::Satisfied);
    }

    #[test]
    fn redundancy_doubles_ports() {
        let catalog = ControllerCatalog::builtin();
        let sel = select(&catalog, 3, 1_900_000, true).unwrap();
        assert_eq!(sel.required_ports, 6);
        assert_eq!(sel.backup_ports, 3);
        assert!(sel.controller.supports_redundancy());
        assert!(sel.controller.port_count >= 6);
        let smallest = catalog
            .candidates(true)
            .into_iter()
            .filter(|c| c.port_count >= 6)
            .map(|c| c.port_count)
            .min()
            .unwrap();
        assert_eq!(sel.controller.port_count, smallest);
        assert_eq!(sel.controller.name, "MCTRL660 Pro");
    }

    #[test]
    fn pixel_fallback_picks_next_capable() {
        // Two ports needed, 1.0M pixels: "Two" has the ports but not the pixels.
        let sel = select(&small_catalog(), 2, 1_000_000, false).unwrap();
        assert_eq!(sel.controller.name, "TwoBig");
        assert_eq!(sel.status, SelectionStatus::Satisfied);
    }

    #[test]
    fn pixel_fallback_prefers_fewest_ports_then_smallest_capacity() {
        let catalog = ControllerCatalog::new(vec![
            Controller::new("A", 2, 0.5, ControllerKind::Synchronous, 0),
            Controller::new("Huge", 8, 9.0, ControllerKind::Synchronous, 0),
            Controller::new("MidLarge", 4, 3.0, ControllerKind::Synchronous, 0),
            Controller::new("MidSmall", 4, 1.5, ControllerKind::Synchronous, 0),
        ])
        .unwrap();
        let sel = select(&catalog, 2, 1_200_000, false).unwrap();
        assert_eq!(sel.controller.name, "MidSmall");
    }

    #[test]
    fn pixel_shortfall_keeps_port_match() {
        let sel = select(&small_catalog(), 1, 5_000_000, false).unwrap();
        assert_eq!(sel.status, SelectionStatus::PixelShortfall);
        assert_eq!(sel.controller.name, "TB2");
        assert!(sel.is_capacity_exceeded());
    }

    #[test]
    fn port_shortfall_returns_largest() {
        let sel = select(&small_catalog(), 9, 5_000_000, false).unwrap();
        assert_eq!(sel.status, SelectionStatus::PortShortfall);
        assert_eq!(sel.controller.name, "Four");
        assert_eq!(sel.required_ports, 4);
        assert_eq!(sel.demanded_ports, 9);
        assert!(sel.port_utilization() > 1.0);
    }

    #[test]
    fn port_shortfall_under_redundancy_stays_in_redundant_set() {
        let catalog = ControllerCatalog::new(vec![
            Controller::new("Giant", 32, 20.0, ControllerKind::Synchronous, 0),
            Controller::new("Four", 4, 2.6, ControllerKind::Synchronous, 2),
        ])
        .unwrap();
        let sel = select(&catalog, 5, 3_000_000, true).unwrap();
        assert_eq!(sel.controller.name, "Four");
        assert_eq!(sel.status, SelectionStatus::PortShortfall);
    }

    #[test]
    fn empty_redundant_set_yields_none() {
        let catalog = ControllerCatalog::new(vec![Controller::new(
            "TB2",
            1,
            0.65,
            ControllerKind::Asynchronous,
            0,
        )])
        .unwrap();
        assert!(select(&catalog, 1, 100, true).is_none());
    }

    #[test]
    fn satisfied_selection_is_minimal() {
        let catalog = ControllerCatalog::builtin();
        for ports in 0..12u32 {
            for &pixels in &[0u64, 400_000, 1_200_000, 2_500_000, 6_000_000, 9_000_000] {
                for redundancy in [false, true] {
                    let Some(sel) = select(&catalog, ports, pixels, redundancy) else {
                        continue;
                    };
                    let need = if redundancy { ports * 2 } else { ports };
                    let best = catalog
                        .candidates(redundancy)
                        .into_iter()
                        .filter(|c| c.port_count >= need && c.can_drive(pixels))
                        .map(|c| c.port_count)
                        .min();
                    match best {
                        Some(min_ports) => {
                            assert_eq!(sel.status, SelectionStatus::Satisfied);
                            assert_eq!(sel.controller.port_count, min_ports);
                            assert!(sel.controller.can_drive(pixels));
                        }
                        None => assert!(sel.is_capacity_exceeded()),
                    }
                }
            }
        }
    }

    #[test]
    fn utilization_reports_fractions() {
        let sel = select(&ControllerCatalog::builtin(), 1, 325_000, false).unwrap();
        assert!((sel.port_utilization() - 1.0).abs() < 1e-9);
        assert!((sel.pixel_utilization() - 0.5).abs() < 1e-9);
    }
}
