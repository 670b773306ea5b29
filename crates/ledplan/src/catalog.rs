use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// How a controller receives its video source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControllerKind {
    /// Live input, frame-locked to the source.
    Synchronous,
    /// Plays stored content, no live input required.
    Asynchronous,
}

impl ControllerKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Synchronous => "sync",
            Self::Asynchronous => "async",
        }
    }
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A sending card / video processor model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    pub name: String,
    /// Number of data-hub output ports.
    pub port_count: u32,
    /// Maximum addressable pixels, in millions.
    pub pixel_capacity_millions: f64,
    pub kind: ControllerKind,
    /// Minimum ports for a mirrored backup layout. 0 means never redundant.
    #[serde(default)]
    pub min_ports_for_redundancy: u32,
}

impl Controller {
    pub fn new(
        name: &str,
        port_count: u32,
        pixel_capacity_millions: f64,
        kind: ControllerKind,
        min_ports_for_redundancy: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            port_count,
            pixel_capacity_millions,
            kind,
            min_ports_for_redundancy,
        }
    }

    /// Pixel capacity as an absolute pixel count.
    pub fn pixel_capacity(&self) -> f64 {
        self.pixel_capacity_millions * 1e6
    }

    pub fn supports_redundancy(&self) -> bool {
        self.min_ports_for_redundancy > 0
    }

    pub fn can_drive(&self, total_pixels: u64) -> bool {
        self.pixel_capacity() >= total_pixels as f64
    }
}

/// Controllers available for selection, kept sorted by ascending port count
/// (ties by ascending pixel capacity).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerCatalog {
    controllers: Vec<Controller>,
}

impl ControllerCatalog {
    /// Build a catalog from an arbitrary list. The list is validated and sorted.
    pub fn new(mut controllers: Vec<Controller>) -> Result<Self> {
        if controllers.is_empty() {
            return Err(PlanError::EmptyCatalog);
        }
        if let Some(c) = controllers.iter().find(|c| c.port_count == 0) {
            return Err(PlanError::ControllerWithoutPorts(c.name.clone()));
        }
        controllers.sort_by(compare_controllers);
        Ok(Self { controllers })
    }

    /// The built-in catalog shipped with the tool.
    pub fn builtin() -> Self {
        use ControllerKind::{Asynchronous, Synchronous};

        let mut controllers = vec![
            Controller::new("TB2", 1, 0.65, Asynchronous, 0),
            Controller::new("TB30", 2, 0.65, Asynchronous, 2),
            Controller::new("TB40", 2, 1.3, Asynchronous, 0),
            Controller::new("MCTRL300", 2, 1.3, Synchronous, 0),
            Controller::new("TB60", 4, 2.3, Asynchronous, 4),
            Controller::new("VX400", 4, 2.6, Synchronous, 2),
            Controller::new("MCTRL660 Pro", 6, 2.3, Synchronous, 2),
            Controller::new("VX600", 6, 3.9, Synchronous, 2),
            Controller::new("VX1000", 10, 6.5, Synchronous, 2),
            Controller::new("MCTRL4K", 16, 8.8, Synchronous, 2),
            Controller::new("VX16s", 16, 10.4, Synchronous, 2),
        ];
        controllers.sort_by(compare_controllers);
        Self { controllers }
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Candidates for a workload: the whole catalog, or only redundancy-capable
    /// models. Order is preserved.
    pub fn candidates(&self, redundancy: bool) -> Vec<&Controller> {
        self.controllers
            .iter()
            .filter(|c| !redundancy || c.supports_redundancy())
            .collect()
    }
}

impl Default for ControllerCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn compare_controllers(a: &Controller, b: &Controller) -> Ordering {
    a.port_count.cmp(&b.port_count).then_with(|| {
        a.pixel_capacity_millions
            .partial_cmp(&b.pixel_capacity_millions)
            .unwrap_or(Ordering::Equal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_sorted_by_ports() {
        let catalog = ControllerCatalog::builtin();
        let ports: Vec<u32> = catalog.controllers().iter().map(|c| c.port_count).collect();
        let mut sorted = ports.clone();
        sorted.sort();
        assert_eq!(ports, sorted);
        assert_eq!(catalog.controllers()[0].name, "TB2");
    }

    #[test]
    fn equal_ports_sorted_by_capacity() {
        let catalog = ControllerCatalog::builtin();
        let six: Vec<&str> = catalog
            .controllers()
            .iter()
            .filter(|c| c.port_count == 6)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(six, vec!["MCTRL660 Pro", "VX600"]);
    }

    #[test]
    fn redundant_candidates_exclude_zero_min_ports() {
        let catalog = ControllerCatalog::builtin();
        let names: Vec<&str> = catalog
            .candidates(true)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert!(!names.contains(&"TB2"));
        assert!(!names.contains(&"MCTRL300"));
        assert!(names.contains(&"VX400"));
        assert_eq!(catalog.candidates(false).len(), catalog.len());
    }

    #[test]
    fn new_sorts_and_validates() {
        let catalog = ControllerCatalog::new(vec![
            Controller::new("Big", 8, 5.0, ControllerKind::Synchronous, 2),
            Controller::new("Small", 1, 0.5, ControllerKind::Asynchronous, 0),
        ])
        .unwrap();
        assert_eq!(catalog.controllers()[0].name, "Small");

        assert_eq!(
            ControllerCatalog::new(Vec::new()),
            Err(PlanError::EmptyCatalog)
        );
        assert_eq!(
            ControllerCatalog::new(vec![Controller::new(
                "Dead",
                0,
                1.0,
                ControllerKind::Synchronous,
                0
            )]),
            Err(PlanError::ControllerWithoutPorts("Dead".to_string()))
        );
    }

    #[test]
    fn controller_deserializes_from_yaml() {
        let yaml = "name: Custom\nport_count: 3\npixel_capacity_millions: 2.0\nkind: synchronous\n";
        let c: Controller = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(c.port_count, 3);
        assert_eq!(c.min_ports_for_redundancy, 0);
        assert!(!c.supports_redundancy());
        assert!(c.can_drive(2_000_000));
        assert!(!c.can_drive(2_000_001));
    }
}
