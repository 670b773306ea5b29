//! Wiring-topology planning for LED video walls.
//!
//! Given a grid of cabinets and a product's pixel geometry, `ledplan` sizes the
//! controller, splits the wall into data-hub groups and power runs, and routes
//! every cable (including redundant backup cabling) on a 2-D canvas.
//!
//! The pipeline is a chain of pure functions:
//!
//! 1. [`traversal`] produces the serpentine and row-major visiting orders.
//! 2. [`partition`] cuts an order into hub groups or power runs.
//! 3. [`routing`] lays the groups out and routes the cables.
//! 4. [`selector`] picks a controller from the [`catalog`].
//!
//! [`plan::plan_wall`] runs all of them for one wall.

pub mod catalog;
pub mod config;
pub mod error;
pub mod partition;
pub mod plan;
pub mod product;
pub mod routing;
pub mod selector;
pub mod traversal;

pub use catalog::{Controller, ControllerCatalog, ControllerKind};
pub use error::{PlanError, Result};
pub use plan::{PlannerConfig, WallPlan, plan_wall};
pub use product::Product;
pub use selector::{ControllerSelection, SelectionStatus};
pub use traversal::GridSize;
