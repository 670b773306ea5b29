use thiserror::Error;

/// Input rejected before it reaches the planner.
///
/// Capacity shortfalls are not errors; they are reported through
/// [`crate::selector::SelectionStatus`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Pixel pitch must be a positive number, got {0}")]
    InvalidPixelPitch(f64),
    #[error("Pixel limit per port must be greater than zero")]
    ZeroPixelLimit,
    #[error("Corridor count must be at least 1")]
    ZeroCorridors,
    #[error("Power run length must be at least 1 cabinet")]
    ZeroRunLength,
    #[error("Layout dimension '{name}' must be positive, got {value}")]
    InvalidLayout { name: &'static str, value: f64 },
    #[error("Controller catalog is empty")]
    EmptyCatalog,
    #[error("Controller '{0}' must have at least one port")]
    ControllerWithoutPorts(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
