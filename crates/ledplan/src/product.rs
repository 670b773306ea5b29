use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::traversal::GridSize;

/// Pixel resolution of one cabinet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Physical cabinet size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CabinetSize {
    pub width: f64,
    pub height: f64,
}

/// The LED product a wall is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub resolution: Resolution,
    /// Pixel pitch in millimetres.
    pub pixel_pitch: f64,
    /// Physical size. Derived from resolution and pitch when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cabinet_mm: Option<CabinetSize>,
}

impl Product {
    pub fn new(name: &str, width: u32, height: u32, pixel_pitch: f64) -> Self {
        Self {
            name: name.to_string(),
            resolution: Resolution { width, height },
            pixel_pitch,
            cabinet_mm: None,
        }
    }

    /// Load a product descriptor from a YAML file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read product file {}", path.display()))?;
        let product: Product = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid product file {}", path.display()))?;
        product.validate()?;
        Ok(product)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.pixel_pitch.is_finite() && self.pixel_pitch > 0.0) {
            return Err(PlanError::InvalidPixelPitch(self.pixel_pitch));
        }
        Ok(())
    }

    pub fn pixels_per_cabinet(&self) -> u64 {
        self.resolution.width as u64 * self.resolution.height as u64
    }

    /// `width*columns * height*rows`, saturating at `u64::MAX`.
    pub fn total_pixels(&self, grid: GridSize) -> u64 {
        (self.resolution.width as u64 * grid.columns as u64)
            .saturating_mul(self.resolution.height as u64 * grid.rows as u64)
    }

    pub fn cabinet_size_mm(&self) -> CabinetSize {
        self.cabinet_mm.unwrap_or(CabinetSize {
            width: self.resolution.width as f64 * self.pixel_pitch,
            height: self.resolution.height as f64 * self.pixel_pitch,
        })
    }

    /// Overall wall size in millimetres.
    pub fn wall_size_mm(&self, grid: GridSize) -> CabinetSize {
        let cabinet = self.cabinet_size_mm();
        CabinetSize {
            width: cabinet.width * grid.columns as f64,
            height: cabinet.height * grid.rows as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_totals() {
        let product = Product::new("P2.5", 200, 1000, 2.5);
        assert_eq!(product.pixels_per_cabinet(), 200_000);
        assert_eq!(product.total_pixels(GridSize::new(5, 1)), 1_000_000);
        assert_eq!(product.total_pixels(GridSize::new(0, 3)), 0);
    }

    #[test]
    fn huge_walls_saturate_pixel_total() {
        let product = Product::new("huge", u32::MAX, u32::MAX, 1.0);
        let grid = GridSize::new(u32::MAX, u32::MAX);
        assert_eq!(product.total_pixels(grid), u64::MAX);
    }

    #[test]
    fn size_derived_from_pitch() {
        let product = Product::new("P2.5", 200, 200, 2.5);
        assert_eq!(product.cabinet_size_mm(), CabinetSize { width: 500.0, height: 500.0 });
        let wall = product.wall_size_mm(GridSize::new(4, 2));
        assert_eq!(wall.width, 2000.0);
        assert_eq!(wall.height, 1000.0);
    }

    #[test]
    fn explicit_size_wins() {
        let mut product = Product::new("P3.9", 128, 128, 3.9);
        product.cabinet_mm = Some(CabinetSize {
            width: 500.0,
            height: 500.0,
        });
        assert_eq!(product.cabinet_size_mm().width, 500.0);
    }

    #[test]
    fn pitch_must_be_positive() {
        assert_eq!(
            Product::new("bad", 10, 10, 0.0).validate(),
            Err(PlanError::InvalidPixelPitch(0.0))
        );
        assert!(Product::new("bad", 10, 10, f64::NAN).validate().is_err());
    }

    #[test]
    fn load_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.yaml");
        std::fs::write(
            &path,
            "name: Indoor 1.5\nresolution:\n  width: 320\n  height: 180\npixel_pitch: 1.5625\n",
        )
        .unwrap();
        let product = Product::load_from(&path).unwrap();
        assert_eq!(product.resolution.width, 320);
        assert_eq!(product.pixels_per_cabinet(), 57_600);
        assert!(product.cabinet_mm.is_none());
    }

    #[test]
    fn load_rejects_bad_pitch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.yaml");
        std::fs::write(
            &path,
            "name: Broken\nresolution:\n  width: 1\n  height: 1\npixel_pitch: -2\n",
        )
        .unwrap();
        let err = Product::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Pixel pitch"));
    }
}
