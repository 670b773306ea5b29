use super::layout::Layout;

/// Reserved vertical lanes right of the grid that carry backup cabling.
///
/// Hub `i` uses lane `i % count`, so lanes are reused cyclically once there
/// are more hubs than lanes.
#[derive(Debug, Clone, Default)]
pub struct Corridors {
    xs: Vec<f64>,
}

impl Corridors {
    pub fn new(layout: &Layout<'_>) -> Self {
        Self {
            xs: (0..layout.config.corridor_count)
                .map(|lane| layout.corridor_x(lane))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn lane_for(&self, hub_index: usize) -> usize {
        if self.xs.is_empty() {
            return 0;
        }
        hub_index % self.xs.len()
    }

    /// x coordinate of the lane `hub_index` routes through.
    pub fn x_for(&self, hub_index: usize) -> f64 {
        self.xs
            .get(self.lane_for(hub_index))
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::LayoutConfig;
    use crate::traversal::GridSize;

    #[test]
    fn lanes_cycle_after_count() {
        let config = LayoutConfig::default();
        let layout = Layout::new(&config, GridSize::new(3, 3));
        let corridors = Corridors::new(&layout);
        assert_eq!(corridors.len(), 4);

        let xs: Vec<f64> = (0..6).map(|hub| corridors.x_for(hub)).collect();
        assert_eq!(xs[0], xs[4]);
        assert_eq!(xs[1], xs[5]);
        assert!(xs[0] < xs[1] && xs[1] < xs[2] && xs[2] < xs[3]);
        assert_eq!(corridors.lane_for(4), 0);
        assert_eq!(corridors.lane_for(3), 3);
    }

    #[test]
    fn single_corridor_is_shared() {
        let config = LayoutConfig {
            corridor_count: 1,
            ..LayoutConfig::default()
        };
        let layout = Layout::new(&config, GridSize::new(2, 2));
        let corridors = Corridors::new(&layout);
        assert_eq!(corridors.lane_for(0), 0);
        assert_eq!(corridors.lane_for(7), 0);
    }
}
