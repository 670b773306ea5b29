use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Group;
use crate::error::{PlanError, Result};
use crate::traversal::Cabinet;

const PITCH_TOLERANCE: f64 = 1e-6;

/// Cabinets per power run for a set of pixel pitches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchRule {
    /// Pixel pitches in millimetres.
    pub pitches: Vec<f64>,
    pub max_cabinets: usize,
}

/// Cable-run length policy, keyed by pixel pitch.
///
/// Fine-pitch cabinets are small and light, so many share a feed; large
/// outdoor pitches draw more per cabinet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerRunPolicy {
    pub rules: Vec<PitchRule>,
    /// Run length for pitches no rule mentions.
    pub default_run_length: usize,
}

impl Default for PowerRunPolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                PitchRule {
                    pitches: vec![0.9, 0.9375, 1.25, 1.5, 1.5625, 1.8, 2.5],
                    max_cabinets: 25,
                },
                PitchRule {
                    pitches: vec![3.0],
                    max_cabinets: 35,
                },
                PitchRule {
                    pitches: vec![4.0, 6.6, 10.0],
                    max_cabinets: 4,
                },
            ],
            default_run_length: 25,
        }
    }
}

impl PowerRunPolicy {
    /// Maximum cabinets on one run for `pixel_pitch`. Unknown pitches get the
    /// default length.
    pub fn max_cabinets_for(&self, pixel_pitch: f64) -> usize {
        self.rules
            .iter()
            .find(|rule| {
                rule.pitches
                    .iter()
                    .any(|p| (p - pixel_pitch).abs() < PITCH_TOLERANCE)
            })
            .map_or(self.default_run_length, |rule| rule.max_cabinets)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_run_length == 0 || self.rules.iter().any(|r| r.max_cabinets == 0) {
            return Err(PlanError::ZeroRunLength);
        }
        Ok(())
    }
}

/// Cut `order` into runs of at most `max_cabinets_per_run` cabinets.
///
/// Boundaries fall at fixed intervals; unlike data hubs they are never
/// rebalanced.
pub fn partition_power_runs(order: &[Cabinet], max_cabinets_per_run: usize) -> Vec<Group> {
    let runs: Vec<Group> = order
        .chunks(max_cabinets_per_run.max(1))
        .enumerate()
        .map(|(index, chunk)| Group {
            index,
            cabinets: chunk.to_vec(),
        })
        .collect();
    debug!(
        cabinets = order.len(),
        runs = runs.len(),
        max_cabinets_per_run,
        "Partitioned power runs"
    );
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::test_support::assert_valid_partition;
    use crate::traversal::{GridSize, row_major};

    #[test]
    fn pitch_lookup() {
        let policy = PowerRunPolicy::default();
        assert_eq!(policy.max_cabinets_for(0.9375), 25);
        assert_eq!(policy.max_cabinets_for(2.5), 25);
        assert_eq!(policy.max_cabinets_for(3.0), 35);
        assert_eq!(policy.max_cabinets_for(4.0), 4);
        assert_eq!(policy.max_cabinets_for(6.6), 4);
        assert_eq!(policy.max_cabinets_for(10.0), 4);
    }

    #[test]
    fn unknown_pitch_uses_default() {
        let policy = PowerRunPolicy::default();
        assert_eq!(policy.max_cabinets_for(2.9), 25);
        assert_eq!(policy.max_cabinets_for(16.0), 25);
    }

    #[test]
    fn pitch_four_runs_of_four_regardless_of_size() {
        let policy = PowerRunPolicy::default();
        let order = row_major(GridSize::new(5, 2));
        let runs = partition_power_runs(&order, policy.max_cabinets_for(4.0));
        assert_eq!(
            runs.iter().map(Group::len).collect::<Vec<_>>(),
            vec![4, 4, 2]
        );
        assert_valid_partition(&order, &runs);
        // Row-major: the second run wraps from (4,0) to (0,1).
        assert_eq!(runs[1].ids(), vec![5, 6, 7, 8]);
        assert_eq!(runs[1].cabinets[0].column, 4);
        assert_eq!(runs[1].cabinets[1].column, 0);
    }

    #[test]
    fn empty_grid_has_no_runs() {
        assert!(partition_power_runs(&[], 25).is_empty());
    }

    #[test]
    fn zero_run_length_is_rejected() {
        let policy = PowerRunPolicy {
            rules: vec![PitchRule {
                pitches: vec![1.5],
                max_cabinets: 0,
            }],
            default_run_length: 25,
        };
        assert_eq!(policy.validate(), Err(PlanError::ZeroRunLength));
        assert!(PowerRunPolicy::default().validate().is_ok());
    }
}
