//! Splitting a traversal into contiguous cabinet groups.
//!
//! Data hubs are bounded by pixel load per port; power runs by a fixed cabinet
//! count. Both produce [`Group`]s that are contiguous in traversal order,
//! pairwise disjoint and together cover the whole traversal.

pub mod hub;
pub mod power;

use serde::Serialize;

use crate::traversal::{Cabinet, CabinetId};

pub use hub::{cut_hubs, partition_hubs};
pub use power::{PitchRule, PowerRunPolicy, partition_power_runs};

/// A contiguous run of cabinets served by one hub port or one power feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// 0-based group index, increasing with traversal position.
    pub index: usize,
    pub cabinets: Vec<Cabinet>,
}

impl Group {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            cabinets: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cabinets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cabinets.is_empty()
    }

    /// The cabinet the group's feed cable enters.
    pub fn first_cabinet(&self) -> Option<&Cabinet> {
        self.cabinets.first()
    }

    /// The cabinet at the far end of the chain; backup feeds enter here.
    pub fn last_cabinet(&self) -> Option<&Cabinet> {
        self.cabinets.last()
    }

    pub fn ids(&self) -> Vec<CabinetId> {
        self.cabinets.iter().map(|c| c.id).collect()
    }

    pub fn contains(&self, id: CabinetId) -> bool {
        self.cabinets.iter().any(|c| c.id == id)
    }
}
