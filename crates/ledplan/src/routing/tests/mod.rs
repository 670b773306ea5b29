
use super::types::{EdgeKind, NodeId, WiringGraph};
use super::{Layout, LayoutConfig, route_data, route_power};
use crate::partition::{Group, partition_hubs, partition_power_runs};
use crate::selector::PIXEL_LIMIT_PER_PORT;
use crate::traversal::{GridSize, row_major, serpentine};

/// Hub groups for a grid, partitioned with the standard per-port limit.
fn hub_groups(columns: u32, rows: u32, pixels_per_cabinet: u64) -> Vec<Group> {
    let order = serpentine(GridSize::new(columns, rows));
    partition_hubs(&order, pixels_per_cabinet, PIXEL_LIMIT_PER_PORT)
}

/// Route data cabling on the default layout.
fn data_graph(columns: u32, rows: u32, pixels_per_cabinet: u64, redundancy: bool) -> WiringGraph {
    let config = LayoutConfig::default();
    let grid = GridSize::new(columns, rows);
    let groups = hub_groups(columns, rows, pixels_per_cabinet);
    route_data(&Layout::new(&config, grid), &groups, redundancy)
}

/// Route power cabling on the default layout.
fn power_graph(columns: u32, rows: u32, run_length: usize) -> WiringGraph {
    let config = LayoutConfig::default();
    let grid = GridSize::new(columns, rows);
    let runs = partition_power_runs(&row_major(grid), run_length);
    route_power(&Layout::new(&config, grid), &runs)
}

/// Serialized path of the first edge of `kind` from `source` to `target`.
fn path_between(graph: &WiringGraph, kind: EdgeKind, source: NodeId, target: NodeId) -> String {
    let edge = graph
        .edges_of(kind)
        .find(|e| e.source == source && e.target == target)
        .unwrap_or_else(|| panic!("no {kind:?} edge {source} -> {target}"));
    super::serialize::path_to_string(&edge.path)
}

/// Hub index owning a cabinet.
fn group_of(groups: &[Group], id: u32) -> usize {
    groups
        .iter()
        .find(|g| g.contains(id))
        .map(|g| g.index)
        .unwrap_or_else(|| panic!("cabinet {id} not in any group"))
}

/// Assert every edge in the graph is routed with axis-aligned segments only.
fn assert_orthogonal(graph: &WiringGraph) {
    for edge in &graph.edges {
        assert!(
            edge.path.is_orthogonal(),
            "{} -> {} is not orthogonal: {:?}",
            edge.source,
            edge.target,
            edge.path.points
        );
        assert!(edge.path.points.len() >= 2);
    }
}
