pub mod corridors;
pub mod layout;
pub mod paths;
pub mod search;
pub mod serialize;
pub mod types;

#[cfg(test)]
mod tests;

use tracing::debug;

use corridors::Corridors;
use paths::{backup_link, chain_link, feed_link, power_chain_link};
use search::Obstacles;
use types::{EdgeKind, LineStyle, NodeId, WiringEdge, WiringGraph, WiringNode};

use crate::partition::Group;
use crate::traversal::Cabinet;

pub use layout::{Layout, LayoutConfig};

/// Route the data cabling for a set of hub groups.
///
/// Each group gets a hub feeding its first cabinet and a chain following the
/// serpentine through the rest. Chains stop at group boundaries. With
/// `redundancy`, every group also gets a backup hub feeding its last cabinet
/// through a corridor, and a dashed backup chain walking the group in reverse.
/// Backup hub links are routed after all primary cabling so they can keep
/// clear of it.
pub fn route_data(layout: &Layout<'_>, hubs: &[Group], redundancy: bool) -> WiringGraph {
    let mut graph = WiringGraph::default();
    if layout.grid.is_empty() || hubs.is_empty() {
        return graph;
    }

    let primary: Vec<(&Group, Cabinet, WiringEdge, Vec<WiringEdge>)> = hubs
        .iter()
        .filter_map(|group| {
            let (first, last) = (group.first_cabinet()?, group.last_cabinet()?);
            let feed = WiringEdge {
                source: NodeId::Hub(group.index),
                target: NodeId::Cabinet(first.id),
                kind: EdgeKind::HubLink,
                path: feed_link(layout, group.index, first),
                color_key: group.index,
                style: LineStyle::Solid,
            };
            let chain = group
                .cabinets
                .windows(2)
                .map(|pair| WiringEdge {
                    source: NodeId::Cabinet(pair[0].id),
                    target: NodeId::Cabinet(pair[1].id),
                    kind: EdgeKind::Chain,
                    path: chain_link(layout, &pair[0], &pair[1]),
                    color_key: group.index,
                    style: LineStyle::Solid,
                })
                .collect();
            Some((group, *last, feed, chain))
        })
        .collect();

    let corridors = Corridors::new(layout);
    let obstacles = if redundancy {
        Obstacles::new(
            layout,
            primary.len(),
            primary
                .iter()
                .flat_map(|(_, _, feed, chain)| std::iter::once(feed).chain(chain)),
        )
    } else {
        Obstacles::default()
    };

    for (group, last, feed, chain) in primary {
        graph.nodes.push(WiringNode {
            id: NodeId::Hub(group.index),
            position: layout.feed_center(group.index),
            color_key: group.index,
            cell: None,
        });
        push_cabinets(&mut graph, layout, group);
        graph.edges.push(feed);

        if redundancy {
            graph.nodes.push(WiringNode {
                id: NodeId::BackupHub(group.index),
                position: layout.backup_hub_center(group.index),
                color_key: group.index,
                cell: None,
            });
            graph.edges.extend(chain.iter().cloned());
            graph.edges.push(WiringEdge {
                source: NodeId::BackupHub(group.index),
                target: NodeId::Cabinet(last.id),
                kind: EdgeKind::BackupHubLink,
                path: backup_link(layout, &corridors, &obstacles, group.index, &last),
                color_key: group.index,
                style: LineStyle::Dashed,
            });
            graph.edges.extend(chain.iter().rev().map(|e| WiringEdge {
                source: e.target,
                target: e.source,
                kind: EdgeKind::BackupChain,
                path: e.path.reversed(),
                color_key: e.color_key,
                style: LineStyle::Dashed,
            }));
        } else {
            graph.edges.extend(chain);
        }
    }

    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        redundancy,
        "Routed data cabling"
    );
    graph
}

/// Route the power cabling for a set of runs: one source per run feeding its
/// first cabinet, then a chain in row-major order.
pub fn route_power(layout: &Layout<'_>, runs: &[Group]) -> WiringGraph {
    let mut graph = WiringGraph::default();
    if layout.grid.is_empty() || runs.is_empty() {
        return graph;
    }

    for run in runs {
        let Some(first) = run.first_cabinet() else {
            continue;
        };

        graph.nodes.push(WiringNode {
            id: NodeId::PowerSource(run.index),
            position: layout.feed_center(run.index),
            color_key: run.index,
            cell: None,
        });
        push_cabinets(&mut graph, layout, run);

        graph.edges.push(WiringEdge {
            source: NodeId::PowerSource(run.index),
            target: NodeId::Cabinet(first.id),
            kind: EdgeKind::PowerFeed,
            path: feed_link(layout, run.index, first),
            color_key: run.index,
            style: LineStyle::Solid,
        });
        graph
            .edges
            .extend(run.cabinets.windows(2).map(|pair| WiringEdge {
                source: NodeId::Cabinet(pair[0].id),
                target: NodeId::Cabinet(pair[1].id),
                kind: EdgeKind::PowerChain,
                path: power_chain_link(layout, &pair[0], &pair[1]),
                color_key: run.index,
                style: LineStyle::Solid,
            }));
    }

    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Routed power cabling"
    );
    graph
}

fn push_cabinets(graph: &mut WiringGraph, layout: &Layout<'_>, group: &Group) {
    graph
        .nodes
        .extend(group.cabinets.iter().map(|c| WiringNode {
            id: NodeId::Cabinet(c.id),
            position: layout.cabinet_center(c),
            color_key: group.index,
            cell: Some((c.column, c.row)),
        }));
}
