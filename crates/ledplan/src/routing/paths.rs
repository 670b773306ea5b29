//! Path builders for each kind of cable.

use tracing::{debug, warn};

use super::corridors::Corridors;
use super::layout::Layout;
use super::search::{Obstacles, find_backup_route};
use super::types::{CablePath, Handle, Point};
use crate::traversal::Cabinet;

/// Feed cable from hub or power source `index` into the first cabinet of its
/// group.
///
/// The first feed steps straight across to the top-left cabinet. Later feeds
/// drop down beside the grid, run along the gap above the target row and enter
/// the cabinet from the top, so they never cut across a row of cabinets.
pub fn feed_link(layout: &Layout<'_>, index: usize, target: &Cabinet) -> CablePath {
    let from = layout.feed_handle(index, Handle::Right);
    if index == 0 {
        return CablePath::step(from, layout.cabinet_handle(target, Handle::Left));
    }
    let turn_x = layout.feed_turn_x();
    let gap_y = layout.gap_above(target);
    let top = layout.cabinet_handle(target, Handle::Top);
    CablePath::polyline(vec![
        from,
        Point::new(turn_x, from.y),
        Point::new(turn_x, gap_y),
        Point::new(top.x, gap_y),
        top,
    ])
}

/// Data cable between serpentine neighbours `from` → `to`.
pub fn chain_link(layout: &Layout<'_>, from: &Cabinet, to: &Cabinet) -> CablePath {
    if from.row != to.row {
        // Serpentine row changes happen at a grid edge, one cabinet above the other.
        return CablePath::straight(
            layout.cabinet_handle(from, Handle::Bottom),
            layout.cabinet_handle(to, Handle::Top),
        );
    }
    if to.column > from.column {
        CablePath::step(
            layout.cabinet_handle(from, Handle::Right),
            layout.cabinet_handle(to, Handle::Left),
        )
    } else {
        CablePath::step(
            layout.cabinet_handle(from, Handle::Left),
            layout.cabinet_handle(to, Handle::Right),
        )
    }
}

/// Backup cable from backup hub `hub_index` into the last cabinet of its group,
/// routed through the hub's corridor without touching primary cabling.
///
/// Cabinets on the right edge are entered from the side. Anything deeper in
/// the grid is approached along the gap below the cabinet, then the gap
/// above it. Odd rows are always free below; an even-row cabinet whose group
/// boundary sits next to a row change may have both gaps blocked, and then
/// the route is searched through the channels between cabinets.
pub fn backup_link(
    layout: &Layout<'_>,
    corridors: &Corridors,
    obstacles: &Obstacles,
    hub_index: usize,
    last: &Cabinet,
) -> CablePath {
    let from = layout.backup_hub_handle(hub_index, Handle::Left);
    let corridor_x = corridors.x_for(hub_index);

    let direct = if layout.is_right_edge(last) {
        let side = layout.cabinet_handle(last, Handle::Right);
        vec![CablePath::polyline(vec![
            from,
            Point::new(corridor_x, from.y),
            Point::new(corridor_x, side.y),
            side,
        ])]
    } else {
        vec![
            corridor_approach(layout, from, corridor_x, last, Handle::Bottom),
            corridor_approach(layout, from, corridor_x, last, Handle::Top),
        ]
    };
    if let Some(path) = direct.iter().find(|p| obstacles.path_is_clear(&p.points)) {
        return path.clone();
    }

    if let Some(points) = find_backup_route(layout, obstacles, from, corridor_x, last) {
        debug!(hub = hub_index + 1, cabinet = last.id, "Backup cable detoured");
        return CablePath::polyline(points);
    }
    warn!(
        hub = hub_index + 1,
        cabinet = last.id,
        "No clear backup route; backup cable crosses primary cabling"
    );
    direct
        .into_iter()
        .next()
        .unwrap_or_else(|| CablePath::straight(from, layout.cabinet_center(last)))
}

/// Corridor, then along the gap on the `entry` side, then into that handle.
fn corridor_approach(
    layout: &Layout<'_>,
    from: Point,
    corridor_x: f64,
    last: &Cabinet,
    entry: Handle,
) -> CablePath {
    let handle = layout.cabinet_handle(last, entry);
    let lane_y = match entry {
        Handle::Top => handle.y - layout.config.backup_offset,
        _ => handle.y + layout.config.backup_offset,
    };
    CablePath::polyline(vec![
        from,
        Point::new(corridor_x, from.y),
        Point::new(corridor_x, lane_y),
        Point::new(handle.x, lane_y),
        handle,
    ])
}

/// Power cable between row-major neighbours `from` → `to`.
///
/// A run that continues onto the next row returns along the gap below the
/// finished row to the first column.
pub fn power_chain_link(layout: &Layout<'_>, from: &Cabinet, to: &Cabinet) -> CablePath {
    if from.row == to.row {
        return CablePath::step(
            layout.cabinet_handle(from, Handle::Right),
            layout.cabinet_handle(to, Handle::Left),
        );
    }
    let start = layout.cabinet_handle(from, Handle::Bottom);
    let end = layout.cabinet_handle(to, Handle::Top);
    let gap_y = layout.gap_below(from);
    CablePath::polyline(vec![
        start,
        Point::new(start.x, gap_y),
        Point::new(end.x, gap_y),
        end,
    ])
}
