use tracing::{debug, trace};

use super::Group;
use crate::traversal::Cabinet;

/// Greedy cut of `order` into hub groups without balancing.
///
/// A new group starts whenever adding the next cabinet would push the running
/// pixel total over `pixel_limit_per_port`. The limit is only checked when
/// closing a group, so a cabinet that alone exceeds it still gets a group of
/// its own.
pub fn cut_hubs(
    order: &[Cabinet],
    pixels_per_cabinet: u64,
    pixel_limit_per_port: u64,
) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut current = Group::new(0);
    let mut cumulative: u64 = 0;

    for cabinet in order {
        let next_total = cumulative.saturating_add(pixels_per_cabinet);
        if !current.is_empty() && next_total > pixel_limit_per_port {
            let next = Group::new(current.index + 1);
            groups.push(std::mem::replace(&mut current, next));
            cumulative = 0;
        }
        cumulative = cumulative.saturating_add(pixels_per_cabinet);
        current.cabinets.push(*cabinet);
    }

    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Cut `order` into hub groups, then even out adjacent group boundaries.
pub fn partition_hubs(
    order: &[Cabinet],
    pixels_per_cabinet: u64,
    pixel_limit_per_port: u64,
) -> Vec<Group> {
    let mut groups = cut_hubs(order, pixels_per_cabinet, pixel_limit_per_port);
    if groups.len() > 1 {
        balance(&mut groups, pixels_per_cabinet, pixel_limit_per_port);
    }
    debug!(
        cabinets = order.len(),
        hubs = groups.len(),
        "Partitioned data hubs"
    );
    groups
}

/// One left-to-right sweep over adjacent pairs, moving tail cabinets of the
/// left group into the head of an under-filled right group.
///
/// Cabinets only ever move rightwards and a right group never grows past
/// `floor(limit / pixels_per_cabinet)`. Each pair is visited once, so a shift
/// does not propagate further left.
fn balance(groups: &mut [Group], pixels_per_cabinet: u64, pixel_limit_per_port: u64) {
    if pixels_per_cabinet == 0 {
        return;
    }
    let max_per_hub = (pixel_limit_per_port / pixels_per_cabinet) as usize;

    for i in 0..groups.len().saturating_sub(1) {
        let (head, tail) = groups.split_at_mut(i + 1);
        let left = &mut head[i];
        let right = &mut tail[0];

        let desired_right = max_per_hub.min((left.len() + right.len()).div_ceil(2));
        if right.len() >= desired_right || left.len() <= 1 {
            continue;
        }

        let shift = (desired_right - right.len()).min(left.len() - 1);
        let moved = left.cabinets.split_off(left.len() - shift);
        trace!(from = left.index, to = right.index, shift, "Shifted hub boundary");
        right.cabinets.splice(0..0, moved);
    }
}
