//! Obstacle-aware routing for backup cables.
//!
//! Backup cables must never touch primary cabling. The direct corridor
//! approaches in `paths.rs` cover most cabinets; when both are blocked, a
//! cheapest-path search over the free channels between cabinets finds a way in.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use super::layout::Layout;
use super::types::{Handle, Point, WiringEdge};
use crate::traversal::{Cabinet, row_major};

const EPS: f64 = 1e-6;

/// Primary cable segments and node bodies a backup cable keeps clear of.
#[derive(Debug, Clone, Default)]
pub struct Obstacles {
    segments: Vec<(Point, Point)>,
    /// Cabinets, hubs and backup hubs as (top-left, bottom-right) corners.
    boxes: Vec<(Point, Point)>,
}

impl Obstacles {
    /// Obstacles for a grid served by `hubs` hubs and their backup hubs.
    pub fn new<'e>(
        layout: &Layout<'_>,
        hubs: usize,
        primary: impl IntoIterator<Item = &'e WiringEdge>,
    ) -> Self {
        let segments = primary
            .into_iter()
            .flat_map(|edge| edge.path.points.windows(2).map(|w| (w[0], w[1])))
            .collect();

        let config = layout.config;
        let cabinet_box = |c: &Cabinet| {
            span_box(layout.cabinet_center(c), config.cabinet_width, config.cabinet_height)
        };
        let mut boxes: Vec<(Point, Point)> =
            row_major(layout.grid).iter().map(cabinet_box).collect();
        for index in 0..hubs {
            boxes.push(span_box(layout.feed_center(index), config.hub_size, config.hub_size));
            boxes.push(span_box(
                layout.backup_hub_center(index),
                config.hub_size,
                config.hub_size,
            ));
        }
        Self { segments, boxes }
    }

    /// True when the segment from `a` to `b` touches no primary cable and does not
    /// pass through a cabinet or hub. Running along a box's edge is allowed.
    pub fn is_clear(&self, a: Point, b: Point) -> bool {
        !self.segments.iter().any(|&(p, q)| touches(a, b, p, q))
            && !self.boxes.iter().any(|&(lo, hi)| enters(a, b, lo, hi))
    }

    pub fn path_is_clear(&self, points: &[Point]) -> bool {
        points.windows(2).all(|w| self.is_clear(w[0], w[1]))
    }

    /// Distinct x and y coordinates every obstacle lies on, sorted.
    fn coordinates(&self) -> (Vec<f64>, Vec<f64>) {
        let corners = self
            .segments
            .iter()
            .chain(&self.boxes)
            .flat_map(|&(p, q)| [p, q]);
        let (mut xs, mut ys): (Vec<f64>, Vec<f64>) = corners.map(|p| (p.x, p.y)).unzip();
        sort_dedup(&mut xs);
        sort_dedup(&mut ys);
        (xs, ys)
    }
}

fn span_box(center: Point, width: f64, height: f64) -> (Point, Point) {
    (
        Point::new(center.x - width / 2.0, center.y - height / 2.0),
        Point::new(center.x + width / 2.0, center.y + height / 2.0),
    )
}

fn sort_dedup(values: &mut Vec<f64>) {
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| (*a - *b).abs() < EPS);
}

fn span(a: f64, b: f64) -> (f64, f64) {
    (a.min(b), a.max(b))
}

/// Axis-aligned segments share a point exactly when their extents overlap on
/// both axes.
fn touches(a: Point, b: Point, p: Point, q: Point) -> bool {
    let (ax0, ax1) = span(a.x, b.x);
    let (ay0, ay1) = span(a.y, b.y);
    let (px0, px1) = span(p.x, q.x);
    let (py0, py1) = span(p.y, q.y);
    ax0 <= px1 + EPS && px0 <= ax1 + EPS && ay0 <= py1 + EPS && py0 <= ay1 + EPS
}

fn enters(a: Point, b: Point, lo: Point, hi: Point) -> bool {
    let (x0, x1) = span(a.x, b.x);
    let (y0, y1) = span(a.y, b.y);
    x0 < hi.x - EPS && x1 > lo.x + EPS && y0 < hi.y - EPS && y1 > lo.y + EPS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn between(a: Point, b: Point) -> Self {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        if dx.abs() >= dy.abs() {
            if dx < 0.0 { Self::Left } else { Self::Right }
        } else if dy < 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StateKey {
    node: usize,
    direction: Direction,
}

/// Priority queue entry. `BinaryHeap` is a max-heap, so costs compare
/// reversed; node and direction break ties deterministically.
#[derive(Debug)]
struct PqEntry {
    f_cost: f64,
    g_cost: f64,
    key: StateKey,
}

impl PartialEq for PqEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PqEntry {}

impl Ord for PqEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .total_cmp(&self.f_cost)
            .then_with(|| other.g_cost.total_cmp(&self.g_cost))
            .then(other.key.node.cmp(&self.key.node))
            .then(other.key.direction.cmp(&self.key.direction))
    }
}

impl PartialOrd for PqEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Channel grid around the cabinets plus the target's four handles.
///
/// Vertical channels run through the corridor, every column gap and every
/// cabinet centre. Horizontal channels run through the start, the backup
/// lanes above and below each row, each row centre and one lane outside the
/// grid on either side. A refined grid adds a channel midway between every
/// pair of neighbouring obstacle coordinates and one beyond the outermost, so
/// every free pocket of the canvas has a channel through it.
struct ChannelGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Grid nodes first (row-major over `ys` × `xs`), then the handles.
    points: Vec<Point>,
    /// (grid node, handle node) pairs where a cable may drop into the target.
    approaches: Vec<(usize, usize)>,
}

impl ChannelGrid {
    fn new(
        layout: &Layout<'_>,
        obstacles: &Obstacles,
        start: Point,
        target: &Cabinet,
        refined: bool,
    ) -> Self {
        let config = layout.config;
        let pitch_x = config.pitch_x();
        let pitch_y = config.pitch_y();
        let offset = config.backup_offset;

        let mut xs = vec![start.x];
        for column in 0..=layout.grid.columns {
            xs.push(column as f64 * pitch_x - config.column_gap / 2.0);
        }
        for column in 0..layout.grid.columns {
            xs.push(column as f64 * pitch_x + config.cabinet_width / 2.0);
        }

        let mut ys = vec![start.y];
        for row in 0..layout.grid.rows {
            let top = row as f64 * pitch_y;
            ys.extend([
                top - offset,
                top + config.cabinet_height / 2.0,
                top + config.cabinet_height + offset,
            ]);
        }
        let grid_bottom = layout.grid.rows as f64 * pitch_y - config.row_gap;
        ys.push(-config.row_gap - offset);
        ys.push(grid_bottom + config.row_gap + offset);

        if refined {
            let (obstacle_xs, obstacle_ys) = obstacles.coordinates();
            let margin = config.hub_size;
            for (axis, coords) in [(&mut xs, obstacle_xs), (&mut ys, obstacle_ys)] {
                axis.extend(coords.windows(2).map(|w| (w[0] + w[1]) / 2.0));
                if let (Some(first), Some(last)) = (coords.first(), coords.last()) {
                    axis.extend([first - margin, last + margin]);
                }
            }
        }
        sort_dedup(&mut xs);
        sort_dedup(&mut ys);

        let mut points: Vec<Point> = ys
            .iter()
            .flat_map(|&y| xs.iter().map(move |&x| Point::new(x, y)))
            .collect();
        let mut grid = Self {
            xs,
            ys,
            points: Vec::new(),
            approaches: Vec::new(),
        };

        let center = layout.cabinet_center(target);
        let left_gap = target.column as f64 * pitch_x - config.column_gap / 2.0;
        let right_gap = left_gap + pitch_x;
        let top = layout.cabinet_handle(target, Handle::Top).y;
        let bottom = layout.cabinet_handle(target, Handle::Bottom).y;
        let handles = [
            (Handle::Top, Point::new(center.x, top - offset)),
            (Handle::Bottom, Point::new(center.x, bottom + offset)),
            (Handle::Right, Point::new(right_gap, center.y)),
            (Handle::Left, Point::new(left_gap, center.y)),
        ];
        for (handle, approach) in handles {
            if let Some(node) = grid.index_of(approach) {
                grid.approaches.push((node, points.len()));
                points.push(layout.cabinet_handle(target, handle));
            }
        }
        grid.points = points;
        grid
    }

    fn grid_len(&self) -> usize {
        self.xs.len() * self.ys.len()
    }

    fn index_of(&self, p: Point) -> Option<usize> {
        let ix = self.xs.iter().position(|&x| (x - p.x).abs() < EPS)?;
        let iy = self.ys.iter().position(|&y| (y - p.y).abs() < EPS)?;
        Some(iy * self.xs.len() + ix)
    }

    fn is_handle(&self, node: usize) -> bool {
        node >= self.grid_len()
    }

    fn neighbors(&self, node: usize) -> Vec<usize> {
        if self.is_handle(node) {
            return Vec::new();
        }
        let nx = self.xs.len();
        let (ix, iy) = (node % nx, node / nx);
        let mut out = Vec::with_capacity(5);
        if ix > 0 {
            out.push(node - 1);
        }
        if ix + 1 < nx {
            out.push(node + 1);
        }
        if iy > 0 {
            out.push(node - nx);
        }
        if iy + 1 < self.ys.len() {
            out.push(node + nx);
        }
        out.extend(
            self.approaches
                .iter()
                .filter(|(from, _)| *from == node)
                .map(|(_, to)| *to),
        );
        out
    }
}

fn manhattan(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Find a backup route from the backup hub handle `from` into any free handle
/// of `target`, leaving the hub through the corridor at `corridor_x`.
///
/// The route's first turn is always in the corridor. Cost is Manhattan length
/// plus one row pitch per bend. The regular channels are searched first and
/// the refined grid only when they are all blocked. Returns `None` when no
/// clear route exists.
pub fn find_backup_route(
    layout: &Layout<'_>,
    obstacles: &Obstacles,
    from: Point,
    corridor_x: f64,
    target: &Cabinet,
) -> Option<Vec<Point>> {
    let start_point = Point::new(corridor_x, from.y);
    if !obstacles.is_clear(from, start_point) {
        return None;
    }
    [false, true].into_iter().find_map(|refined| {
        let grid = ChannelGrid::new(layout, obstacles, start_point, target, refined);
        search(&grid, obstacles, layout.config.pitch_y(), from, start_point)
    })
}

fn search(
    grid: &ChannelGrid,
    obstacles: &Obstacles,
    bend_cost: f64,
    from: Point,
    start_point: Point,
) -> Option<Vec<Point>> {
    let start = grid.index_of(start_point)?;
    let goals: Vec<Point> = grid.approaches.iter().map(|&(_, h)| grid.points[h]).collect();
    if goals.is_empty() {
        return None;
    }
    let heuristic = |p: Point| {
        goals
            .iter()
            .map(|&g| manhattan(p, g))
            .fold(f64::INFINITY, f64::min)
    };
    let start_key = StateKey {
        node: start,
        direction: Direction::Left,
    };
    let mut open = BinaryHeap::new();
    let mut best_g: HashMap<StateKey, f64> = HashMap::new();
    let mut came_from: HashMap<StateKey, StateKey> = HashMap::new();
    best_g.insert(start_key, 0.0);
    open.push(PqEntry {
        f_cost: heuristic(start_point),
        g_cost: 0.0,
        key: start_key,
    });

    while let Some(entry) = open.pop() {
        let current = entry.key;
        if best_g.get(&current).is_some_and(|&g| entry.g_cost > g + EPS) {
            continue;
        }
        if grid.is_handle(current.node) {
            return Some(reconstruct_route(grid, &came_from, current, from));
        }

        let here = grid.points[current.node];
        for next in grid.neighbors(current.node) {
            let there = grid.points[next];
            let direction = Direction::between(here, there);
            if direction == current.direction.opposite() {
                continue;
            }
            if current.node == start && !direction.is_vertical() {
                continue;
            }
            if !obstacles.is_clear(here, there) {
                continue;
            }

            let turn = if direction == current.direction { 0.0 } else { bend_cost };
            let g_cost = entry.g_cost + manhattan(here, there) + turn;
            let key = StateKey { node: next, direction };
            if best_g.get(&key).is_some_and(|&g| g <= g_cost) {
                continue;
            }
            best_g.insert(key, g_cost);
            came_from.insert(key, current);
            open.push(PqEntry {
                f_cost: g_cost + heuristic(there),
                g_cost,
                key,
            });
        }
    }
    None
}

fn reconstruct_route(
    grid: &ChannelGrid,
    came_from: &HashMap<StateKey, StateKey>,
    end: StateKey,
    from: Point,
) -> Vec<Point> {
    let mut points = vec![grid.points[end.node]];
    let mut current = end;
    while let Some(&prev) = came_from.get(&current) {
        points.push(grid.points[prev.node]);
        current = prev;
    }
    points.push(from);
    points.reverse();
    points
}
