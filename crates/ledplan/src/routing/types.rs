use std::fmt;

use serde::Serialize;

use crate::traversal::CabinetId;

/// A point on the layout canvas. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn same_as(self, other: Point) -> bool {
        (self.x - other.x).abs() < 1e-9 && (self.y - other.y).abs() < 1e-9
    }
}

/// Side of a node a cable attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Left,
    Right,
    Top,
    Bottom,
}

/// How a path is drawn between its points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathShape {
    /// A single segment.
    Straight,
    /// Orthogonal horizontal, vertical, horizontal step between two handles.
    Step,
    /// Explicit orthogonal polyline with bend points.
    Polyline,
}

/// A routed cable. Every segment is axis-aligned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CablePath {
    pub shape: PathShape,
    pub points: Vec<Point>,
}

impl CablePath {
    pub fn straight(from: Point, to: Point) -> Self {
        Self {
            shape: PathShape::Straight,
            points: vec![from, to],
        }
    }

    /// Horizontal out of `from`, vertical at the midpoint x, horizontal into `to`.
    /// Collapses to a single segment when both ends share a row.
    pub fn step(from: Point, to: Point) -> Self {
        let mid_x = (from.x + to.x) / 2.0;
        Self {
            shape: PathShape::Step,
            points: simplify(vec![
                from,
                Point::new(mid_x, from.y),
                Point::new(mid_x, to.y),
                to,
            ]),
        }
    }

    pub fn polyline(points: Vec<Point>) -> Self {
        Self {
            shape: PathShape::Polyline,
            points: simplify(points),
        }
    }

    /// The same cable walked from the other end.
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self {
            shape: self.shape,
            points,
        }
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Total Manhattan length of the cable on the canvas.
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| (w[1].x - w[0].x).abs() + (w[1].y - w[0].y).abs())
            .sum()
    }

    /// Number of interior bend points.
    pub fn bends(&self) -> usize {
        self.points.len().saturating_sub(2)
    }

    pub fn is_orthogonal(&self) -> bool {
        self.points.windows(2).all(|w| {
            (w[0].x - w[1].x).abs() < 1e-9 || (w[0].y - w[1].y).abs() < 1e-9
        })
    }
}

/// Drop repeated points and interior points that sit on a straight run.
fn simplify(points: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_some_and(|last| last.same_as(p)) {
            continue;
        }
        if out.len() >= 2 {
            let a = out[out.len() - 2];
            let b = out[out.len() - 1];
            let collinear = ((a.x - b.x).abs() < 1e-9 && (b.x - p.x).abs() < 1e-9)
                || ((a.y - b.y).abs() < 1e-9 && (b.y - p.y).abs() < 1e-9);
            if collinear {
                out.pop();
            }
        }
        out.push(p);
    }
    out
}

/// Identity of a node in a wiring graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "kebab-case")]
pub enum NodeId {
    /// Primary data-hub port, by hub index.
    Hub(usize),
    /// Mirrored backup port, by hub index.
    BackupHub(usize),
    Cabinet(CabinetId),
    /// Power feed, by run index.
    PowerSource(usize),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hub(i) => write!(f, "hub-{}", i + 1),
            Self::BackupHub(i) => write!(f, "backup-hub-{}", i + 1),
            Self::Cabinet(id) => write!(f, "cabinet-{id}"),
            Self::PowerSource(i) => write!(f, "power-{}", i + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WiringNode {
    pub id: NodeId,
    /// Centre of the node on the canvas.
    pub position: Point,
    /// Group index used by the renderer to pick a colour.
    pub color_key: usize,
    /// Grid cell for cabinets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<(u32, u32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    HubLink,
    Chain,
    BackupHubLink,
    BackupChain,
    PowerFeed,
    PowerChain,
}

impl EdgeKind {
    pub fn is_backup(self) -> bool {
        matches!(self, Self::BackupHubLink | Self::BackupChain)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WiringEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
    pub path: CablePath,
    pub color_key: usize,
    pub style: LineStyle,
}

/// Nodes and routed edges handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WiringGraph {
    pub nodes: Vec<WiringNode>,
    pub edges: Vec<WiringEdge>,
}

impl WiringGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&WiringNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = &WiringEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    /// Total cable length on the canvas, optionally restricted to one kind.
    pub fn cable_length(&self, kind: Option<EdgeKind>) -> f64 {
        self.edges
            .iter()
            .filter(|e| kind.is_none_or(|k| e.kind == k))
            .map(|e| e.path.length())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_between_rows_has_two_bends() {
        let path = CablePath::step(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(
            path.points,
            vec![
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
                Point::new(5.0, 20.0),
                Point::new(10.0, 20.0)
            ]
        );
        assert_eq!(path.bends(), 2);
        assert_eq!(path.length(), 30.0);
    }

    #[test]
    fn step_on_one_row_collapses() {
        let path = CablePath::step(Point::new(0.0, 5.0), Point::new(10.0, 5.0));
        assert_eq!(path.shape, PathShape::Step);
        assert_eq!(path.points.len(), 2);
    }

    #[test]
    fn polyline_drops_redundant_points() {
        let path = CablePath::polyline(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]);
        assert_eq!(
            path.points,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0)
            ]
        );
        assert!(path.is_orthogonal());
    }

    #[test]
    fn reversed_swaps_ends() {
        let path = CablePath::step(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        let back = path.reversed();
        assert_eq!(back.start(), path.end());
        assert_eq!(back.end(), path.start());
        assert_eq!(back.length(), path.length());
    }

    #[test]
    fn node_ids_display_one_based() {
        assert_eq!(NodeId::Hub(0).to_string(), "hub-1");
        assert_eq!(NodeId::BackupHub(2).to_string(), "backup-hub-3");
        assert_eq!(NodeId::Cabinet(7).to_string(), "cabinet-7");
        assert_eq!(NodeId::PowerSource(1).to_string(), "power-2");
    }

    #[test]
    fn node_id_serializes_tagged() {
        let json = serde_json::to_string(&NodeId::Cabinet(4)).unwrap();
        assert_eq!(json, r#"{"kind":"cabinet","index":4}"#);
    }
}
