use super::types::{CablePath, PathShape, Point, WiringEdge, WiringGraph};

/// Serialize a path to its compact text form.
///
/// Format: `(0,30)-(-70,30)-(-70,80)-(190,80)`
///
/// Whole coordinates are printed without decimals.
pub fn path_to_string(path: &CablePath) -> String {
    path.points
        .iter()
        .map(|p| format_point(*p))
        .collect::<Vec<_>>()
        .join("-")
}

/// One line per edge: `hub-1 -> cabinet-1 [step] (…)-(…)`.
pub fn edge_to_string(edge: &WiringEdge) -> String {
    format!(
        "{} -> {} [{}] {}",
        edge.source,
        edge.target,
        shape_name(edge.path.shape),
        path_to_string(&edge.path)
    )
}

/// Every edge of a graph, in routing order.
pub fn graph_to_lines(graph: &WiringGraph) -> Vec<String> {
    graph.edges.iter().map(edge_to_string).collect()
}

fn shape_name(shape: PathShape) -> &'static str {
    match shape {
        PathShape::Straight => "straight",
        PathShape::Step => "step",
        PathShape::Polyline => "polyline",
    }
}

fn format_point(p: Point) -> String {
    format!("({},{})", format_number(p.x), format_number(p.y))
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::routing::types::{EdgeKind, LineStyle, NodeId};

    #[test]
    fn test_format_number_integer() {
        assert_eq!(format_number(30.0), "30");
        assert_eq!(format_number(-70.0), "-70");
    }

    #[test]
    fn test_format_number_fraction() {
        assert_eq!(format_number(12.5), "12.5");
    }

    #[test]
    fn test_path_to_string() {
        let path = CablePath::step(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(path_to_string(&path), "(0,0)-(5,0)-(5,20)-(10,20)");
    }

    #[test]
    fn test_edge_to_string() {
        let edge = WiringEdge {
            source: NodeId::Hub(0),
            target: NodeId::Cabinet(1),
            kind: EdgeKind::HubLink,
            path: CablePath::straight(Point::new(-140.0, 30.0), Point::new(0.0, 30.0)),
            color_key: 0,
            style: LineStyle::Solid,
        };
        assert_eq!(
            edge_to_string(&edge),
            "hub-1 -> cabinet-1 [straight] (-140,30)-(0,30)"
        );
    }
}
