//! Bullet glyph geometry.
//!
//! Every bullet is generated in a local `size × size` box with the origin at
//! its top-left corner. Renderers translate the path into place with
//! [`PathSpec::translated`].

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::geometry::{Point, Rect, Segment};
use crate::style::LayoutDirection;

/// Shape of the glyph drawn at each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulletKind {
    /// Unfilled circle.
    Circle,
    /// Unfilled regular hexagon.
    Hexagon,
    /// Unfilled diamond.
    #[default]
    Diamond,
    /// Diamond with a horizontal line joining its side vertices.
    DiamondSlash,
    /// Open chevron pointing towards the event text.
    Carrot,
    /// Chevron with a horizontal shaft.
    Arrow,
}

impl BulletKind {
    /// Every kind, in declaration order.
    pub const ALL: [BulletKind; 6] = [
        BulletKind::Circle,
        BulletKind::Hexagon,
        BulletKind::Diamond,
        BulletKind::DiamondSlash,
        BulletKind::Carrot,
        BulletKind::Arrow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BulletKind::Circle => "circle",
            BulletKind::Hexagon => "hexagon",
            BulletKind::Diamond => "diamond",
            BulletKind::DiamondSlash => "diamond-slash",
            BulletKind::Carrot => "carrot",
            BulletKind::Arrow => "arrow",
        }
    }

    /// The kind after this one, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for BulletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BulletKind {
    type Err = ParseBulletKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ParseBulletKindError(s.to_string()))
    }
}

/// Unknown bullet kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bullet kind {0:?} (expected one of circle, hexagon, diamond, diamond-slash, carrot, arrow)")]
pub struct ParseBulletKindError(pub String);

/// One run of connected vertices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subpath {
    pub points: Vec<Point>,
    /// Whether the last point joins back to the first.
    pub closed: bool,
}

impl Subpath {
    fn closed(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    fn open(points: Vec<Point>) -> Self {
        Self {
            points,
            closed: false,
        }
    }
}

/// A stroke-only bullet outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathSpec {
    /// Oval inscribed in `bounds`.
    Oval { bounds: Rect },
    /// Straight-edged subpaths.
    Polyline { subpaths: Vec<Subpath> },
}

impl PathSpec {
    /// Distinct vertices in order of first appearance. Ovals have none.
    pub fn vertices(&self) -> Vec<Point> {
        let mut vertices: Vec<Point> = Vec::new();
        if let PathSpec::Polyline { subpaths } = self {
            for point in subpaths.iter().flat_map(|s| s.points.iter()) {
                if !vertices.iter().any(|v| v.approx_eq(*point)) {
                    vertices.push(*point);
                }
            }
        }
        vertices
    }

    /// Whether every subpath is closed. Ovals count as closed.
    pub fn is_closed(&self) -> bool {
        match self {
            PathSpec::Oval { .. } => true,
            PathSpec::Polyline { subpaths } => subpaths.iter().all(|s| s.closed),
        }
    }

    pub fn subpaths(&self) -> &[Subpath] {
        match self {
            PathSpec::Oval { .. } => &[],
            PathSpec::Polyline { subpaths } => subpaths,
        }
    }

    /// Edges of the straight-edged subpaths, including closing edges.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        for subpath in self.subpaths() {
            for pair in subpath.points.windows(2) {
                segments.push(Segment::new(pair[0], pair[1]));
            }
            if subpath.closed && subpath.points.len() > 2 {
                if let (Some(last), Some(first)) = (subpath.points.last(), subpath.points.first()) {
                    segments.push(Segment::new(*last, *first));
                }
            }
        }
        segments
    }

    /// Reflect the path about the vertical centreline of a box `box_width`
    /// wide whose left edge is at x = 0.
    #[must_use]
    pub fn mirrored(&self, box_width: f64) -> Self {
        match self {
            PathSpec::Oval { bounds } => PathSpec::Oval {
                bounds: bounds.mirrored(box_width),
            },
            PathSpec::Polyline { subpaths } => PathSpec::Polyline {
                subpaths: subpaths
                    .iter()
                    .map(|s| Subpath {
                        points: s
                            .points
                            .iter()
                            .map(|p| Point::new(box_width - p.x, p.y))
                            .collect(),
                        closed: s.closed,
                    })
                    .collect(),
            },
        }
    }

    /// Move the path by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Point) -> Self {
        match self {
            PathSpec::Oval { bounds } => PathSpec::Oval {
                bounds: Rect::new(
                    bounds.x + offset.x,
                    bounds.y + offset.y,
                    bounds.width,
                    bounds.height,
                ),
            },
            PathSpec::Polyline { subpaths } => PathSpec::Polyline {
                subpaths: subpaths
                    .iter()
                    .map(|s| Subpath {
                        points: s.points.iter().map(|p| p.offset(offset.x, offset.y)).collect(),
                        closed: s.closed,
                    })
                    .collect(),
            },
        }
    }

    /// SVG path data (`d` attribute) for the outline.
    pub fn to_svg_path_data(&self) -> String {
        let mut d = String::new();
        match self {
            PathSpec::Oval { bounds } => {
                let rx = bounds.width / 2.0;
                let ry = bounds.height / 2.0;
                let cy = bounds.center().y;
                let _ = write!(
                    d,
                    "M {},{} A {},{} 0 1,0 {},{} A {},{} 0 1,0 {},{} Z",
                    svg_number(bounds.left()),
                    svg_number(cy),
                    svg_number(rx),
                    svg_number(ry),
                    svg_number(bounds.right()),
                    svg_number(cy),
                    svg_number(rx),
                    svg_number(ry),
                    svg_number(bounds.left()),
                    svg_number(cy),
                );
            }
            PathSpec::Polyline { subpaths } => {
                for subpath in subpaths {
                    for (i, point) in subpath.points.iter().enumerate() {
                        if !d.is_empty() {
                            d.push(' ');
                        }
                        let command = if i == 0 { 'M' } else { 'L' };
                        let _ = write!(d, "{command} {},{}", svg_number(point.x), svg_number(point.y));
                    }
                    if subpath.closed {
                        d.push_str(" Z");
                    }
                }
            }
        }
        d
    }
}

/// Round to three decimals and drop a trailing `.0`.
fn svg_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0 + 0.0;
    format!("{rounded}")
}

/// Vertices of a regular `sides`-gon inscribed in a circle of `radius`.
///
/// Vertex 0 sits straight above `center` and the vertices wind clockwise on
/// screen (y grows downward).
pub fn regular_polygon(sides: usize, center: Point, radius: f64) -> Vec<Point> {
    let step = TAU / sides as f64;
    (0..sides)
        .map(|i| {
            let theta = i as f64 * step;
            Point::new(
                center.x + radius * theta.sin(),
                center.y - radius * theta.cos(),
            )
        })
        .collect()
}

/// Generate the outline for `kind` in a `size × size` box.
///
/// With [`LayoutDirection::Rtl`] the path is mirrored about the box's vertical
/// centreline so chevrons point the other way.
pub fn generate_bullet_path(kind: BulletKind, size: f64, direction: LayoutDirection) -> PathSpec {
    let path = bullet_path(kind, size);
    match direction {
        LayoutDirection::Ltr => path,
        LayoutDirection::Rtl => path.mirrored(size),
    }
}

fn bullet_path(kind: BulletKind, size: f64) -> PathSpec {
    let half = size / 2.0;
    let center = Point::new(half, half);
    let top_mid = Point::new(half, 0.0);
    let right_mid = Point::new(size, half);
    let bottom_mid = Point::new(half, size);
    let left_mid = Point::new(0.0, half);

    let subpaths = match kind {
        BulletKind::Circle => {
            return PathSpec::Oval {
                bounds: Rect::new(0.0, 0.0, size, size),
            }
        }
        BulletKind::Diamond => vec![Subpath::closed(regular_polygon(4, center, half))],
        BulletKind::Hexagon => vec![Subpath::closed(regular_polygon(6, center, half))],
        BulletKind::DiamondSlash => vec![
            Subpath::closed(regular_polygon(4, center, half)),
            Subpath::open(vec![left_mid, right_mid]),
        ],
        BulletKind::Carrot => vec![Subpath::open(vec![top_mid, right_mid, bottom_mid])],
        BulletKind::Arrow => vec![
            Subpath::open(vec![top_mid, right_mid, bottom_mid]),
            Subpath::open(vec![left_mid, right_mid]),
        ],
    };
    PathSpec::Polyline { subpaths }
}
