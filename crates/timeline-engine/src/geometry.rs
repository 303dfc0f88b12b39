//! Plain geometry primitives in layout units.
//!
//! All coordinates are y-down with the origin at the container's top-left
//! corner, matching how the layout engine stacks blocks.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing computed coordinates.
pub const EPSILON: f64 = 1e-9;

/// A point in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by `dx`, `dy`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether two points coincide within [`EPSILON`].
    pub fn approx_eq(self, other: Self) -> bool {
        (self.x - other.x).abs() <= EPSILON && (self.y - other.y).abs() <= EPSILON
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether `point` lies inside the rectangle (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Reflect this rectangle about the vertical centreline of a container
    /// that is `container_width` wide.
    #[must_use]
    pub fn mirrored(&self, container_width: f64) -> Self {
        Self::new(
            container_width - self.x - self.width,
            self.y,
            self.width,
            self.height,
        )
    }

    /// Largest rectangle with the aspect ratio of `content` that fits inside
    /// `self`, centred on both axes.
    ///
    /// Degenerate content (zero or negative size) yields an empty rectangle
    /// at the centre.
    #[must_use]
    pub fn aspect_fit(&self, content: Size) -> Self {
        if content.width <= 0.0 || content.height <= 0.0 {
            let c = self.center();
            return Self::new(c.x, c.y, 0.0, 0.0);
        }
        let scale = (self.width / content.width).min(self.height / content.height);
        let width = content.width * scale;
        let height = content.height * scale;
        Self::new(
            self.x + (self.width - width) / 2.0,
            self.y + (self.height - height) / 2.0,
            width,
            height,
        )
    }
}

/// A straight line segment, used for connector lines and path edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// A vertical segment at `x` from `top` to `bottom`.
    pub const fn vertical(x: f64, top: f64, bottom: f64) -> Self {
        Self::new(Point::new(x, top), Point::new(x, bottom))
    }

    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }

    #[must_use]
    pub fn mirrored(&self, container_width: f64) -> Self {
        Self::new(
            Point::new(container_width - self.start.x, self.start.y),
            Point::new(container_width - self.end.x, self.end.y),
        )
    }

    /// The part of the segment inside `bounds` (edges included), or `None`
    /// when it misses the rectangle.
    pub fn clipped(&self, bounds: &Rect) -> Option<Self> {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;

        // Liang-Barsky: each edge as (p, q) with p * t <= q.
        for (p, q) in [
            (-dx, self.start.x - bounds.left()),
            (dx, bounds.right() - self.start.x),
            (-dy, self.start.y - bounds.top()),
            (dy, bounds.bottom() - self.start.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else {
                let t = q / p;
                if p < 0.0 {
                    t0 = t0.max(t);
                } else {
                    t1 = t1.min(t);
                }
            }
        }

        if t0 > t1 {
            return None;
        }
        // Clamp so rounding never leaves an endpoint just outside the bounds.
        let at = |t: f64| {
            Point::new(
                (self.start.x + t * dx).clamp(bounds.left(), bounds.right()),
                (self.start.y + t * dy).clamp(bounds.top(), bounds.bottom()),
            )
        };
        Some(Self::new(at(t0), at(t1)))
    }
}
