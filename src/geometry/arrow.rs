use crate::foundation::core::{Point, Rect, Vec2};
use crate::geometry::bezier::{arch_control, sample_quad};

/// Triangle vertices `[tip, left, right]` of one arrowhead.
pub type ArrowHead = [Point; 3];

/// A connector ready to draw: the stroked polyline plus zero, one, or two filled heads.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    /// Stroked centerline.
    pub path: Vec<Point>,
    /// Filled arrowheads.
    pub heads: Vec<ArrowHead>,
}

impl Connector {
    /// `true` when the centerline has more than two points.
    pub fn is_curved(&self) -> bool {
        self.path.len() > 2
    }
}

/// Shape parameters shared by all connectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowGeometry {
    /// Arrowhead length along the shaft.
    pub head_size: f64,
    /// Arch height of curved connectors above the higher endpoint.
    pub control_height: f64,
    /// Number of Bézier segments used to sample curved connectors.
    pub curve_steps: usize,
    /// Half-width of the self-arrow loop.
    pub self_arrow_size: f64,
}

impl Default for ArrowGeometry {
    fn default() -> Self {
        Self {
            head_size: 15.0,
            control_height: 100.0,
            curve_steps: 30,
            self_arrow_size: 20.0,
        }
    }
}

/// Isosceles arrowhead with its tip at `tip`, pointing along `direction`.
///
/// The base sits `head_size` behind the tip and is `head_size` wide. Returns `None` for a
/// zero-length direction.
pub fn arrowhead(tip: Point, direction: Vec2, head_size: f64) -> Option<ArrowHead> {
    let len = direction.hypot();
    if !len.is_finite() || len <= f64::EPSILON {
        return None;
    }
    let dir = direction / len;
    let perp = Vec2::new(-dir.y, dir.x);
    let base = tip - dir * head_size;
    let half = perp * (head_size * 0.5);
    Some([tip, base + half, base - half])
}

/// Straight connector from `start` to `end` with a head at `end` (and at `start` when
/// `double_headed`).
pub fn straight_arrow(start: Point, end: Point, head_size: f64, double_headed: bool) -> Connector {
    let dir = end - start;
    let mut heads = Vec::with_capacity(2);
    heads.extend(arrowhead(end, dir, head_size));
    if double_headed {
        heads.extend(arrowhead(start, -dir, head_size));
    }
    Connector {
        path: vec![start, end],
        heads,
    }
}

/// Curved connector arching above both endpoints.
///
/// Head orientation follows the tangent of the last sampled segment; the reverse head uses the
/// first segment, reversed.
pub fn curved_arrow(
    start: Point,
    end: Point,
    geom: &ArrowGeometry,
    double_headed: bool,
) -> Connector {
    let control = arch_control(start, end, geom.control_height);
    let path = sample_quad(start, control, end, geom.curve_steps);
    let mut heads = Vec::with_capacity(2);
    if let [.., before_last, last] = path.as_slice() {
        heads.extend(arrowhead(*last, *last - *before_last, geom.head_size));
    }
    if double_headed && let [first, second, ..] = path.as_slice() {
        heads.extend(arrowhead(*first, *first - *second, geom.head_size));
    }
    Connector { path, heads }
}

/// Small loop above `rect` that leaves its top edge and comes back down onto it.
pub fn self_arrow(rect: Rect, geom: &ArrowGeometry) -> Connector {
    let s = geom.self_arrow_size;
    let cx = rect.center().x;
    let top = rect.y0;
    let start = Point::new(cx - s, top);
    let end = Point::new(cx + s * 0.6, top);
    let control = Point::new(cx, top - s * 2.5);
    let path = sample_quad(start, control, end, (geom.curve_steps / 2).max(4));
    let mut heads = Vec::with_capacity(1);
    if let [.., before_last, last] = path.as_slice() {
        heads.extend(arrowhead(*last, *last - *before_last, geom.head_size * 0.8));
    }
    Connector { path, heads }
}

/// Vertical straight arrow of `length` pointing down at `rect`'s top edge, used under pointer
/// text.
pub fn pointer_arrow(rect: Rect, length: f64, lift: f64, head_size: f64) -> Connector {
    let cx = rect.center().x;
    let end = Point::new(cx, rect.y0 - lift);
    let start = Point::new(cx, end.y - length);
    straight_arrow(start, end, head_size, false)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/arrow.rs"]
mod tests;
