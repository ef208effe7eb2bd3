use crate::foundation::core::{Point, Rect};

/// Point where the ray from `rect`'s center toward `toward` leaves the rectangle.
///
/// Uses the slab/ratio test: when `|dx| * half_height >= |dy| * half_width` the ray exits through
/// a vertical (left/right) edge, otherwise through a horizontal one. A target at the center
/// returns the center itself.
pub fn edge_anchor(rect: Rect, toward: Point) -> Point {
    let c = rect.center();
    let d = toward - c;
    if d.x == 0.0 && d.y == 0.0 {
        return c;
    }

    let hw = rect.width() * 0.5;
    let hh = rect.height() * 0.5;
    let t = if d.x.abs() * hh >= d.y.abs() * hw {
        hw / d.x.abs()
    } else {
        hh / d.y.abs()
    };
    c + d * t
}

/// Endpoints for a connector from `from` to `to`, each anchored on its own rectangle's boundary
/// along the center-to-center line.
pub fn anchored_segment(from: Rect, to: Rect) -> (Point, Point) {
    let a = edge_anchor(from, to.center());
    let b = edge_anchor(to, from.center());
    (a, b)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/edge.rs"]
mod tests;
