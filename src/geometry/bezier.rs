use kurbo::{ParamCurve, QuadBez};

use crate::foundation::core::Point;

/// Control point for an arch between `start` and `end`: horizontally centered, `control_height`
/// above the higher endpoint (screen space, y grows downward).
pub fn arch_control(start: Point, end: Point, control_height: f64) -> Point {
    Point::new((start.x + end.x) * 0.5, start.y.min(end.y) - control_height)
}

/// Sample a quadratic Bézier into `steps + 1` points, endpoints included.
///
/// Samples are kept in full precision; rounding here would kink the curve.
pub fn sample_quad(start: Point, control: Point, end: Point, steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    let curve = QuadBez::new(start, control, end);
    (0..=steps)
        .map(|i| curve.eval(i as f64 / steps as f64))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/bezier.rs"]
mod tests;
