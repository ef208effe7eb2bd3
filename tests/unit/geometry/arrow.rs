use super::*;

#[test]
fn arrowhead_is_isosceles_and_points_along_direction() {
    let head = arrowhead(Point::new(100.0, 0.0), Vec2::new(1.0, 0.0), 15.0).unwrap();
    assert_eq!(head[0], Point::new(100.0, 0.0));
    assert_eq!(head[1], Point::new(85.0, 7.5));
    assert_eq!(head[2], Point::new(85.0, -7.5));
    let l = (head[1] - head[0]).hypot();
    let r = (head[2] - head[0]).hypot();
    assert!((l - r).abs() < 1e-9);
}

#[test]
fn zero_direction_has_no_head() {
    assert!(arrowhead(Point::ZERO, Vec2::ZERO, 15.0).is_none());
}

#[test]
fn double_headed_straight_arrow_mirrors_heads() {
    let c = straight_arrow(Point::new(0.0, 0.0), Point::new(0.0, 30.0), 10.0, true);
    assert_eq!(c.heads.len(), 2);
    assert_eq!(c.heads[0][0], Point::new(0.0, 30.0));
    assert_eq!(c.heads[1][0], Point::new(0.0, 0.0));
    // End head base is above the tip, start head base below its tip.
    assert!(c.heads[0][1].y < 30.0);
    assert!(c.heads[1][1].y > 0.0);
    assert!(!c.is_curved());
}

#[test]
fn curved_arrow_arches_and_heads_follow_tangent() {
    let geom = ArrowGeometry::default();
    let c = curved_arrow(Point::new(0.0, 200.0), Point::new(300.0, 200.0), &geom, true);
    assert!(c.is_curved());
    assert_eq!(c.path.len(), geom.curve_steps + 1);
    assert!(c.path.iter().all(|p| p.y <= 200.0 + 1e-9));
    assert_eq!(c.heads.len(), 2);
    // End tangent descends to the right: the head base lies up and to the left of the tip.
    let end_head = c.heads[0];
    let base_mid = end_head[1].midpoint(end_head[2]);
    assert!(base_mid.x < end_head[0].x);
    assert!(base_mid.y < end_head[0].y);
    // Reverse head mirrors it at the start.
    let start_head = c.heads[1];
    let base_mid = start_head[1].midpoint(start_head[2]);
    assert!(base_mid.x > start_head[0].x);
}

#[test]
fn self_arrow_terminates_on_top_edge() {
    let rect = Rect::new(100.0, 100.0, 160.0, 160.0);
    let c = self_arrow(rect, &ArrowGeometry::default());
    let last = *c.path.last().unwrap();
    assert!((last.y - rect.y0).abs() < 1e-9);
    assert!(c.path.iter().all(|p| p.y <= rect.y0 + 1e-9));
    assert_eq!(c.heads.len(), 1);
}

#[test]
fn pointer_arrow_is_vertical_onto_top_edge() {
    let rect = Rect::new(100.0, 100.0, 160.0, 160.0);
    let c = pointer_arrow(rect, 30.0, 0.0, 15.0);
    assert_eq!(c.path, vec![Point::new(130.0, 70.0), Point::new(130.0, 100.0)]);
    assert_eq!(c.heads.len(), 1);
}
