use super::*;

fn on_perimeter(r: Rect, p: Point) -> bool {
    let eps = 1e-9;
    let within_x = p.x >= r.x0 - eps && p.x <= r.x1 + eps;
    let within_y = p.y >= r.y0 - eps && p.y <= r.y1 + eps;
    let on_vertical = (p.x - r.x0).abs() < eps || (p.x - r.x1).abs() < eps;
    let on_horizontal = (p.y - r.y0).abs() < eps || (p.y - r.y1).abs() < eps;
    within_x && within_y && (on_vertical || on_horizontal)
}

fn collinear(a: Point, b: Point, c: Point) -> bool {
    let cross = (b - a).cross(c - a);
    cross.abs() < 1e-6
}

#[test]
fn anchors_lie_on_perimeter_and_center_line() {
    let a = Rect::new(100.0, 100.0, 160.0, 140.0);
    let targets = [
        Rect::new(400.0, 90.0, 460.0, 150.0),
        Rect::new(110.0, 400.0, 150.0, 430.0),
        Rect::new(-300.0, -250.0, -200.0, -200.0),
        Rect::new(170.0, 300.0, 200.0, 330.0),
        Rect::new(20.0, 101.0, 40.0, 139.0),
    ];
    for b in targets {
        let p = edge_anchor(a, b.center());
        assert!(on_perimeter(a, p), "{p:?} not on {a:?}");
        assert!(collinear(a.center(), b.center(), p));
        // The anchor lies between the two centers, not behind A's center.
        assert!((p - a.center()).dot(b.center() - a.center()) > 0.0);
    }
}

#[test]
fn horizontal_neighbours_anchor_on_facing_sides() {
    let a = Rect::new(0.0, 0.0, 50.0, 50.0);
    let b = Rect::new(100.0, 0.0, 150.0, 50.0);
    let (pa, pb) = anchored_segment(a, b);
    assert_eq!(pa, Point::new(50.0, 25.0));
    assert_eq!(pb, Point::new(100.0, 25.0));
}

#[test]
fn vertical_neighbours_anchor_on_top_and_bottom() {
    let parent = Rect::new(0.0, 0.0, 40.0, 40.0);
    let child = Rect::new(0.0, 200.0, 40.0, 240.0);
    let (pa, pb) = anchored_segment(parent, child);
    assert_eq!(pa, Point::new(20.0, 40.0));
    assert_eq!(pb, Point::new(20.0, 200.0));
}

#[test]
fn same_center_returns_center() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(edge_anchor(a, a.center()), a.center());
}
