use super::*;
use crate::geometry::arrow::straight_arrow;

#[test]
fn empty_text_is_not_recorded() {
    let mut scene = Scene::new(Canvas::default());
    scene.text(
        Role::Label,
        "",
        Point::new(1.0, 1.0),
        TextAlign::Center,
        12.0,
        Rgba8::rgb(0, 0, 0),
    );
    assert!(scene.items.is_empty());
}

#[test]
fn connector_emits_path_then_heads_under_one_role() {
    let mut scene = Scene::new(Canvas::default());
    let c = straight_arrow(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0, true);
    scene.connector(Role::Arrow, &c, Rgba8::rgb(255, 0, 0), 3.0);

    assert_eq!(scene.items.len(), 3);
    assert_eq!(scene.polylines(Role::Arrow).len(), 1);
    assert_eq!(scene.polygons(Role::Arrow).len(), 2);
    assert!(scene.polylines(Role::ListLink).is_empty());
}

#[test]
fn queries_keep_paint_order() {
    let mut scene = Scene::new(Canvas::default());
    let black = Rgba8::rgb(0, 0, 0);
    scene.text(Role::Pointer, "i", Point::ZERO, TextAlign::Center, 10.0, black);
    scene.text(Role::Label, "x", Point::ZERO, TextAlign::Center, 10.0, black);
    scene.text(Role::Pointer, "j", Point::ZERO, TextAlign::Center, 10.0, black);

    assert_eq!(scene.texts(Role::Pointer), vec!["i", "j"]);
    assert_eq!(scene.texts(Role::Label), vec!["x"]);
}
