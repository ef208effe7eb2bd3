use super::*;
use crate::foundation::core::Canvas;
use crate::render::scene::Role;

fn scene_with_box(x: f64) -> Scene {
    let mut s = Scene::new(Canvas::default());
    s.push(
        Role::Cell,
        DrawOp::FillRect {
            rect: Rect::new(x, 0.0, x + 10.0, 10.0),
            color: Rgba8::rgb(1, 2, 3),
            radius: 0.0,
        },
    );
    s
}

#[test]
fn identical_scenes_share_a_fingerprint() {
    assert_eq!(
        fingerprint_scene(&scene_with_box(5.0)),
        fingerprint_scene(&scene_with_box(5.0))
    );
}

#[test]
fn moved_box_changes_fingerprint() {
    assert_ne!(
        fingerprint_scene(&scene_with_box(5.0)),
        fingerprint_scene(&scene_with_box(6.0))
    );
}

#[test]
fn role_does_not_affect_fingerprint() {
    let a = scene_with_box(5.0);
    let mut b = a.clone();
    b.items[0].role = Role::Placeholder;
    assert_eq!(fingerprint_scene(&a), fingerprint_scene(&b));
}

#[test]
fn canvas_size_is_hashed() {
    let a = scene_with_box(5.0);
    let mut b = a.clone();
    b.canvas.width += 2;
    assert_ne!(fingerprint_scene(&a), fingerprint_scene(&b));
}
