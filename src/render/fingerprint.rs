use crate::foundation::core::{Point, Rect, Rgba8};
use crate::render::scene::{DrawOp, Scene, TextAlign};
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x5d3a_91c4_7e20_b6f3;

/// Stable fingerprint of a composed scene. Equal fingerprints rasterize to equal pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

/// Hash every operation of `scene`. Roles are not hashed: they do not change pixels.
pub fn fingerprint_scene(scene: &Scene) -> SceneFingerprint {
    let mut h = StableHasher::new();
    h.write_u32(scene.canvas.width);
    h.write_u32(scene.canvas.height);
    h.write_u32(scene.items.len() as u32);
    for item in &scene.items {
        write_op(&mut h, &item.op);
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> SceneFingerprint {
        let v = self.inner.digest128();
        SceneFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_color(h: &mut StableHasher, c: Rgba8) {
    h.write_bytes(&c.to_array());
}

fn write_point(h: &mut StableHasher, p: Point) {
    h.write_f64(p.x);
    h.write_f64(p.y);
}

fn write_rect(h: &mut StableHasher, r: Rect) {
    for v in [r.x0, r.y0, r.x1, r.y1] {
        h.write_f64(v);
    }
}

fn write_points(h: &mut StableHasher, points: &[Point]) {
    h.write_u32(points.len() as u32);
    for p in points {
        write_point(h, *p);
    }
}

fn write_op(h: &mut StableHasher, op: &DrawOp) {
    match op {
        DrawOp::FillRect {
            rect,
            color,
            radius,
        } => {
            h.write_u8(0);
            write_rect(h, *rect);
            write_color(h, *color);
            h.write_f64(*radius);
        }
        DrawOp::StrokeRect {
            rect,
            color,
            radius,
            width,
        } => {
            h.write_u8(1);
            write_rect(h, *rect);
            write_color(h, *color);
            h.write_f64(*radius);
            h.write_f64(*width);
        }
        DrawOp::Polyline {
            points,
            color,
            width,
        } => {
            h.write_u8(2);
            write_points(h, points);
            write_color(h, *color);
            h.write_f64(*width);
        }
        DrawOp::Polygon { points, color } => {
            h.write_u8(3);
            write_points(h, points);
            write_color(h, *color);
        }
        DrawOp::Text {
            text,
            anchor,
            align,
            size,
            color,
        } => {
            h.write_u8(4);
            h.write_str(text);
            write_point(h, *anchor);
            h.write_u8(match align {
                TextAlign::Left => 0,
                TextAlign::Center => 1,
            });
            h.write_f64(*size);
            write_color(h, *color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fingerprint.rs"]
mod tests;
