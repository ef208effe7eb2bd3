pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Flatten premultiplied RGBA8 over an opaque background into opaque RGBA8.
///
/// Encoders and image writers do not understand premultiplied alpha.
pub(crate) fn flatten_premul_over_bg(dst: &mut [u8], src_premul: &[u8], bg: [u8; 4]) -> bool {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return false;
    }

    let bg_r = u16::from(bg[0]);
    let bg_g = u16::from(bg[1]);
    let bg_b = u16::from(bg[2]);

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }

        let inv = 255u16 - a;
        d[0] = (u16::from(s[0]) + mul_div255_u16(bg_r, inv)).min(255) as u8;
        d[1] = (u16::from(s[1]) + mul_div255_u16(bg_g, inv)).min(255) as u8;
        d[2] = (u16::from(s[2]) + mul_div255_u16(bg_b, inv)).min(255) as u8;
        d[3] = 255;
    }
    true
}

/// Linear blend between two integer coordinates, rounded to the nearest pixel.
pub(crate) fn lerp_round(start: i32, end: i32, t: f64) -> i32 {
    let s = f64::from(start);
    let e = f64::from(end);
    (s + (e - s) * t).round() as i32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
