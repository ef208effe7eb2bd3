use super::*;
use crate::foundation::core::Fps;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dsviz-png-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn transparent(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: vec![0; (width * height * 4) as usize],
        premultiplied: true,
    }
}

#[test]
fn sequence_names_are_zero_padded() {
    assert_eq!(sequence_file_name(FrameIndex(0)), "frame_0000.png");
    assert_eq!(sequence_file_name(FrameIndex(42)), "frame_0042.png");
    assert_eq!(sequence_file_name(FrameIndex(12345)), "frame_12345.png");
}

#[test]
fn png_is_flattened_over_background() {
    let dir = scratch_dir("flatten");
    let path = dir.join("one.png");
    write_png(&path, &transparent(2, 2), Rgba8::rgb(10, 20, 30)).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn short_buffer_is_rejected() {
    let mut frame = transparent(2, 2);
    frame.data.pop();
    let dir = scratch_dir("short");
    assert!(write_png(&dir.join("x.png"), &frame, Rgba8::rgb(0, 0, 0)).is_err());
}

#[test]
fn sequence_sink_writes_one_file_per_frame() {
    let dir = scratch_dir("seq");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::default(),
    })
    .unwrap();
    for i in 0..3 {
        sink.push_frame(FrameIndex(i), &transparent(2, 2)).unwrap();
    }
    sink.end().unwrap();

    assert_eq!(sink.written(), 3);
    assert!(sink.dir().join("frame_0000.png").is_file());
    assert!(sink.dir().join("frame_0002.png").is_file());
    let _ = std::fs::remove_dir_all(&dir);
}
