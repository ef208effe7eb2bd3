use super::*;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps::default(),
    }
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never.mp4"));
    let err = sink.begin(cfg(101, 100)).unwrap_err();
    assert!(matches!(err, VizError::Validation(_)));
    assert!(sink.encoder.is_none());
}

#[test]
fn zero_dimensions_are_rejected() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never.mp4"));
    assert!(sink.begin(cfg(0, 100)).is_err());
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("target/never.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn background_defaults_to_white() {
    let opts = FfmpegSinkOpts::new("out.mp4");
    assert_eq!(opts.background, Rgba8::rgb(255, 255, 255));
    assert!(opts.overwrite);
    let dark = opts.with_background(Rgba8::rgb(0, 0, 0));
    assert_eq!(dark.background.to_array(), [0, 0, 0, 255]);
}

#[test]
fn parent_dir_of_bare_file_name_is_fine() {
    ensure_parent_dir(Path::new("bare.mp4")).unwrap();
}

#[test]
fn dropping_an_unstarted_sink_is_quiet() {
    let out = std::env::temp_dir().join(format!("dsviz-unstarted-{}.mp4", std::process::id()));
    drop(FfmpegSink::new(FfmpegSinkOpts::new(&out)));
    assert!(!out.exists());
}

#[test]
fn dropping_before_end_kills_encoder_and_discards_output() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let out = std::env::temp_dir().join(format!("dsviz-abandoned-{}.mp4", std::process::id()));
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(16, 16)).unwrap();
    let frame = FrameRGBA {
        width: 16,
        height: 16,
        data: vec![255; 16 * 16 * 4],
        premultiplied: true,
    };
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    drop(sink);
    assert!(!out.exists());
}

#[test]
fn ended_sink_has_no_encoder_left() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let out = std::env::temp_dir().join(format!("dsviz-ended-{}.mp4", std::process::id()));
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(16, 16)).unwrap();
    let frame = FrameRGBA {
        width: 16,
        height: 16,
        data: vec![255; 16 * 16 * 4],
        premultiplied: true,
    };
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    sink.end().unwrap();
    assert!(sink.encoder.is_none());
    drop(sink);
    assert!(out.exists());
    let _ = std::fs::remove_file(&out);
}
