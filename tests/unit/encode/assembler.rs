use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Fps;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::default(),
    }
}

fn frame(fill: u8) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 2,
        data: vec![fill; 16],
        premultiplied: true,
    }
}

#[test]
fn indices_increase_from_zero() {
    let mut a = VideoAssembler::new(InMemorySink::new(), cfg());
    assert_eq!(a.push(&frame(1)).unwrap(), FrameIndex(0));
    a.push_repeated(&frame(2), 3).unwrap();
    assert_eq!(a.frames_written(), 4);

    let sink = a.finish().unwrap();
    assert!(sink.is_ended());
    assert_eq!(sink.config(), Some(cfg()));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3]);
    assert_eq!(sink.frames()[3].1.data[0], 2);
}

#[test]
fn zero_frames_cannot_be_finalized() {
    let a = VideoAssembler::new(InMemorySink::new(), cfg());
    let err = a.finish().err().unwrap();
    assert!(matches!(err, VizError::Encode(_)));
}

#[test]
fn sink_is_not_started_before_the_first_frame() {
    let mut a = VideoAssembler::new(InMemorySink::new(), cfg());
    a.push_repeated(&frame(0), 0).unwrap();
    assert!(!a.started);
    assert!(a.sink.config().is_none());
}

#[test]
fn mismatched_frame_is_rejected() {
    let mut a = VideoAssembler::new(InMemorySink::new(), cfg());
    let mut big = frame(0);
    big.width = 4;
    assert!(a.push(&big).is_err());
    assert_eq!(a.frames_written(), 0);
}
