use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn frames_are_held_for_their_duration() {
    let frames = vec![
        Frame::from_array([1]).with_duration(2.0),
        Frame::from_array([2]).with_duration(0.5),
    ];
    let tl = Timeline::build(&frames, fps30());
    assert_eq!(tl.total_frames(), 75);
    assert_eq!(tl.span(0), Some(0..60));
    assert_eq!(tl.span(1), Some(60..75));
    assert_eq!(tl.frame_at(59), Some(0));
    assert_eq!(tl.frame_at(60), Some(1));
    assert_eq!(tl.frame_at(75), None);
}

#[test]
fn default_caption_windows_tile_exactly() {
    let frames: Vec<Frame> = (0..3)
        .map(|k| Frame::from_array([k]).with_text(format!("step {k}")))
        .collect();
    let tl = Timeline::build(&frames, fps30());
    assert_eq!(tl.total_frames(), 270);
    let ranges: Vec<Range<u64>> = tl.caption_windows().iter().map(|w| w.range.clone()).collect();
    // Frame k starts at 90k; caption shows from 30 frames before until 60 after.
    assert_eq!(ranges, vec![0..60, 60..150, 150..240]);
    assert_eq!(tl.caption_at(59), Some(0));
    assert_eq!(tl.caption_at(60), Some(1));
    assert_eq!(tl.caption_at(250), None);
}

#[test]
fn later_caption_wins_overlap() {
    let frames = vec![
        Frame::from_array([1]).with_text("a").with_caption_window(0.0, 10.0),
        Frame::from_array([2]).with_text("b").with_duration(3.0),
    ];
    let tl = Timeline::build(&frames, fps30());
    assert_eq!(tl.caption_at(10), Some(0));
    // Frame 1 starts at 90, its window opens 30 frames earlier.
    assert_eq!(tl.caption_at(60), Some(1));
    assert_eq!(tl.caption_at(149), Some(1));
    // Once the later window closes the earlier, longer one shows again.
    assert_eq!(tl.caption_at(150), Some(0));
}

#[test]
fn segments_merge_identical_runs() {
    let frames = vec![
        Frame::from_array([1]).with_text("first"),
        Frame::from_array([2]),
    ];
    let tl = Timeline::build(&frames, fps30());
    let segs = tl.segments();
    assert_eq!(
        segs,
        vec![
            Segment { frame: 0, caption: Some(0), range: 0..60 },
            Segment { frame: 0, caption: None, range: 60..90 },
            Segment { frame: 1, caption: None, range: 90..180 },
        ]
    );
    assert_eq!(segs.iter().map(Segment::len).sum::<u64>(), tl.total_frames());
}

#[test]
fn zero_length_frames_are_skipped() {
    let frames = vec![
        Frame::from_array([1]).with_duration(0.0),
        Frame::from_array([2]).with_duration(1.0),
    ];
    let tl = Timeline::build(&frames, fps30());
    let segs = tl.segments();
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].frame, 1);
}
