//! Whole-timeline layout behaviour through the public API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use timeline_engine::{
    BulletKind, Image, LayoutDirection, LayoutTree, Point, StyleConfig, TimeFrame, Timeline,
};

const TOLERANCE: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

fn holidays() -> Vec<TimeFrame> {
    vec![
        TimeFrame::new("January 1")
            .text("New Year's Day")
            .image(Image::new("fireworks.jpeg", 1280, 720, Vec::new())),
        TimeFrame::new("March"),
        TimeFrame::new("April 1").text("Dumb stupid pranks."),
        TimeFrame::new("That's it!").text("Hope this helps someone!"),
    ]
}

fn assert_gap_free(tree: &LayoutTree) {
    assert_close(tree.blocks[0].frame.top(), tree.guide.bottom());
    for pair in tree.blocks.windows(2) {
        assert_close(pair[1].frame.top(), pair[0].frame.bottom());
    }
}

#[test]
fn test_two_event_scenario_heights() {
    let events = vec![
        TimeFrame::new("January 1")
            .text("New Year's Day")
            .image(Image::new("fireworks.jpeg", 640, 480, Vec::new())),
        TimeFrame::new("March"),
    ];
    let timeline = Timeline::new(BulletKind::Diamond, events);
    let tree = timeline.layout();

    // Bullet at 8..26, centre 17. The 24-unit date label centres on it: 5..29.
    // Text: 35..54.2. Image: 64.2..194.2. Bottom margin: 204.2.
    assert_close(tree.blocks[0].frame.height, 204.2);
    // Date label only, then the bottom margin.
    assert_close(tree.blocks[1].frame.height, 39.0);

    let sum: f64 = tree.blocks.iter().map(|b| b.frame.height).sum();
    assert_close(tree.height, sum + StyleConfig::default().tail_length);
    assert_close(timeline.content_height(), tree.height);
}

#[test]
fn test_minimum_block_has_bullet_and_date_only() {
    let timeline = Timeline::new(BulletKind::Circle, vec![TimeFrame::new("March")]);
    let block = &timeline.layout().blocks[0];
    assert!(block.text_label.is_none());
    assert!(block.image.is_none());
    assert!(block.connectors.top.is_none());
    assert_eq!(block.date_label.lines, vec!["March"]);
}

#[test]
fn test_blocks_stack_without_gaps_in_both_directions() {
    for direction in [LayoutDirection::Ltr, LayoutDirection::Rtl] {
        let mut timeline = Timeline::new(BulletKind::Arrow, holidays());
        timeline.set_direction(direction);
        assert_gap_free(timeline.layout());
    }
}

#[test]
fn test_connectors_touch_bullets() {
    let timeline = Timeline::new(BulletKind::Hexagon, holidays());
    let tree = timeline.layout();
    for i in 0..tree.blocks.len() - 1 {
        let connector = tree.connector_between(i).unwrap();
        assert_close(connector.start.y, tree.blocks[i].bullet.frame.bottom());
        assert_close(connector.end.y, tree.blocks[i + 1].bullet.frame.top());
        assert_close(connector.start.x, connector.end.x);
    }
    assert!(tree.connector_between(tree.blocks.len() - 1).is_none());

    let last = tree.blocks.last().unwrap();
    assert_close(tree.tail.start.y, last.frame.bottom());
    assert_close(tree.tail.end.y, tree.height);
}

#[test]
fn test_rebuild_with_shorter_list_leaves_nothing_stale() {
    let mut timeline = Timeline::new(BulletKind::Diamond, holidays());
    assert_eq!(timeline.layout().child_count(), 6);

    timeline.set_events(holidays().into_iter().take(2).collect());
    let tree = timeline.layout();
    assert_eq!(tree.blocks.len(), 2);
    assert_eq!(tree.child_count(), 4);
    assert!(tree.blocks.iter().enumerate().all(|(i, b)| b.index == i));
}

#[test]
fn test_changing_bullet_kind_keeps_positions() {
    let mut timeline = Timeline::new(BulletKind::Diamond, holidays());
    let before: Vec<_> = timeline.layout().blocks.iter().map(|b| b.frame).collect();

    for kind in BulletKind::ALL {
        timeline.set_bullet_kind(kind);
        let tree = timeline.layout();
        for (block, frame) in tree.blocks.iter().zip(&before) {
            assert_eq!(block.bullet.kind, kind);
            assert_eq!(block.frame, *frame);
        }
    }
}

#[test]
fn test_rtl_mirrors_ltr() {
    let ltr = Timeline::new(BulletKind::Carrot, holidays());
    let mut rtl = Timeline::new(BulletKind::Carrot, holidays());
    rtl.set_direction(LayoutDirection::Rtl);

    let width = ltr.width();
    for (l, r) in ltr.layout().blocks.iter().zip(&rtl.layout().blocks) {
        assert_eq!(r.bullet.frame, l.bullet.frame.mirrored(width));
        assert_eq!(r.date_label.frame, l.date_label.frame.mirrored(width));
        assert_close(r.bullet.frame.right(), width - 8.0);
    }
    assert_close(rtl.layout().tail.start.x, width - ltr.layout().tail.start.x);
}

#[test]
fn test_tap_fires_only_the_tapped_event() {
    let hits: Vec<_> = (0..2).map(|_| Arc::new(AtomicUsize::new(0))).collect();
    let events = hits
        .iter()
        .enumerate()
        .map(|(i, counter)| {
            let counter = Arc::clone(counter);
            TimeFrame::new(format!("Day {i}"))
                .image(Image::new(format!("{i}.png"), 10, 10, Vec::new()))
                .on_image_tapped(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
        })
        .collect();
    let timeline = Timeline::new(BulletKind::Circle, events);

    let second = timeline.layout().blocks[1].image.as_ref().unwrap().frame.center();
    assert!(timeline.tap(second));
    assert!(!timeline.tap(Point::new(1.0, 1.0)));
    assert_eq!(hits[0].load(Ordering::SeqCst), 0);
    assert_eq!(hits[1].load(Ordering::SeqCst), 1);
}
