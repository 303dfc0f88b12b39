//! Block layout for a timeline.
//!
//! [`layout_timeline`] turns an ordered list of [`TimeFrame`]s and a
//! [`StyleConfig`] into a [`LayoutTree`]: one [`LayoutBlock`] per event,
//! stacked top to bottom with no gaps, plus the connecting line and the tap
//! targets for image regions. Every call builds the tree from scratch.
//!
//! Blocks are laid out left-to-right first and mirrored about the container's
//! centreline afterwards when the direction is right-to-left, so both
//! directions share one code path.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::bullet::{generate_bullet_path, BulletKind, PathSpec};
use crate::color::Color;
use crate::event::{Image, TimeFrame};
use crate::geometry::{Point, Rect, Segment, Size};
use crate::style::{LabelStyle, LayoutDirection, StyleConfig, TextAlign};
use crate::text::{TextBlock, TextMeasure};

/// A bullet placed in the container.
#[derive(Debug, Clone, Serialize)]
pub struct BulletGlyph {
    pub kind: BulletKind,
    pub frame: Rect,
    /// Outline in container coordinates.
    pub path: PathSpec,
}

/// A wrapped label placed in the container.
#[derive(Debug, Clone, Serialize)]
pub struct LabelBox {
    pub frame: Rect,
    pub lines: Vec<String>,
    pub line_height: f64,
    /// Width of the widest line.
    pub text_width: f64,
    pub style: LabelStyle,
    pub align: TextAlign,
}

impl LabelBox {
    fn new(frame: Rect, measured: TextBlock, style: LabelStyle, align: TextAlign) -> Self {
        Self {
            frame,
            text_width: measured.size.width,
            lines: measured.lines,
            line_height: measured.line_height,
            style,
            align,
        }
    }
}

/// The rounded container holding an event's image.
#[derive(Debug, Clone, Serialize)]
pub struct ImageBox {
    pub frame: Rect,
    pub corner_radius: f64,
    /// Where the image itself lands after aspect fitting.
    pub image_frame: Rect,
    pub image: Image,
}

/// Connector segments owned by one block.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Connectors {
    /// Block top down to the bullet top. Absent on the first block.
    pub top: Option<Segment>,
    /// Bullet bottom down to the block bottom.
    pub bottom: Segment,
}

/// The laid-out unit for one event.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutBlock {
    /// Position of the event in the input list.
    pub index: usize,
    pub frame: Rect,
    pub bullet: BulletGlyph,
    pub date_label: LabelBox,
    pub text_label: Option<LabelBox>,
    pub image: Option<ImageBox>,
    pub connectors: Connectors,
}

type TapAction = Arc<dyn Fn() + Send + Sync>;

/// An invisible region that fires its event's callback when tapped.
#[derive(Clone)]
pub struct TapTarget {
    pub rect: Rect,
    pub event_index: usize,
    action: TapAction,
}

impl TapTarget {
    /// Run the bound callback.
    pub fn fire(&self) {
        (self.action)();
    }
}

impl fmt::Debug for TapTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapTarget")
            .field("rect", &self.rect)
            .field("event_index", &self.event_index)
            .finish_non_exhaustive()
    }
}

/// Complete output of one layout pass.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutTree {
    pub width: f64,
    pub height: f64,
    pub direction: LayoutDirection,
    pub line_color: Color,
    /// Zero-height element the first block hangs from.
    pub guide: Rect,
    pub blocks: Vec<LayoutBlock>,
    /// Line continuing past the last block.
    pub tail: Segment,
    #[serde(skip)]
    pub tap_targets: Vec<TapTarget>,
}

impl LayoutTree {
    /// Number of top-level children: the guide, every block, and the tail.
    pub fn child_count(&self) -> usize {
        self.blocks.len() + 2
    }

    pub fn content_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The line between bullet `index` and bullet `index + 1`, merged from
    /// the two block-owned segments.
    pub fn connector_between(&self, index: usize) -> Option<Segment> {
        let upper = self.blocks.get(index)?;
        let lower = self.blocks.get(index + 1)?;
        let lower_top = lower.connectors.top?;
        Some(Segment::new(upper.connectors.bottom.start, lower_top.end))
    }

    /// Every line segment of the connecting line, top to bottom, tail last.
    pub fn line_segments(&self) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(self.blocks.len() * 2 + 1);
        for block in &self.blocks {
            segments.extend(block.connectors.top);
            segments.push(block.connectors.bottom);
        }
        segments.push(self.tail);
        segments
    }

    /// The tap target under `point`, if any.
    pub fn hit_test(&self, point: Point) -> Option<&TapTarget> {
        self.tap_targets.iter().find(|t| t.rect.contains(point))
    }

    /// Fire the tap target under `point`. Returns whether one fired.
    pub fn tap(&self, point: Point) -> bool {
        match self.hit_test(point) {
            Some(target) => {
                tracing::debug!(event = target.event_index, "Image tapped");
                target.fire();
                true
            }
            None => false,
        }
    }
}

/// Lay out `events` in a container `width` units wide.
pub fn layout_timeline(
    events: &[TimeFrame],
    style: &StyleConfig,
    width: f64,
    measure: &dyn TextMeasure,
) -> LayoutTree {
    let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    let metrics = &style.metrics;
    let bullet_size = style.bullet_size();
    let align = style.direction.natural_alignment();

    let local_path = generate_bullet_path(style.bullet_kind, bullet_size, style.direction);

    let guide = Rect::new(0.0, metrics.top_margin, width, 0.0);
    let mut y = guide.bottom();
    let mut blocks = Vec::with_capacity(events.len());
    let mut tap_targets = Vec::new();

    for (index, event) in events.iter().enumerate() {
        let top = y;
        let bullet = Rect::new(
            metrics.bullet_inset,
            top + metrics.bullet_inset,
            bullet_size,
            bullet_size,
        );
        let label_x = bullet.right() + metrics.label_gap;
        let label_width = (width - label_x - metrics.trailing_margin).max(0.0);

        let date_style = style.date_style_for(&event.date);
        let date_measured = measure.measure(&event.date, label_width, &date_style);
        let date_y = (bullet.center().y - date_measured.size.height / 2.0).max(top);
        let date_frame = Rect::new(label_x, date_y, label_width, date_measured.size.height);
        let date_label = LabelBox::new(date_frame, date_measured, date_style, align);
        let mut last_bottom = date_frame.bottom();

        let text_label = event.body().map(|text| {
            let text_style = style.text_style_for(text);
            let measured = measure.measure(text, label_width, &text_style);
            let frame = Rect::new(
                label_x,
                last_bottom + metrics.text_gap,
                label_width,
                measured.size.height,
            );
            last_bottom = frame.bottom();
            LabelBox::new(frame, measured, text_style, align)
        });

        let image = event.image.as_ref().map(|image| {
            let frame = Rect::new(
                label_x,
                last_bottom + metrics.image_gap,
                (width - label_x - metrics.image_trailing_margin).max(0.0),
                metrics.image_height,
            );
            last_bottom = frame.bottom();
            ImageBox {
                frame,
                corner_radius: metrics.image_corner_radius,
                image_frame: frame.aspect_fit(image.size()),
                image: image.clone(),
            }
        });

        let bottom = (last_bottom + metrics.bottom_margin).max(bullet.bottom());
        let axis = bullet.center().x;
        let connectors = Connectors {
            top: (index > 0).then(|| Segment::vertical(axis, top, bullet.top())),
            bottom: Segment::vertical(axis, bullet.bottom(), bottom),
        };

        if let (Some(image_box), Some(handler)) = (&image, &event.on_image_tapped) {
            let handler = Arc::clone(handler);
            let image = image_box.image.clone();
            tap_targets.push(TapTarget {
                rect: image_box.frame,
                event_index: index,
                action: Arc::new(move || handler(&image)),
            });
        }

        tracing::trace!(index, top, bottom, "Laid out block");

        blocks.push(LayoutBlock {
            index,
            frame: Rect::new(0.0, top, width, bottom - top),
            bullet: BulletGlyph {
                kind: style.bullet_kind,
                frame: bullet,
                path: local_path.translated(bullet.origin()),
            },
            date_label,
            text_label,
            image,
            connectors,
        });
        y = bottom;
    }

    let axis = metrics.bullet_inset + bullet_size / 2.0;
    let mut tree = LayoutTree {
        width,
        height: y + style.tail_length,
        direction: style.direction,
        line_color: style.line_color,
        guide,
        tail: Segment::vertical(axis, y, y + style.tail_length),
        blocks,
        tap_targets,
    };

    if style.direction.is_rtl() {
        mirror_tree(&mut tree);
    }

    tree
}

/// Reflect every element about the container's vertical centreline.
///
/// Bullet paths were generated already mirrored inside their own box, so
/// they only move along with their frame.
fn mirror_tree(tree: &mut LayoutTree) {
    let width = tree.width;
    tree.guide = tree.guide.mirrored(width);
    tree.tail = tree.tail.mirrored(width);
    for block in &mut tree.blocks {
        block.frame = block.frame.mirrored(width);
        let mirrored_bullet = block.bullet.frame.mirrored(width);
        let shift = Point::new(mirrored_bullet.x - block.bullet.frame.x, 0.0);
        block.bullet.path = block.bullet.path.translated(shift);
        block.bullet.frame = mirrored_bullet;
        block.date_label.frame = block.date_label.frame.mirrored(width);
        if let Some(label) = &mut block.text_label {
            label.frame = label.frame.mirrored(width);
        }
        if let Some(image) = &mut block.image {
            image.frame = image.frame.mirrored(width);
            image.image_frame = image.image_frame.mirrored(width);
        }
        block.connectors.top = block.connectors.top.map(|s| s.mirrored(width));
        block.connectors.bottom = block.connectors.bottom.mirrored(width);
    }
    for target in &mut tree.tap_targets {
        target.rect = target.rect.mirrored(width);
    }
}
