// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks: the visual elements a view is made of.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Join, Point, Rect, Shape};
use peniko::Brush;

use crate::table::TableId;

/// Stable identity of a mark across ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates a mark id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives a mark id for a row of a table.
    ///
    /// The table id occupies the high 32 bits, so per-row ids of different tables never collide.
    pub const fn for_row(table: TableId, row_key: u64) -> Self {
        Self(((table.0 as u64) << 32) | (row_key & 0xFFFF_FFFF))
    }
}

/// The kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// An axis-aligned rectangle.
    Rect,
    /// An arbitrary path.
    Path,
    /// A single line of unshaped text.
    Text,
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor position.
    #[default]
    Start,
    /// Text is centered on the anchor position.
    Middle,
    /// Text ends at the anchor position.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Alphabetic baseline.
    Alphabetic,
    /// Vertical middle of the em box.
    #[default]
    Middle,
    /// Hanging baseline (text hangs below the anchor).
    Hanging,
    /// Ideographic baseline.
    Ideographic,
}

/// Stroke applied while the pointer hovers a path; reverted when the pointer leaves.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverStroke {
    /// Stroke paint while hovered.
    pub brush: Brush,
    /// Stroke width while hovered.
    pub stroke_width: f64,
}

/// Resolved rectangle geometry and style.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Rectangle in scene coordinates.
    ///
    /// Not normalized: a negative height is carried through as computed.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
}

/// Resolved path geometry and style.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Path in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Fill opacity multiplier in `0..=1`.
    pub fill_opacity: f64,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0` disables the stroke.
    pub stroke_width: f64,
    /// Stroke line join.
    pub stroke_join: Join,
    /// Optional hover stroke.
    pub hover: Option<HoverStroke>,
}

/// Resolved text content and style.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// Kind-specific mark content.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// Rectangle payload.
    Rect(RectPayload),
    /// Path payload.
    Path(PathPayload),
    /// Text payload.
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns the kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns geometric bounds, if they are known without text metrics.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect.abs()),
            Self::Path(p) => {
                if p.path.elements().is_empty() {
                    None
                } else {
                    Some(p.path.bounding_box())
                }
            }
            Self::Text(_) => None,
        }
    }

    fn default_for(kind: MarkKind) -> Self {
        match kind {
            MarkKind::Rect => Self::Rect(RectPayload {
                rect: Rect::ZERO,
                fill: Brush::default(),
            }),
            MarkKind::Path => Self::Path(PathPayload {
                path: BezPath::new(),
                fill: Brush::default(),
                fill_opacity: 1.0,
                stroke: Brush::default(),
                stroke_width: 0.0,
                stroke_join: Join::Miter,
                hover: None,
            }),
            MarkKind::Text => Self::Text(TextPayload {
                pos: Point::ZERO,
                text: String::new(),
                font_size: 10.0,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Middle,
                fill: Brush::default(),
            }),
        }
    }
}

/// A single visual element with stable identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable id.
    pub id: MarkId,
    /// Paint order; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Geometry and style.
    pub payload: MarkPayload,
}

impl Mark {
    /// Starts building a mark. The builder defaults to a rectangle.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder {
            id,
            z_index: 0,
            payload: MarkPayload::default_for(MarkKind::Rect),
        }
    }

    /// Returns the kind of this mark.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }
}

/// Builder for [`Mark`].
///
/// Setters that do not apply to the current kind are ignored, e.g. `content` on a rect builder.
#[derive(Clone, Debug)]
pub struct MarkBuilder {
    id: MarkId,
    z_index: i32,
    payload: MarkPayload,
}

impl MarkBuilder {
    /// Switches to a rectangle mark.
    pub fn rect(mut self) -> Self {
        self.payload = MarkPayload::default_for(MarkKind::Rect);
        self
    }

    /// Switches to a path mark.
    pub fn path(mut self) -> Self {
        self.payload = MarkPayload::default_for(MarkKind::Path);
        self
    }

    /// Switches to a text mark.
    pub fn text(mut self) -> Self {
        self.payload = MarkPayload::default_for(MarkKind::Text);
        self
    }

    /// Sets the z-index.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the rectangle geometry.
    pub fn rect_geometry(mut self, rect: Rect) -> Self {
        if let MarkPayload::Rect(r) = &mut self.payload {
            r.rect = rect;
        }
        self
    }

    /// Sets the path geometry.
    pub fn path_geometry(mut self, path: BezPath) -> Self {
        if let MarkPayload::Path(p) = &mut self.payload {
            p.path = path;
        }
        self
    }

    /// Sets the text anchor position.
    pub fn pos(mut self, pos: impl Into<Point>) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.pos = pos.into();
        }
        self
    }

    /// Sets the text content.
    pub fn content(mut self, text: impl Into<String>) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.text = text.into();
        }
        self
    }

    /// Sets the font size.
    pub fn font_size(mut self, font_size: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.font_size = font_size;
        }
        self
    }

    /// Sets the horizontal text anchor.
    pub fn text_anchor(mut self, anchor: TextAnchor) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.anchor = anchor;
        }
        self
    }

    /// Sets the vertical text baseline.
    pub fn text_baseline(mut self, baseline: TextBaseline) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.baseline = baseline;
        }
        self
    }

    /// Sets the fill paint (all kinds).
    pub fn fill(mut self, fill: impl Into<Brush>) -> Self {
        let fill = fill.into();
        match &mut self.payload {
            MarkPayload::Rect(r) => r.fill = fill,
            MarkPayload::Path(p) => p.fill = fill,
            MarkPayload::Text(t) => t.fill = fill,
        }
        self
    }

    /// Sets the path fill opacity.
    pub fn fill_opacity(mut self, opacity: f64) -> Self {
        if let MarkPayload::Path(p) = &mut self.payload {
            p.fill_opacity = opacity.clamp(0.0, 1.0);
        }
        self
    }

    /// Sets the path stroke paint and width.
    pub fn stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        if let MarkPayload::Path(p) = &mut self.payload {
            p.stroke = stroke.into();
            p.stroke_width = stroke_width;
        }
        self
    }

    /// Sets the path stroke line join.
    pub fn stroke_join(mut self, join: Join) -> Self {
        if let MarkPayload::Path(p) = &mut self.payload {
            p.stroke_join = join;
        }
        self
    }

    /// Sets the path hover stroke.
    pub fn hover_stroke(mut self, hover: HoverStroke) -> Self {
        if let MarkPayload::Path(p) = &mut self.payload {
            p.hover = Some(hover);
        }
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        Mark {
            id: self.id,
            z_index: self.z_index,
            payload: self.payload,
        }
    }
}
