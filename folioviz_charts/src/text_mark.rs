// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-standing text labels, such as the asset name at a pie slice centroid.

extern crate alloc;

use alloc::string::String;

use folioviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::Point;
use peniko::color::palette::css;

use crate::z_order;

/// A black label centered vertically on `pos`.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor point in scene coordinates.
    pub pos: Point,
    /// Label content.
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Horizontal alignment relative to `pos`.
    pub anchor: TextAnchor,
}

impl TextMarkSpec {
    /// A 10px label starting at `pos`.
    pub fn new(id: MarkId, pos: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            id,
            pos: pos.into(),
            text: text.into(),
            font_size: 10.0,
            anchor: TextAnchor::Start,
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the horizontal alignment.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Generates the text mark, painted above the series.
    pub fn mark(&self) -> Mark {
        Mark::builder(self.id)
            .text()
            .z_index(z_order::SERIES_LABELS)
            .pos(self.pos)
            .content(self.text.clone())
            .font_size(self.font_size)
            .fill(css::BLACK)
            .text_anchor(self.anchor)
            .text_baseline(TextBaseline::Middle)
            .build()
    }
}
