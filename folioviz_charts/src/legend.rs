// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation: a vertical list of color swatches with text labels.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use folioviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::Rect;
use peniko::color::palette::css;
use peniko::{Brush, Color};

use crate::palette::ScaleOrdinal;
use crate::z_order;

/// A simple legend row item.
#[derive(Clone, Debug)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
        }
    }
}

/// A legend positioned at a top-left origin.
#[derive(Clone, Debug)]
pub struct LegendSwatches {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// Legend origin (left).
    pub x: f64,
    /// Legend origin (top).
    pub y: f64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatches {
    /// Creates a legend at `(x, y)` with 10px swatches.
    pub fn new(id_base: u64, x: f64, y: f64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            x,
            y,
            swatch_size: 10.0,
            row_gap: 6.0,
            label_dx: 5.0,
            font_size: 10.0,
            text_fill: css::BLACK.into(),
            items,
        }
    }

    /// One item per label of `scale`, in domain order.
    pub fn for_ordinal(id_base: u64, x: f64, y: f64, scale: &ScaleOrdinal<'_>) -> Self {
        let items = scale
            .domain()
            .labels()
            .iter()
            .enumerate()
            .filter_map(|(i, label)| Some(LegendItem::solid(label.as_str(), scale.color_at(i)?)))
            .collect();
        Self::new(id_base, x, y, items)
    }

    /// Generate legend marks (swatch rect + label text per item).
    pub fn marks(&self) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.items.len() * 2);
        let row_height = self.swatch_size.max(self.font_size);

        for (i, item) in self.items.iter().enumerate() {
            let y = self.y + i as f64 * (row_height + self.row_gap);
            let swatch_y = y + (row_height - self.swatch_size) * 0.5;

            out.push(
                Mark::builder(MarkId::from_raw(self.id_base + i as u64))
                    .rect()
                    .z_index(z_order::LEGEND_SWATCHES)
                    .rect_geometry(Rect::new(
                        self.x,
                        swatch_y,
                        self.x + self.swatch_size,
                        swatch_y + self.swatch_size,
                    ))
                    .fill(item.fill.clone())
                    .build(),
            );
            out.push(
                Mark::builder(MarkId::from_raw(self.id_base + 1000 + i as u64))
                    .text()
                    .z_index(z_order::LEGEND_LABELS)
                    .pos((
                        self.x + self.swatch_size + self.label_dx,
                        y + row_height * 0.5,
                    ))
                    .content(item.label.clone())
                    .font_size(self.font_size)
                    .fill(self.text_fill.clone())
                    .text_anchor(TextAnchor::Start)
                    .text_baseline(TextBaseline::Middle)
                    .build(),
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use folioviz_core::MarkPayload;

    use super::*;
    use crate::palette::DARK2;
    use crate::scale::Categories;

    #[test]
    fn ordinal_legend_lists_every_label_with_its_color() {
        let scale = ScaleOrdinal::dark2(
            Categories::from_labels(["Stocks", "Bonds", "Real Estate", "Cash"]).unwrap(),
        );
        let legend = LegendSwatches::for_ordinal(500, 4.0, 4.0, &scale);
        let marks = legend.marks();
        assert_eq!(marks.len(), 8);

        let labels: Vec<&str> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, ["Stocks", "Bonds", "Real Estate", "Cash"]);

        let MarkPayload::Rect(swatch) = &marks[2].payload else {
            panic!("expected a swatch rect");
        };
        assert_eq!(swatch.fill, Brush::Solid(DARK2[1]));
        assert_eq!(swatch.rect.y0, 4.0 + 16.0);
    }
}
