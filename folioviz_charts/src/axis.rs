// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An [`AxisSpec`] owns the scale spec for one visual axis. Series marks instantiate their
//! scale through the axis ([`AxisSpec::scale_continuous`], [`AxisSpec::scale_band`]) so ticks
//! and plotted geometry always come from the same mapping.
//!
//! Linear axes generate round-step ticks, band axes tick at band centers, and time axes draw
//! only the tick values they are given.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use folioviz_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::{BezPath, Point, Rect};
use peniko::{Brush, Color};
use peniko::color::palette::css;

use crate::format::format_tick_with_step;
use crate::scale::{Categories, ScaleBand, ScaleContinuous, ScaleSpec};
use crate::z_order;

/// A paint + width pair for stroked paths (domain lines, ticks, outlines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            label_fill: rule.brush.clone(),
            rule,
            label_font_size: 10.0,
        }
    }
}

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
}

type TickFormatter = Arc<dyn Fn(f64, f64) -> String + Send + Sync>;

/// An axis specification.
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// The axis scale specification.
    pub scale: ScaleSpec,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Explicit tick values in domain units, replacing generated ticks.
    pub tick_values: Option<Vec<f64>>,
    /// Tick line length, pointing away from the plot.
    pub tick_size: f64,
    /// Gap between the tick end and its label.
    pub tick_padding: f64,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Axis styling.
    pub style: AxisStyle,
    /// Band labels, for band scales.
    pub categories: Option<Categories>,
    /// Optional tick label formatter, called with `(value, step)`.
    pub tick_formatter: Option<TickFormatter>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_values", &self.tick_values)
            .field("tick_size", &self.tick_size)
            .field("tick_padding", &self.tick_padding)
            .field("show_domain", &self.show_domain)
            .field("style", &self.style)
            .field("categories", &self.categories)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates a new axis specification.
    ///
    /// Defaults: 10 ticks, tick size 6, tick padding 3, domain line shown.
    pub fn new(id_base: u64, scale: impl Into<ScaleSpec>, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_values: None,
            tick_size: 6.0,
            tick_padding: 3.0,
            show_domain: true,
            style: AxisStyle::default(),
            categories: None,
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: impl Into<ScaleSpec>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Use explicit tick values instead of generated ones.
    pub fn with_tick_values(mut self, values: Vec<f64>) -> Self {
        self.tick_values = Some(values);
        self
    }

    /// Label band ticks with `categories`.
    pub fn with_categories(mut self, categories: Categories) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(
        mut self,
        f: impl Fn(f64, f64) -> String + Send + Sync + 'static,
    ) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    fn range(&self, plot: Rect) -> (f64, f64) {
        match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y1, plot.y0),
        }
    }

    /// Returns the continuous scale this axis maps through, or `None` for a band axis.
    pub fn scale_continuous(&self, plot: Rect) -> Option<ScaleContinuous> {
        let range = self.range(plot);
        match self.scale {
            ScaleSpec::Linear(s) => Some(ScaleContinuous::Linear(s.instantiate(range))),
            ScaleSpec::Time(s) => Some(ScaleContinuous::Time(s.instantiate(range))),
            ScaleSpec::Band(_) => None,
        }
    }

    /// Returns the band scale this axis maps through, or `None` for a continuous axis.
    pub fn scale_band(&self, plot: Rect) -> Option<ScaleBand> {
        match self.scale {
            ScaleSpec::Band(s) => Some(s.instantiate(self.range(plot))),
            _ => None,
        }
    }

    fn tick_values(&self) -> (Vec<f64>, f64) {
        if let Some(values) = &self.tick_values {
            return (values.clone(), tick_step(values));
        }
        match self.scale {
            ScaleSpec::Linear(s) => {
                let ticks: Vec<f64> = s
                    .instantiate((0.0, 1.0))
                    .ticks(self.tick_count)
                    .into_iter()
                    .filter(|v| within(*v, s.domain))
                    .collect();
                let step = tick_step(&ticks);
                (ticks, step)
            }
            ScaleSpec::Time(_) => (Vec::new(), 0.0),
            ScaleSpec::Band(s) => ((0..s.count).map(|i| i as f64).collect(), 1.0),
        }
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        if let Some(f) = &self.tick_formatter {
            return f(v, step);
        }
        match self.scale {
            ScaleSpec::Band(_) => self
                .categories
                .as_ref()
                .and_then(|c| c.label(discrete_index(v)))
                .map(String::from)
                .unwrap_or_else(|| format_tick_with_step(v, 1.0)),
            ScaleSpec::Linear(_) | ScaleSpec::Time(_) => format_tick_with_step(v, step),
        }
    }

    /// Generate axis marks (domain line, ticks, labels) for the given plot rectangle.
    pub fn marks(&self, plot: Rect) -> Vec<Mark> {
        let (ticks, step) = self.tick_values();
        let continuous = self.scale_continuous(plot);
        let band = self.scale_band(plot);
        let position = |v: f64| match (continuous, band) {
            (Some(s), _) => Some(s.map(v)),
            (None, Some(b)) => Some(b.x(discrete_index(v)) + 0.5 * b.band_width()),
            (None, None) => None,
        };
        let (lo, hi) = match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y0, plot.y1),
        };

        let mut out = Vec::new();
        let rule = &self.style.rule;

        if self.show_domain {
            let (from, to) = match self.orient {
                AxisOrient::Bottom => (Point::new(lo, plot.y1), Point::new(hi, plot.y1)),
                AxisOrient::Left => (Point::new(plot.x0, lo), Point::new(plot.x0, hi)),
            };
            out.push(rule_mark(MarkId::from_raw(self.id_base), from, to, rule));
        }

        let tick = self.tick_size.abs();
        let gap = tick + self.tick_padding.max(0.0);
        for (i, v) in ticks.iter().copied().enumerate() {
            let Some(p) = position(v) else {
                continue;
            };
            if !p.is_finite() || p < lo - 1.0e-9 || p > hi + 1.0e-9 {
                continue;
            }
            let tick_id = MarkId::from_raw(self.id_base + 1 + i as u64);
            let label_id = MarkId::from_raw(self.id_base + 1000 + i as u64);
            let (tick_from, tick_to, label) = match self.orient {
                AxisOrient::Bottom => (
                    Point::new(p, plot.y1),
                    Point::new(p, plot.y1 + tick),
                    Mark::builder(label_id)
                        .text()
                        .pos((p, plot.y1 + gap))
                        .text_anchor(TextAnchor::Middle)
                        .text_baseline(TextBaseline::Hanging),
                ),
                AxisOrient::Left => (
                    Point::new(plot.x0 - tick, p),
                    Point::new(plot.x0, p),
                    Mark::builder(label_id)
                        .text()
                        .pos((plot.x0 - gap, p))
                        .text_anchor(TextAnchor::End)
                        .text_baseline(TextBaseline::Middle),
                ),
            };
            out.push(rule_mark(tick_id, tick_from, tick_to, rule));
            out.push(
                label
                    .z_index(z_order::AXIS_LABELS)
                    .content(self.format_tick(v, step))
                    .font_size(self.style.label_font_size)
                    .fill(self.style.label_fill.clone())
                    .build(),
            );
        }

        out
    }
}

/// A stroked segment for the domain line or a tick.
fn rule_mark(id: MarkId, from: Point, to: Point, style: &StrokeStyle) -> Mark {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    Mark::builder(id)
        .path()
        .path_geometry(path)
        .z_index(z_order::AXIS_RULES)
        .fill(Color::TRANSPARENT)
        .stroke(style.brush.clone(), style.stroke_width)
        .build()
}

fn within(v: f64, (a, b): (f64, f64)) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let eps = 1.0e-9 * (hi - lo).abs().max(1.0);
    v >= lo - eps && v <= hi + eps
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

fn discrete_index(v: f64) -> usize {
    if !v.is_finite() || v < 0.0 {
        return 0;
    }
    let v = (v + 0.5).min(10_000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "value is clamped to a small non-negative range"
    )]
    {
        v as usize
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use folioviz_core::MarkPayload;
    use kurbo::Shape;

    use super::*;
    use crate::scale::{ScaleBandSpec, ScaleLinearSpec, ScaleTimeSpec};

    fn labels(marks: &[Mark]) -> Vec<(String, f64, f64)> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some((t.text.clone(), t.pos.x, t.pos.y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn left_axis_ticks_use_the_shared_scale() {
        let plot = Rect::new(40.0, 20.0, 580.0, 370.0);
        let axis = AxisSpec::left(1, ScaleLinearSpec::new((0.0, 7.5)));
        let scale = axis.scale_continuous(plot).unwrap();
        let marks = axis.marks(plot);
        let labels = labels(&marks);
        assert_eq!(labels.first().map(|l| l.0.as_str()), Some("0"));
        for (text, x, y) in &labels {
            let v: f64 = text.parse().unwrap();
            assert!((scale.map(v) - y).abs() < 1e-9);
            assert_eq!(*x, 40.0 - 9.0);
        }
        // Whole steps up to the domain end; 8 lies outside.
        assert_eq!(labels.len(), 8);
    }

    #[test]
    fn band_axis_labels_categories_at_band_centers() {
        let plot = Rect::new(40.0, 20.0, 580.0, 370.0);
        let cats = Categories::from_labels(["Stocks", "Bonds", "Real Estate", "Cash"]).unwrap();
        let axis = AxisSpec::bottom(1, ScaleBandSpec::for_categories(&cats)).with_categories(cats);
        let band = axis.scale_band(plot).unwrap();
        let labels = labels(&axis.marks(plot));
        let names: Vec<&str> = labels.iter().map(|l| l.0.as_str()).collect();
        assert_eq!(names, ["Stocks", "Bonds", "Real Estate", "Cash"]);
        let (_, x, y) = &labels[1];
        assert!((x - (band.x(1) + band.band_width() / 2.0)).abs() < 1e-9);
        assert_eq!(*y, 370.0 + 9.0);
    }

    #[test]
    fn custom_formatter_and_tick_values_are_used() {
        let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
        let axis = AxisSpec::bottom(1, ScaleLinearSpec::new((0.0, 10.0)))
            .with_tick_values(alloc::vec![2.0, 4.0, 40.0])
            .with_tick_formatter(|v, _step| alloc::format!("<{v}>"));
        let labels = labels(&axis.marks(plot));
        let names: Vec<&str> = labels.iter().map(|l| l.0.as_str()).collect();
        // 40 lies outside the plot and is dropped.
        assert_eq!(names, ["<2>", "<4>"]);
    }

    #[test]
    fn time_axis_draws_only_supplied_ticks() {
        let plot = Rect::new(50.0, 20.0, 1480.0, 370.0);
        let day = 86_400.0;
        let bare = AxisSpec::bottom(1, ScaleTimeSpec::new((0.0, 10.0 * day)));
        let marks = bare.marks(plot);
        assert_eq!(marks.len(), 1, "only the domain line");
        assert!(labels(&marks).is_empty());

        let ticked = bare.with_tick_values(alloc::vec![0.0, 5.0 * day]);
        let labels = labels(&ticked.marks(plot));
        assert_eq!(labels.len(), 2);
        assert!((labels[1].1 - 765.0).abs() < 1e-9, "{labels:?}");
    }

    #[test]
    fn domain_and_ticks_are_stroked_rules() {
        let plot = Rect::new(40.0, 20.0, 580.0, 370.0);
        let marks = AxisSpec::left(1, ScaleLinearSpec::new((0.0, 1.0)))
            .with_tick_count(1)
            .marks(plot);
        let MarkPayload::Path(domain) = &marks[0].payload else {
            panic!("expected the domain rule first");
        };
        assert_eq!(marks[0].id, MarkId::from_raw(1));
        assert_eq!(marks[0].z_index, z_order::AXIS_RULES);
        assert_eq!(domain.stroke_width, 1.0);
        assert_eq!(domain.path.bounding_box(), Rect::new(40.0, 20.0, 40.0, 370.0));
    }

    #[test]
    fn continuous_axis_has_no_band_scale() {
        let axis = AxisSpec::left(1, ScaleLinearSpec::new((0.0, 1.0)));
        let plot = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(axis.scale_band(plot).is_none());
        assert!(axis.scale_continuous(plot).is_some());
    }
}
