// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-margin chart layout.
//!
//! A chart has an outer view size and fixed margins; the plot rectangle is what remains. Axes
//! sit in the margin strips adjacent to the plot.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in chart coordinate units.
    pub width: f64,
    /// Height in chart coordinate units.
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Per-side margins around the plot rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl Margins {
    /// Creates margins in CSS order (top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same margin on every side.
    pub const fn uniform(m: f64) -> Self {
        Self::new(m, m, m, m)
    }
}

/// Layout inputs for a single chart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartLayoutSpec {
    /// Outer chart bounds.
    pub view_size: Size,
    /// Margins reserved around the plot.
    pub margins: Margins,
}

impl ChartLayoutSpec {
    /// Creates a layout spec.
    pub const fn new(view_size: Size, margins: Margins) -> Self {
        Self { view_size, margins }
    }
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds.
    pub view: Rect,
    /// The plot (data) rectangle.
    pub plot: Rect,
}

impl ChartLayout {
    /// Computes a layout from the provided specification.
    ///
    /// Margins larger than the view collapse the plot to zero size rather than inverting it.
    pub fn arrange(spec: &ChartLayoutSpec) -> Self {
        let w = spec.view_size.width.max(0.0);
        let h = spec.view_size.height.max(0.0);
        let m = spec.margins;
        let view = Rect::new(0.0, 0.0, w, h);

        let x0 = m.left.max(0.0).min(w);
        let y0 = m.top.max(0.0).min(h);
        let x1 = (w - m.right.max(0.0)).max(x0);
        let y1 = (h - m.bottom.max(0.0)).max(y0);
        let plot = Rect::new(x0, y0, x1, y1);

        Self { view, plot }
    }
}
