// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fragment rendering for each dashboard view.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::ScatterPoint;
use crate::positions::positions_rows_html;
use crate::provider::DashboardData;
use crate::render::ChartView;
use crate::svg::SvgScene;
use crate::views::{ViewMarks, bar_view, line_view, pie_view, scatter_view};

/// The views a dashboard page mounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Allocation pie chart.
    Pie,
    /// Performance area chart.
    Line,
    /// Returns bar chart.
    Bar,
    /// Positions table body.
    Positions,
    /// Scatter demo chart.
    Scatter,
}

impl ViewKind {
    /// All views, in page order.
    pub const ALL: [Self; 5] = [
        Self::Pie,
        Self::Line,
        Self::Bar,
        Self::Positions,
        Self::Scatter,
    ];

    /// Route and CSS name of the view.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pie => "pie",
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Positions => "positions",
            Self::Scatter => "scatter",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnknownView(s.to_owned()))
    }
}

/// Serializes a view's marks as an `<svg>` fragment.
pub fn svg_fragment(kind: ViewKind, view: ViewMarks) -> String {
    let scene = SvgScene::new(view.size).with_class(format!("chart chart-{kind}"));
    let mut chart = ChartView::new(scene);
    chart.render(view.marks);
    chart.renderer().to_svg_string()
}

/// Renders one view from `data` as an HTML fragment.
///
/// Charts render as `<svg>` elements; the positions view renders as table rows.
pub fn render_view(kind: ViewKind, data: &dyn DashboardData) -> Result<String> {
    let marks = match kind {
        ViewKind::Pie => pie_view(&data.allocations()?)?,
        ViewKind::Line => line_view(&data.performance()?)?,
        ViewKind::Bar => bar_view(&data.returns()?)?,
        ViewKind::Scatter => scatter_view(&data.scatter_points()?)?,
        ViewKind::Positions => return Ok(positions_rows_html(&data.positions()?)),
    };
    let fragment = svg_fragment(kind, marks);
    tracing::debug!(view = %kind, bytes = fragment.len(), "rendered view");
    Ok(fragment)
}

/// Decodes a JSON array of `{x, y}` objects.
pub fn parse_scatter_payload(body: &[u8]) -> Result<Vec<ScatterPoint>> {
    serde_json::from_slice(body).map_err(Error::MalformedPayload)
}

/// Renders the scatter fragment for a posted JSON payload.
pub fn render_scatter_payload(body: &[u8]) -> Result<String> {
    let points = parse_scatter_payload(body)?;
    Ok(svg_fragment(ViewKind::Scatter, scatter_view(&points)?))
}

#[cfg(test)]
mod tests {
    use folioviz_charts::ChartError;

    use super::*;
    use crate::provider::SampleData;

    #[test]
    fn view_names_round_trip() {
        for kind in ViewKind::ALL {
            assert_eq!(kind.name().parse::<ViewKind>().unwrap(), kind);
        }
        assert!(matches!(
            "radar".parse::<ViewKind>(),
            Err(Error::UnknownView(name)) if name == "radar"
        ));
    }

    #[test]
    fn every_sample_view_renders() {
        for kind in ViewKind::ALL {
            let html = render_view(kind, &SampleData).unwrap();
            assert!(!html.is_empty(), "{kind}");
        }
        let pie = render_view(ViewKind::Pie, &SampleData).unwrap();
        assert!(pie.starts_with("<svg"), "{pie}");
        assert!(pie.contains(r#"class="chart chart-pie""#), "{pie}");
        let rows = render_view(ViewKind::Positions, &SampleData).unwrap();
        assert!(rows.starts_with("<tr>"), "{rows}");
    }

    #[test]
    fn line_fragment_has_gradient_and_hover() {
        let svg = render_view(ViewKind::Line, &SampleData).unwrap();
        assert!(svg.contains("<linearGradient"), "{svg}");
        assert!(svg.contains("onmouseover="), "{svg}");
        assert!(svg.contains(r#"stroke-linejoin="round""#), "{svg}");
    }

    #[test]
    fn scatter_payload_renders_dots() {
        let svg = render_scatter_payload(br#"[{"x": 1, "y": 2}, {"x": 3, "y": 5}]"#).unwrap();
        assert!(svg.contains(r#"class="chart chart-scatter""#), "{svg}");
        assert!(svg.contains(r##"fill="#4682b4""##), "{svg}");
    }

    #[test]
    fn malformed_scatter_payloads_are_rejected() {
        let bodies: [&[u8]; 3] = [b"not json", br#"{"x": 1, "y": 2}"#, br#"[{"x": "a"}]"#];
        for body in bodies {
            assert!(
                matches!(render_scatter_payload(body), Err(Error::MalformedPayload(_))),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn empty_scatter_payload_is_a_chart_error() {
        assert!(matches!(
            render_scatter_payload(b"[]"),
            Err(Error::Chart(ChartError::EmptyDataSet))
        ));
    }
}
