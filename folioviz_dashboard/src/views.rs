// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View assembly: records in, positioned marks out.
//!
//! Each view is a pure function of its records. Scales are owned by the chart axes and shared
//! with the series, so ticks and geometry always agree.

use folioviz_charts::{
    AreaMarkSpec, AxisSpec, BarMarkSpec, Categories, ChartError, ChartLayoutSpec, ChartSpec,
    LegendSwatches, Margins, PieLayout, PointMarkSpec, ScaleBandSpec, ScaleLinearSpec,
    ScaleOrdinal, ScaleTimeSpec, SectorMarkSpec, Size, StrokeStyle, TextMarkSpec,
};
use folioviz_core::{Mark, MarkId, TableId, TextAnchor};
use kurbo::{Join, Point};
use peniko::Gradient;
use peniko::color::palette::css;

use crate::calendar::{calendar_ticks, date_seconds, format_calendar_tick_seconds};
use crate::error::Result;
use crate::model::{
    AllocationTable, AssetAllocation, AssetReturn, PerformanceTable, PortfolioPerformance,
    ReturnsTable, ScatterPoint, ScatterTable,
};

const PIE_SLICES: TableId = TableId(1);
const PIE_LABELS: TableId = TableId(2);
const PERFORMANCE: TableId = TableId(3);
const RETURNS: TableId = TableId(4);
const SCATTER: TableId = TableId(5);

const PIE_LEGEND: u64 = 10_000;
const LINE_X_AXIS: u64 = 20_000;
const LINE_Y_AXIS: u64 = 30_000;
const BAR_X_AXIS: u64 = 40_000;
const BAR_Y_AXIS: u64 = 50_000;
const SCATTER_X_AXIS: u64 = 60_000;
const SCATTER_Y_AXIS: u64 = 70_000;

const PIE_SIZE: Size = Size::new(450.0, 450.0);
const PIE_MARGIN: f64 = 40.0;
const PIE_LABEL_FONT_SIZE: f64 = 12.0;

const LINE_SIZE: Size = Size::new(1500.0, 400.0);
const BAR_SIZE: Size = Size::new(600.0, 400.0);
const SCATTER_SIZE: Size = Size::new(600.0, 400.0);
const SCATTER_RADIUS: f64 = 5.0;

const TICK_COUNT: usize = 10;

/// The marks of one view and the pixel size they are laid out in.
#[derive(Clone, Debug)]
pub struct ViewMarks {
    /// Size of the view.
    pub size: Size,
    /// Positioned marks.
    pub marks: Vec<Mark>,
}

/// Allocation pie: one sector per record, clockwise from 12 o'clock in descending value
/// order, a label at each slice centroid and a swatch legend in the top-left corner.
pub fn pie_view(data: &[AssetAllocation]) -> Result<ViewMarks> {
    let table = AllocationTable(data);
    let colors = ScaleOrdinal::dark2(Categories::from_column(&table, AllocationTable::ASSET)?);
    let values: Vec<f64> = data.iter().map(|r| r.value).collect();
    let layout = PieLayout::new(&values)?;

    let radius = PIE_SIZE.width.min(PIE_SIZE.height) / 2.0 - PIE_MARGIN;
    let center = Point::new(PIE_SIZE.width / 2.0, PIE_SIZE.height / 2.0);

    let mut marks = Vec::with_capacity(data.len() * 4);
    for (slice, record) in layout.slices().iter().zip(data) {
        let row = slice.index as u64;
        let fill = colors.color(&record.asset).unwrap_or(css::GRAY);
        marks.push(
            SectorMarkSpec::for_slice(MarkId::for_row(PIE_SLICES, row), center, 0.0, radius, slice)
                .with_fill(fill)
                .mark(),
        );
        marks.push(
            TextMarkSpec::new(
                MarkId::for_row(PIE_LABELS, row),
                center + slice.centroid(0.0, radius),
                record.asset.clone(),
            )
            .with_anchor(TextAnchor::Middle)
            .with_font_size(PIE_LABEL_FONT_SIZE)
            .mark(),
        );
    }
    marks.extend(LegendSwatches::for_ordinal(PIE_LEGEND, 4.0, 4.0, &colors).marks());

    Ok(ViewMarks {
        size: PIE_SIZE,
        marks,
    })
}

/// Performance area: a monotone curve over time filled down to the plot bottom, with a
/// diagonal steelblue-to-white gradient and a hover outline.
///
/// Gaps (`NaN` values) split the area into separate runs.
pub fn line_view(data: &[PortfolioPerformance]) -> Result<ViewMarks> {
    let table = PerformanceTable(data);
    let x_spec = ScaleTimeSpec::from_extent(data.iter().map(|r| date_seconds(r.date)))?;
    let y_spec = ScaleLinearSpec::zero_based(data.iter().map(|r| r.value))?;
    let (Some(first), Some(last)) = (
        data.iter().map(|r| r.date).min(),
        data.iter().map(|r| r.date).max(),
    ) else {
        return Err(ChartError::EmptyDataSet.into());
    };
    let ticks = calendar_ticks(first, last, TICK_COUNT)
        .into_iter()
        .map(date_seconds)
        .collect();

    let chart = ChartSpec::new(ChartLayoutSpec::new(
        LINE_SIZE,
        Margins::new(20.0, 20.0, 30.0, 50.0),
    ))
    .with_axis_bottom(
        AxisSpec::bottom(LINE_X_AXIS, x_spec)
            .with_tick_values(ticks)
            .with_tick_formatter(format_calendar_tick_seconds),
    )
    .with_axis_left(AxisSpec::left(LINE_Y_AXIS, y_spec).with_tick_count(TICK_COUNT));

    let (_, marks) = chart.marks(|chart, plot| {
        let (Some(x), Some(y)) = (chart.x_scale_continuous(plot), chart.y_scale_continuous(plot))
        else {
            return Vec::new();
        };
        let gradient = Gradient::new_linear((plot.x0, plot.y0), (plot.x1, plot.y1))
            .with_stops([css::STEEL_BLUE, css::WHITE].as_slice());
        let area = AreaMarkSpec::new(
            MarkId::for_row(PERFORMANCE, 0),
            PERFORMANCE,
            PerformanceTable::DATE,
            PerformanceTable::VALUE,
            x,
            y,
        )
        .with_fill(gradient)
        .with_fill_opacity(0.5)
        .with_stroke(StrokeStyle::solid(css::STEEL_BLUE, 1.5))
        .with_stroke_join(Join::Round)
        .with_hover_stroke(StrokeStyle::solid(css::BLACK, 2.0));
        vec![area.mark(&table)]
    });

    Ok(ViewMarks {
        size: LINE_SIZE,
        marks,
    })
}

/// Returns bars: one steelblue bar per asset, growing up from the plot bottom.
///
/// The value scale is floored at zero. Negative returns are drawn as computed (a bar with a
/// negative height) and reported with a warning.
pub fn bar_view(data: &[AssetReturn]) -> Result<ViewMarks> {
    let table = ReturnsTable(data);
    let categories = Categories::from_column(&table, ReturnsTable::ASSET)?;
    let y_spec = ScaleLinearSpec::zero_based(data.iter().map(|r| r.return_pct))?;
    for record in data.iter().filter(|r| r.return_pct < 0.0) {
        tracing::warn!(
            asset = %record.asset,
            return_pct = record.return_pct,
            "negative return drawn below the zero baseline"
        );
    }

    let chart = ChartSpec::new(ChartLayoutSpec::new(
        BAR_SIZE,
        Margins::new(20.0, 20.0, 30.0, 40.0),
    ))
    .with_axis_bottom(
        AxisSpec::bottom(BAR_X_AXIS, ScaleBandSpec::for_categories(&categories))
            .with_categories(categories.clone()),
    )
    .with_axis_left(AxisSpec::left(BAR_Y_AXIS, y_spec).with_tick_count(TICK_COUNT));

    let (_, marks) = chart.marks(|chart, plot| {
        let (Some(band), Some(y)) = (chart.x_scale_band(plot), chart.y_scale_continuous(plot))
        else {
            return Vec::new();
        };
        BarMarkSpec::new(
            RETURNS,
            ReturnsTable::ASSET,
            ReturnsTable::RETURN,
            categories,
            band,
            y,
        )
        .with_fill(css::STEEL_BLUE)
        .marks(&table)
    });

    Ok(ViewMarks {
        size: BAR_SIZE,
        marks,
    })
}

/// Scatter demo: independent linear scales over the observed x and y extents, one dot per
/// point.
pub fn scatter_view(data: &[ScatterPoint]) -> Result<ViewMarks> {
    let table = ScatterTable(data);
    let x_spec = ScaleLinearSpec::from_extent(data.iter().map(|p| p.x))?;
    let y_spec = ScaleLinearSpec::from_extent(data.iter().map(|p| p.y))?;

    let chart = ChartSpec::new(ChartLayoutSpec::new(
        SCATTER_SIZE,
        Margins::new(20.0, 20.0, 30.0, 40.0),
    ))
    .with_axis_bottom(AxisSpec::bottom(SCATTER_X_AXIS, x_spec).with_tick_count(TICK_COUNT))
    .with_axis_left(AxisSpec::left(SCATTER_Y_AXIS, y_spec).with_tick_count(TICK_COUNT));

    let (_, marks) = chart.marks(|chart, plot| {
        let (Some(x), Some(y)) = (chart.x_scale_continuous(plot), chart.y_scale_continuous(plot))
        else {
            return Vec::new();
        };
        PointMarkSpec::new(SCATTER, ScatterTable::X, ScatterTable::Y, x, y)
            .with_radius(SCATTER_RADIUS)
            .with_fill(css::STEEL_BLUE)
            .marks(&table)
    });

    Ok(ViewMarks {
        size: SCATTER_SIZE,
        marks,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use folioviz_core::{MarkPayload, TextPayload};
    use kurbo::{PathEl, Rect, Shape};
    use peniko::Brush;

    use super::*;
    use crate::error::Error;
    use crate::provider::{DashboardData, SampleData};

    fn texts(marks: &[Mark]) -> Vec<&TextPayload> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn rect_of(marks: &[Mark], id: MarkId) -> Rect {
        let mark = marks.iter().find(|m| m.id == id).unwrap();
        let MarkPayload::Rect(r) = &mark.payload else {
            panic!("expected a rect for {id:?}");
        };
        r.rect
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn pie_has_a_sector_label_and_legend_entry_per_asset() {
        let view = pie_view(&SampleData.allocations().unwrap()).unwrap();
        assert_eq!(view.size, PIE_SIZE);
        assert_eq!(view.marks.len(), 16);

        let labels: Vec<&str> = texts(&view.marks).iter().map(|t| t.text.as_str()).collect();
        for asset in ["Stocks", "Bonds", "Real Estate", "Cash"] {
            assert_eq!(labels.iter().filter(|l| **l == asset).count(), 2, "{asset}");
        }

        // Stocks holds half the pie, from 12 to 6 o'clock; its centroid sits at 3 o'clock.
        let stocks = texts(&view.marks)
            .into_iter()
            .find(|t| t.text == "Stocks" && t.anchor == TextAnchor::Middle)
            .unwrap();
        assert!(close(stocks.pos.x, 225.0 + 92.5), "{:?}", stocks.pos);
        assert!(close(stocks.pos.y, 225.0), "{:?}", stocks.pos);
    }

    #[test]
    fn pie_colors_follow_the_palette_in_domain_order() {
        let view = pie_view(&SampleData.allocations().unwrap()).unwrap();
        let sector = view
            .marks
            .iter()
            .find(|m| m.id == MarkId::for_row(PIE_SLICES, 1))
            .unwrap();
        let MarkPayload::Path(p) = &sector.payload else {
            panic!("expected a sector path");
        };
        assert_eq!(p.fill, Brush::from(folioviz_charts::DARK2[1]));
    }

    #[test]
    fn line_area_carries_gradient_hover_and_calendar_ticks() {
        let view = line_view(&SampleData.performance().unwrap()).unwrap();
        let area = view
            .marks
            .iter()
            .find(|m| m.id == MarkId::for_row(PERFORMANCE, 0))
            .unwrap();
        let MarkPayload::Path(p) = &area.payload else {
            panic!("expected an area path");
        };
        assert!(matches!(p.fill, Brush::Gradient(_)));
        assert_eq!(p.fill_opacity, 0.5);
        assert_eq!(p.stroke_join, Join::Round);
        assert_eq!(p.hover.as_ref().map(|h| h.stroke_width), Some(2.0));

        let labels: Vec<&str> = texts(&view.marks).iter().map(|t| t.text.as_str()).collect();
        assert!(labels.contains(&"2023"), "{labels:?}");
        assert!(labels.contains(&"Jan 08"), "{labels:?}");
        assert!(labels.contains(&"100,000"), "{labels:?}");
    }

    #[test]
    fn gap_in_performance_splits_the_area() {
        let mut series = SampleData.performance().unwrap();
        series[2].value = f64::NAN;
        let view = line_view(&series).unwrap();
        let area = view
            .marks
            .iter()
            .find(|m| m.id == MarkId::for_row(PERFORMANCE, 0))
            .unwrap();
        let MarkPayload::Path(p) = &area.payload else {
            panic!("expected an area path");
        };
        let moves = p
            .path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 2);
    }

    #[test]
    fn bar_heights_scale_from_the_zero_floor() {
        let view = bar_view(&SampleData.returns().unwrap()).unwrap();
        let plot_height = 400.0 - 20.0 - 30.0;
        let stocks = rect_of(&view.marks, MarkId::for_row(RETURNS, 0));
        let cash = rect_of(&view.marks, MarkId::for_row(RETURNS, 3));
        assert!(close(stocks.height(), plot_height), "{stocks:?}");
        assert!(close(cash.height(), plot_height * 1.1 / 7.5), "{cash:?}");
        assert!(close(stocks.y1, cash.y1), "bars share the bottom edge");

        let labels: Vec<&str> = texts(&view.marks).iter().map(|t| t.text.as_str()).collect();
        assert!(labels.contains(&"Real Estate"), "{labels:?}");
    }

    #[test]
    fn negative_return_keeps_its_raw_height() {
        let returns = vec![
            AssetReturn {
                asset: "Stocks".into(),
                return_pct: 5.0,
            },
            AssetReturn {
                asset: "Crypto".into(),
                return_pct: -2.5,
            },
        ];
        let view = bar_view(&returns).unwrap();
        let crypto = rect_of(&view.marks, MarkId::for_row(RETURNS, 1));
        assert!(close(crypto.height(), -175.0), "{crypto:?}");
    }

    #[test]
    fn scatter_draws_one_dot_per_point() {
        let points = SampleData.scatter_points().unwrap();
        let view = scatter_view(&points).unwrap();
        let dots = view
            .marks
            .iter()
            .filter(|m| m.id.0 >> 32 == u64::from(SCATTER.0))
            .count();
        assert_eq!(dots, points.len());
    }

    #[test]
    fn empty_inputs_fail_explicitly() {
        let empty = |r: Result<ViewMarks>| matches!(r, Err(Error::Chart(ChartError::EmptyDataSet)));
        assert!(empty(pie_view(&[])));
        assert!(empty(line_view(&[])));
        assert!(empty(bar_view(&[])));
        assert!(empty(scatter_view(&[])));
    }

    fn path_bounds(marks: &[Mark], id: MarkId) -> Rect {
        let mark = marks.iter().find(|m| m.id == id).unwrap();
        let MarkPayload::Path(p) = &mark.payload else {
            panic!("expected a path for {id:?}");
        };
        p.path.bounding_box()
    }

    #[test]
    fn single_date_series_is_centered() {
        let series = [PortfolioPerformance {
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            value: 10.0,
        }];
        let view = line_view(&series).unwrap();
        let bounds = path_bounds(&view.marks, MarkId::for_row(PERFORMANCE, 0));
        // Plot spans x 50..1480.
        assert!(close(bounds.x0, 765.0), "{bounds:?}");
        assert!(close(bounds.x1, 765.0), "{bounds:?}");
    }

    #[test]
    fn single_scatter_point_sits_at_the_plot_center() {
        let view = scatter_view(&[ScatterPoint { x: 3.0, y: 7.0 }]).unwrap();
        let center = path_bounds(&view.marks, MarkId::for_row(SCATTER, 0)).center();
        // Plot is (40, 20)..(580, 370).
        assert!((center.x - 310.0).abs() < 0.2, "{center:?}");
        assert!((center.y - 195.0).abs() < 0.2, "{center:?}");
    }
}
