// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar mark generation.

extern crate alloc;

use alloc::vec::Vec;

use folioviz_core::{ColId, Mark, MarkId, TableData, TableId};
use kurbo::Rect;
use peniko::Brush;

use crate::scale::{Categories, ScaleBand, ScaleContinuous};

/// A vertical bar mark derived from a table: one rect per row.
///
/// Each bar spans its category's band horizontally and runs from the scaled baseline to the
/// scaled value vertically. A value on the far side of the baseline yields a rect with negative
/// height; it is reported as computed, not flipped.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// Source table id.
    pub table: TableId,
    /// Column holding each row's category label.
    pub category: ColId,
    /// Column for bar values.
    pub value: ColId,
    /// Category order shared with the band axis.
    pub categories: Categories,
    /// Band scale used for bar positions along x.
    pub band: ScaleBand,
    /// Linear scale used for bar positions along y.
    pub y_scale: ScaleContinuous,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Fill paint for bars.
    pub fill: Brush,
    /// Rendering order hint.
    pub z_index: i32,
}

impl BarMarkSpec {
    /// Creates a bar mark spec with `baseline = 0` and a default fill (`Brush::default()`).
    pub fn new(
        table: TableId,
        category: ColId,
        value: ColId,
        categories: Categories,
        band: ScaleBand,
        y_scale: ScaleContinuous,
    ) -> Self {
        Self {
            table,
            category,
            value,
            categories,
            band,
            y_scale,
            baseline: 0.0,
            fill: Brush::default(),
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline in data units.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Bar geometry for `row`.
    ///
    /// `y0` of the returned rect is the scaled value and `y1` the scaled baseline, so
    /// `height()` is `baseline_px - value_px`. Returns `None` for rows whose label is not a
    /// known category or whose value is missing or non-finite.
    pub fn bar(&self, data: &dyn TableData, row: usize) -> Option<Rect> {
        let index = self.categories.index_of(data.text(row, self.category)?)?;
        let v = data.f64(row, self.value).filter(|v| v.is_finite())?;
        let x = self.band.x(index);
        let y = self.y_scale.map(v);
        let y0 = self.y_scale.map(self.baseline);
        Some(Rect::new(x, y, x + self.band.band_width(), y0))
    }

    /// Generates one mark per row with valid geometry.
    ///
    /// Mark identity is derived from `(table, row)` so it stays stable across renders.
    pub fn marks(&self, data: &dyn TableData) -> Vec<Mark> {
        (0..data.row_count())
            .filter_map(|row| {
                let rect = self.bar(data, row)?;
                Some(
                    Mark::builder(MarkId::for_row(self.table, row as u64))
                        .rect()
                        .z_index(self.z_index)
                        .rect_geometry(rect)
                        .fill(self.fill.clone())
                        .build(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;

    use super::*;
    use crate::scale::{ScaleBandSpec, ScaleLinearSpec};

    struct Returns(Vec<(String, f64)>);

    impl TableData for Returns {
        fn row_count(&self) -> usize {
            self.0.len()
        }

        fn f64(&self, row: usize, col: ColId) -> Option<f64> {
            (col.0 == 1).then(|| self.0.get(row).map(|r| r.1)).flatten()
        }

        fn text(&self, row: usize, col: ColId) -> Option<&str> {
            (col.0 == 0)
                .then(|| self.0.get(row).map(|r| r.0.as_str()))
                .flatten()
        }
    }

    fn returns(values: &[(&str, f64)]) -> Returns {
        Returns(values.iter().map(|(a, v)| (String::from(*a), *v)).collect())
    }

    fn spec(data: &Returns, height: f64) -> BarMarkSpec {
        let cats = Categories::from_labels(data.0.iter().map(|r| r.0.as_str())).unwrap();
        let band = ScaleBandSpec::for_categories(&cats).instantiate((0.0, 540.0));
        let y = ScaleLinearSpec::zero_based(data.0.iter().map(|r| r.1))
            .unwrap()
            .instantiate((height, 0.0));
        BarMarkSpec::new(
            TableId(3),
            ColId(0),
            ColId(1),
            cats,
            band,
            ScaleContinuous::Linear(y),
        )
    }

    #[test]
    fn tallest_bar_fills_the_plot_and_others_scale() {
        let data = returns(&[
            ("Stocks", 7.5),
            ("Bonds", 3.2),
            ("Real Estate", 5.8),
            ("Cash", 1.1),
        ]);
        let h = 350.0;
        let spec = spec(&data, h);
        let stocks = spec.bar(&data, 0).unwrap();
        let cash = spec.bar(&data, 3).unwrap();
        assert!((stocks.height() - h).abs() < 1e-9);
        assert!((cash.height() - h * 1.1 / 7.5).abs() < 1e-9);
        assert!((stocks.width() - spec.band.band_width()).abs() < 1e-9);
        assert_eq!(spec.marks(&data).len(), 4);
    }

    #[test]
    fn negative_values_keep_their_negative_height() {
        let data = returns(&[("Stocks", 5.0), ("Crypto", -2.5)]);
        let spec = spec(&data, 100.0);
        let bar = spec.bar(&data, 1).unwrap();
        assert!((bar.height() + 50.0).abs() < 1e-9);
    }

    #[test]
    fn rows_without_values_are_skipped() {
        let data = returns(&[("Stocks", 5.0), ("Cash", f64::NAN)]);
        let spec = spec(&data, 100.0);
        assert!(spec.bar(&data, 1).is_none());
        assert_eq!(spec.marks(&data).len(), 1);
    }
}
