// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portfolio records and their column accessors.

use chrono::NaiveDate;
use folioviz_core::{ColId, TableData};
use serde::{Deserialize, Deserializer, Serialize};

use crate::calendar::date_seconds;

/// Share of the portfolio held in one asset class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAllocation {
    /// Asset class label.
    pub asset: String,
    /// Non-negative weight.
    pub value: f64,
}

/// Portfolio value on a given date.
///
/// A `NaN` value (JSON `null`) marks a gap in the series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPerformance {
    /// Valuation date.
    pub date: NaiveDate,
    /// Portfolio value.
    #[serde(deserialize_with = "nan_for_null")]
    pub value: f64,
}

/// Return of one asset class, in signed percent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetReturn {
    /// Asset class label.
    pub asset: String,
    /// Signed percent return.
    #[serde(rename = "return")]
    pub return_pct: f64,
}

/// A trading position shown in the positions table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Instrument symbol.
    pub asset: String,
    /// Instrument type, e.g. `Stock` or `Crypto`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Margin committed when opening.
    pub base_margin: f64,
    /// Opening date.
    pub date_opened: NaiveDate,
    /// Stop-loss level.
    #[serde(default)]
    pub stop_loss: Option<f64>,
    /// Take-profit level.
    #[serde(default)]
    pub take_profit: Option<f64>,
    /// Leverage factor.
    #[serde(default)]
    pub leverage: Option<f64>,
    /// Closing date; `None` while the position is open.
    #[serde(default)]
    pub date_closed: Option<NaiveDate>,
    /// Signed percent performance.
    pub performance: f64,
    /// Link to the position at the broker.
    pub broker_url: String,
}

/// One point of the scatter demo.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    /// Horizontal value.
    pub x: f64,
    /// Vertical value.
    pub y: f64,
}

fn nan_for_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Columns of an allocation slice.
#[derive(Clone, Copy, Debug)]
pub struct AllocationTable<'a>(pub &'a [AssetAllocation]);

impl AllocationTable<'_> {
    /// Asset label column.
    pub const ASSET: ColId = ColId(0);
    /// Weight column.
    pub const VALUE: ColId = ColId(1);
}

impl TableData for AllocationTable<'_> {
    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn f64(&self, row: usize, col: ColId) -> Option<f64> {
        let record = self.0.get(row)?;
        (col == Self::VALUE).then_some(record.value)
    }

    fn text(&self, row: usize, col: ColId) -> Option<&str> {
        let record = self.0.get(row)?;
        (col == Self::ASSET).then_some(record.asset.as_str())
    }
}

/// Columns of a performance series. Dates are exposed as seconds since the Unix epoch.
#[derive(Clone, Copy, Debug)]
pub struct PerformanceTable<'a>(pub &'a [PortfolioPerformance]);

impl PerformanceTable<'_> {
    /// Date column, in seconds.
    pub const DATE: ColId = ColId(0);
    /// Value column.
    pub const VALUE: ColId = ColId(1);
}

impl TableData for PerformanceTable<'_> {
    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn f64(&self, row: usize, col: ColId) -> Option<f64> {
        let record = self.0.get(row)?;
        match col {
            Self::DATE => Some(date_seconds(record.date)),
            Self::VALUE => Some(record.value),
            _ => None,
        }
    }
}

/// Columns of a returns slice.
#[derive(Clone, Copy, Debug)]
pub struct ReturnsTable<'a>(pub &'a [AssetReturn]);

impl ReturnsTable<'_> {
    /// Asset label column.
    pub const ASSET: ColId = ColId(0);
    /// Return column.
    pub const RETURN: ColId = ColId(1);
}

impl TableData for ReturnsTable<'_> {
    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn f64(&self, row: usize, col: ColId) -> Option<f64> {
        let record = self.0.get(row)?;
        (col == Self::RETURN).then_some(record.return_pct)
    }

    fn text(&self, row: usize, col: ColId) -> Option<&str> {
        let record = self.0.get(row)?;
        (col == Self::ASSET).then_some(record.asset.as_str())
    }
}

/// Columns of a scatter point slice.
#[derive(Clone, Copy, Debug)]
pub struct ScatterTable<'a>(pub &'a [ScatterPoint]);

impl ScatterTable<'_> {
    /// Horizontal column.
    pub const X: ColId = ColId(0);
    /// Vertical column.
    pub const Y: ColId = ColId(1);
}

impl TableData for ScatterTable<'_> {
    fn row_count(&self) -> usize {
        self.0.len()
    }

    fn f64(&self, row: usize, col: ColId) -> Option<f64> {
        let point = self.0.get(row)?;
        match col {
            Self::X => Some(point.x),
            Self::Y => Some(point.y),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_uses_camel_case_and_reserved_names() {
        let json = r#"{
            "asset": "AAPL",
            "type": "Stock",
            "baseMargin": 1000,
            "dateOpened": "2023-01-15",
            "stopLoss": 135,
            "takeProfit": 180,
            "leverage": null,
            "performance": 12.5,
            "brokerUrl": "https://example-broker.com/AAPL"
        }"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.kind, "Stock");
        assert_eq!(position.stop_loss, Some(135.0));
        assert_eq!(position.leverage, None);
        assert_eq!(position.date_closed, None);
        assert_eq!(
            position.date_opened,
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()
        );
    }

    #[test]
    fn null_performance_value_is_a_gap() {
        let json = r#"[{"date": "2023-01-01", "value": 1}, {"date": "2023-02-01", "value": null}]"#;
        let series: Vec<PortfolioPerformance> = serde_json::from_str(json).unwrap();
        assert_eq!(series[0].value, 1.0);
        assert!(series[1].value.is_nan(), "null should decode as NaN");
    }

    #[test]
    fn asset_return_keeps_the_return_key() {
        let json = serde_json::to_value(AssetReturn {
            asset: "Cash".into(),
            return_pct: 1.1,
        })
        .unwrap();
        assert_eq!(json["return"], 1.1);
    }

    #[test]
    fn tables_expose_only_their_columns() {
        let rows = [AssetReturn {
            asset: "Bonds".into(),
            return_pct: 3.2,
        }];
        let table = ReturnsTable(&rows);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.f64(0, ReturnsTable::RETURN), Some(3.2));
        assert_eq!(table.f64(0, ReturnsTable::ASSET), None);
        assert_eq!(table.text(0, ReturnsTable::ASSET), Some("Bonds"));
        assert_eq!(table.text(1, ReturnsTable::ASSET), None);
    }
}
