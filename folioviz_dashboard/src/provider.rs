// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sources of dashboard records.

use std::fmt::Debug;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{AssetAllocation, AssetReturn, PortfolioPerformance, Position, ScatterPoint};

/// Supplies the record collections each view is rendered from.
///
/// Every call returns a fresh snapshot owned by the caller.
pub trait DashboardData: Debug + Send + Sync {
    /// Portfolio allocation for the pie view.
    fn allocations(&self) -> Result<Vec<AssetAllocation>>;

    /// Portfolio value over time for the line view.
    fn performance(&self) -> Result<Vec<PortfolioPerformance>>;

    /// Per-asset returns for the bar view.
    fn returns(&self) -> Result<Vec<AssetReturn>>;

    /// Rows of the positions table.
    fn positions(&self) -> Result<Vec<Position>>;

    /// Initial points of the scatter demo.
    fn scatter_points(&self) -> Result<Vec<ScatterPoint>>;
}

/// Complete set of dashboard records, as stored in a JSON data file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSnapshot {
    /// Pie view records.
    pub allocations: Vec<AssetAllocation>,
    /// Line view records.
    pub performance: Vec<PortfolioPerformance>,
    /// Bar view records.
    pub returns: Vec<AssetReturn>,
    /// Positions table rows.
    pub positions: Vec<Position>,
    /// Scatter demo points.
    pub scatter: Vec<ScatterPoint>,
}

impl DashboardData for DashboardSnapshot {
    fn allocations(&self) -> Result<Vec<AssetAllocation>> {
        Ok(self.allocations.clone())
    }

    fn performance(&self) -> Result<Vec<PortfolioPerformance>> {
        Ok(self.performance.clone())
    }

    fn returns(&self) -> Result<Vec<AssetReturn>> {
        Ok(self.returns.clone())
    }

    fn positions(&self) -> Result<Vec<Position>> {
        Ok(self.positions.clone())
    }

    fn scatter_points(&self) -> Result<Vec<ScatterPoint>> {
        Ok(self.scatter.clone())
    }
}

/// Built-in sample portfolio.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleData;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn allocation(asset: &str, value: f64) -> AssetAllocation {
    AssetAllocation {
        asset: asset.to_owned(),
        value,
    }
}

fn asset_return(asset: &str, return_pct: f64) -> AssetReturn {
    AssetReturn {
        asset: asset.to_owned(),
        return_pct,
    }
}

impl DashboardData for SampleData {
    fn allocations(&self) -> Result<Vec<AssetAllocation>> {
        Ok(vec![
            allocation("Stocks", 50.0),
            allocation("Bonds", 30.0),
            allocation("Real Estate", 15.0),
            allocation("Cash", 5.0),
        ])
    }

    fn performance(&self) -> Result<Vec<PortfolioPerformance>> {
        Ok([
            (1, 100_000.0),
            (2, 102_000.0),
            (3, 105_000.0),
            (4, 103_000.0),
            (5, 106_000.0),
        ]
        .into_iter()
        .map(|(month, value)| PortfolioPerformance {
            date: date(2023, month, 1),
            value,
        })
        .collect())
    }

    fn returns(&self) -> Result<Vec<AssetReturn>> {
        Ok(vec![
            asset_return("Stocks", 7.5),
            asset_return("Bonds", 3.2),
            asset_return("Real Estate", 5.8),
            asset_return("Cash", 1.1),
        ])
    }

    fn positions(&self) -> Result<Vec<Position>> {
        Ok(vec![
            Position {
                asset: "AAPL".into(),
                kind: "Stock".into(),
                base_margin: 1000.0,
                date_opened: date(2023, 1, 15),
                stop_loss: Some(135.0),
                take_profit: Some(180.0),
                leverage: None,
                date_closed: None,
                performance: 12.5,
                broker_url: "https://example-broker.com/AAPL".into(),
            },
            Position {
                asset: "BTC/USD".into(),
                kind: "Crypto".into(),
                base_margin: 5000.0,
                date_opened: date(2023, 3, 1),
                stop_loss: Some(25_000.0),
                take_profit: Some(40_000.0),
                leverage: Some(2.0),
                date_closed: Some(date(2023, 6, 15)),
                performance: -5.2,
                broker_url: "https://example-crypto-exchange.com/BTC-USD".into(),
            },
        ])
    }

    fn scatter_points(&self) -> Result<Vec<ScatterPoint>> {
        Ok([
            (1.0, 4.2),
            (2.0, 3.1),
            (3.5, 6.8),
            (4.0, 5.0),
            (5.5, 7.9),
            (6.0, 6.1),
            (7.5, 9.4),
            (8.0, 8.2),
        ]
        .into_iter()
        .map(|(x, y)| ScatterPoint { x, y })
        .collect())
    }
}

/// Records loaded once from a JSON file shaped like [`DashboardSnapshot`].
#[derive(Clone, Debug)]
pub struct JsonFileData {
    snapshot: DashboardSnapshot,
}

impl JsonFileData {
    /// Reads and decodes `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| Error::Data(Box::new(e)))?;
        let snapshot = serde_json::from_str(&raw).map_err(|e| Error::Data(Box::new(e)))?;
        tracing::debug!(path = %path.display(), "loaded dashboard data file");
        Ok(Self { snapshot })
    }

    /// The decoded records.
    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }
}

impl DashboardData for JsonFileData {
    fn allocations(&self) -> Result<Vec<AssetAllocation>> {
        self.snapshot.allocations()
    }

    fn performance(&self) -> Result<Vec<PortfolioPerformance>> {
        self.snapshot.performance()
    }

    fn returns(&self) -> Result<Vec<AssetReturn>> {
        self.snapshot.returns()
    }

    fn positions(&self) -> Result<Vec<Position>> {
        self.snapshot.positions()
    }

    fn scatter_points(&self) -> Result<Vec<ScatterPoint>> {
        self.snapshot.scatter_points()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn sample_performance_is_ordered_by_date() {
        let series = SampleData.performance().unwrap();
        assert_eq!(series.len(), 5);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(series[0].date, date(2023, 1, 1));
    }

    #[test]
    fn json_file_round_trips_the_sample() {
        let sample = DashboardSnapshot {
            allocations: SampleData.allocations().unwrap(),
            performance: SampleData.performance().unwrap(),
            returns: SampleData.returns().unwrap(),
            positions: SampleData.positions().unwrap(),
            scatter: SampleData.scatter_points().unwrap(),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, serde_json::to_string_pretty(&sample).unwrap()).unwrap();

        let data = JsonFileData::load(&path).unwrap();
        assert_eq!(data.snapshot(), &sample);
        assert_eq!(data.positions().unwrap()[1].leverage, Some(2.0));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"returns": [{{"asset": "Cash", "return": -1.5}}]}}"#).unwrap();
        let data = JsonFileData::load(file.path()).unwrap();
        assert!(data.allocations().unwrap().is_empty());
        assert_eq!(data.returns().unwrap()[0].return_pct, -1.5);
    }

    #[test]
    fn unreadable_or_malformed_files_are_data_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = JsonFileData::load(dir.path().join("absent.json"));
        assert!(matches!(missing, Err(Error::Data(_))));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(JsonFileData::load(&bad), Err(Error::Data(_))));
    }
}
