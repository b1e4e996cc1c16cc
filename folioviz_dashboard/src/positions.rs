// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positions table rows.

use crate::calendar::format_short_date;
use crate::html::escape;
use crate::model::Position;

/// Column headers, in cell order.
pub const POSITION_COLUMNS: [&str; 10] = [
    "Asset",
    "Type",
    "Base Margin",
    "Date Opened",
    "Stop Loss",
    "Take Profit",
    "Leverage",
    "Date Closed",
    "Performance",
    "Broker",
];

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_owned(), |v| v.to_string())
}

/// Inner HTML of the ten cells of a position row.
///
/// Text is escaped. Missing numbers render as `N/A`, an open position's close date as `Open`,
/// and the broker link opens in a new tab.
pub fn position_cells(position: &Position) -> [String; 10] {
    [
        escape(&position.asset),
        escape(&position.kind),
        position.base_margin.to_string(),
        format_short_date(position.date_opened),
        optional(position.stop_loss),
        optional(position.take_profit),
        optional(position.leverage),
        position
            .date_closed
            .map_or_else(|| "Open".to_owned(), format_short_date),
        format!("{:.2}%", position.performance),
        format!(
            r#"<a href="{}" target="_blank">View</a>"#,
            escape(&position.broker_url)
        ),
    ]
}

/// One `<tr>` per position, in input order.
pub fn positions_rows_html(positions: &[Position]) -> String {
    let mut out = String::new();
    for position in positions {
        out.push_str("<tr>");
        for cell in position_cells(position) {
            out.push_str("<td>");
            out.push_str(&cell);
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out
}

/// The header row for [`POSITION_COLUMNS`].
pub fn positions_header_html() -> String {
    let mut out = String::from("<tr>");
    for column in POSITION_COLUMNS {
        out.push_str("<th>");
        out.push_str(column);
        out.push_str("</th>");
    }
    out.push_str("</tr>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{DashboardData, SampleData};

    fn sample() -> Vec<Position> {
        SampleData.positions().unwrap()
    }

    #[test]
    fn open_position_cells() {
        let cells = position_cells(&sample()[0]);
        assert_eq!(
            cells,
            [
                "AAPL",
                "Stock",
                "1000",
                "1/15/2023",
                "135",
                "180",
                "N/A",
                "Open",
                "12.50%",
                r#"<a href="https://example-broker.com/AAPL" target="_blank">View</a>"#,
            ]
        );
    }

    #[test]
    fn closed_position_cells() {
        let cells = position_cells(&sample()[1]);
        assert_eq!(cells[0], "BTC/USD");
        assert_eq!(cells[6], "2");
        assert_eq!(cells[7], "6/15/2023");
        assert_eq!(cells[8], "-5.20%");
    }

    #[test]
    fn missing_stop_loss_is_not_available() {
        let mut position = sample().remove(1);
        position.stop_loss = None;
        assert_eq!(position_cells(&position)[4], "N/A");
    }

    #[test]
    fn text_is_escaped() {
        let mut position = sample().remove(0);
        position.asset = "<b>AAPL</b>".into();
        position.broker_url = r#"https://x.test/?a=1&b="2""#.into();
        let cells = position_cells(&position);
        assert_eq!(cells[0], "&lt;b&gt;AAPL&lt;/b&gt;");
        assert!(cells[9].contains("a=1&amp;b=&quot;2&quot;"), "{}", cells[9]);
    }

    #[test]
    fn rows_follow_input_order() {
        let html = positions_rows_html(&sample());
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.find("AAPL").unwrap() < html.find("BTC/USD").unwrap());
        assert_eq!(positions_header_html().matches("<th>").count(), 10);
    }
}
