// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar helpers: date/second conversion, calendar-aligned ticks and date formats.
//!
//! All dates are interpreted at midnight UTC.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Weekday};
use folioviz_charts::nice_step;

const DAY: f64 = 86_400.0;

/// Seconds since the Unix epoch at midnight UTC of `date`.
pub fn date_seconds(date: NaiveDate) -> f64 {
    #[allow(clippy::cast_precision_loss, reason = "dates stay well inside 2^53 seconds")]
    let seconds = date.and_time(NaiveTime::MIN).and_utc().timestamp() as f64;
    seconds
}

/// The UTC date containing `seconds` since the Unix epoch.
pub fn seconds_date(seconds: f64) -> Option<NaiveDate> {
    if !seconds.is_finite() {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "finite timestamps outside i64 are rejected by chrono below"
    )]
    let whole = seconds.floor() as i64;
    DateTime::from_timestamp(whole, 0).map(|dt| dt.date_naive())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Interval {
    Days(u32),
    Week,
    Months(u32),
    Years(i32),
}

impl Interval {
    fn approx_seconds(self) -> f64 {
        match self {
            Self::Days(n) => DAY * f64::from(n),
            Self::Week => DAY * 7.0,
            Self::Months(n) => DAY * 30.0 * f64::from(n),
            Self::Years(n) => DAY * 365.0 * f64::from(n),
        }
    }

    fn contains(self, date: NaiveDate) -> bool {
        match self {
            Self::Days(n) => (date.day() - 1) % n == 0,
            Self::Week => date.weekday() == Weekday::Sun,
            Self::Months(n) => date.day() == 1 && date.month0() % n == 0,
            Self::Years(n) => date.ordinal() == 1 && date.year().rem_euclid(n) == 0,
        }
    }

    /// First date of this interval on or after `date`.
    fn ceil(self, date: NaiveDate) -> Option<NaiveDate> {
        let mut d = date;
        match self {
            Self::Days(_) | Self::Week => {}
            Self::Months(_) => {
                if d.day() != 1 {
                    d = d.with_day(1)?.checked_add_months(Months::new(1))?;
                }
            }
            Self::Years(_) => {
                if d.ordinal() != 1 {
                    d = NaiveDate::from_ymd_opt(d.year() + 1, 1, 1)?;
                }
            }
        }
        while !self.contains(d) {
            d = self.step_unit(d)?;
        }
        Some(d)
    }

    fn step_unit(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Days(_) | Self::Week => date.succ_opt(),
            Self::Months(_) => date.checked_add_months(Months::new(1)),
            Self::Years(_) => NaiveDate::from_ymd_opt(date.year() + 1, 1, 1),
        }
    }
}

const INTERVALS: [Interval; 6] = [
    Interval::Days(1),
    Interval::Days(2),
    Interval::Week,
    Interval::Months(1),
    Interval::Months(3),
    Interval::Years(1),
];

fn choose_interval(span: f64, count: usize) -> Interval {
    #[allow(clippy::cast_precision_loss, reason = "tick counts are small")]
    let target = span / count.max(1) as f64;
    let i = INTERVALS.partition_point(|iv| iv.approx_seconds() <= target);
    if i == 0 {
        return INTERVALS[0];
    }
    if i == INTERVALS.len() {
        let years = target / Interval::Years(1).approx_seconds();
        return Interval::Years(year_step(years));
    }
    let lo = INTERVALS[i - 1];
    let hi = INTERVALS[i];
    if target / lo.approx_seconds() < hi.approx_seconds() / target {
        lo
    } else {
        hi
    }
}

fn year_step(years: f64) -> i32 {
    if years <= 1.0 {
        return 1;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "year steps are small positive integers"
    )]
    let step = nice_step(years).round().max(1.0) as i32;
    step
}

/// Calendar-aligned ticks inside `[start, end]`, about `count` of them.
///
/// The interval is picked among days, two days, weeks (starting Sunday), months, quarters and
/// years, whichever step is closest to `(end - start) / count` in ratio.
pub fn calendar_ticks(start: NaiveDate, end: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let (start, end) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };
    let span = date_seconds(end) - date_seconds(start);
    let interval = choose_interval(span, count);

    let mut ticks = Vec::new();
    let mut next = interval.ceil(start);
    while let Some(d) = next {
        if d > end {
            break;
        }
        ticks.push(d);
        next = step_interval(interval, d);
    }
    ticks
}

fn step_interval(interval: Interval, date: NaiveDate) -> Option<NaiveDate> {
    let mut d = interval.step_unit(date)?;
    while !interval.contains(d) {
        d = interval.step_unit(d)?;
    }
    Some(d)
}

/// Formats a tick date at the coarsest calendar boundary it falls on.
///
/// Year starts render the year, month starts the month name, Sundays the short month and day,
/// any other day the short weekday and day.
pub fn format_calendar_tick(date: NaiveDate) -> String {
    let pattern = if date.day() != 1 {
        if date.weekday() == Weekday::Sun {
            "%b %d"
        } else {
            "%a %d"
        }
    } else if date.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    date.format(pattern).to_string()
}

/// Formats a tick value in seconds as a calendar tick label.
pub fn format_calendar_tick_seconds(seconds: f64, _step: f64) -> String {
    seconds_date(seconds)
        .map(format_calendar_tick)
        .unwrap_or_default()
}

/// Formats a date as `M/D/YYYY`.
pub fn format_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn seconds_round_trip_through_dates() {
        assert_eq!(date_seconds(ymd(1970, 1, 2)), DAY);
        assert_eq!(seconds_date(date_seconds(ymd(2023, 3, 1))), Some(ymd(2023, 3, 1)));
        assert_eq!(seconds_date(f64::NAN), None);
    }

    #[test]
    fn four_month_span_ticks_on_sundays() {
        let ticks = calendar_ticks(ymd(2023, 1, 1), ymd(2023, 5, 1), 10);
        assert_eq!(ticks.first(), Some(&ymd(2023, 1, 1)));
        assert_eq!(ticks.get(1), Some(&ymd(2023, 1, 8)));
        assert_eq!(ticks.last(), Some(&ymd(2023, 4, 30)));
        assert!(ticks.iter().all(|d| d.weekday() == Weekday::Sun), "{ticks:?}");
    }

    #[test]
    fn multi_year_span_ticks_on_quarters_or_years() {
        let ticks = calendar_ticks(ymd(2020, 2, 10), ymd(2022, 11, 1), 10);
        assert!(ticks.iter().all(|d| d.day() == 1), "{ticks:?}");
        assert_eq!(ticks.first(), Some(&ymd(2020, 4, 1)));

        let ticks = calendar_ticks(ymd(2000, 6, 1), ymd(2030, 6, 1), 10);
        assert!(ticks.iter().all(|d| d.ordinal() == 1), "{ticks:?}");
        assert!(ticks.len() <= 16, "{ticks:?}");
    }

    #[test]
    fn year_steps_round_like_numeric_ticks() {
        assert_eq!(year_step(0.8), 1);
        assert_eq!(year_step(1.45), 2);
        assert_eq!(year_step(3.0), 2);
        assert_eq!(year_step(3.2), 5);
        assert_eq!(year_step(14.0), 10);
    }

    #[test]
    fn short_spans_tick_daily() {
        let ticks = calendar_ticks(ymd(2023, 1, 30), ymd(2023, 2, 3), 10);
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks[2], ymd(2023, 2, 1));
    }

    #[test]
    fn tick_labels_follow_the_coarsest_boundary() {
        assert_eq!(format_calendar_tick(ymd(2023, 1, 1)), "2023");
        assert_eq!(format_calendar_tick(ymd(2023, 3, 1)), "March");
        assert_eq!(format_calendar_tick(ymd(2023, 1, 8)), "Jan 08");
        assert_eq!(format_calendar_tick(ymd(2023, 1, 9)), "Mon 09");
    }

    #[test]
    fn short_date_has_no_padding() {
        assert_eq!(format_short_date(ymd(2023, 6, 15)), "6/15/2023");
        assert_eq!(format_short_date(ymd(2023, 1, 5)), "1/5/2023");
    }
}
