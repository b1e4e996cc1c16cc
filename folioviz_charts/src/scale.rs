// Copyright 2025 the Folioviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale utilities.
//!
//! A scale maps a data domain onto a pixel range for one visual axis. Specs (`*Spec`) carry the
//! domain and options; `instantiate` binds them to a concrete range once the plot rectangle is
//! known, so series and axes can share the exact same instance.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

#[cfg(all(not(feature = "std"), not(test)))]
use crate::float::FloatExt;

use folioviz_core::{ColId, TableData};
use hashbrown::HashMap;

use crate::error::ChartError;

/// A scale specification (domain + options, no range yet).
#[derive(Clone, Copy, Debug)]
pub enum ScaleSpec {
    /// Continuous linear scale.
    Linear(ScaleLinearSpec),
    /// Continuous time scale (seconds since the Unix epoch).
    Time(ScaleTimeSpec),
    /// Discrete band scale.
    Band(ScaleBandSpec),
}

impl From<ScaleLinearSpec> for ScaleSpec {
    fn from(value: ScaleLinearSpec) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleTimeSpec> for ScaleSpec {
    fn from(value: ScaleTimeSpec) -> Self {
        Self::Time(value)
    }
}

impl From<ScaleBandSpec> for ScaleSpec {
    fn from(value: ScaleBandSpec) -> Self {
        Self::Band(value)
    }
}

/// A continuous scale instance.
#[derive(Clone, Copy, Debug)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Time scale.
    Time(ScaleTime),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }
}

/// Returns the `(min, max)` of the finite values in `values`.
///
/// Non-finite values are skipped. Fails with [`ChartError::EmptyDataSet`] when `values` is
/// empty and [`ChartError::NoFiniteValues`] when nothing finite remains.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Result<(f64, f64), ChartError> {
    let mut seen = false;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        seen = true;
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if !seen {
        return Err(ChartError::EmptyDataSet);
    }
    if min.is_finite() && max.is_finite() {
        Ok((min, max))
    } else {
        Err(ChartError::NoFiniteValues)
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Specification for a linear scale: the domain, before a pixel range is known.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A zero-width domain (a single observed value) maps everything to the middle of the
    /// range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        let t = if denom == 0.0 { 0.5 } else { (x - d0) / denom };
        r0 + t * (r1 - r0)
    }

    /// Returns “nice-ish” tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self { domain }
    }

    /// A spec whose domain is floored at zero: `[0, max(values)]`.
    ///
    /// The floor is fixed regardless of sign, so negative inputs map below the range start.
    pub fn zero_based(values: impl IntoIterator<Item = f64>) -> Result<Self, ChartError> {
        let (_, max) = extent(values)?;
        Ok(Self::new((0.0, max)))
    }

    /// A spec whose domain is the observed `[min, max]` of `values`.
    pub fn from_extent(values: impl IntoIterator<Item = f64>) -> Result<Self, ChartError> {
        Ok(Self::new(extent(values)?))
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        ScaleLinear::new(self.domain, range)
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

const SQRT_50: f64 = 7.071_067_811_865_476;
const SQRT_10: f64 = 3.162_277_660_168_379_5;

/// Rounds a raw step to 1, 2, 5 or 10 times a power of ten, with d3's thresholds.
pub fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= SQRT_50 {
        10.0
    } else if error >= SQRT_10 {
        5.0
    } else if error >= core::f64::consts::SQRT_2 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// Ordered distinct category labels.
///
/// Order is first-seen order of the input; duplicates are dropped. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct Categories {
    labels: Arc<[String]>,
    index: Arc<HashMap<String, usize>>,
}

impl Categories {
    /// Collects distinct labels in first-seen order.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, ChartError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for label in labels {
            let label = label.as_ref();
            if index.contains_key(label) {
                continue;
            }
            index.insert(String::from(label), ordered.len());
            ordered.push(String::from(label));
        }
        if ordered.is_empty() {
            return Err(ChartError::EmptyDataSet);
        }
        Ok(Self {
            labels: ordered.into(),
            index: Arc::new(index),
        })
    }

    /// Collects distinct labels from a text column.
    ///
    /// Rows without a text value are skipped.
    pub fn from_column(data: &dyn TableData, col: ColId) -> Result<Self, ChartError> {
        let n = data.row_count();
        Self::from_labels((0..n).filter_map(|row| data.text(row, col)))
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of `label`, if present.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Label at `index`, if present.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Labels in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// A discrete band scale for categorical charts.
///
/// Padding is expressed as a fraction of the step (band + gap), so `padding_inner = 0.1` leaves
/// a 10% gap between neighbouring bands.
#[derive(Clone, Copy, Debug)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

/// Specification for a band scale (count + padding, no range yet).
#[derive(Clone, Copy, Debug)]
pub struct ScaleBandSpec {
    /// Number of bands.
    pub count: usize,
    /// Inner padding as a fraction of the step, in `0..=1`.
    pub padding_inner: f64,
    /// Outer padding as a multiple of the step.
    pub padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`, with padding 0.1.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
            align: 0.5,
        }
    }

    /// Sets inner and outer padding.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        let span = (r1 - r0).abs();
        span / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    /// Returns the shared band width.
    pub fn band_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the start offset of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let start = if r1 >= r0 { r0 } else { r1 };
        let span = (r1 - r0).abs();
        let step = self.step();
        let used = step * (self.count as f64 - self.padding_inner);
        start + (span - used) * self.align + step * index as f64
    }
}

impl ScaleBandSpec {
    /// Creates a new band scale spec with padding 0.1.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// A spec with one band per category.
    pub fn for_categories(categories: &Categories) -> Self {
        Self::new(categories.len())
    }

    /// Sets inner and outer padding.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleBand {
        ScaleBand::new(range, self.count).with_padding(self.padding_inner, self.padding_outer)
    }
}

/// A time scale: a linear scale over seconds since the Unix epoch.
///
/// It generates no ticks of its own; calendar-aware callers supply tick values to the axis.
#[derive(Clone, Copy, Debug)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

/// Specification for a time scale (domain, no range yet).
#[derive(Clone, Copy, Debug)]
pub struct ScaleTimeSpec {
    /// Domain in seconds.
    pub domain: (f64, f64),
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp (seconds) into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }
}

impl ScaleTimeSpec {
    /// Creates a new time scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self { domain }
    }

    /// A spec whose domain is the earliest to the latest timestamp in `values`.
    pub fn from_extent(values: impl IntoIterator<Item = f64>) -> Result<Self, ChartError> {
        Ok(Self::new(extent(values)?))
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleTime {
        ScaleTime::new(self.domain, range)
    }
}
