//! Normalized forecast records and the display-count control that slices them.

use chrono::{DateTime, Utc};
use std::ops::RangeInclusive;

/// One 3-hour forecast point.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
    pub description: String,
    pub wind_speed: f64,
}

/// Forecast samples in the order the service returned them.
///
/// The series is never re-sorted and normalization never drops entries, so its
/// length always equals the number of entries in the upstream `list`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastSeries {
    samples: Vec<ForecastSample>,
}

impl ForecastSeries {
    pub fn new(samples: Vec<ForecastSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[ForecastSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastSample> {
        self.samples.iter()
    }

    /// Returns the first `count` samples (or all of them, if there are fewer).
    ///
    /// # Examples
    ///
    /// ```
    /// use clima::ForecastSeries;
    ///
    /// let empty = ForecastSeries::default();
    /// assert!(empty.head(5).is_empty());
    /// ```
    pub fn head(&self, count: usize) -> ForecastSeries {
        let end = count.min(self.samples.len());
        ForecastSeries::new(self.samples[..end].to_vec())
    }

    pub fn into_samples(self) -> Vec<ForecastSample> {
        self.samples
    }
}

impl<'a> IntoIterator for &'a ForecastSeries {
    type Item = &'a ForecastSample;
    type IntoIter = std::slice::Iter<'a, ForecastSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

pub const DEFAULT_DISPLAY_RANGE: RangeInclusive<u32> = 5..=20;
pub const DEFAULT_DISPLAY_COUNT: u32 = 10;

/// Number of forecast points to chart, always kept inside a fixed inclusive range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCount {
    value: u32,
    range: RangeInclusive<u32>,
}

impl DisplayCount {
    /// Creates a count inside [`DEFAULT_DISPLAY_RANGE`], clamping `value` into it.
    pub fn new(value: u32) -> Self {
        Self::with_range(value, DEFAULT_DISPLAY_RANGE)
    }

    /// Creates a count with a custom range. A reversed range is normalized.
    pub fn with_range(value: u32, range: RangeInclusive<u32>) -> Self {
        let (low, high) = (*range.start(), *range.end());
        let range = low.min(high)..=low.max(high);
        let value = value.clamp(*range.start(), *range.end());
        Self { value, range }
    }

    pub fn set(&mut self, value: u32) {
        self.value = value.clamp(*self.range.start(), *self.range.end());
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn range(&self) -> &RangeInclusive<u32> {
        &self.range
    }
}

impl Default for DisplayCount {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_COUNT)
    }
}
