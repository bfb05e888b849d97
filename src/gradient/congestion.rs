use std::ops::{Range, RangeInclusive};

use geo::{Coord, Distance, Haversine, LineString, Point};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::gradient::Color;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    #[default]
    Unknown,
    Low,
    Moderate,
    Heavy,
    Severe,
}

/// Maps numeric congestion, `0..=100`, onto levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CongestionRanges {
    pub low: Range<u8>,
    pub moderate: Range<u8>,
    pub heavy: Range<u8>,
    pub severe: RangeInclusive<u8>,
}

impl Default for CongestionRanges {
    fn default() -> Self {
        Self {
            low: 0..40,
            moderate: 40..60,
            heavy: 60..80,
            severe: 80..=100,
        }
    }
}

impl CongestionRanges {
    pub fn level(&self, congestion: u8) -> CongestionLevel {
        if self.low.contains(&congestion) {
            CongestionLevel::Low
        } else if self.moderate.contains(&congestion) {
            CongestionLevel::Moderate
        } else if self.heavy.contains(&congestion) {
            CongestionLevel::Heavy
        } else if self.severe.contains(&congestion) {
            CongestionLevel::Severe
        } else {
            CongestionLevel::Unknown
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CongestionColors {
    pub unknown: Color,
    pub low: Color,
    pub moderate: Color,
    pub heavy: Color,
    pub severe: Color,
}

impl CongestionColors {
    pub const MAIN: CongestionColors = CongestionColors {
        unknown: Color::rgb(0x56, 0xa8, 0xfb),
        low: Color::rgb(0x56, 0xa8, 0xfb),
        moderate: Color::rgb(0xff, 0x95, 0x00),
        heavy: Color::rgb(0xff, 0x4d, 0x4d),
        severe: Color::rgb(0x8f, 0x24, 0x47),
    };

    pub const ALTERNATIVE: CongestionColors = CongestionColors {
        unknown: Color::rgb(0x86, 0x94, 0xa5),
        low: Color::rgb(0x86, 0x94, 0xa5),
        moderate: Color::rgb(0xbe, 0xa0, 0x87),
        heavy: Color::rgb(0xb5, 0x82, 0x86),
        severe: Color::rgb(0xb5, 0x82, 0x86),
    };

    pub fn color(&self, level: CongestionLevel) -> Color {
        match level {
            CongestionLevel::Unknown => self.unknown,
            CongestionLevel::Low => self.low,
            CongestionLevel::Moderate => self.moderate,
            CongestionLevel::Heavy => self.heavy,
            CongestionLevel::Severe => self.severe,
        }
    }
}

/// A stretch of a line over which a per-segment value stays the same.
#[derive(Debug, Clone, PartialEq)]
pub struct Run<T> {
    pub line: LineString<f64>,
    pub value: T,
}

impl<T> Run<T> {
    pub fn length(&self) -> f64 {
        line_length(&self.line.0)
    }
}

/// Haversine length of a polyline, in metres.
pub fn line_length(coordinates: &[Coord<f64>]) -> f64 {
    coordinates
        .iter()
        .tuple_windows()
        .map(|(a, b)| Haversine.distance(Point::from(*a), Point::from(*b)))
        .sum()
}

/// Merges adjacent coordinate pairs of `line` sharing a value.
///
/// `values[i]` applies to the pair `(line[i], line[i + 1])`. Pairs
/// without a value use `missing`. Lines of fewer than two coordinates
/// have no runs.
pub fn merge_runs<T>(line: &LineString<f64>, values: &[T], missing: T) -> Vec<Run<T>>
where
    T: Clone + PartialEq,
{
    let mut runs: Vec<Run<T>> = vec![];

    for (index, (a, b)) in line.0.iter().tuple_windows().enumerate() {
        let value = values.get(index).cloned().unwrap_or_else(|| missing.clone());

        match runs.last_mut() {
            Some(run) if run.value == value => run.line.0.push(*b),
            _ => runs.push(Run {
                line: LineString::new(vec![*a, *b]),
                value,
            }),
        }
    }

    runs
}
