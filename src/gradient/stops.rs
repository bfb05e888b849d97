use std::collections::BTreeMap;

use itertools::Itertools;
use serde_json::{Value, json};

use crate::gradient::Color;

/// A fraction along a line, stored by its bit pattern.
///
/// Fractions are clamped into `[0, 1]` on construction. For non-negative
/// floats the ordering of the bit patterns matches the numeric ordering,
/// so the key can be used directly in a sorted map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Fraction(u64);

impl Fraction {
    fn new(value: f64) -> Self {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        // Collapses `-0.0` onto `0.0`.
        Self((value + 0.0).to_bits())
    }

    fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub fraction: f64,
    pub color: Color,
}

/// A run of equal colors, `[start, end)` along the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSpan {
    pub start: f64,
    pub end: f64,
    pub color: Color,
}

/// Sparse, fraction-sorted gradient stops.
///
/// Inserting at a fraction which already holds a stop replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradientStopMap {
    stops: BTreeMap<Fraction, Color>,
}

impl GradientStopMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding a single stop at the start of the line.
    pub fn solid(color: Color) -> Self {
        let mut map = Self::new();
        map.insert(0.0, color);
        map
    }

    pub fn insert(&mut self, fraction: f64, color: Color) -> Option<Color> {
        self.stops.insert(Fraction::new(fraction), color)
    }

    pub fn remove(&mut self, fraction: f64) -> Option<Color> {
        self.stops.remove(&Fraction::new(fraction))
    }

    pub fn get(&self, fraction: f64) -> Option<Color> {
        self.stops.get(&Fraction::new(fraction)).copied()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = GradientStop> + '_ {
        self.stops.iter().map(|(fraction, color)| GradientStop {
            fraction: fraction.value(),
            color: *color,
        })
    }

    pub fn fractions(&self) -> impl Iterator<Item = f64> + '_ {
        self.stops.keys().map(|fraction| fraction.value())
    }

    /// Runs of equal colors, read with step semantics: each stop's
    /// color holds until the next stop.
    pub fn spans(&self) -> Vec<ColorSpan> {
        let runs = self
            .iter()
            .dedup_by(|previous, next| previous.color == next.color)
            .collect::<Vec<_>>();

        runs.iter()
            .enumerate()
            .map(|(index, stop)| ColorSpan {
                start: stop.fraction,
                end: runs.get(index + 1).map_or(1.0, |next| next.fraction),
                color: stop.color,
            })
            .collect()
    }

    /// Cuts the stops at `fraction_traveled`, painting everything before it
    /// with `traversed`. The stop at the cut carries the color which was in
    /// effect there, or `fallback` when no stop precedes it.
    pub fn vanish(&self, fraction_traveled: f64, traversed: Color, fallback: Color) -> Self {
        let cut = Fraction::new(fraction_traveled);
        let current = self
            .stops
            .range(..=cut)
            .next_back()
            .map_or(fallback, |(_, color)| *color);

        let mut vanished = Self {
            stops: self
                .stops
                .range(cut..)
                .filter(|(fraction, _)| **fraction > cut)
                .map(|(fraction, color)| (*fraction, *color))
                .collect(),
        };

        vanished.insert(0.0, traversed);
        let before = cut.value().next_down();
        if before >= 0.0 {
            vanished.insert(before, traversed);
        }
        vanished.insert(cut.value(), current);

        vanished
    }

    /// The style expression of the `line-gradient` property.
    ///
    /// Soft gradients interpolate linearly between stops, hard gradients
    /// step from `base` through every stop.
    pub fn to_expression(&self, base: Color, is_soft: bool) -> Value {
        if self.is_empty() {
            return Value::from(base);
        }

        let stops = self
            .iter()
            .flat_map(|stop| [json!(stop.fraction), Value::from(stop.color)]);

        let head = if is_soft {
            vec![json!("interpolate"), json!(["linear"]), json!(["line-progress"])]
        } else {
            vec![json!("step"), json!(["line-progress"]), Value::from(base)]
        };

        Value::Array(head.into_iter().chain(stops).collect())
    }
}

impl FromIterator<(f64, Color)> for GradientStopMap {
    fn from_iter<T: IntoIterator<Item = (f64, Color)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (fraction, color) in iter {
            map.insert(fraction, color);
        }
        map
    }
}
