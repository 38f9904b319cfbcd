//! Breakpoint table — the ordered `(value, color)` stops of a ramp.
//!
//! Stops are kept sorted by value under IEEE total ordering, so every `f64`
//! (signed zeros and NaN included) has a well-defined slot and inserting a
//! value that is already present replaces that stop's color in place.
//!
//! # Complexity
//! - Insert / replace: O(log N) search + O(N) shift
//! - Bracket search: O(log N)

use std::cmp::Ordering;

use crate::color::Rgba;

/// A single control point of the ramp.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub value: f64,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(value: f64, color: Rgba) -> Self {
        Self { value, color }
    }
}

impl PartialEq for ColorStop {
    fn eq(&self, other: &Self) -> bool {
        self.value.total_cmp(&other.value) == Ordering::Equal && self.color == other.color
    }
}

/// Stops sorted ascending by value, unique per value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breakpoints {
    stops: Vec<ColorStop>,
}

impl Breakpoints {
    pub const fn new() -> Self {
        Self { stops: Vec::new() }
    }

    /// Insert a stop, replacing the color of an existing stop at the same value.
    pub fn put(&mut self, value: f64, color: Rgba) {
        match self
            .stops
            .binary_search_by(|stop| stop.value.total_cmp(&value))
        {
            Ok(i) => self.stops[i].color = color,
            Err(i) => self.stops.insert(i, ColorStop::new(value, color)),
        }
    }

    pub fn clear(&mut self) {
        self.stops.clear();
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn as_slice(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorStop> {
        self.stops.iter()
    }

    pub fn first(&self) -> Option<&ColorStop> {
        self.stops.first()
    }

    pub fn last(&self) -> Option<&ColorStop> {
        self.stops.last()
    }
}

impl<'a> IntoIterator for &'a Breakpoints {
    type Item = &'a ColorStop;
    type IntoIter = std::slice::Iter<'a, ColorStop>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(f64, Rgba)> for Breakpoints {
    fn from_iter<I: IntoIterator<Item = (f64, Rgba)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (value, color) in iter {
            table.put(value, color);
        }
        table
    }
}
