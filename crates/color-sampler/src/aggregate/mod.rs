//! Dominant color counting.
//!
//! [`aggregate`] scans an RGBA buffer one pixel at a time and returns the most
//! frequent colors. The pipeline is:
//!
//! ```text
//! RGBA bytes
//!     |  skip alpha == 0 and truncated tail samples
//!     v
//! canonical Color key
//!     |  drop keys in `ignore`              (before counting)
//!     v
//! insertion-ordered histogram
//!     |  drop colors outside r/g/b ranges   (after counting)
//!     v
//! stable sort by count, descending; truncate to `length`
//! ```
//!
//! Ties keep first-seen order because the histogram preserves insertion order
//! and the sort is stable.

mod options;

pub use options::{AggregateOptions, ChannelRange, RangeError, DEFAULT_LENGTH};

use std::collections::{HashMap, HashSet};

use crate::color::Color;

/// A color and how many pixels carried it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    /// Canonical color key
    pub color: Color,
    /// Number of samples, always at least 1
    pub count: usize,
}

/// Frequency table that remembers the order colors were first seen.
#[derive(Debug, Default)]
struct Histogram {
    index: HashMap<Color, usize>,
    entries: Vec<ColorCount>,
}

impl Histogram {
    fn insert(&mut self, color: Color) {
        match self.index.get(&color) {
            Some(&slot) => self.entries[slot].count += 1,
            None => {
                self.index.insert(color, self.entries.len());
                self.entries.push(ColorCount { color, count: 1 });
            }
        }
    }

    fn into_entries(self) -> Vec<ColorCount> {
        self.entries
    }
}

/// Count the colors of an RGBA buffer and return the most frequent ones.
///
/// The result holds at most `options.length` entries, sorted by count in
/// non-increasing order.
///
/// # Example
///
/// ```
/// use color_sampler::{aggregate, AggregateOptions};
///
/// let buffer: [u8; 8] = [255, 0, 0, 255, 255, 0, 0, 255];
/// let counts = aggregate(&buffer, &AggregateOptions::default());
///
/// assert_eq!(counts.len(), 1);
/// assert_eq!(counts[0].color.to_string(), "rgb(255,0,0)");
/// assert_eq!(counts[0].count, 2);
/// ```
pub fn aggregate<B>(buffer: &B, options: &AggregateOptions) -> Vec<ColorCount>
where
    B: AsRef<[u8]> + ?Sized,
{
    let ignore: HashSet<Color> = options.ignore.iter().copied().collect();
    let mut histogram = Histogram::default();

    // chunks_exact drops a truncated tail sample
    for sample in buffer.as_ref().chunks_exact(4) {
        let Some(color) = Color::from_sample(sample) else {
            continue;
        };
        if ignore.contains(&color) {
            continue;
        }
        histogram.insert(color);
    }

    let mut counts: Vec<ColorCount> = histogram
        .into_entries()
        .into_iter()
        .filter(|entry| options.accepts(entry.color.rgb()))
        .collect();

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(options.length);
    counts
}

/// Like [`aggregate`], but returns only the canonical color strings.
pub fn dominant_colors<B>(buffer: &B, options: &AggregateOptions) -> Vec<String>
where
    B: AsRef<[u8]> + ?Sized,
{
    aggregate(buffer, options)
        .into_iter()
        .map(|entry| entry.color.to_string())
        .collect()
}
