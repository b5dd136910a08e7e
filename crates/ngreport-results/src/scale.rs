//! Pixel scaling for the execution timeline chart
//!
//! Maps millisecond durations onto a fixed pixel width so the renderer can
//! draw per-thread lanes Gantt-style, and picks a tick-mark granularity from
//! the total suite duration.

use crate::chronology::{Chronology, TimedExecution};

/// Maps a chronology's absolute timestamps to pixel widths and offsets.
///
/// The ratio starts at 1 pixel per millisecond until
/// [`TimelineScale::set_desired_width`] pins the chart width.
#[derive(Debug)]
pub struct TimelineScale<'a> {
    chronology: &'a Chronology,
    pixels_per_milli: f64,
}

impl<'a> TimelineScale<'a> {
    /// Create a scale over `chronology`
    #[must_use]
    pub fn new(chronology: &'a Chronology) -> Self {
        Self {
            chronology,
            pixels_per_milli: 1.0,
        }
    }

    /// Fit the whole suite duration into `pixels`.
    ///
    /// A zero-duration suite yields a scale of 0 rather than a division by
    /// zero; every width and offset then collapses to 0.
    pub fn set_desired_width(&mut self, pixels: u32) {
        let total = self.chronology.total_duration_millis();
        self.pixels_per_milli = if total > 0 {
            f64::from(pixels) / total as f64
        } else {
            0.0
        };
    }

    /// Scale a millisecond value to pixels, rounding up
    #[must_use]
    pub fn scale(&self, millis: i64) -> i64 {
        (self.pixels_per_milli * millis as f64).ceil() as i64
    }

    /// Pixel width of one execution's bar. A zero-duration execution yields
    /// width 0: no visual minimum floor is applied.
    #[must_use]
    pub fn width_of(&self, entry: &TimedExecution) -> i64 {
        self.scale(entry.execution().duration_millis())
    }

    /// Pixel offset of one execution's bar from the end of the preceding
    /// execution on the same thread, or from the suite start for the first
    /// execution on its thread.
    ///
    /// Negative gaps (clock skew, overlapping executions) pass through as
    /// negative offsets; they are data, not errors.
    #[must_use]
    pub fn start_offset_of(&self, entry: &TimedExecution) -> i64 {
        let start = entry.execution().start_millis;
        let relative = match self.chronology.preceding(entry) {
            Some(prior) => start - prior.execution().end_millis,
            None => start - self.chronology.suite_start_millis().unwrap_or(start),
        };
        self.scale(relative)
    }

    /// Tick-mark granularity in milliseconds: 10 for suites under one
    /// second, 1000 under one minute, 60000 otherwise.
    #[must_use]
    pub fn tick_interval_millis(&self) -> i64 {
        let total = self.chronology.total_duration_millis();
        if total < 1000 {
            10
        } else if total < 60_000 {
            1000
        } else {
            60_000
        }
    }

    /// Number of whole tick intervals across the suite duration
    #[must_use]
    pub fn tick_count(&self, interval_millis: i64) -> i64 {
        if interval_millis <= 0 {
            return 0;
        }
        self.chronology.total_duration_millis() / interval_millis
    }
}
