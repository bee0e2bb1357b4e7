//! Text rendering of the progress line.
//!
//! A rendered line looks like
//!
//! ```text
//! [=========>          ] 50.00% 00:00:10 / 00:00:10 (03:04:15 PM)
//! ```
//!
//! i.e. the bar, the completion percentage, elapsed / remaining time and the
//! projected wall-clock finish time.

use crate::estimate::completion_fraction;
use crate::utils::format_time_delta;
use chrono::{DateTime, Local, TimeDelta, TimeZone};
use std::fmt::Display;

/// Number of cells between the brackets when no width is configured.
pub const DEFAULT_BAR_WIDTH: usize = 20;

/// Renders fixed-width progress lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarRenderer {
    width: usize,
}

impl Default for BarRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_WIDTH)
    }
}

impl BarRenderer {
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Renders a progress line, projecting the finish time from the local clock.
    #[must_use]
    pub fn render(&self, current: u64, total: u64, elapsed: TimeDelta, eta: TimeDelta) -> String {
        self.render_at(current, total, elapsed, eta, &Local::now())
    }

    /// Renders a progress line with the finish time projected from `now`.
    #[must_use]
    pub fn render_at<Tz>(
        &self,
        current: u64,
        total: u64,
        elapsed: TimeDelta,
        eta: TimeDelta,
        now: &DateTime<Tz>,
    ) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let percent = completion_fraction(current, total);
        let finish = now
            .clone()
            .checked_add_signed(eta)
            .unwrap_or_else(|| now.clone());

        format!(
            "{} {:.2}% {} / {} ({})",
            render_bar(percent, self.width),
            percent * 100.0,
            format_time_delta(elapsed),
            format_time_delta(eta),
            finish.format("%I:%M:%S %p"),
        )
    }
}

/// Draws `[===>   ]` for a completion fraction.
///
/// The cursor sits in cell `round(percent * width)`; cells before it are `=`
/// and cells after it are spaces. At 0% the cursor takes the first cell and
/// all `width` cells after it are blank. Past 100% the `=` run stops one cell
/// short of the width.
#[must_use]
pub fn render_bar(percent: f64, width: usize) -> String {
    let filled = (percent * width as f64).round() as i64 - 1;
    let max_filled = width.saturating_sub(1) as i64;
    let equals = filled.clamp(0, max_filled) as usize;
    let spaces = (width as i64 - filled - 1).max(0) as usize;

    let mut bar = String::with_capacity(equals + spaces + 3);
    bar.push('[');
    bar.push_str(&"=".repeat(equals));
    bar.push('>');
    bar.push_str(&" ".repeat(spaces));
    bar.push(']');
    bar
}
