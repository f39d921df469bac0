use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::error::{SchedulingError, SchedulingResult};
use super::timezone::{wall_clock, TimezoneId};

/// Hour-of-day range `[start_hour, end_hour)` considered conflict-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct WorkingHoursWindow {
    start_hour: u32,
    end_hour: u32,
}

#[derive(Deserialize)]
struct RawWindow {
    start_hour: u32,
    end_hour: u32,
}

impl TryFrom<RawWindow> for WorkingHoursWindow {
    type Error = SchedulingError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start_hour, raw.end_hour)
    }
}

impl WorkingHoursWindow {
    /// Default window start (09:00)
    pub const DEFAULT_START_HOUR: u32 = 9;
    /// Default window end (17:00)
    pub const DEFAULT_END_HOUR: u32 = 17;

    /// Builds a window, rejecting hours above 23 and `start_hour >= end_hour`.
    pub fn new(start_hour: u32, end_hour: u32) -> SchedulingResult<Self> {
        if start_hour >= end_hour || end_hour > 23 {
            return Err(SchedulingError::InvalidWindow { start_hour, end_hour });
        }
        Ok(Self { start_hour, end_hour })
    }

    /// First working hour
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// First hour past the window
    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// True when `hour` lies inside the window.
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }
}

impl Default for WorkingHoursWindow {
    fn default() -> Self {
        Self {
            start_hour: Self::DEFAULT_START_HOUR,
            end_hour: Self::DEFAULT_END_HOUR,
        }
    }
}

/// True when the hour of `local_instant`, read on `frame`'s clock, falls
/// outside `window`.
///
/// For instants produced by [`super::timezone::convert`], `frame` is the
/// conversion's source zone.
pub fn is_conflict(local_instant: DateTime<Utc>, frame: TimezoneId, window: &WorkingHoursWindow) -> bool {
    !window.contains_hour(wall_clock(local_instant, frame).hour())
}
