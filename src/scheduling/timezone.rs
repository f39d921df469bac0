//! Timezone identifiers and offset-based conversion.
//!
//! Identifiers resolve against the IANA database compiled into `chrono-tz`.
//! Conversion shifts an instant by the difference of the two zones' UTC
//! offsets, both evaluated at the same absolute instant.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::{Tz, TZ_VARIANTS};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::{SchedulingError, SchedulingResult};
use super::region::region_label;

/// A validated timezone identifier such as `"America/New_York"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimezoneId(Tz);

impl TimezoneId {
    /// Resolves an identifier, failing with `UnknownTimezone` when it is not
    /// in the database. Surrounding whitespace is ignored.
    pub fn parse(name: &str) -> SchedulingResult<Self> {
        Tz::from_str(name.trim())
            .map(Self)
            .map_err(|_| SchedulingError::UnknownTimezone(name.to_string()))
    }

    /// Canonical identifier string
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Underlying `chrono-tz` zone
    pub fn tz(&self) -> Tz {
        self.0
    }

    /// Human-readable country or region label
    pub fn label(&self) -> String {
        region_label(self.name())
    }
}

impl From<Tz> for TimezoneId {
    fn from(tz: Tz) -> Self {
        Self(tz)
    }
}

impl FromStr for TimezoneId {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimezoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TimezoneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TimezoneId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::parse(&name).map_err(serde::de::Error::custom)
    }
}

/// Signed seconds the zone's clock is ahead of UTC at `instant`.
pub fn seconds_from_utc(zone: TimezoneId, instant: DateTime<Utc>) -> i32 {
    zone.0
        .offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc()
}

/// True when `name` resolves in the timezone database.
pub fn is_valid_identifier(name: &str) -> bool {
    TimezoneId::parse(name).is_ok()
}

/// Every identifier known to the database, in database order.
pub fn known_identifiers() -> impl Iterator<Item = &'static str> {
    TZ_VARIANTS.iter().map(|tz| tz.name())
}

/// Case-insensitive search over identifiers and their display labels.
/// An empty query returns every zone.
pub fn search(query: &str) -> Vec<TimezoneId> {
    let needle = query.trim().to_lowercase();
    TZ_VARIANTS
        .iter()
        .map(|tz| TimezoneId(*tz))
        .filter(|zone| {
            needle.is_empty()
                || zone.name().to_lowercase().contains(&needle)
                || zone.label().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Converts `instant` from `source` to `dest` by the difference of their
/// offsets at `instant`.
///
/// The result read on `source`'s clock shows `dest`'s wall-clock time. Both
/// offsets are taken at the original instant, so a result that lands on the
/// far side of a DST transition in `dest` can be off by the transition size.
///
/// Fails with `OutOfRange` when the shifted instant, or `dest`'s wall-clock
/// time at `instant`, is not representable.
pub fn convert(
    instant: DateTime<Utc>,
    source: TimezoneId,
    dest: TimezoneId,
) -> SchedulingResult<DateTime<Utc>> {
    let source_offset = seconds_from_utc(source, instant);
    let dest_offset = seconds_from_utc(dest, instant);
    let out_of_range = || SchedulingError::OutOfRange(instant.to_rfc3339());

    instant
        .naive_utc()
        .checked_add_signed(Duration::seconds(i64::from(dest_offset)))
        .ok_or_else(out_of_range)?;
    instant
        .checked_add_signed(Duration::seconds(i64::from(dest_offset - source_offset)))
        .ok_or_else(out_of_range)
}

/// [`convert`] for raw identifier strings.
pub fn convert_named(
    instant: DateTime<Utc>,
    source: &str,
    dest: &str,
) -> SchedulingResult<DateTime<Utc>> {
    let source = TimezoneId::parse(source)?;
    let dest = TimezoneId::parse(dest)?;
    convert(instant, source, dest)
}

/// Wall-clock reading of `instant` on `frame`'s clock, clamped to the
/// representable range at its ends.
pub fn wall_clock(instant: DateTime<Utc>, frame: TimezoneId) -> NaiveDateTime {
    let offset = seconds_from_utc(frame, instant);
    instant
        .naive_utc()
        .checked_add_signed(Duration::seconds(i64::from(offset)))
        .unwrap_or(if offset < 0 { NaiveDateTime::MIN } else { NaiveDateTime::MAX })
}

/// Resolves a wall-clock time in `zone` to an absolute instant.
///
/// Ambiguous times (DST fold) take the earlier instant. Times inside a DST gap
/// use the offset in force before the gap.
pub fn resolve_local(zone: TimezoneId, local: NaiveDateTime) -> DateTime<Utc> {
    match zone.0.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let day_before = local.checked_sub_signed(Duration::days(1)).unwrap_or(local);
            let before_gap = zone.0.offset_from_utc_datetime(&day_before).fix().local_minus_utc();
            let utc = local
                .checked_sub_signed(Duration::seconds(i64::from(before_gap)))
                .unwrap_or(local);
            Utc.from_utc_datetime(&utc)
        }
    }
}
