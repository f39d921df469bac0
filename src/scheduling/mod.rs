//! Timezone-aware meeting computations.
//!
//! Everything in this module is pure and synchronous: conversion between
//! zones, the working-hours conflict check, slot suggestion and the
//! plain-text summary handed to messaging and calendar collaborators.

pub mod error;
pub mod proposal;
pub mod region;
pub mod suggester;
pub mod summary;
pub mod timezone;
pub mod working_hours;

pub use error::{SchedulingError, SchedulingResult};
pub use proposal::{dedup_participants, ConversionResult, MeetingProposal};
pub use suggester::{suggest, Suggestions, CANDIDATE_SLOTS};
pub use summary::{format_summary, TimeFormat};
pub use timezone::{convert, convert_named, is_valid_identifier, seconds_from_utc, TimezoneId};
pub use working_hours::{is_conflict, WorkingHoursWindow};
