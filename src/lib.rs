//! # TimeSync
//!
//! Meeting planner for teams spread across timezones.
//!
//! ## Features
//! - Convert a proposed meeting time into every participant's local time
//! - Flag participants for whom the meeting falls outside working hours
//! - Suggest hourly slots that suit everyone on a given day
//! - Plain-text meeting summaries shared over Telegram
//! - Saved timezone configurations and calendar reminders in SQLite

/// JSON HTTP routes and shared application state
pub mod api;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Timezone conversion, conflict checks, slot suggestion and summaries
pub mod scheduling;
/// Background services like reminders and message delivery
pub mod services;
/// Utility functions for datetime parsing, validation, and logging
pub mod utils;
