//! JSON-over-HTTP surface for the meeting planner.

pub mod calendar;
pub mod configurations;
pub mod error;
pub mod meetings;
pub mod timezones;

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::scheduling::{TimeFormat, WorkingHoursWindow};
use crate::services::{health, messaging::MessagingService};

pub use error::ApiError;

/// Scheduling preferences applied to every request
#[derive(Debug, Clone, Copy)]
pub struct ApiSettings {
    pub working_hours: WorkingHoursWindow,
    pub time_format: TimeFormat,
    pub reminder_lead_minutes: i64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            working_hours: WorkingHoursWindow::default(),
            time_format: TimeFormat::default(),
            reminder_lead_minutes: 15,
        }
    }
}

impl From<&Config> for ApiSettings {
    fn from(config: &Config) -> Self {
        Self {
            working_hours: config.working_hours,
            time_format: config.time_format,
            reminder_lead_minutes: config.reminder_lead_minutes,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseManager>,
    pub messaging: MessagingService,
    pub settings: ApiSettings,
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseManager>, messaging: MessagingService, settings: ApiSettings) -> Self {
        Self {
            db,
            messaging,
            settings,
            start_time: Utc::now(),
        }
    }
}

/// Health checks plus every `/api` route, with request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(timezones::routes())
        .merge(meetings::routes())
        .merge(configurations::routes())
        .merge(calendar::routes())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
