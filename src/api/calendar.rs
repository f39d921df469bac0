use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::database::models::{CalendarEntry, NewCalendarEntry, DEFAULT_DURATION_MINUTES};
use crate::utils::{
    logging::{log_api_start, log_api_success, log_database_operation},
    validation::{
        validate_duration_minutes, validate_entry_span, validate_entry_title, validate_lead_minutes,
        validate_record_id,
    },
};

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub start: DateTime<Utc>,
    pub duration_minutes: Option<i64>,
    pub lead_minutes: Option<i64>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/calendar", get(list_entries).post(create_entry))
        .route("/api/calendar/:id", delete(delete_entry))
}

async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<CalendarEntry>>, ApiError> {
    Ok(Json(CalendarEntry::list_all(&state.db.pool).await?))
}

async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<CalendarEntry>), ApiError> {
    const ENDPOINT: &str = "POST /api/calendar";
    log_api_start(ENDPOINT, Some(&format!("title '{}'", request.title)));

    validate_entry_title(&request.title).map_err(ApiError::validation)?;
    let duration_minutes = request.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
    validate_duration_minutes(duration_minutes).map_err(ApiError::validation)?;
    if let Some(lead) = request.lead_minutes {
        validate_lead_minutes(lead).map_err(ApiError::validation)?;
    }
    validate_entry_span(request.start, duration_minutes, request.lead_minutes).map_err(ApiError::validation)?;

    let entry = CalendarEntry::create(
        &state.db.pool,
        NewCalendarEntry {
            title: request.title.trim().to_string(),
            notes: request.notes,
            start_time: request.start,
            duration_minutes,
            lead_minutes: request.lead_minutes,
        },
    )
    .await?;

    log_database_operation("insert", "calendar_entries", Some(&entry.id));
    log_api_success(ENDPOINT, Some(&format!("entry {}", entry.id)));
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn delete_entry(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    validate_record_id(&id).map_err(ApiError::validation)?;
    if CalendarEntry::delete(&state.db.pool, &id).await? {
        log_database_operation("delete", "calendar_entries", Some(&id));
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Calendar entry".to_string()))
    }
}
