use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::database::models::TimezoneSelection;
use crate::scheduling::{dedup_participants, timezone::search, TimezoneId};
use crate::utils::{
    logging::{log_api_start, log_api_success, log_validation_error},
    validation::validate_participant_count,
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoneInfo {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub organizer: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/timezones", get(search_timezones))
        .route(
            "/api/settings/timezones",
            get(get_selection).put(update_selection),
        )
}

async fn search_timezones(Query(params): Query<SearchParams>) -> Json<Vec<ZoneInfo>> {
    let query = params.q.unwrap_or_default();
    let zones: Vec<ZoneInfo> = search(&query)
        .into_iter()
        .map(|zone| ZoneInfo {
            id: zone.name().to_string(),
            label: zone.label(),
        })
        .collect();
    tracing::debug!("Timezone search '{}' matched {} zones", query, zones.len());
    Json(zones)
}

async fn get_selection(State(state): State<AppState>) -> Result<Json<TimezoneSelection>, ApiError> {
    Ok(Json(TimezoneSelection::load(&state.db.pool).await?))
}

async fn update_selection(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<TimezoneSelection>, ApiError> {
    const ENDPOINT: &str = "PUT /api/settings/timezones";
    log_api_start(ENDPOINT, Some(&format!("{} participants", request.participants.len())));

    let selection = normalize_selection(request.organizer.as_deref(), &request.participants).map_err(|e| {
        log_validation_error(ENDPOINT, "timezones", &request.participants.join(","), &e.to_string());
        e
    })?;
    selection.store(&state.db.pool).await?;

    log_api_success(ENDPOINT, Some(&format!("{} participants stored", selection.participant_timezones.len())));
    Ok(Json(selection))
}

/// Validates every identifier and applies the participant de-duplication
/// rules, returning canonical names.
pub fn normalize_selection(organizer: Option<&str>, participants: &[String]) -> Result<TimezoneSelection, ApiError> {
    validate_participant_count(participants.len()).map_err(ApiError::validation)?;

    let organizer = organizer.map(TimezoneId::parse).transpose()?;
    let parsed = participants
        .iter()
        .map(|name| TimezoneId::parse(name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TimezoneSelection {
        organizer_timezone: organizer.map(|zone| zone.name().to_string()),
        participant_timezones: dedup_participants(organizer, parsed)
            .into_iter()
            .map(|zone| zone.name().to_string())
            .collect(),
    })
}
