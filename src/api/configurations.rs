use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;

use super::{timezones::normalize_selection, ApiError, AppState};
use crate::database::models::{SavedConfiguration, TimezoneSelection};
use crate::utils::{
    logging::{log_api_start, log_api_success, log_database_operation},
    validation::{validate_configuration_name, validate_record_id},
};

#[derive(Debug, Deserialize)]
pub struct CreateConfigurationRequest {
    pub name: String,
    pub organizer: String,
    #[serde(default)]
    pub participants: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/configurations",
            get(list_configurations).post(create_configuration),
        )
        .route("/api/configurations/:id", delete(delete_configuration))
        .route("/api/configurations/:id/load", post(load_configuration))
}

async fn list_configurations(
    State(state): State<AppState>,
) -> Result<Json<Vec<SavedConfiguration>>, ApiError> {
    Ok(Json(SavedConfiguration::list_all(&state.db.pool).await?))
}

async fn create_configuration(
    State(state): State<AppState>,
    Json(request): Json<CreateConfigurationRequest>,
) -> Result<(StatusCode, Json<SavedConfiguration>), ApiError> {
    const ENDPOINT: &str = "POST /api/configurations";
    log_api_start(ENDPOINT, Some(&format!("name '{}'", request.name)));

    validate_configuration_name(&request.name).map_err(ApiError::validation)?;
    let selection = normalize_selection(Some(&request.organizer), &request.participants)?;
    let organizer = selection.organizer_timezone.unwrap_or(request.organizer);

    let saved = SavedConfiguration::create(
        &state.db.pool,
        request.name.trim().to_string(),
        organizer,
        selection.participant_timezones,
    )
    .await?;

    log_database_operation("insert", "saved_configurations", Some(&saved.id));
    log_api_success(ENDPOINT, Some(&format!("configuration {}", saved.id)));
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn delete_configuration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_record_id(&id).map_err(ApiError::validation)?;
    if SavedConfiguration::delete(&state.db.pool, &id).await? {
        log_database_operation("delete", "saved_configurations", Some(&id));
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Configuration".to_string()))
    }
}

/// Makes a saved configuration the current zone selection.
async fn load_configuration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TimezoneSelection>, ApiError> {
    validate_record_id(&id).map_err(ApiError::validation)?;
    let saved = SavedConfiguration::find_by_id(&state.db.pool, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Configuration".to_string()))?;

    let selection = TimezoneSelection {
        organizer_timezone: Some(saved.organizer_timezone),
        participant_timezones: saved.participant_timezones,
    };
    selection.store(&state.db.pool).await?;

    tracing::info!("Loaded configuration '{}' ({})", saved.name, saved.id);
    Ok(Json(selection))
}
