use axum::{extract::State, response::Json, routing::post, Router};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::database::models::CalendarEntry;
use crate::scheduling::{
    format_summary, suggest, timezone::wall_clock, ConversionResult, MeetingProposal, TimezoneId,
};
use crate::services::reminder::meeting_reminder;
use crate::utils::{
    datetime::{parse_datetime_in, parse_day},
    logging::{log_api_start, log_api_success, log_database_error, log_validation_error},
    validation::{validate_lead_minutes, validate_participant_count},
};

/// A proposed meeting: the organizer's zone, the participants' zones and a
/// wall-clock time on the organizer's clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub organizer: String,
    #[serde(default)]
    pub participants: Vec<String>,
    pub local_time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ZoneTime {
    pub timezone: TimezoneId,
    pub label: String,
    pub local_time: NaiveDateTime,
    pub display: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConversionView {
    #[serde(flatten)]
    pub result: ConversionResult,
    pub label: String,
    pub display: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConversionResponse {
    pub proposed_instant: DateTime<Utc>,
    pub organizer: ZoneTime,
    pub conversions: Vec<ConversionView>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub organizer: String,
    #[serde(default)]
    pub participants: Vec<String>,
    pub day: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestedSlot {
    pub instant: DateTime<Utc>,
    pub local_time: NaiveDateTime,
    pub display: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub slots: Vec<SuggestedSlot>,
    pub unresolved: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    #[serde(flatten)]
    pub meeting: MeetingRequest,
    #[serde(default)]
    pub remind: bool,
    pub lead_minutes: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShareResponse {
    pub summary: String,
    pub delivered: bool,
    pub error: Option<String>,
    pub reminder: Option<CalendarEntry>,
    pub reminder_error: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/meetings/convert", post(convert_meeting))
        .route("/api/meetings/suggest", post(suggest_slots))
        .route("/api/meetings/summary", post(summarize_meeting))
        .route("/api/meetings/share", post(share_meeting))
}

/// Resolves a request into a proposal, rejecting unknown zones and
/// unparseable times.
pub fn build_proposal(request: &MeetingRequest) -> Result<MeetingProposal, ApiError> {
    validate_participant_count(request.participants.len()).map_err(ApiError::validation)?;
    let organizer = TimezoneId::parse(&request.organizer)?;
    let instant = parse_datetime_in(&request.local_time, organizer).map_err(|e| {
        log_validation_error("meetings", "local_time", &request.local_time, &e.to_string());
        ApiError::validation(e)
    })?;
    MeetingProposal::from_names(organizer.name(), &request.participants, instant).map_err(ApiError::from)
}

fn summary_for(state: &AppState, proposal: &MeetingProposal) -> Result<String, ApiError> {
    let conversions = proposal.conversions(&state.settings.working_hours)?;
    format_summary(proposal, &conversions, state.settings.time_format).map_err(ApiError::from)
}

async fn convert_meeting(
    State(state): State<AppState>,
    Json(request): Json<MeetingRequest>,
) -> Result<Json<ConversionResponse>, ApiError> {
    let proposal = build_proposal(&request)?;
    let format = state.settings.time_format;
    let organizer = proposal.organizer_timezone();
    let organizer_time = proposal.organizer_local_time();

    let conversions = proposal
        .conversions(&state.settings.working_hours)?
        .into_iter()
        .map(|result| ConversionView {
            label: result.timezone.label(),
            display: format.render(&result.local_time),
            result,
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        "Converted meeting at {} for {} participants, {} in conflict",
        proposal.proposed_instant(),
        conversions.len(),
        conversions.iter().filter(|c| c.result.in_conflict).count()
    );

    Ok(Json(ConversionResponse {
        proposed_instant: proposal.proposed_instant(),
        organizer: ZoneTime {
            timezone: organizer,
            label: organizer.label(),
            local_time: organizer_time,
            display: format.render(&organizer_time),
        },
        conversions,
    }))
}

async fn suggest_slots(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, ApiError> {
    validate_participant_count(request.participants.len()).map_err(ApiError::validation)?;
    let organizer = TimezoneId::parse(&request.organizer)?;
    let day = parse_day(&request.day).map_err(ApiError::validation)?;

    let suggestions = suggest(day, organizer, &request.participants, &state.settings.working_hours);
    let slots = suggestions
        .iter()
        .map(|instant| {
            let local_time = wall_clock(instant, organizer);
            SuggestedSlot {
                instant,
                local_time,
                display: state.settings.time_format.render(&local_time),
            }
        })
        .collect::<Vec<_>>();

    if !suggestions.unresolved().is_empty() {
        tracing::warn!("Unresolvable participant timezones: {:?}", suggestions.unresolved());
    }

    Ok(Json(SuggestResponse {
        slots,
        unresolved: suggestions.unresolved().to_vec(),
    }))
}

async fn summarize_meeting(
    State(state): State<AppState>,
    Json(request): Json<MeetingRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let proposal = build_proposal(&request)?;
    Ok(Json(SummaryResponse {
        summary: summary_for(&state, &proposal)?,
    }))
}

async fn share_meeting(
    State(state): State<AppState>,
    Json(request): Json<ShareRequest>,
) -> Result<Json<ShareResponse>, ApiError> {
    const ENDPOINT: &str = "POST /api/meetings/share";
    log_api_start(ENDPOINT, Some(&format!("organizer {}", request.meeting.organizer)));

    let proposal = build_proposal(&request.meeting)?;
    let lead_minutes = request.lead_minutes.unwrap_or(state.settings.reminder_lead_minutes);
    validate_lead_minutes(lead_minutes).map_err(ApiError::validation)?;
    let summary = summary_for(&state, &proposal)?;

    let (delivered, error) = match state.messaging.send(&summary).await {
        Ok(()) => (true, None),
        Err(e) => {
            tracing::warn!("Meeting summary delivery failed: {}", e);
            (false, Some(e.to_string()))
        }
    };

    let (reminder, reminder_error) = if request.remind {
        let entry = meeting_reminder(&summary, proposal.proposed_instant(), lead_minutes);
        match CalendarEntry::create(&state.db.pool, entry).await {
            Ok(saved) => (Some(saved), None),
            Err(e) => {
                log_database_error("insert", "calendar_entries", &e.to_string(), Some("meeting reminder"));
                (None, Some("Failed to set reminder.".to_string()))
            }
        }
    } else {
        (None, None)
    };

    log_api_success(
        ENDPOINT,
        Some(&format!("delivered: {}, reminder: {}", delivered, reminder.is_some())),
    );

    Ok(Json(ShareResponse {
        summary,
        delivered,
        error,
        reminder,
        reminder_error,
    }))
}
