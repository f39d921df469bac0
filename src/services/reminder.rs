use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::database::{connection::DatabaseManager, models::*};
use crate::services::messaging::MessagingService;
use crate::utils::{
    datetime::format_datetime,
    logging::{log_database_error, log_system_event},
};

/// Title given to reminders created from a shared meeting proposal
pub const MEETING_REMINDER_TITLE: &str = "Meeting Reminder";

pub struct ReminderService {
    messaging: MessagingService,
    db: Arc<DatabaseManager>,
    scheduler: JobScheduler,
}

impl ReminderService {
    pub async fn new(
        messaging: MessagingService,
        db: Arc<DatabaseManager>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            messaging,
            db,
            scheduler,
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        // Reminder lead times are in minutes, so poll at the top of every minute
        let messaging = self.messaging.clone();
        let db = self.db.clone();

        let reminder_job = Job::new_async("0 * * * * *", move |_uuid, _l| {
            let messaging = messaging.clone();
            let db = db.clone();
            Box::pin(async move {
                if let Err(e) = check_and_send_reminders(&messaging, &db, Utc::now()).await {
                    tracing::error!("Failed to send reminders: {}", e);
                }
            })
        })?;

        self.scheduler.add(reminder_job).await?;
        self.scheduler.start().await?;

        log_system_event("Reminder service started", Some("checking for due reminders every minute"));
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    /// Runs one reminder pass immediately and returns how many were sent.
    pub async fn check_reminders_now(&self) -> Result<usize, sqlx::Error> {
        check_and_send_reminders(&self.messaging, &self.db, Utc::now()).await
    }
}

/// Sends every due reminder and returns how many were delivered.
///
/// Each entry is attempted once: a failed delivery is recorded on the entry
/// and it leaves the due list.
pub async fn check_and_send_reminders(
    messaging: &MessagingService,
    db: &DatabaseManager,
    now: DateTime<Utc>,
) -> Result<usize, sqlx::Error> {
    let due = CalendarEntry::find_due_reminders(&db.pool, now).await?;
    let mut sent = 0;

    for entry in due {
        match messaging.send(&reminder_text(&entry)).await {
            Ok(()) => {
                if let Err(e) = CalendarEntry::mark_reminder_sent(&db.pool, &entry.id, now).await {
                    log_database_error("mark_reminder_sent", "calendar_entries", &e.to_string(), Some(&entry.id));
                    return Err(e);
                }
                sent += 1;
                tracing::info!("Sent reminder for calendar entry {} ('{}')", entry.id, entry.title);
            }
            Err(e) => {
                tracing::error!("Failed to send reminder for calendar entry {}: {}", entry.id, e);
                if let Err(e) = CalendarEntry::mark_reminder_failed(&db.pool, &entry.id, now).await {
                    log_database_error("mark_reminder_failed", "calendar_entries", &e.to_string(), Some(&entry.id));
                    return Err(e);
                }
            }
        }
    }

    Ok(sent)
}

/// Plain-text reminder for a calendar entry.
pub fn reminder_text(entry: &CalendarEntry) -> String {
    let starts = DateTime::parse_from_rfc3339(&entry.start_time)
        .map(|dt| format_datetime(&dt.with_timezone(&Utc)))
        .unwrap_or_else(|_| entry.start_time.clone());

    let mut text = format!("{}\n\nStarts: {}", entry.title, starts);
    if let Some(lead) = entry.lead_minutes {
        text.push_str(&format!(" (in {} minutes)", lead));
    }
    if !entry.notes.trim().is_empty() {
        text.push_str("\n\n");
        text.push_str(entry.notes.trim_end());
    }
    text
}

/// Calendar entry that reminds `lead_minutes` before a shared meeting.
pub fn meeting_reminder(summary: &str, start_time: DateTime<Utc>, lead_minutes: i64) -> NewCalendarEntry {
    NewCalendarEntry {
        title: MEETING_REMINDER_TITLE.to_string(),
        notes: summary.to_string(),
        start_time,
        duration_minutes: DEFAULT_DURATION_MINUTES,
        lead_minutes: Some(lead_minutes),
    }
}
