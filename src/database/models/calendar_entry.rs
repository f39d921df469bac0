use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Default meeting length when none is given
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub id: String,
    pub title: String,
    pub notes: String,
    pub start_time: String,
    pub end_time: String,
    pub lead_minutes: Option<i64>,
    pub remind_at: Option<String>,
    pub reminder_sent_at: Option<String>,
    pub reminder_failed_at: Option<String>,
    pub created_at: String,
}

/// Input for [`CalendarEntry::create`]
#[derive(Debug, Clone)]
pub struct NewCalendarEntry {
    pub title: String,
    pub notes: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub lead_minutes: Option<i64>,
}

/// Timestamps are stored in one fixed RFC 3339 shape so that text
/// comparison in SQL matches chronological order.
pub fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

const ENTRY_COLUMNS: &str = "id, title, notes, start_time, end_time, lead_minutes, remind_at, \
     reminder_sent_at, reminder_failed_at, created_at";

fn out_of_range(start_time: &DateTime<Utc>) -> sqlx::Error {
    sqlx::Error::Protocol(format!("Calendar entry times around {} are out of range", start_time))
}

impl CalendarEntry {
    pub async fn create(pool: &sqlx::SqlitePool, entry: NewCalendarEntry) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let created_at = timestamp(&Utc::now());
        let start_time = timestamp(&entry.start_time);
        let end_time = entry
            .start_time
            .checked_add_signed(Duration::minutes(entry.duration_minutes))
            .map(|end| timestamp(&end))
            .ok_or_else(|| out_of_range(&entry.start_time))?;
        let remind_at = match entry.lead_minutes {
            Some(lead) => Some(
                entry
                    .start_time
                    .checked_sub_signed(Duration::minutes(lead))
                    .map(|at| timestamp(&at))
                    .ok_or_else(|| out_of_range(&entry.start_time))?,
            ),
            None => None,
        };

        sqlx::query(
            r#"
            INSERT INTO calendar_entries (id, title, notes, start_time, end_time, lead_minutes, remind_at, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&entry.title)
        .bind(&entry.notes)
        .bind(&start_time)
        .bind(&end_time)
        .bind(entry.lead_minutes)
        .bind(&remind_at)
        .bind(&created_at)
        .execute(pool)
        .await?;

        Ok(CalendarEntry {
            id,
            title: entry.title,
            notes: entry.notes,
            start_time,
            end_time,
            lead_minutes: entry.lead_minutes,
            remind_at,
            reminder_sent_at: None,
            reminder_failed_at: None,
            created_at,
        })
    }

    pub async fn find_by_id(pool: &sqlx::SqlitePool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {} FROM calendar_entries WHERE id = ?", ENTRY_COLUMNS);
        sqlx::query_as::<_, CalendarEntry>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Entries ordered by start time.
    pub async fn list_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!("SELECT {} FROM calendar_entries ORDER BY start_time ASC", ENTRY_COLUMNS);
        sqlx::query_as::<_, CalendarEntry>(&sql).fetch_all(pool).await
    }

    /// Entries whose reminder time has passed and that were never reminded
    /// or attempted.
    pub async fn find_due_reminders(
        pool: &sqlx::SqlitePool,
        now: DateTime<Utc>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM calendar_entries \
             WHERE remind_at IS NOT NULL AND remind_at <= ? \
             AND reminder_sent_at IS NULL AND reminder_failed_at IS NULL \
             ORDER BY remind_at ASC",
            ENTRY_COLUMNS
        );
        sqlx::query_as::<_, CalendarEntry>(&sql)
            .bind(timestamp(&now))
            .fetch_all(pool)
            .await
    }

    pub async fn mark_reminder_sent(
        pool: &sqlx::SqlitePool,
        id: &str,
        sent_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE calendar_entries SET reminder_sent_at = ? WHERE id = ? AND reminder_sent_at IS NULL",
        )
        .bind(timestamp(&sent_at))
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Records a failed delivery so the reminder leaves the due list.
    pub async fn mark_reminder_failed(
        pool: &sqlx::SqlitePool,
        id: &str,
        failed_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE calendar_entries SET reminder_failed_at = ? \
             WHERE id = ? AND reminder_sent_at IS NULL AND reminder_failed_at IS NULL",
        )
        .bind(timestamp(&failed_at))
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &sqlx::SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM calendar_entries WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
