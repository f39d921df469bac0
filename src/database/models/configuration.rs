use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named organizer/participant zone set saved for reuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedConfiguration {
    pub id: String,
    pub name: String,
    pub organizer_timezone: String,
    pub participant_timezones: Vec<String>,
    pub created_at: String,
}

#[derive(FromRow)]
struct ConfigurationRow {
    id: String,
    name: String,
    organizer_timezone: String,
    participant_timezones: String,
    created_at: String,
}

impl TryFrom<ConfigurationRow> for SavedConfiguration {
    type Error = sqlx::Error;

    fn try_from(row: ConfigurationRow) -> Result<Self, Self::Error> {
        let participant_timezones = serde_json::from_str(&row.participant_timezones)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(SavedConfiguration {
            id: row.id,
            name: row.name,
            organizer_timezone: row.organizer_timezone,
            participant_timezones,
            created_at: row.created_at,
        })
    }
}

impl SavedConfiguration {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        name: String,
        organizer_timezone: String,
        participant_timezones: Vec<String>,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();
        let encoded = serde_json::to_string(&participant_timezones)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        sqlx::query(
            r#"
            INSERT INTO saved_configurations (id, name, organizer_timezone, participant_timezones, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&name)
        .bind(&organizer_timezone)
        .bind(&encoded)
        .bind(&created_at)
        .execute(pool)
        .await?;

        Ok(SavedConfiguration {
            id,
            name,
            organizer_timezone,
            participant_timezones,
            created_at,
        })
    }

    pub async fn find_by_id(pool: &sqlx::SqlitePool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ConfigurationRow>(
            "SELECT id, name, organizer_timezone, participant_timezones, created_at FROM saved_configurations WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(SavedConfiguration::try_from)
        .transpose()
    }

    /// Every saved configuration, oldest first.
    pub async fn list_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ConfigurationRow>(
            "SELECT id, name, organizer_timezone, participant_timezones, created_at FROM saved_configurations ORDER BY created_at ASC, rowid ASC",
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(SavedConfiguration::try_from)
        .collect()
    }

    pub async fn delete(pool: &sqlx::SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM saved_configurations WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
