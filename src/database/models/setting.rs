use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Key under which the participant identifiers are stored
pub const SAVED_TIMEZONES_KEY: &str = "saved_timezones";
/// Key under which the organizer identifier is stored
pub const USER_TIMEZONE_KEY: &str = "user_timezone";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

impl Setting {
    pub async fn get(pool: &sqlx::SqlitePool, key: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Setting>("SELECT key, value, updated_at FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    pub async fn put(pool: &sqlx::SqlitePool, key: &str, value: String) -> Result<Self, sqlx::Error> {
        let updated_at = Utc::now().to_rfc3339();
        upsert(pool, key, &value, &updated_at).await?;
        Ok(Setting {
            key: key.to_string(),
            value,
            updated_at,
        })
    }

    pub async fn delete(pool: &sqlx::SqlitePool, key: &str) -> Result<bool, sqlx::Error> {
        remove(pool, key).await
    }
}

/// The organizer and participant zones currently selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneSelection {
    pub organizer_timezone: Option<String>,
    pub participant_timezones: Vec<String>,
}

impl TimezoneSelection {
    pub async fn load(pool: &sqlx::SqlitePool) -> Result<Self, sqlx::Error> {
        let organizer_timezone = Setting::get(pool, USER_TIMEZONE_KEY).await?.map(|s| s.value);
        let participant_timezones = match Setting::get(pool, SAVED_TIMEZONES_KEY).await? {
            Some(setting) => serde_json::from_str(&setting.value)
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
            None => Vec::new(),
        };

        Ok(Self {
            organizer_timezone,
            participant_timezones,
        })
    }

    pub async fn store(&self, pool: &sqlx::SqlitePool) -> Result<(), sqlx::Error> {
        let encoded = serde_json::to_string(&self.participant_timezones)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let updated_at = Utc::now().to_rfc3339();

        let mut tx = pool.begin().await?;
        match &self.organizer_timezone {
            Some(zone) => upsert(&mut tx, USER_TIMEZONE_KEY, zone, &updated_at).await?,
            None => {
                remove(&mut tx, USER_TIMEZONE_KEY).await?;
            }
        }
        upsert(&mut tx, SAVED_TIMEZONES_KEY, &encoded, &updated_at).await?;
        tx.commit().await
    }
}

async fn upsert<'e, E>(executor: E, key: &str, value: &str, updated_at: &str) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO settings (key, value, updated_at) VALUES (?, ?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(updated_at)
    .execute(executor)
    .await?;
    Ok(())
}

async fn remove<'e, E>(executor: E, key: &str) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let result = sqlx::query("DELETE FROM settings WHERE key = ?")
        .bind(key)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
