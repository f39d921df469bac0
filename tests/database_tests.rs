use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use timesync::database::{connection::DatabaseManager, models::*};
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.run_migrations().await?;

    Ok((db_manager, temp_dir))
}

fn new_entry(title: &str, hours_from_now: i64, lead_minutes: Option<i64>) -> NewCalendarEntry {
    NewCalendarEntry {
        title: title.to_string(),
        notes: String::new(),
        start_time: Utc::now() + Duration::hours(hours_from_now),
        duration_minutes: DEFAULT_DURATION_MINUTES,
        lead_minutes,
    }
}

#[tokio::test]
async fn test_database_creates_missing_directory() -> Result<()> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("nested").join("data").join("timesync.db");
    let db = DatabaseManager::new(&format!("sqlite:{}", db_path.display())).await?;
    db.run_migrations().await?;
    db.ping().await?;

    assert!(db_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_setting_upsert_and_delete() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    assert!(Setting::get(&db.pool, "theme").await?.is_none());

    Setting::put(&db.pool, "theme", "dark".to_string()).await?;
    Setting::put(&db.pool, "theme", "light".to_string()).await?;
    let setting = Setting::get(&db.pool, "theme").await?;
    assert_eq!(setting.map(|s| s.value), Some("light".to_string()));

    assert!(Setting::delete(&db.pool, "theme").await?);
    assert!(!Setting::delete(&db.pool, "theme").await?);
    Ok(())
}

#[tokio::test]
async fn test_timezone_selection_defaults_to_empty() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let selection = TimezoneSelection::load(&db.pool).await?;
    assert_eq!(selection, TimezoneSelection::default());
    Ok(())
}

#[tokio::test]
async fn test_timezone_selection_persists() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let selection = TimezoneSelection {
        organizer_timezone: Some("America/New_York".to_string()),
        participant_timezones: vec!["Asia/Kolkata".to_string(), "Europe/Berlin".to_string()],
    };
    selection.store(&db.pool).await?;
    assert_eq!(TimezoneSelection::load(&db.pool).await?, selection);

    // Clearing the organizer removes the stored value
    let cleared = TimezoneSelection {
        organizer_timezone: None,
        participant_timezones: vec!["Asia/Tokyo".to_string()],
    };
    cleared.store(&db.pool).await?;
    assert_eq!(TimezoneSelection::load(&db.pool).await?, cleared);
    Ok(())
}

#[tokio::test]
async fn test_saved_configuration_lifecycle() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let first = SavedConfiguration::create(
        &db.pool,
        "Core team".to_string(),
        "America/New_York".to_string(),
        vec!["Asia/Kolkata".to_string(), "Europe/London".to_string()],
    )
    .await?;
    let second = SavedConfiguration::create(
        &db.pool,
        "APAC".to_string(),
        "Asia/Tokyo".to_string(),
        vec!["Australia/Sydney".to_string()],
    )
    .await?;

    let found = SavedConfiguration::find_by_id(&db.pool, &first.id).await?;
    assert_eq!(found.as_ref(), Some(&first));

    let all = SavedConfiguration::list_all(&db.pool).await?;
    let names: Vec<_> = all.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Core team", "APAC"]);

    assert!(SavedConfiguration::delete(&db.pool, &second.id).await?);
    assert!(!SavedConfiguration::delete(&db.pool, &second.id).await?);
    assert!(SavedConfiguration::find_by_id(&db.pool, &second.id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_calendar_entry_times() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let start = Utc.with_ymd_and_hms(2030, 6, 1, 13, 0, 0).single().ok_or_else(|| anyhow::anyhow!("bad date"))?;
    let entry = CalendarEntry::create(
        &db.pool,
        NewCalendarEntry {
            title: "Planning".to_string(),
            notes: "Bring the roadmap".to_string(),
            start_time: start,
            duration_minutes: 45,
            lead_minutes: Some(15),
        },
    )
    .await?;

    assert_eq!(entry.start_time, "2030-06-01T13:00:00Z");
    assert_eq!(entry.end_time, "2030-06-01T13:45:00Z");
    assert_eq!(entry.remind_at.as_deref(), Some("2030-06-01T12:45:00Z"));
    assert!(entry.reminder_sent_at.is_none());

    let found = CalendarEntry::find_by_id(&db.pool, &entry.id).await?;
    assert_eq!(found.map(|e| e.notes), Some("Bring the roadmap".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_calendar_entries_listed_by_start() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    CalendarEntry::create(&db.pool, new_entry("Later", 48, None)).await?;
    CalendarEntry::create(&db.pool, new_entry("Sooner", 2, None)).await?;

    let titles: Vec<_> = CalendarEntry::list_all(&db.pool)
        .await?
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Sooner", "Later"]);
    Ok(())
}

#[tokio::test]
async fn test_due_reminders_and_marking() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    // Starts in ten minutes with a fifteen minute lead: due now
    let due = CalendarEntry::create(
        &db.pool,
        NewCalendarEntry {
            start_time: Utc::now() + Duration::minutes(10),
            ..new_entry("Standup", 0, Some(15))
        },
    )
    .await?;
    // Reminder a day away
    CalendarEntry::create(&db.pool, new_entry("Retro", 48, Some(15))).await?;
    // No reminder requested
    CalendarEntry::create(&db.pool, new_entry("Focus time", 0, None)).await?;

    let now = Utc::now();
    let pending = CalendarEntry::find_due_reminders(&db.pool, now).await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, due.id);

    assert!(CalendarEntry::mark_reminder_sent(&db.pool, &due.id, now).await?);
    assert!(!CalendarEntry::mark_reminder_sent(&db.pool, &due.id, now).await?);
    assert!(CalendarEntry::find_due_reminders(&db.pool, now).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_failed_reminder_leaves_due_list() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let entry = CalendarEntry::create(
        &db.pool,
        NewCalendarEntry {
            start_time: Utc::now() + Duration::minutes(5),
            ..new_entry("Standup", 0, Some(15))
        },
    )
    .await?;

    let now = Utc::now();
    assert_eq!(CalendarEntry::find_due_reminders(&db.pool, now).await?.len(), 1);
    assert!(CalendarEntry::mark_reminder_failed(&db.pool, &entry.id, now).await?);
    assert!(!CalendarEntry::mark_reminder_failed(&db.pool, &entry.id, now).await?);
    assert!(CalendarEntry::find_due_reminders(&db.pool, now).await?.is_empty());

    let stored = CalendarEntry::find_by_id(&db.pool, &entry.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("entry missing"))?;
    assert_eq!(stored.reminder_failed_at, Some(timestamp(&now)));
    assert!(stored.reminder_sent_at.is_none());
    Ok(())
}

#[tokio::test]
async fn test_calendar_entry_out_of_range_is_an_error() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let at_the_end = NewCalendarEntry {
        start_time: chrono::DateTime::<Utc>::MAX_UTC,
        ..new_entry("End of time", 0, None)
    };
    assert!(CalendarEntry::create(&db.pool, at_the_end).await.is_err());

    let at_the_start = NewCalendarEntry {
        start_time: chrono::DateTime::<Utc>::MIN_UTC,
        ..new_entry("Start of time", 0, Some(15))
    };
    assert!(CalendarEntry::create(&db.pool, at_the_start).await.is_err());
    assert!(CalendarEntry::list_all(&db.pool).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_calendar_entry_delete() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let entry = CalendarEntry::create(&db.pool, new_entry("Sync", 1, None)).await?;
    assert!(CalendarEntry::delete(&db.pool, &entry.id).await?);
    assert!(!CalendarEntry::delete(&db.pool, &entry.id).await?);
    assert!(CalendarEntry::find_by_id(&db.pool, &entry.id).await?.is_none());
    Ok(())
}
