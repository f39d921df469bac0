use anyhow::{anyhow, Result};
use std::env;
use url::Url;

use crate::scheduling::{TimeFormat, WorkingHoursWindow};

const DEFAULT_DATABASE_URL: &str = "sqlite:./data/timesync.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_port: u16,
    pub working_hours: WorkingHoursWindow,
    pub time_format: TimeFormat,
    pub reminder_lead_minutes: i64,
    pub telegram: Option<TelegramConfig>,
}

/// Delivery target for shared messages and reminders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: i64,
    /// Self-hosted Bot API server; the public one when unset
    pub api_url: Option<Url>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let database_url = if database_url.trim().is_empty() {
            DEFAULT_DATABASE_URL.to_string()
        } else {
            database_url
        };

        let http_port = read_number("HTTP_PORT", 3000u16)
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let start_hour = read_number("WORKING_HOURS_START", WorkingHoursWindow::DEFAULT_START_HOUR)
            .map_err(|_| anyhow!("Invalid WORKING_HOURS_START"))?;
        let end_hour = read_number("WORKING_HOURS_END", WorkingHoursWindow::DEFAULT_END_HOUR)
            .map_err(|_| anyhow!("Invalid WORKING_HOURS_END"))?;
        let working_hours = WorkingHoursWindow::new(start_hour, end_hour)?;

        let time_format = match env::var("TIME_FORMAT") {
            Ok(value) if !value.trim().is_empty() => TimeFormat::parse(&value)
                .ok_or_else(|| anyhow!("Invalid TIME_FORMAT: expected 12h or 24h"))?,
            _ => TimeFormat::default(),
        };

        let reminder_lead_minutes = read_number("REMINDER_LEAD_MINUTES", 15i64)
            .map_err(|_| anyhow!("Invalid REMINDER_LEAD_MINUTES"))?;
        if reminder_lead_minutes < 0 {
            return Err(anyhow!("REMINDER_LEAD_MINUTES cannot be negative"));
        }

        let telegram = match env::var("TELEGRAM_BOT_TOKEN") {
            Ok(token) if !token.trim().is_empty() => {
                let chat_id: i64 = env::var("TELEGRAM_CHAT_ID")
                    .map_err(|_| anyhow!("TELEGRAM_CHAT_ID must be set when TELEGRAM_BOT_TOKEN is set"))?
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("Invalid TELEGRAM_CHAT_ID"))?;
                if chat_id == 0 {
                    return Err(anyhow!("Invalid TELEGRAM_CHAT_ID"));
                }
                let api_url = match env::var("TELEGRAM_API_URL") {
                    Ok(value) if !value.trim().is_empty() => Some(
                        Url::parse(value.trim()).map_err(|_| anyhow!("Invalid TELEGRAM_API_URL"))?,
                    ),
                    _ => None,
                };
                Some(TelegramConfig {
                    bot_token: token.trim().to_string(),
                    chat_id,
                    api_url,
                })
            }
            _ => None,
        };

        Ok(Config {
            database_url,
            http_port,
            working_hours,
            time_format,
            reminder_lead_minutes,
            telegram,
        })
    }
}

/// Reads a numeric variable, falling back to `default` when unset or blank.
fn read_number<T: std::str::FromStr>(key: &str, default: T) -> Result<T, T::Err> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().parse(),
        _ => Ok(default),
    }
}
