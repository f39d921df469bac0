use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use teloxide::prelude::*;
use thiserror::Error;

use crate::config::{Config, TelegramConfig};

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("Telegram delivery failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
    #[error("Outbox is unavailable")]
    OutboxUnavailable,
}

/// A message held by the in-memory outbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    pub text: String,
    pub queued_at: DateTime<Utc>,
}

#[derive(Clone)]
enum Channel {
    Telegram { bot: Bot, chat_id: ChatId },
    Outbox(Arc<Mutex<Vec<OutgoingMessage>>>),
}

/// Dispatches plain-text meeting messages.
///
/// Delivers to a Telegram chat when a bot token is configured; otherwise
/// messages are logged and kept in an in-memory outbox.
#[derive(Clone)]
pub struct MessagingService {
    channel: Channel,
}

impl MessagingService {
    pub fn from_config(config: &Config) -> Self {
        match &config.telegram {
            Some(telegram) => Self::telegram(telegram),
            None => Self::outbox(),
        }
    }

    pub fn telegram(config: &TelegramConfig) -> Self {
        let bot = match &config.api_url {
            Some(url) => Bot::new(&config.bot_token).set_api_url(url.clone()),
            None => Bot::new(&config.bot_token),
        };
        Self {
            channel: Channel::Telegram {
                bot,
                chat_id: ChatId(config.chat_id),
            },
        }
    }

    pub fn outbox() -> Self {
        Self {
            channel: Channel::Outbox(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    pub fn channel_name(&self) -> &'static str {
        match self.channel {
            Channel::Telegram { .. } => "telegram",
            Channel::Outbox(_) => "outbox",
        }
    }

    pub async fn send(&self, text: &str) -> Result<(), MessagingError> {
        match &self.channel {
            Channel::Telegram { bot, chat_id } => {
                bot.send_message(*chat_id, text.to_string()).await?;
                tracing::info!("Delivered message to Telegram chat {}", chat_id.0);
            }
            Channel::Outbox(outbox) => {
                let mut queue = outbox.lock().map_err(|_| MessagingError::OutboxUnavailable)?;
                queue.push(OutgoingMessage {
                    text: text.to_string(),
                    queued_at: Utc::now(),
                });
                tracing::info!("Queued message in outbox ({} pending):\n{}", queue.len(), text);
            }
        }
        Ok(())
    }

    /// Messages queued so far. Always empty for Telegram delivery.
    pub fn outbox_messages(&self) -> Vec<OutgoingMessage> {
        match &self.channel {
            Channel::Outbox(outbox) => outbox.lock().map(|queue| queue.clone()).unwrap_or_default(),
            Channel::Telegram { .. } => Vec::new(),
        }
    }
}
