use reqwest::StatusCode;
use thiserror::Error;

use crate::reply::truncate_to_limit;

/// Room left in a 2000-character reply for the embedded error detail.
const MAX_DETAIL_CHARS: usize = 1500;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Serenity error: {0}")]
    Serenity(Box<poise::serenity_prelude::Error>),

    #[error("Missing required environment variable {0}")]
    ConfigMissing(String),

    #[error("Invalid configuration for {name}: {message}")]
    InvalidConfig { name: String, message: String },

    #[error("Inference request failed ({}): {detail}", status_label(.status.as_ref()))]
    RequestFailed {
        status: Option<StatusCode>,
        detail: String,
    },

    #[error("Invalid response from inference API: {0}")]
    InvalidResponse(String),
}

fn status_label(status: Option<&StatusCode>) -> String {
    status.map_or_else(|| "no response".to_string(), ToString::to_string)
}

impl From<poise::serenity_prelude::Error> for BotError {
    fn from(err: poise::serenity_prelude::Error) -> Self {
        BotError::Serenity(Box::new(err))
    }
}

impl BotError {
    /// Returns a user-friendly error message suitable for displaying in Discord
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            BotError::Serenity(_) => {
                "Sorry, I'm having trouble communicating with Discord right now. Please try again later.".to_string()
            }
            BotError::ConfigMissing(_) | BotError::InvalidConfig { .. } => {
                "Sorry, there's a configuration issue on my end. Please contact the bot administrator.".to_string()
            }
            BotError::RequestFailed { .. } => format!(
                "Error: Unable to process request ({}). Please check the bot logs for details.",
                truncate_to_limit(&self.to_string(), MAX_DETAIL_CHARS)
            ),
            BotError::InvalidResponse(detail) => format!(
                "Error: Invalid response from the API ({}). Please check the bot logs for details.",
                truncate_to_limit(detail, MAX_DETAIL_CHARS)
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
