//! The `ai` command: relay a question to the model and reply with its answer.

use log::{debug, error, info};

use crate::bot::Data;
use crate::error::BotError;
use crate::inference::InferenceClient;
use crate::reply::finalize_answer;

/// Context type for bot commands.
type Context<'a> = poise::Context<'a, Data, BotError>;

const EMPTY_ANSWER: &str = "The model returned an empty answer.";

/// Produce the reply text for `query`. Every failure is rendered as a message.
pub async fn respond(client: &InferenceClient, query: &str) -> String {
    match client.infer(query).await {
        Ok(content) => {
            let answer = finalize_answer(&content);
            if answer.is_empty() {
                debug!("Model answer was empty after post-processing");
                EMPTY_ANSWER.to_string()
            } else {
                answer
            }
        }
        Err(e) => {
            error!("Inference failed: {e}");
            e.user_message()
        }
    }
}

/// Ask the model a question.
#[poise::command(prefix_command, slash_command)]
pub async fn ai(
    ctx: Context<'_>,
    #[description = "Your question"]
    #[rest]
    query: String,
) -> Result<(), BotError> {
    info!(
        "Received ai command from {} in channel {}",
        ctx.author().tag(),
        ctx.channel_id()
    );

    ctx.defer().await?;

    let reply = respond(ctx.data().inference(), &query).await;
    ctx.say(&reply).await?;

    info!(
        "Replied to {} in channel {} with {} characters",
        ctx.author().tag(),
        ctx.channel_id(),
        reply.chars().count()
    );
    Ok(())
}

/// Get available bot commands.
#[must_use]
pub fn commands() -> Vec<poise::Command<Data, BotError>> {
    vec![ai()]
}
