//! Discord bot setup and framework wiring.

use log::{debug, error, info, warn};
use poise::{
    Framework, FrameworkError, FrameworkOptions, PrefixFrameworkOptions, builtins,
    serenity_prelude::{ClientBuilder, GatewayIntents},
};

use crate::command::commands;
use crate::config::Config;
use crate::error::{BotError, Result};
use crate::inference::InferenceClient;

/// Shared, read-only state handed to every command invocation.
pub struct Data {
    inference: InferenceClient,
}

impl Data {
    #[must_use]
    pub fn inference(&self) -> &InferenceClient {
        &self.inference
    }
}

/// Run the Discord bot.
///
/// # Errors
///
/// Returns an error if configuration is missing or the Discord client fails.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing inference client");
    let inference = InferenceClient::new(&config)?;

    debug!("Setting up gateway intents");
    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    debug!("Building framework");
    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: commands(),
            prefix_options: PrefixFrameworkOptions {
                prefix: Some(config.command_prefix.clone()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot is ready. Logged in as {}", ready.user.name);
                debug!("Registering commands globally");
                builtins::register_globally(ctx, &framework.options().commands).await?;
                info!(
                    "Commands registered successfully, answering with model {}",
                    inference.model()
                );
                Ok(Data { inference })
            })
        })
        .build();

    debug!("Creating Discord client");
    let mut client = ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    info!("Starting Discord client");

    tokio::select! {
        result = client.start() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    Ok(())
}

async fn on_error(error: FrameworkError<'_, Data, BotError>) {
    match error {
        FrameworkError::ArgumentParse { ctx, .. } => {
            let usage = format!("Usage: {}ai <your question>", ctx.prefix());
            if let Err(e) = ctx.say(usage).await {
                warn!("Failed to send usage hint: {e}");
            }
        }
        FrameworkError::Command { error, ctx, .. } => {
            error!(
                "Error processing command from {}: {}",
                ctx.author().tag(),
                error
            );
            if let Err(e) = ctx.say(error.user_message()).await {
                warn!("Failed to send error reply: {e}");
            }
        }
        other => {
            if let Err(e) = builtins::on_error(other).await {
                error!("Error while handling framework error: {e}");
            }
        }
    }
}
