use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::sync::Arc;

use remindme::commands::{CommandContext, CommandHandler, IncomingMessage};
use remindme::core::Config;
use remindme::database::Database;
use remindme::features::reminders::{
    DiscordNotifier, ReminderScheduler, SchedulerContext, SystemClock,
};

struct Handler {
    command_handler: Arc<CommandHandler>,
}

impl Handler {
    fn new(command_handler: CommandHandler) -> Self {
        Handler {
            command_handler: Arc::new(command_handler),
        }
    }

    /// Convert a Serenity message into the platform-neutral command input
    fn to_incoming(msg: &Message) -> IncomingMessage {
        IncomingMessage {
            chat_id: msg.channel_id.0,
            message_id: msg.id.0,
            reply_to: msg
                .message_reference
                .as_ref()
                .and_then(|reference| reference.message_id)
                .map(|id| id.0),
            content: msg.content.clone(),
            from_bot: msg.author.bot,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, _ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        if let Err(e) = self
            .command_handler
            .handle_message(&Self::to_incoming(&msg))
            .await
        {
            error!("Error handling message {}: {e}", msg.id);
        }
    }

    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting reminder bot...");

    let database = Database::new(&config.database_path).await?;

    // Deliveries go through the REST API, so catch-up can run before the gateway connects
    let http = Arc::new(Http::new(&config.discord_token));
    let services = SchedulerContext {
        store: Arc::new(database),
        notifier: Arc::new(DiscordNotifier::new(http)),
        clock: Arc::new(SystemClock),
    };

    let (scheduler, timer_loop) = ReminderScheduler::new(services.clone());
    tokio::spawn(timer_loop.run());

    let report = scheduler.reconcile().await.map_err(|e| {
        error!("Failed to load stored reminders: {e}");
        anyhow::anyhow!("Startup reconciliation failed: {}", e)
    })?;
    if !report.failed.is_empty() {
        error!(
            "{} overdue reminders could not be delivered and stay queued for the next start: {:?}",
            report.failed.len(),
            report.failed
        );
    }

    let command_handler = CommandHandler::new(
        CommandContext::new(&services, scheduler),
        config.command_prefix.clone(),
    );
    let handler = Handler::new(command_handler);

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
