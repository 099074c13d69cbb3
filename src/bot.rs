//! Discord bot core logic and event handling.

use std::error::Error as StdError;

use log::{debug, error, info, warn};
use poise::{
    Framework, FrameworkOptions,
    serenity_prelude::{
        ClientBuilder, Context, FullEvent, GatewayIntents, Message as SerenityMessage,
    },
};
use tokio::sync::RwLock;

use crate::auth::{Access, Authorizer, SEND_COMMAND};
use crate::commands::ListCommand;
use crate::config::Config;
use crate::deliver::DiscordDelivery;
use crate::error::Result;
use crate::expand::{Decorator, expand, render_recipients, scan_mentions};
use crate::persist::PersistBackend;
use crate::store::{ListSnapshot, ListStore};

type EventResult = std::result::Result<(), Box<dyn StdError + Send + Sync>>;

struct Data {
    store: RwLock<ListStore>,
    persist: PersistBackend,
    auth: Authorizer,
    decorator: Decorator,
    prepend_username: bool,
    recurse: bool,
}

/// Run the Discord bot.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing persistence backend");
    let persist = PersistBackend::from_config(&config.storage).await?;
    let store = match persist.load().await? {
        Some(snapshot) => ListStore::from_snapshot(snapshot),
        None => ListStore::new(),
    };

    debug!("Setting up gateway intents");
    let intents = GatewayIntents::non_privileged()
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    let discord_token = config.discord_token.clone();
    let data = Data {
        store: RwLock::new(store),
        persist,
        auth: Authorizer::new(config.admins),
        decorator: config.decorator,
        prepend_username: config.prepend_username,
        recurse: config.recurse,
    };

    debug!("Building framework");
    let framework = Framework::builder()
        .options(FrameworkOptions {
            event_handler: |ctx, event, _framework, data| Box::pin(event_handler(ctx, event, data)),
            ..Default::default()
        })
        .setup(move |_ctx, _ready, _framework| {
            Box::pin(async move {
                info!("Bot is ready and connected to Discord");
                Ok(data)
            })
        })
        .build();

    debug!("Creating Discord client");
    let mut client = ClientBuilder::new(discord_token, intents)
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

async fn event_handler(ctx: &Context, event: &FullEvent, data: &Data) -> EventResult {
    if let FullEvent::Message { new_message } = event
        && !new_message.author.bot
    {
        let result = if let Some(command) = ListCommand::parse(&new_message.content) {
            handle_command(ctx, new_message, data, &command).await
        } else {
            handle_mentions(ctx, new_message, data).await
        };

        if let Err(e) = result {
            error!(
                "Error processing message from {}: {}",
                new_message.author.tag(),
                e
            );
            new_message.reply(&ctx.http, e.user_message()).await?;
        }
    }
    Ok(())
}

/// Execute a list-management command and reply with the result.
async fn handle_command(
    ctx: &Context,
    message: &SerenityMessage,
    data: &Data,
    command: &ListCommand,
) -> Result<()> {
    let user_id = message.author.id.to_string();
    match data.auth.check(&user_id, command.id()) {
        Access::Allow => {}
        Access::DenyNotify => {
            info!(
                "Denied {} to {} ({user_id})",
                command.id(),
                message.author.tag()
            );
            let reply = format!(
                "I'm sorry, @{}, but you don't have access to do that.",
                display_name(message)
            );
            message.reply(&ctx.http, reply).await?;
            return Ok(());
        }
        Access::DenySilent => return Ok(()),
    }

    info!("Running {} for {}", command.id(), message.author.tag());

    let (reply, dirty_snapshot) = {
        let mut store = data.store.write().await;
        let reply = command.execute(&mut store);
        let snapshot = store.take_dirty().then(|| store.snapshot());
        (reply, snapshot)
    };

    if !reply.is_empty() {
        message.reply(&ctx.http, reply).await?;
    }

    if let Some(snapshot) = dirty_snapshot {
        flush(data, &snapshot).await;
    }
    Ok(())
}

/// Scan a plain message for list mentions and fan the text out to every
/// terminal member of the expanded tagged set.
async fn handle_mentions(ctx: &Context, message: &SerenityMessage, data: &Data) -> Result<()> {
    let user_id = message.author.id.to_string();

    let (tagged, recipients) = {
        let store = data.store.read().await;
        let seeds = scan_mentions(&message.content, &store.lists());
        if seeds.is_empty() {
            return Ok(());
        }

        // The send path is admin-gated and fails silently.
        if data.auth.check(&user_id, SEND_COMMAND) != Access::Allow {
            debug!("Silently denied list.send to {}", message.author.tag());
            return Ok(());
        }

        let tagged = expand(&store, seeds, data.recurse);
        let recipients = render_recipients(&store, &tagged, data.decorator);
        (tagged, recipients)
    };

    let text = if data.prepend_username {
        format!("{}: {}", display_name(message), message.content)
    } else {
        message.content.clone()
    };

    let delivery = DiscordDelivery::new(ctx, message.guild_id);
    let mut delivered = 0usize;
    for recipient in &recipients {
        match delivery.send_direct(&recipient.name, &text).await {
            Ok(true) => delivered += 1,
            Ok(false) => {}
            Err(e) => warn!("Failed to deliver to {}: {}", recipient.name, e),
        }
    }

    let tokens: Vec<&str> = recipients.iter().map(|r| r.token.as_str()).collect();
    info!(
        "Expanded {} into {} ({delivered}/{} delivered)",
        tagged.join(", "),
        tokens.join(" "),
        recipients.len()
    );
    Ok(())
}

/// Persistence flush is fire-and-forget: failures are logged, never surfaced
/// into message handling.
async fn flush(data: &Data, snapshot: &ListSnapshot) {
    if let Err(e) = data.persist.save(snapshot).await {
        error!("Failed to save lists: {}", e);
    }
}

fn display_name(message: &SerenityMessage) -> &str {
    message
        .author
        .global_name
        .as_ref()
        .unwrap_or(&message.author.name)
}
