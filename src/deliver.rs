//! Platform delivery of expanded mentions.
//!
//! One implementation per chat platform; the expansion core only ever hands
//! over (member name, text) pairs and never branches on the platform.

use log::{debug, warn};
use poise::serenity_prelude::{Context, CreateMessage, GuildId, User};

use crate::error::Result;

const MEMBER_SEARCH_LIMIT: u64 = 10;

/// Sends expanded-mention messages to Discord members by direct message.
pub struct DiscordDelivery<'a> {
    ctx: &'a Context,
    guild_id: Option<GuildId>,
}

impl<'a> DiscordDelivery<'a> {
    #[must_use]
    pub fn new(ctx: &'a Context, guild_id: Option<GuildId>) -> Self {
        Self { ctx, guild_id }
    }

    /// Deliver `text` to the member's DM channel.
    ///
    /// Returns `Ok(false)` when the name cannot be resolved to a guild
    /// member; the dispatch run carries on with the remaining recipients.
    ///
    /// # Errors
    ///
    /// Returns an error if the Discord API rejects the lookup or the send.
    pub async fn send_direct(&self, member: &str, text: &str) -> Result<bool> {
        let Some(user) = self.resolve(member).await? else {
            warn!("Could not resolve {member} to a guild member; skipping");
            return Ok(false);
        };

        user.direct_message(&self.ctx.http, CreateMessage::new().content(text))
            .await?;
        debug!("Delivered expanded mention to {member}");
        Ok(true)
    }

    /// Resolve a member name to a user by exact (case-insensitive) match on
    /// username, global display name, or server nick.
    async fn resolve(&self, member: &str) -> Result<Option<User>> {
        let Some(guild_id) = self.guild_id else {
            debug!("No guild in scope; cannot resolve {member}");
            return Ok(None);
        };

        let matches = guild_id
            .search_members(&self.ctx.http, member, Some(MEMBER_SEARCH_LIMIT))
            .await?;

        let found = matches.into_iter().find(|m| {
            m.user.name.eq_ignore_ascii_case(member)
                || m.user
                    .global_name
                    .as_ref()
                    .is_some_and(|name| name.eq_ignore_ascii_case(member))
                || m.nick
                    .as_ref()
                    .is_some_and(|nick| nick.eq_ignore_ascii_case(member))
        });

        Ok(found.map(|m| m.user))
    }
}
