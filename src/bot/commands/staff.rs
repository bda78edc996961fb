//! Staff Discord commands - register, list, and remove staff members.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{reply_error, resolve_staff},
            handlers::autocomplete,
        },
        core::staff as roster,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for managing staff members.
    #[poise::command(slash_command, subcommands("staff_add", "staff_list", "staff_delete"))]
    pub async fn staff(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Staff management command. Available subcommands:\n\
            `/staff add` - Register a staff member\n\
            `/staff list` - List staff members\n\
            `/staff delete` - Remove a staff member";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Registers a staff member who can check products in and out.
    #[poise::command(slash_command, rename = "add")]
    pub async fn staff_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Staff member's name"] name: String,
    ) -> Result<()> {
        match roster::create_staff(ctx.data().database(), &name).await {
            Ok(created) => {
                ctx.say(format!("✅ Registered staff member **{}**.", created.name))
                    .await?;
            }
            Err(e) => reply_error(ctx, &e).await?,
        }
        Ok(())
    }

    /// Lists all registered staff members.
    #[poise::command(slash_command, rename = "list")]
    pub async fn staff_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let members = roster::get_all_staff(ctx.data().database()).await?;

        if members.is_empty() {
            ctx.say("No staff registered yet. Use `/staff add` to register someone!")
                .await?;
            return Ok(());
        }

        let names: Vec<String> = members.into_iter().map(|s| format!("• {}", s.name)).collect();
        let list_embed = serenity::CreateEmbed::default()
            .title("**Staff**")
            .color(0x0058_65F2) // Discord blurple
            .description(names.join("\n"));

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }

    /// Removes a staff member. Their past movements stay in the history.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn staff_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Staff member to remove"]
        #[autocomplete = "autocomplete::autocomplete_staff"]
        name: String,
    ) -> Result<()> {
        let db = ctx.data().database();
        let result = async {
            let member = resolve_staff(db, &name).await?;
            roster::delete_staff(db, member.id).await
        }
        .await;

        match result {
            Ok(deleted) => {
                ctx.say(format!("🗑️ Removed staff member **{}**.", deleted.name))
                    .await?;
            }
            Err(e) => reply_error(ctx, &e).await?,
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
