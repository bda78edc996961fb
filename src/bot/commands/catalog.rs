//! Catalog Discord commands - product types and PC model numbers.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::reply_error, handlers::autocomplete},
        core::catalog,
        entities::Category,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for managing product types.
    #[poise::command(slash_command, subcommands("types_add", "types_list"))]
    pub async fn types(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Product type command. Available subcommands:\n\
            `/types add` - Add a product type to a category\n\
            `/types list` - List the product types of a category";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a product type to a category.
    #[poise::command(slash_command, rename = "add")]
    pub async fn types_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category (pc or vest)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Display name of the type (e.g., 'ThinkPad X1')"] name: String,
    ) -> Result<()> {
        let db = ctx.data().database();
        let result = async {
            let category: Category = category.parse()?;
            catalog::create_product_type(db, category, &name).await
        }
        .await;

        match result {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Added product type **{}** to {}.",
                    created.name, created.category
                ))
                .await?;
            }
            Err(e) => reply_error(ctx, &e).await?,
        }
        Ok(())
    }

    /// Lists the product types of a category.
    #[poise::command(slash_command, rename = "list")]
    pub async fn types_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category (pc or vest)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
    ) -> Result<()> {
        let category: Category = match category.parse() {
            Ok(category) => category,
            Err(e) => return reply_error(ctx, &e).await,
        };

        let types = catalog::get_product_types(ctx.data().database(), category).await?;
        if types.is_empty() {
            ctx.say(format!(
                "No {category} product types yet. Use `/types add` to create some!"
            ))
            .await?;
            return Ok(());
        }

        let names: Vec<String> = types.into_iter().map(|t| format!("• {}", t.name)).collect();
        let list_embed = serenity::CreateEmbed::default()
            .title(format!("**{category} product types**"))
            .color(0x0058_65F2) // Discord blurple
            .description(names.join("\n"));

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }

    /// Parent command for managing PC model numbers.
    #[poise::command(slash_command, subcommands("models_add", "models_list", "models_delete"))]
    pub async fn models(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "PC model number command. Available subcommands:\n\
            `/models add` - Register a model number\n\
            `/models list` - List model numbers\n\
            `/models delete` - Remove an unused model number";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Registers a PC model number.
    #[poise::command(slash_command, rename = "add")]
    pub async fn models_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Model number"] model_number: String,
    ) -> Result<()> {
        match catalog::add_pc_model_number(ctx.data().database(), &model_number).await {
            Ok(created) => {
                ctx.say(format!("✅ Registered model number **{}**.", created.model_number))
                    .await?;
            }
            Err(e) => reply_error(ctx, &e).await?,
        }
        Ok(())
    }

    /// Lists registered PC model numbers.
    #[poise::command(slash_command, rename = "list")]
    pub async fn models_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let models = catalog::get_pc_model_numbers(ctx.data().database()).await?;
        if models.is_empty() {
            ctx.say("No model numbers registered yet. Use `/models add` to register one!")
                .await?;
            return Ok(());
        }

        ctx.say(format!("🖥️ Model numbers: {}", models.join(", ")))
            .await?;
        Ok(())
    }

    /// Removes a PC model number that no checked-in PC uses.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn models_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Model number to remove"]
        #[autocomplete = "autocomplete::autocomplete_model_number"]
        model_number: String,
    ) -> Result<()> {
        let model_number = model_number.trim();
        match catalog::delete_pc_model_number(ctx.data().database(), model_number).await {
            Ok(()) => {
                ctx.say(format!("🗑️ Removed model number **{model_number}**."))
                    .await?;
            }
            Err(e) => reply_error(ctx, &e).await?,
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
