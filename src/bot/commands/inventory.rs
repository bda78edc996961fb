//! Inventory Discord commands - stock, product checks, history, dashboard, and lots.
//!
//! These commands are read-only views over the inventory and ledgers.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{MAX_LISTED_ROWS, reply_error},
            handlers::autocomplete,
        },
        core::{report, stock},
        entities::{Category, ProductStatus},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;

    const DEFAULT_HISTORY_LIMIT: u64 = 10;
    const MAX_HISTORY_LIMIT: u64 = 25;

    fn history_limit(limit: Option<u64>) -> u64 {
        limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, MAX_HISTORY_LIMIT)
    }

    /// Lists the products of a category, in stock only unless asked otherwise.
    #[poise::command(slash_command, prefix_command)]
    pub async fn stock(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category (pc or vest)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Include checked-out products"] include_out_of_stock: Option<bool>,
    ) -> Result<()> {
        let category: Category = match category.parse() {
            Ok(category) => category,
            Err(e) => return reply_error(ctx, &e).await,
        };
        let status = if include_out_of_stock.unwrap_or(false) {
            None
        } else {
            Some(ProductStatus::InStock)
        };

        let rows = report::list_inventory(ctx.data().database(), category, status).await?;
        if rows.is_empty() {
            ctx.say(format!("📦 No {category} products found.")).await?;
            return Ok(());
        }

        let mut body = String::new();
        for row in rows.iter().take(MAX_LISTED_ROWS) {
            let product = &row.product;
            write!(body, "`{}` {}", product.product_id, row.type_name)?;
            if let Some(lot) = &product.lot_number {
                write!(body, " | lot {lot}")?;
            }
            if let Some(pc) = &row.pc_details {
                write!(body, " | {} / {}", pc.model_number, pc.serial_number)?;
            }
            if product.status != ProductStatus::InStock {
                write!(body, " | {}", product.status)?;
            }
            writeln!(body)?;
        }
        if rows.len() > MAX_LISTED_ROWS {
            writeln!(body, "… and {} more", rows.len() - MAX_LISTED_ROWS)?;
        }

        let embed = serenity::CreateEmbed::default()
            .title(format!("📦 {category} stock ({} products)", rows.len()))
            .color(0x0058_65F2) // Discord blurple
            .description(body);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Checks whether a product ID can be checked out.
    #[poise::command(slash_command, prefix_command)]
    pub async fn check_product(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category (pc or vest)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Product ID"] product_id: String,
    ) -> Result<()> {
        let category: Category = match category.parse() {
            Ok(category) => category,
            Err(e) => return reply_error(ctx, &e).await,
        };
        let product_id = product_id.trim();

        let availability =
            stock::check_availability(ctx.data().database(), category, product_id).await?;
        let icon = if availability.is_available() { "✅" } else { "❌" };
        ctx.say(format!("{icon} {}", availability.message(product_id)))
            .await?;
        Ok(())
    }

    /// Parent command for movement history.
    #[poise::command(slash_command, subcommands("history_inbound", "history_outbound"))]
    pub async fn history(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "History command. Available subcommands:\n\
            `/history inbound` - Recent check-ins\n\
            `/history outbound` - Recent check-outs";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows recent check-ins of a category, newest first.
    #[poise::command(slash_command, rename = "inbound")]
    pub async fn history_inbound(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category (pc or vest)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Number of rows (default 10, max 25)"] limit: Option<u64>,
    ) -> Result<()> {
        let category: Category = match category.parse() {
            Ok(category) => category,
            Err(e) => return reply_error(ctx, &e).await,
        };

        let rows =
            report::inbound_history(ctx.data().database(), category, history_limit(limit)).await?;
        if rows.is_empty() {
            ctx.say(format!("📥 No {category} check-ins recorded yet."))
                .await?;
            return Ok(());
        }

        let mut body = String::new();
        for row in &rows {
            let record = &row.record;
            let staff = row.staff_name.as_deref().unwrap_or("unknown staff");
            writeln!(
                body,
                "{} | {} | `{}` {} | {staff}",
                record.inbound_date, record.inbound_number, record.product_id, row.type_name
            )?;
        }

        let embed = serenity::CreateEmbed::default()
            .title(format!("📥 {category} check-ins"))
            .color(0x0057_F287) // Discord green
            .description(body);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows recent check-outs of a category, newest first.
    #[poise::command(slash_command, rename = "outbound")]
    pub async fn history_outbound(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category (pc or vest)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Number of rows (default 10, max 25)"] limit: Option<u64>,
    ) -> Result<()> {
        let category: Category = match category.parse() {
            Ok(category) => category,
            Err(e) => return reply_error(ctx, &e).await,
        };

        let rows =
            report::outbound_history(ctx.data().database(), category, history_limit(limit)).await?;
        if rows.is_empty() {
            ctx.say(format!("📤 No {category} check-outs recorded yet."))
                .await?;
            return Ok(());
        }

        let mut body = String::new();
        for row in &rows {
            let record = &row.record;
            let staff = row.staff_name.as_deref().unwrap_or("unknown staff");
            write!(
                body,
                "{} | {} | `{}` {} | {staff}",
                record.outbound_date, record.outbound_number, record.product_id, row.type_name
            )?;
            if let Some(customer) = &record.customer_name {
                write!(body, " | {customer}")?;
            }
            writeln!(body)?;
        }

        let embed = serenity::CreateEmbed::default()
            .title(format!("📤 {category} check-outs"))
            .color(0x00ED_4245) // Discord red
            .description(body);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows stock totals and the latest movements.
    #[poise::command(slash_command, prefix_command)]
    pub async fn dashboard(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let stats = report::dashboard_stats(ctx.data().database()).await?;

        let mut per_category = String::new();
        for (category, count) in &stats.in_stock_by_category {
            writeln!(per_category, "**{category}**: {count}")?;
        }

        let mut recent = String::new();
        for activity in &stats.recent_activity {
            writeln!(recent, "{}", report::format_activity(activity))?;
        }
        if recent.is_empty() {
            recent.push_str("No movements yet.");
        }

        let embed = serenity::CreateEmbed::default()
            .title("📊 Inventory dashboard")
            .color(0x0058_65F2) // Discord blurple
            .field("In stock", stats.total_in_stock.to_string(), true)
            .field("By category", per_category, true)
            .field("Recent activity", recent, false);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows the lot number of the most recently checked-in product of a category.
    #[poise::command(slash_command, prefix_command)]
    pub async fn latest_lot(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category (pc or vest)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
    ) -> Result<()> {
        let category: Category = match category.parse() {
            Ok(category) => category,
            Err(e) => return reply_error(ctx, &e).await,
        };

        match report::latest_lot_number(ctx.data().database(), category).await? {
            Some(lot) => ctx.say(format!("🏷️ Latest {category} lot: **{lot}**")).await?,
            None => ctx.say(format!("🏷️ No {category} lot recorded yet.")).await?,
        };
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
