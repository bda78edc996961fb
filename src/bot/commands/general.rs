//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't require any database operations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Inventory Tracker Help**\n\
        Here is a summary of all available commands.\n\n\
        **Movements**\n\
        • `/inbound <category> <type> <staff> <ids> [lot] [date] ...` - Checks in new products under one document number.\n\
        • `/outbound <category> <start_id> <end_id> <staff> [date] [customer] ...` - Checks out every in-stock product of one type in a range.\n\
        • `/check_product <category> <id>` - Tells whether a product can be checked out.\n\n\
        **Reports**\n\
        • `/stock <category>` - Lists products in stock.\n\
        • `/history inbound|outbound <category>` - Shows recent movements.\n\
        • `/dashboard` - Shows stock totals and the latest movements.\n\
        • `/latest_lot <category>` - Shows the most recent lot number.\n\n\
        **Management**\n\
        • `/staff add|list|delete` - Manage staff members.\n\
        • `/types add|list` - Manage product types.\n\
        • `/models add|list|delete` - Manage PC model numbers.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
