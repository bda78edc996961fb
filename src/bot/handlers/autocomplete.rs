//! Autocomplete handlers for Discord slash command parameters.
//!
//! This module provides autocomplete functionality for command parameters like
//! categories, product type names, and staff names, so staff pick existing values
//! instead of typing them.

use crate::{
    bot::BotData,
    core::{catalog, staff},
    entities::Category,
    errors::Error,
};
use sea_orm::Iterable;

/// Discord shows at most 25 suggestions
const MAX_SUGGESTIONS: usize = 25;

fn matching(candidates: impl IntoIterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matches: Vec<String> = candidates
        .into_iter()
        .filter(|candidate| candidate.to_lowercase().contains(&partial_lower))
        .collect();
    matches.sort();
    matches.dedup();
    matches.truncate(MAX_SUGGESTIONS);
    matches
}

/// Suggests the product categories.
pub async fn autocomplete_category(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    matching(Category::iter().map(|c| c.as_str().to_string()), partial)
}

/// Suggests product type names across all categories.
///
/// The command resolves the chosen name within its own category argument.
pub async fn autocomplete_product_type(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = ctx.data().database();
    let mut names = Vec::new();
    for category in Category::iter() {
        let Ok(types) = catalog::get_product_types(db, category).await else {
            return Vec::new();
        };
        names.extend(types.into_iter().map(|t| t.name));
    }
    matching(names, partial)
}

/// Suggests registered staff names.
pub async fn autocomplete_staff(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(members) = staff::get_all_staff(ctx.data().database()).await else {
        return Vec::new();
    };
    matching(members.into_iter().map(|s| s.name), partial)
}

/// Suggests registered PC model numbers.
pub async fn autocomplete_model_number(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(models) = catalog::get_pc_model_numbers(ctx.data().database()).await else {
        return Vec::new();
    };
    matching(models, partial)
}
