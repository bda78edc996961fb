//! Movement Discord commands - inbound (check-in) and outbound (check-out).
//!
//! These commands translate slash command arguments into engine requests and report the
//! issued document number back to staff.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{reply_error, resolve_product_type, resolve_staff, summarize_ids},
            handlers::autocomplete,
            input,
        },
        core::{
            ledger::{InboundItem, OutboundMetadata},
            movement::{InboundReceipt, InboundRequest, OutboundReceipt, OutboundRequest},
        },
        entities::Category,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Arguments of `/inbound` after Discord has filled them in
    struct InboundArgs {
        category: String,
        product_type: String,
        staff: String,
        product_ids: String,
        lot_number: Option<String>,
        inbound_date: Option<String>,
        model_number: Option<String>,
        serial_numbers: Option<String>,
        purchase_date: Option<String>,
        warranty_months: Option<i32>,
        vest_type: Option<String>,
        vest_size: Option<String>,
        has_logo: Option<bool>,
    }

    async fn build_inbound(data: &BotData, args: InboundArgs) -> Result<InboundRequest> {
        let category: Category = args.category.parse()?;
        let today = chrono::Local::now().date_naive();
        let inbound_date = input::parse_date(args.inbound_date.as_deref(), today)?;
        let product_ids = input::parse_product_ids(&args.product_ids)?;

        let details = match category {
            Category::Pc => input::pc_details(
                args.model_number.as_deref(),
                args.serial_numbers.as_deref(),
                input::parse_optional_date(args.purchase_date.as_deref())?,
                input::parse_warranty_months(args.warranty_months)?,
                product_ids.len(),
            )?,
            Category::Vest => input::vest_details(
                args.vest_type.as_deref(),
                args.vest_size.as_deref(),
                args.has_logo.unwrap_or(false),
                product_ids.len(),
            ),
        };

        let db = data.database();
        let staff = resolve_staff(db, &args.staff).await?;
        let product_type = resolve_product_type(db, category, &args.product_type).await?;
        let lot_number = args
            .lot_number
            .map(|lot| lot.trim().to_string())
            .filter(|lot| !lot.is_empty());

        let items = product_ids
            .into_iter()
            .zip(details)
            .map(|(product_id, details)| InboundItem {
                product_id,
                type_id: product_type.id,
                lot_number: lot_number.clone(),
                details,
            })
            .collect();

        Ok(InboundRequest {
            category,
            staff_id: staff.id,
            inbound_date,
            items,
        })
    }

    fn inbound_embed(request: &InboundRequest, receipt: &InboundReceipt) -> serenity::CreateEmbed {
        serenity::CreateEmbed::default()
            .title(format!("📥 Checked in {} product(s)", receipt.product_ids.len()))
            .color(0x0057_F287) // Discord green
            .field("Document", receipt.document_number.to_string(), true)
            .field("Category", request.category.to_string(), true)
            .field("Date", request.inbound_date.to_string(), true)
            .field("Products", summarize_ids(&receipt.product_ids), false)
    }

    fn outbound_embed(request: &OutboundRequest, receipt: &OutboundReceipt) -> serenity::CreateEmbed {
        let mut embed = serenity::CreateEmbed::default()
            .title(format!(
                "📤 Checked out {} × {}",
                receipt.count(),
                receipt.type_name
            ))
            .color(0x00ED_4245) // Discord red
            .field("Document", receipt.document_number.to_string(), true)
            .field("Category", request.category.to_string(), true)
            .field("Date", request.outbound_date.to_string(), true)
            .field("Products", summarize_ids(&receipt.product_ids), false);
        if let Some(customer) = &request.metadata.customer_name {
            embed = embed.field("Customer", customer, true);
        }
        if let Some(notes) = &request.metadata.notes {
            embed = embed.field("Notes", notes, false);
        }
        embed
    }

    /// Checks in a batch of new products under one inbound document number.
    ///
    /// Product IDs are separated by commas or spaces. For PCs, a model number, one serial
    /// number per product, and the purchase date and warranty can be recorded; for vests, a
    /// style, size, and logo flag.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command)]
    pub async fn inbound(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category (pc or vest)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Product type"]
        #[autocomplete = "autocomplete::autocomplete_product_type"]
        product_type: String,
        #[description = "Staff member receiving the goods"]
        #[autocomplete = "autocomplete::autocomplete_staff"]
        staff: String,
        #[description = "Product IDs, separated by commas or spaces"] product_ids: String,
        #[description = "Lot number shared by the batch"] lot_number: Option<String>,
        #[description = "Arrival date (YYYY-MM-DD), defaults to today"] inbound_date: Option<
            String,
        >,
        #[description = "PC model number"]
        #[autocomplete = "autocomplete::autocomplete_model_number"]
        model_number: Option<String>,
        #[description = "PC serial numbers, one per product ID"] serial_numbers: Option<String>,
        #[description = "PC purchase date (YYYY-MM-DD)"] purchase_date: Option<String>,
        #[description = "PC warranty period in months"]
        #[min = 0]
        warranty_months: Option<i32>,
        #[description = "Vest style"] vest_type: Option<String>,
        #[description = "Vest size"] vest_size: Option<String>,
        #[description = "Vest carries the company logo"] has_logo: Option<bool>,
    ) -> Result<()> {
        let args = InboundArgs {
            category,
            product_type,
            staff,
            product_ids,
            lot_number,
            inbound_date,
            model_number,
            serial_numbers,
            purchase_date,
            warranty_months,
            vest_type,
            vest_size,
            has_logo,
        };

        let data = ctx.data();
        let request = match build_inbound(data, args).await {
            Ok(request) => request,
            Err(e) => return reply_error(ctx, &e).await,
        };

        match data.engine.inbound(&request).await {
            Ok(receipt) => {
                ctx.send(poise::CreateReply::default().embed(inbound_embed(&request, &receipt)))
                    .await?;
            }
            Err(e) => reply_error(ctx, &e).await?,
        }
        Ok(())
    }

    /// Checks out every in-stock product of one type between two product IDs (inclusive).
    ///
    /// Both boundary products must be in stock and of the same type. Products of other
    /// types inside the range are left alone.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command)]
    pub async fn outbound(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category (pc or vest)"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "First product ID of the range"] start_id: String,
        #[description = "Last product ID of the range"] end_id: String,
        #[description = "Staff member dispatching the goods"]
        #[autocomplete = "autocomplete::autocomplete_staff"]
        staff: String,
        #[description = "Dispatch date (YYYY-MM-DD), defaults to today"] outbound_date: Option<
            String,
        >,
        #[description = "Customer number"] customer_number: Option<String>,
        #[description = "Customer name"] customer_name: Option<String>,
        #[description = "Purchaser number"] purchaser_number: Option<String>,
        #[description = "Purchaser name"] purchaser_name: Option<String>,
        #[description = "Notes"] notes: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let build = async {
            let category: Category = category.parse()?;
            let today = chrono::Local::now().date_naive();
            let outbound_date = input::parse_date(outbound_date.as_deref(), today)?;
            let staff = resolve_staff(data.database(), &staff).await?;
            Ok::<_, Error>(OutboundRequest {
                category,
                start_id: start_id.trim().to_string(),
                end_id: end_id.trim().to_string(),
                staff_id: staff.id,
                outbound_date,
                metadata: OutboundMetadata {
                    customer_number,
                    customer_name,
                    purchaser_number,
                    purchaser_name,
                    notes,
                },
            })
        };

        let request = match build.await {
            Ok(request) => request,
            Err(e) => return reply_error(ctx, &e).await,
        };

        match data.engine.outbound(&request).await {
            Ok(receipt) => {
                ctx.send(poise::CreateReply::default().embed(outbound_embed(&request, &receipt)))
                    .await?;
            }
            Err(e) => reply_error(ctx, &e).await?,
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
