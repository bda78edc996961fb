//! Report generation business logic.
//!
//! This module provides the read side of the inventory: stock listings, inbound and outbound
//! history, dashboard statistics, and lot lookups. All functions are framework-agnostic and
//! return named row types that the bot layer formats.

use super::{catalog::category_type_ids, document::MovementKind};
use crate::{
    entities::{
        Category, InboundRecord, InboundRecordColumn, OutboundRecord, OutboundRecordColumn,
        PcDetail, PcDetailColumn, Product, ProductColumn, ProductStatus, ProductType,
        ProductTypeColumn, Staff, StaffColumn, inbound_record, outbound_record, pc_detail,
        product, product_type,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{
    DatabaseConnection, Iterable, PaginatorTrait, QueryOrder, QuerySelect, QueryTrait,
    prelude::*, sea_query::SelectStatement,
};
use std::collections::{BTreeSet, HashMap};

/// Number of most recent movements of each kind shown on the dashboard
pub const RECENT_ACTIVITY_PER_KIND: u64 = 5;

/// One product in a stock listing
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    /// The product itself
    pub product: product::Model,
    /// Display name of the product's type
    pub type_name: String,
    /// Staff member who checked it in, if still registered
    pub received_by: Option<String>,
    /// Hardware details for PCs
    pub pc_details: Option<pc_detail::Model>,
}

/// One inbound ledger row joined with its product
#[derive(Debug, Clone, PartialEq)]
pub struct InboundHistoryRow {
    /// The ledger row
    pub record: inbound_record::Model,
    /// Display name of the product's type
    pub type_name: String,
    /// Lot number of the product
    pub lot_number: Option<String>,
    /// Staff member who checked it in; `None` once the staff member is deleted
    pub staff_name: Option<String>,
    /// Hardware details for PCs
    pub pc_details: Option<pc_detail::Model>,
}

/// One outbound ledger row joined with its product
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundHistoryRow {
    /// The ledger row
    pub record: outbound_record::Model,
    /// Display name of the product's type
    pub type_name: String,
    /// Staff member who checked it out; `None` once the staff member is deleted
    pub staff_name: Option<String>,
    /// Hardware details for PCs
    pub pc_details: Option<pc_detail::Model>,
}

/// A single recent movement shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// Inbound or outbound
    pub kind: MovementKind,
    /// Document number of the movement
    pub document_number: String,
    /// Product moved
    pub product_id: String,
    /// Movement date
    pub date: NaiveDate,
    /// Staff member, if still registered
    pub staff_name: Option<String>,
    /// When the ledger row was written
    pub recorded_at: DateTimeUtc,
}

/// Stock totals and recent movements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    /// In-stock products across all categories
    pub total_in_stock: u64,
    /// In-stock products per category
    pub in_stock_by_category: Vec<(Category, u64)>,
    /// Latest inbound and outbound movements, newest first
    pub recent_activity: Vec<Activity>,
}

fn products_in_category(category: Category) -> SelectStatement {
    Product::find()
        .select_only()
        .column(ProductColumn::ProductId)
        .filter(ProductColumn::TypeId.in_subquery(category_type_ids(category)))
        .into_query()
}

async fn staff_names(
    db: &DatabaseConnection,
    staff_ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, String>> {
    let ids: BTreeSet<i32> = staff_ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let staff = Staff::find()
        .filter(StaffColumn::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(staff.into_iter().map(|s| (s.id, s.name)).collect())
}

async fn pc_details_for(
    db: &DatabaseConnection,
    product_ids: &[String],
) -> Result<HashMap<String, pc_detail::Model>> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let details = PcDetail::find()
        .filter(PcDetailColumn::ProductId.is_in(product_ids.iter().cloned()))
        .all(db)
        .await?;
    Ok(details
        .into_iter()
        .map(|d| (d.product_id.clone(), d))
        .collect())
}

async fn products_with_types(
    db: &DatabaseConnection,
    product_ids: &[String],
) -> Result<HashMap<String, (product::Model, Option<product_type::Model>)>> {
    if product_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Product::find()
        .filter(ProductColumn::ProductId.is_in(product_ids.iter().cloned()))
        .find_also_related(ProductType)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(product, product_type)| (product.product_id.clone(), (product, product_type)))
        .collect())
}

/// Lists the products of `category`, optionally restricted to one status, ordered by id.
pub async fn list_inventory(
    db: &DatabaseConnection,
    category: Category,
    status: Option<ProductStatus>,
) -> Result<Vec<InventoryRow>> {
    let mut query = Product::find()
        .find_also_related(ProductType)
        .filter(ProductTypeColumn::Category.eq(category));
    if let Some(status) = status {
        query = query.filter(ProductColumn::Status.eq(status));
    }
    let rows = query.order_by_asc(ProductColumn::ProductId).all(db).await?;

    let receipts: HashMap<String, i32> = InboundRecord::find()
        .filter(InboundRecordColumn::ProductId.in_subquery(products_in_category(category)))
        .all(db)
        .await?
        .into_iter()
        .map(|r| (r.product_id, r.staff_id))
        .collect();
    let names = staff_names(db, receipts.values().copied()).await?;
    let mut details: HashMap<String, pc_detail::Model> = PcDetail::find()
        .filter(PcDetailColumn::ProductId.in_subquery(products_in_category(category)))
        .all(db)
        .await?
        .into_iter()
        .map(|d| (d.product_id.clone(), d))
        .collect();

    Ok(rows
        .into_iter()
        .map(|(product, product_type)| {
            let received_by = receipts
                .get(&product.product_id)
                .and_then(|staff_id| names.get(staff_id).cloned());
            let pc_details = details.remove(&product.product_id);
            InventoryRow {
                type_name: product_type.map(|t| t.name).unwrap_or_default(),
                received_by,
                pc_details,
                product,
            }
        })
        .collect())
}

/// Returns up to `limit` inbound ledger rows of `category`, newest movement date first.
pub async fn inbound_history(
    db: &DatabaseConnection,
    category: Category,
    limit: u64,
) -> Result<Vec<InboundHistoryRow>> {
    let records = InboundRecord::find()
        .filter(InboundRecordColumn::ProductId.in_subquery(products_in_category(category)))
        .order_by_desc(InboundRecordColumn::InboundDate)
        .order_by_desc(InboundRecordColumn::Id)
        .limit(limit)
        .all(db)
        .await?;

    let product_ids: Vec<String> = records.iter().map(|r| r.product_id.clone()).collect();
    let mut products = products_with_types(db, &product_ids).await?;
    let mut details = pc_details_for(db, &product_ids).await?;
    let names = staff_names(db, records.iter().map(|r| r.staff_id)).await?;

    Ok(records
        .into_iter()
        .map(|record| {
            let (lot_number, type_name) = match products.remove(&record.product_id) {
                Some((product, product_type)) => (
                    product.lot_number,
                    product_type.map(|t| t.name).unwrap_or_default(),
                ),
                None => (None, String::new()),
            };
            InboundHistoryRow {
                type_name,
                lot_number,
                staff_name: names.get(&record.staff_id).cloned(),
                pc_details: details.remove(&record.product_id),
                record,
            }
        })
        .collect())
}

/// Returns up to `limit` outbound ledger rows of `category`, newest movement date first.
pub async fn outbound_history(
    db: &DatabaseConnection,
    category: Category,
    limit: u64,
) -> Result<Vec<OutboundHistoryRow>> {
    let records = OutboundRecord::find()
        .filter(OutboundRecordColumn::ProductId.in_subquery(products_in_category(category)))
        .order_by_desc(OutboundRecordColumn::OutboundDate)
        .order_by_desc(OutboundRecordColumn::Id)
        .limit(limit)
        .all(db)
        .await?;

    let product_ids: Vec<String> = records.iter().map(|r| r.product_id.clone()).collect();
    let products = products_with_types(db, &product_ids).await?;
    let mut details = pc_details_for(db, &product_ids).await?;
    let names = staff_names(db, records.iter().map(|r| r.staff_id)).await?;

    Ok(records
        .into_iter()
        .map(|record| {
            let type_name = products
                .get(&record.product_id)
                .and_then(|(_, product_type)| product_type.as_ref())
                .map(|t| t.name.clone())
                .unwrap_or_default();
            OutboundHistoryRow {
                type_name,
                staff_name: names.get(&record.staff_id).cloned(),
                pc_details: details.remove(&record.product_id),
                record,
            }
        })
        .collect())
}

/// Counts in-stock products, optionally restricted to one category.
pub async fn count_in_stock(db: &DatabaseConnection, category: Option<Category>) -> Result<u64> {
    let mut query = Product::find().filter(ProductColumn::Status.eq(ProductStatus::InStock));
    if let Some(category) = category {
        query = query.filter(ProductColumn::TypeId.in_subquery(category_type_ids(category)));
    }
    query.count(db).await.map_err(Into::into)
}

/// Gathers stock totals and the most recent movements of both kinds.
pub async fn dashboard_stats(db: &DatabaseConnection) -> Result<DashboardStats> {
    let total_in_stock = count_in_stock(db, None).await?;

    let mut in_stock_by_category = Vec::new();
    for category in Category::iter() {
        in_stock_by_category.push((category, count_in_stock(db, Some(category)).await?));
    }

    let inbound = InboundRecord::find()
        .order_by_desc(InboundRecordColumn::CreatedAt)
        .order_by_desc(InboundRecordColumn::Id)
        .limit(RECENT_ACTIVITY_PER_KIND)
        .all(db)
        .await?;
    let outbound = OutboundRecord::find()
        .order_by_desc(OutboundRecordColumn::CreatedAt)
        .order_by_desc(OutboundRecordColumn::Id)
        .limit(RECENT_ACTIVITY_PER_KIND)
        .all(db)
        .await?;

    let names = staff_names(
        db,
        inbound
            .iter()
            .map(|r| r.staff_id)
            .chain(outbound.iter().map(|r| r.staff_id)),
    )
    .await?;

    let mut recent_activity: Vec<Activity> = inbound
        .into_iter()
        .map(|r| Activity {
            kind: MovementKind::Inbound,
            document_number: r.inbound_number,
            staff_name: names.get(&r.staff_id).cloned(),
            product_id: r.product_id,
            date: r.inbound_date,
            recorded_at: r.created_at,
        })
        .chain(outbound.into_iter().map(|r| Activity {
            kind: MovementKind::Outbound,
            document_number: r.outbound_number,
            staff_name: names.get(&r.staff_id).cloned(),
            product_id: r.product_id,
            date: r.outbound_date,
            recorded_at: r.created_at,
        }))
        .collect();
    recent_activity.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));

    Ok(DashboardStats {
        total_in_stock,
        in_stock_by_category,
        recent_activity,
    })
}

/// Lot number of the most recently created product in `category`, if it has one.
pub async fn latest_lot_number(
    db: &DatabaseConnection,
    category: Category,
) -> Result<Option<String>> {
    let latest = Product::find()
        .filter(ProductColumn::TypeId.in_subquery(category_type_ids(category)))
        .order_by_desc(ProductColumn::CreatedAt)
        .order_by_desc(ProductColumn::ProductId)
        .one(db)
        .await?;
    Ok(latest.and_then(|p| p.lot_number))
}

/// Formats an activity as a single summary line.
#[must_use]
pub fn format_activity(activity: &Activity) -> String {
    let arrow = match activity.kind {
        MovementKind::Inbound => "📥",
        MovementKind::Outbound => "📤",
    };
    let staff = activity.staff_name.as_deref().unwrap_or("unknown staff");
    format!(
        "{arrow} {} | {} | {} | {staff}",
        activity.date, activity.document_number, activity.product_id
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{
            ledger::{InboundItem, OutboundMetadata},
            movement::{InboundRequest, OutboundRequest, dispatch_outbound, receive_inbound},
            staff::delete_staff,
        },
        test_utils::*,
    };
    use sea_orm::Set;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    async fn check_in(
        db: &DatabaseConnection,
        category: Category,
        staff_id: i32,
        type_id: i32,
        ids: &[&str],
        lot: Option<&str>,
        on: NaiveDate,
    ) -> Result<()> {
        let items = ids
            .iter()
            .map(|id| InboundItem {
                product_id: (*id).to_string(),
                type_id,
                lot_number: lot.map(str::to_string),
                details: None,
            })
            .collect();
        let request = InboundRequest {
            category,
            staff_id,
            inbound_date: on,
            items,
        };
        receive_inbound(db, &request, on).await?;
        Ok(())
    }

    async fn check_out(
        db: &DatabaseConnection,
        staff_id: i32,
        start_id: &str,
        end_id: &str,
        on: NaiveDate,
    ) -> Result<()> {
        let request = OutboundRequest {
            category: Category::Pc,
            start_id: start_id.to_string(),
            end_id: end_id.to_string(),
            staff_id,
            outbound_date: on,
            metadata: OutboundMetadata::default(),
        };
        dispatch_outbound(db, &request, on).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_list_inventory_filters_category_and_status() -> Result<()> {
        let db = setup_test_db().await?;
        let staff = create_test_staff(&db, "Sato").await?;
        let pc = create_test_type(&db, Category::Pc, "ThinkPad").await?;
        let vest = create_test_type(&db, Category::Vest, "Mesh vest").await?;
        check_in(&db, Category::Pc, staff.id, pc.id, &["PC-2", "PC-1"], None, day(1)).await?;
        check_in(&db, Category::Vest, staff.id, vest.id, &["V-1"], None, day(1)).await?;
        check_out(&db, staff.id, "PC-2", "PC-2", day(2)).await?;

        let all_pcs = list_inventory(&db, Category::Pc, None).await?;
        let ids: Vec<&str> = all_pcs.iter().map(|r| r.product.product_id.as_str()).collect();
        assert_eq!(ids, vec!["PC-1", "PC-2"]);
        assert_eq!(all_pcs[0].type_name, "ThinkPad");
        assert_eq!(all_pcs[0].received_by.as_deref(), Some("Sato"));

        let in_stock = list_inventory(&db, Category::Pc, Some(ProductStatus::InStock)).await?;
        assert_eq!(in_stock.len(), 1);
        assert_eq!(in_stock[0].product.product_id, "PC-1");
        Ok(())
    }

    #[tokio::test]
    async fn test_history_is_newest_first_and_survives_staff_deletion() -> Result<()> {
        let db = setup_test_db().await?;
        let sato = create_test_staff(&db, "Sato").await?;
        let suzuki = create_test_staff(&db, "Suzuki").await?;
        let pc = create_test_type(&db, Category::Pc, "ThinkPad").await?;
        check_in(&db, Category::Pc, sato.id, pc.id, &["PC-1"], Some("L1"), day(1)).await?;
        check_in(&db, Category::Pc, suzuki.id, pc.id, &["PC-2", "PC-3"], Some("L2"), day(3)).await?;
        check_out(&db, suzuki.id, "PC-1", "PC-2", day(4)).await?;

        delete_staff(&db, sato.id).await?;

        let inbound = inbound_history(&db, Category::Pc, 10).await?;
        let ids: Vec<&str> = inbound.iter().map(|r| r.record.product_id.as_str()).collect();
        assert_eq!(ids, vec!["PC-3", "PC-2", "PC-1"]);
        assert_eq!(inbound[0].staff_name.as_deref(), Some("Suzuki"));
        assert_eq!(inbound[0].lot_number.as_deref(), Some("L2"));
        assert_eq!(inbound[2].staff_name, None);

        let limited = inbound_history(&db, Category::Pc, 1).await?;
        assert_eq!(limited.len(), 1);

        let outbound = outbound_history(&db, Category::Pc, 10).await?;
        assert_eq!(outbound.len(), 2);
        assert!(outbound.iter().all(|r| r.type_name == "ThinkPad"));
        assert!(outbound.iter().all(|r| r.record.outbound_number == "20240104-0001"));

        assert!(inbound_history(&db, Category::Vest, 10).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_stats() -> Result<()> {
        let db = setup_test_db().await?;
        let staff = create_test_staff(&db, "Sato").await?;
        let pc = create_test_type(&db, Category::Pc, "ThinkPad").await?;
        let vest = create_test_type(&db, Category::Vest, "Mesh vest").await?;
        check_in(&db, Category::Pc, staff.id, pc.id, &["PC-1", "PC-2", "PC-3"], None, day(1))
            .await?;
        check_in(&db, Category::Vest, staff.id, vest.id, &["V-1"], None, day(1)).await?;
        check_out(&db, staff.id, "PC-1", "PC-1", day(2)).await?;

        let stats = dashboard_stats(&db).await?;
        assert_eq!(stats.total_in_stock, 3);
        assert_eq!(
            stats.in_stock_by_category,
            vec![(Category::Pc, 2), (Category::Vest, 1)]
        );
        assert_eq!(stats.recent_activity.len(), 5);
        assert!(
            stats
                .recent_activity
                .windows(2)
                .all(|w| w[0].recorded_at >= w[1].recorded_at)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_latest_lot_number() -> Result<()> {
        let db = setup_test_db().await?;
        let staff = create_test_staff(&db, "Sato").await?;
        let pc = create_test_type(&db, Category::Pc, "ThinkPad").await?;
        assert_eq!(latest_lot_number(&db, Category::Pc).await?, None);

        check_in(&db, Category::Pc, staff.id, pc.id, &["PC-1"], Some("LOT-1"), day(1)).await?;
        assert_eq!(
            latest_lot_number(&db, Category::Pc).await?.as_deref(),
            Some("LOT-1")
        );
        assert_eq!(latest_lot_number(&db, Category::Vest).await?, None);
        Ok(())
    }

    #[test]
    fn test_format_activity_marks_missing_staff() {
        let activity = Activity {
            kind: MovementKind::Outbound,
            document_number: "20240102-0001".to_string(),
            product_id: "PC-1".to_string(),
            date: day(2),
            staff_name: None,
            recorded_at: chrono::Utc::now(),
        };
        let line = format_activity(&activity);
        assert!(line.contains("20240102-0001"));
        assert!(line.contains("unknown staff"));
    }

    #[tokio::test]
    async fn test_list_inventory_beyond_bind_variable_limit() -> Result<()> {
        let db = setup_test_db().await?;
        let staff = create_test_staff(&db, "Sato").await?;
        let pc = create_test_type(&db, Category::Pc, "ThinkPad").await?;

        // More products than SQLite accepts bind variables in one statement
        let total = 33_000;
        let now = chrono::Utc::now().naive_utc();
        let ids: Vec<String> = (0..total).map(|n| format!("BULK{n:06}")).collect();
        for chunk in ids.chunks(1_000) {
            Product::insert_many(chunk.iter().map(|id| product::ActiveModel {
                product_id: Set(id.clone()),
                type_id: Set(pc.id),
                lot_number: Set(None),
                inbound_number: Set("20240101-0001".to_string()),
                status: Set(ProductStatus::InStock),
                created_at: Set(now),
                updated_at: Set(now),
            }))
            .exec(&db)
            .await?;
        }
        check_in(&db, Category::Pc, staff.id, pc.id, &["ZZZ-1"], None, day(1)).await?;

        let rows = list_inventory(&db, Category::Pc, Some(ProductStatus::InStock)).await?;
        assert_eq!(rows.len(), total + 1);
        let last = rows.last().unwrap();
        assert_eq!(last.product.product_id, "ZZZ-1");
        assert_eq!(last.received_by.as_deref(), Some("Sato"));
        Ok(())
    }
}
