//! Movement ledger writer.
//!
//! Inbound and outbound ledgers are append-only: one row per product per movement, all rows
//! of a batch sharing the document number, staff member, date, and metadata. Inbound
//! writing is combined with product creation, so a product and its ledger row always
//! appear together.

use super::document::DocumentNumber;
use crate::{
    entities::{
        Category, InboundRecord, OutboundRecord, Product, ProductStatus, inbound_record,
        outbound_record, pc_detail, product, vest_detail,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set, SqlErr};
use tracing::debug;

/// Rows per ledger INSERT, keeping each statement under `SQLite`'s bind variable limit
const LEDGER_CHUNK_ROWS: usize = 500;

/// Hardware details recorded for a PC on check-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcDetails {
    /// Manufacturer model number
    pub model_number: String,
    /// Manufacturer serial number
    pub serial_number: String,
    /// Purchase date, if known
    pub purchase_date: Option<NaiveDate>,
    /// Warranty period in months, if known
    pub warranty_period: Option<i32>,
}

/// Attributes recorded for a safety vest on check-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VestDetails {
    /// Vest style
    pub vest_type: String,
    /// Size label
    pub size: String,
    /// Whether the company logo is printed
    pub has_logo: bool,
}

/// Optional category-specific details attached to an inbound item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductDetails {
    /// Details for a PC
    Pc(PcDetails),
    /// Details for a vest
    Vest(VestDetails),
}

impl ProductDetails {
    /// Category these details apply to
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Pc(_) => Category::Pc,
            Self::Vest(_) => Category::Vest,
        }
    }
}

/// One product to be created by an inbound movement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundItem {
    /// Caller-assigned identifier
    pub product_id: String,
    /// Type of the product
    pub type_id: i32,
    /// Optional lot number
    pub lot_number: Option<String>,
    /// Optional category-specific details
    pub details: Option<ProductDetails>,
}

/// Customer and purchaser information copied onto every outbound ledger row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundMetadata {
    /// Customer number
    pub customer_number: Option<String>,
    /// Customer name
    pub customer_name: Option<String>,
    /// Purchaser number
    pub purchaser_number: Option<String>,
    /// Purchaser name
    pub purchaser_name: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
}

/// Inserts one new in-stock product carrying the batch's inbound document number.
///
/// An identifier that already exists yields [`Error::DuplicateProduct`].
pub async fn create_product<C>(
    db: &C,
    item: &InboundItem,
    document: DocumentNumber,
) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    if Product::find_by_id(item.product_id.clone())
        .one(db)
        .await?
        .is_some()
    {
        return Err(Error::DuplicateProduct {
            product_id: item.product_id.clone(),
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let model = product::ActiveModel {
        product_id: Set(item.product_id.clone()),
        type_id: Set(item.type_id),
        lot_number: Set(item.lot_number.clone()),
        inbound_number: Set(document.to_string()),
        status: Set(ProductStatus::InStock),
        created_at: Set(now),
        updated_at: Set(now),
    };

    model.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::DuplicateProduct {
            product_id: item.product_id.clone(),
        },
        _ => e.into(),
    })
}

/// Stores the category-specific details of a freshly created product.
pub async fn create_details<C>(db: &C, product_id: &str, details: &ProductDetails) -> Result<()>
where
    C: ConnectionTrait,
{
    match details {
        ProductDetails::Pc(pc) => {
            pc_detail::ActiveModel {
                product_id: Set(product_id.to_string()),
                model_number: Set(pc.model_number.clone()),
                serial_number: Set(pc.serial_number.clone()),
                purchase_date: Set(pc.purchase_date),
                warranty_period: Set(pc.warranty_period),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
        ProductDetails::Vest(vest) => {
            vest_detail::ActiveModel {
                product_id: Set(product_id.to_string()),
                vest_type: Set(vest.vest_type.clone()),
                size: Set(vest.size.clone()),
                has_logo: Set(vest.has_logo),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

/// Appends one inbound ledger row per product id.
pub async fn record_inbound<C>(
    db: &C,
    document: DocumentNumber,
    product_ids: &[String],
    staff_id: i32,
    inbound_date: NaiveDate,
) -> Result<()>
where
    C: ConnectionTrait,
{
    if product_ids.is_empty() {
        return Ok(());
    }

    let now = chrono::Utc::now();
    for chunk in product_ids.chunks(LEDGER_CHUNK_ROWS) {
        let rows = chunk.iter().map(|product_id| inbound_record::ActiveModel {
            product_id: Set(product_id.clone()),
            staff_id: Set(staff_id),
            inbound_number: Set(document.to_string()),
            inbound_date: Set(inbound_date),
            created_at: Set(now),
            ..Default::default()
        });
        InboundRecord::insert_many(rows).exec(db).await?;
    }

    debug!(%document, count = product_ids.len(), "Wrote inbound ledger rows");
    Ok(())
}

/// Appends one outbound ledger row per product id.
///
/// Callers pass only identifiers whose status transition has already taken effect.
pub async fn record_outbound<C>(
    db: &C,
    document: DocumentNumber,
    product_ids: &[String],
    staff_id: i32,
    outbound_date: NaiveDate,
    metadata: &OutboundMetadata,
) -> Result<()>
where
    C: ConnectionTrait,
{
    if product_ids.is_empty() {
        return Ok(());
    }

    let now = chrono::Utc::now();
    for chunk in product_ids.chunks(LEDGER_CHUNK_ROWS) {
        let rows = chunk.iter().map(|product_id| outbound_record::ActiveModel {
            product_id: Set(product_id.clone()),
            staff_id: Set(staff_id),
            outbound_number: Set(document.to_string()),
            outbound_date: Set(outbound_date),
            customer_number: Set(metadata.customer_number.clone()),
            customer_name: Set(metadata.customer_name.clone()),
            purchaser_number: Set(metadata.purchaser_number.clone()),
            purchaser_name: Set(metadata.purchaser_name.clone()),
            notes: Set(metadata.notes.clone()),
            created_at: Set(now),
            ..Default::default()
        });
        OutboundRecord::insert_many(rows).exec(db).await?;
    }

    debug!(%document, count = product_ids.len(), "Wrote outbound ledger rows");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        entities::{InboundRecordColumn, OutboundRecordColumn, PcDetail, VestDetail},
        test_utils::*,
    };
    use sea_orm::{ColumnTrait, QueryFilter};

    fn document() -> DocumentNumber {
        DocumentNumber::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 3).unwrap()
    }

    fn item(product_id: &str, type_id: i32) -> InboundItem {
        InboundItem {
            product_id: product_id.to_string(),
            type_id,
            lot_number: Some("LOT-7".to_string()),
            details: None,
        }
    }

    #[tokio::test]
    async fn test_create_product_sets_in_stock_and_document() -> Result<()> {
        let db = setup_test_db().await?;
        let pc = create_test_type(&db, Category::Pc, "ThinkPad").await?;

        let created = create_product(&db, &item("PC-1", pc.id), document()).await?;
        assert_eq!(created.status, ProductStatus::InStock);
        assert_eq!(created.inbound_number, "20240101-0003");
        assert_eq!(created.lot_number.as_deref(), Some("LOT-7"));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_rejects_duplicate() -> Result<()> {
        let db = setup_test_db().await?;
        let pc = create_test_type(&db, Category::Pc, "ThinkPad").await?;
        create_product(&db, &item("PC-1", pc.id), document()).await?;

        let result = create_product(&db, &item("PC-1", pc.id), document()).await;
        assert!(matches!(
            result,
            Err(Error::DuplicateProduct { ref product_id }) if product_id == "PC-1"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_details() -> Result<()> {
        let db = setup_test_db().await?;
        let pc = create_test_type(&db, Category::Pc, "ThinkPad").await?;
        let vest = create_test_type(&db, Category::Vest, "Mesh vest").await?;
        create_product(&db, &item("PC-1", pc.id), document()).await?;
        create_product(&db, &item("V-1", vest.id), document()).await?;

        create_details(
            &db,
            "PC-1",
            &ProductDetails::Pc(PcDetails {
                model_number: "20XW".to_string(),
                serial_number: "SN-001".to_string(),
                purchase_date: NaiveDate::from_ymd_opt(2023, 12, 1),
                warranty_period: Some(36),
            }),
        )
        .await?;
        create_details(
            &db,
            "V-1",
            &ProductDetails::Vest(VestDetails {
                vest_type: "mesh".to_string(),
                size: "L".to_string(),
                has_logo: true,
            }),
        )
        .await?;

        let pc_rows = PcDetail::find().all(&db).await?;
        assert_eq!(pc_rows.len(), 1);
        assert_eq!(pc_rows[0].serial_number, "SN-001");
        assert_eq!(pc_rows[0].warranty_period, Some(36));

        let vest_rows = VestDetail::find().all(&db).await?;
        assert_eq!(vest_rows.len(), 1);
        assert!(vest_rows[0].has_logo);
        Ok(())
    }

    #[tokio::test]
    async fn test_record_outbound_copies_metadata_to_every_row() -> Result<()> {
        let db = setup_test_db().await?;
        let staff = create_test_staff(&db, "Sato").await?;
        let pc = create_test_type(&db, Category::Pc, "ThinkPad").await?;
        for id in ["PC-1", "PC-2"] {
            insert_test_product(&db, id, pc.id, "20240101-0001").await?;
        }

        let metadata = OutboundMetadata {
            customer_number: Some("C-9".to_string()),
            customer_name: Some("Acme".to_string()),
            notes: Some("urgent".to_string()),
            ..Default::default()
        };
        let ids = vec!["PC-1".to_string(), "PC-2".to_string()];
        let outbound_date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        record_outbound(&db, document(), &ids, staff.id, outbound_date, &metadata).await?;

        let rows = OutboundRecord::find()
            .filter(OutboundRecordColumn::OutboundNumber.eq("20240101-0003"))
            .all(&db)
            .await?;
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.staff_id, staff.id);
            assert_eq!(row.outbound_date, outbound_date);
            assert_eq!(row.customer_name.as_deref(), Some("Acme"));
            assert_eq!(row.purchaser_name, None);
            assert_eq!(row.notes.as_deref(), Some("urgent"));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_record_inbound_empty_is_noop() -> Result<()> {
        let db = setup_test_db().await?;
        record_inbound(&db, document(), &[], 1, document().date()).await?;
        let rows = InboundRecord::find()
            .filter(InboundRecordColumn::StaffId.eq(1))
            .all(&db)
            .await?;
        assert!(rows.is_empty());
        Ok(())
    }
}
