//! Movement coordination - the atomic unit of work around inbound and outbound requests.
//!
//! Every movement runs inside one repeatable-read transaction:
//!
//! * inbound: allocate a document number, create each product (and its details), then write
//!   one ledger row per product
//! * outbound: resolve the range type, allocate a document number, retire the in-stock items,
//!   then write one ledger row per retired item
//!
//! Nothing is committed unless every step succeeds. A failed movement is rolled back
//! explicitly; if the rollback itself fails it is logged and the original error is returned.
//! [`MovementEngine`] adds a deadline on top, dropping the in-flight transaction (which rolls
//! it back) when the deadline passes.

use super::{
    catalog::require_product_type,
    document::{DocumentNumber, MovementKind, allocate},
    ledger::{
        InboundItem, OutboundMetadata, create_details, create_product, record_inbound,
        record_outbound,
    },
    range::resolve_range,
    staff::require_staff,
    stock::transition,
};
use crate::{
    entities::Category,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, IsolationLevel,
    TransactionTrait,
};
use std::{collections::HashSet, fmt, future::Future, time::Duration};
use tracing::{debug, error, info, instrument, warn};

/// A batch of new products received into stock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    /// Category every item belongs to
    pub category: Category,
    /// Staff member receiving the goods
    pub staff_id: i32,
    /// Date the goods arrived
    pub inbound_date: NaiveDate,
    /// Products to create
    pub items: Vec<InboundItem>,
}

impl InboundRequest {
    /// Checks the request shape without touching the store.
    ///
    /// # Errors
    /// * [`Error::Validation`] for an empty batch, a blank identifier, or details of another
    ///   category
    /// * [`Error::DuplicateProduct`] when an identifier appears twice in the batch
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(Error::validation("Inbound batch must contain at least one item"));
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if item.product_id.trim().is_empty() {
                return Err(Error::validation("Product ID cannot be empty"));
            }
            if !seen.insert(item.product_id.as_str()) {
                return Err(Error::DuplicateProduct {
                    product_id: item.product_id.clone(),
                });
            }
            if let Some(details) = &item.details {
                if details.category() != self.category {
                    return Err(Error::validation(format!(
                        "Product '{}' carries {} details in a {} batch",
                        item.product_id,
                        details.category(),
                        self.category
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A contiguous range of in-stock products to check out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// Category of the range
    pub category: Category,
    /// First identifier of the range (inclusive)
    pub start_id: String,
    /// Last identifier of the range (inclusive)
    pub end_id: String,
    /// Staff member dispatching the goods
    pub staff_id: i32,
    /// Date the goods left
    pub outbound_date: NaiveDate,
    /// Customer and purchaser information
    pub metadata: OutboundMetadata,
}

impl OutboundRequest {
    /// Rejects blank range boundaries.
    pub fn validate(&self) -> Result<()> {
        if self.start_id.trim().is_empty() || self.end_id.trim().is_empty() {
            return Err(Error::validation("Start and end product IDs are required"));
        }
        Ok(())
    }
}

/// Result of a committed inbound movement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundReceipt {
    /// Document number shared by every created product
    pub document_number: DocumentNumber,
    /// Identifiers of the created products, in request order
    pub product_ids: Vec<String>,
}

/// Result of a committed outbound movement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReceipt {
    /// Document number shared by every ledger row
    pub document_number: DocumentNumber,
    /// Display name of the retired products' type
    pub type_name: String,
    /// Identifiers actually retired, ascending
    pub product_ids: Vec<String>,
}

impl OutboundReceipt {
    /// Number of products retired
    #[must_use]
    pub const fn count(&self) -> usize {
        self.product_ids.len()
    }
}

/// Progress of an outbound movement, logged when it aborts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundStage {
    /// Transaction open, nothing resolved yet
    Open,
    /// Both boundaries share a type
    RangeResolved,
    /// Status transition issued
    Transitioning,
    /// Ledger rows written
    LedgerWritten,
    /// Transaction committed
    Committed,
    /// Transaction rolled back
    Aborted,
}

impl fmt::Display for OutboundStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::RangeResolved => "range_resolved",
            Self::Transitioning => "transitioning",
            Self::LedgerWritten => "ledger_written",
            Self::Committed => "committed",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// `SQLite` transactions are already serializable and reject an explicit level.
const fn isolation_level(backend: DbBackend) -> Option<IsolationLevel> {
    match backend {
        DbBackend::Sqlite => None,
        DbBackend::MySql | DbBackend::Postgres => Some(IsolationLevel::RepeatableRead),
    }
}

async fn begin(db: &DatabaseConnection) -> Result<DatabaseTransaction> {
    db.begin_with_config(isolation_level(db.get_database_backend()), None)
        .await
        .map_err(Into::into)
}

/// Rolls back `txn` and returns `err`. A rollback failure is logged, never returned.
async fn abort<T>(txn: DatabaseTransaction, err: Error) -> Result<T> {
    if let Err(rollback_err) = txn.rollback().await {
        error!(error = %rollback_err, original = %err, "Rollback failed");
    }
    Err(err)
}

/// Creates every product of `request` under one inbound document number.
///
/// `issued_on` stamps the document number; `request.inbound_date` is stored on the ledger.
/// The batch is all-or-nothing.
#[instrument(skip(db, request), fields(category = %request.category, items = request.items.len()))]
pub async fn receive_inbound(
    db: &DatabaseConnection,
    request: &InboundRequest,
    issued_on: NaiveDate,
) -> Result<InboundReceipt> {
    request.validate()?;

    let txn = begin(db).await?;
    match run_inbound(&txn, request, issued_on).await {
        Ok(receipt) => {
            txn.commit().await.inspect_err(|err| {
                warn!(error = %err, "Inbound commit failed");
            })?;
            info!(
                document = %receipt.document_number,
                count = receipt.product_ids.len(),
                "Inbound committed"
            );
            Ok(receipt)
        }
        Err(err) => {
            warn!(error = %err, "Inbound aborted");
            abort(txn, err).await
        }
    }
}

async fn run_inbound(
    txn: &DatabaseTransaction,
    request: &InboundRequest,
    issued_on: NaiveDate,
) -> Result<InboundReceipt> {
    require_staff(txn, request.staff_id).await?;

    let mut checked = HashSet::new();
    for item in &request.items {
        if checked.insert(item.type_id) {
            require_product_type(txn, request.category, item.type_id).await?;
        }
    }

    let document = allocate(txn, MovementKind::Inbound, issued_on).await?;
    debug!(%document, "Allocated inbound document number");

    let mut product_ids = Vec::with_capacity(request.items.len());
    for item in &request.items {
        create_product(txn, item, document).await?;
        if let Some(details) = &item.details {
            create_details(txn, &item.product_id, details).await?;
        }
        product_ids.push(item.product_id.clone());
    }

    record_inbound(
        txn,
        document,
        &product_ids,
        request.staff_id,
        request.inbound_date,
    )
    .await?;

    Ok(InboundReceipt {
        document_number: document,
        product_ids,
    })
}

/// Retires the in-stock products of one type within `[start_id, end_id]` under one outbound
/// document number.
///
/// # Errors
/// * [`Error::RangeBoundaryNotFound`] when a boundary is not in stock in the category
/// * [`Error::TypeMismatch`] when the boundaries have different types
/// * [`Error::EmptyRange`] when nothing in the range was still in stock
#[instrument(skip(db, request), fields(category = %request.category, start = %request.start_id, end = %request.end_id))]
pub async fn dispatch_outbound(
    db: &DatabaseConnection,
    request: &OutboundRequest,
    issued_on: NaiveDate,
) -> Result<OutboundReceipt> {
    request.validate()?;

    let txn = begin(db).await?;
    let mut stage = OutboundStage::Open;
    let receipt = match run_outbound(&txn, request, issued_on, &mut stage).await {
        Ok(receipt) => receipt,
        Err(err) => {
            warn!(%stage, error = %err, "Outbound aborted");
            let result = abort(txn, err).await;
            debug!(stage = %OutboundStage::Aborted, "Outbound rolled back");
            return result;
        }
    };

    if let Err(err) = txn.commit().await {
        warn!(%stage, error = %err, "Outbound commit failed");
        debug!(stage = %OutboundStage::Aborted, "Outbound rolled back");
        return Err(err.into());
    }
    stage = OutboundStage::Committed;
    info!(
        %stage,
        document = %receipt.document_number,
        type_name = %receipt.type_name,
        count = receipt.count(),
        "Outbound committed"
    );
    Ok(receipt)
}

async fn run_outbound(
    txn: &DatabaseTransaction,
    request: &OutboundRequest,
    issued_on: NaiveDate,
    stage: &mut OutboundStage,
) -> Result<OutboundReceipt> {
    require_staff(txn, request.staff_id).await?;

    let range = resolve_range(txn, request.category, &request.start_id, &request.end_id).await?;
    *stage = OutboundStage::RangeResolved;

    let document = allocate(txn, MovementKind::Outbound, issued_on).await?;
    debug!(%document, "Allocated outbound document number");

    *stage = OutboundStage::Transitioning;
    let product_ids = transition(
        txn,
        request.category,
        range.type_id,
        &request.start_id,
        &request.end_id,
    )
    .await?;

    record_outbound(
        txn,
        document,
        &product_ids,
        request.staff_id,
        request.outbound_date,
        &request.metadata,
    )
    .await?;
    *stage = OutboundStage::LedgerWritten;

    Ok(OutboundReceipt {
        document_number: document,
        type_name: range.type_name,
        product_ids,
    })
}

/// Runs `fut`, failing with [`Error::Timeout`] if it does not finish within `limit`.
///
/// On timeout the future is dropped, which rolls back any transaction it still holds.
pub async fn with_deadline<T, F>(limit: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(seconds = limit.as_secs(), "Movement deadline elapsed");
            Err(Error::Timeout {
                seconds: limit.as_secs(),
            })
        }
    }
}

/// Entry point used by the bot: movements stamped with today's date, under a deadline.
#[derive(Debug)]
pub struct MovementEngine {
    db: DatabaseConnection,
    timeout: Duration,
}

impl MovementEngine {
    /// Creates an engine over `db` whose movements are abandoned after `timeout`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// The underlying connection
    #[must_use]
    pub const fn database(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Processes an inbound request with today's local date on the document number.
    pub async fn inbound(&self, request: &InboundRequest) -> Result<InboundReceipt> {
        let issued_on = chrono::Local::now().date_naive();
        with_deadline(self.timeout, receive_inbound(&self.db, request, issued_on)).await
    }

    /// Processes an outbound request with today's local date on the document number.
    pub async fn outbound(&self, request: &OutboundRequest) -> Result<OutboundReceipt> {
        let issued_on = chrono::Local::now().date_naive();
        with_deadline(self.timeout, dispatch_outbound(&self.db, request, issued_on)).await
    }
}
