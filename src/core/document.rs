//! Document numbers for movement batches.
//!
//! Every inbound or outbound batch gets one human-readable document number of the form
//! `YYYYMMDD-NNNN`. Inbound and outbound have separate namespaces (each is scanned from its
//! own ledger table), and within a day the sequence strictly increases. Allocation reads the
//! highest number already committed for the date, so it must run inside the same
//! transaction that writes the new ledger rows.

use crate::{
    entities::{InboundRecord, InboundRecordColumn, OutboundRecord, OutboundRecordColumn},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};
use std::fmt;
use tracing::debug;

const DATE_FORMAT: &str = "%Y%m%d";

/// Direction of a movement batch. Each direction owns its own sequence namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKind {
    /// Check-in of new products
    Inbound,
    /// Check-out of in-stock products
    Outbound,
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        })
    }
}

/// A validated `YYYYMMDD-NNNN` document number.
///
/// Ordering follows date first, then sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentNumber {
    date: NaiveDate,
    sequence: u32,
}

impl DocumentNumber {
    /// Highest sequence representable in four digits
    pub const MAX_SEQUENCE: u32 = 9999;

    /// Builds a document number, rejecting sequences outside `1..=9999`.
    pub fn new(date: NaiveDate, sequence: u32) -> Result<Self> {
        if sequence == 0 || sequence > Self::MAX_SEQUENCE {
            return Err(Error::SequenceExhausted {
                date: date.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(Self { date, sequence })
    }

    /// Date stamp of the batch
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Sequence within the day
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The `YYYYMMDD-` prefix shared by every document number of `date`.
    #[must_use]
    pub fn prefix(date: NaiveDate) -> String {
        format!("{}-", date.format(DATE_FORMAT))
    }

    /// Parses a stored document number. Returns `None` for anything that is not exactly
    /// eight date digits, a dash, and four sequence digits.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (date_part, sequence_part) = value.split_once('-')?;
        if date_part.len() != 8 || sequence_part.len() != 4 {
            return None;
        }
        if !sequence_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let date = NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()?;
        let sequence = sequence_part.parse().ok()?;
        Self::new(date, sequence).ok()
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04}", self.date.format(DATE_FORMAT), self.sequence)
    }
}

/// Returns the next sequence for `kind` on `date`: one more than the highest committed
/// sequence with that date prefix, or 1 when there is none.
///
/// Relies on the caller's transaction isolation to keep concurrent allocators apart.
pub async fn next_sequence<C>(db: &C, kind: MovementKind, date: NaiveDate) -> Result<u32>
where
    C: ConnectionTrait,
{
    let prefix = DocumentNumber::prefix(date);

    let numbers: Vec<String> = match kind {
        MovementKind::Inbound => {
            InboundRecord::find()
                .select_only()
                .column(InboundRecordColumn::InboundNumber)
                .filter(InboundRecordColumn::InboundNumber.starts_with(&prefix))
                .distinct()
                .into_tuple()
                .all(db)
                .await?
        }
        MovementKind::Outbound => {
            OutboundRecord::find()
                .select_only()
                .column(OutboundRecordColumn::OutboundNumber)
                .filter(OutboundRecordColumn::OutboundNumber.starts_with(&prefix))
                .distinct()
                .into_tuple()
                .all(db)
                .await?
        }
    };

    let last = numbers
        .iter()
        .filter_map(|number| DocumentNumber::parse(number))
        .filter(|number| number.date() == date)
        .map(|number| number.sequence())
        .max()
        .unwrap_or(0);

    debug!(%kind, %date, last, "Scanned document sequence");
    Ok(last + 1)
}

/// Allocates the next document number for `kind` on `date`.
pub async fn allocate<C>(db: &C, kind: MovementKind, date: NaiveDate) -> Result<DocumentNumber>
where
    C: ConnectionTrait,
{
    let sequence = next_sequence(db, kind, date).await?;
    DocumentNumber::new(date, sequence)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{entities::inbound_record, test_utils::*};
    use sea_orm::{ActiveModelTrait, Set};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_zero_pads_sequence() {
        let number = DocumentNumber::new(date(2024, 1, 1), 1).unwrap();
        assert_eq!(number.to_string(), "20240101-0001");

        let number = DocumentNumber::new(date(2024, 12, 31), 9999).unwrap();
        assert_eq!(number.to_string(), "20241231-9999");
    }

    #[test]
    fn test_sequence_out_of_range_is_rejected() {
        assert!(matches!(
            DocumentNumber::new(date(2024, 1, 1), 10_000),
            Err(Error::SequenceExhausted { ref date }) if date == "20240101"
        ));
        assert!(DocumentNumber::new(date(2024, 1, 1), 0).is_err());
    }

    #[test]
    fn test_parse() {
        let parsed = DocumentNumber::parse("20240315-0042").unwrap();
        assert_eq!(parsed.date(), date(2024, 3, 15));
        assert_eq!(parsed.sequence(), 42);

        assert!(DocumentNumber::parse("20240315-42").is_none());
        assert!(DocumentNumber::parse("2024031-0042").is_none());
        assert!(DocumentNumber::parse("20241315-0001").is_none());
        assert!(DocumentNumber::parse("20240315-00a1").is_none());
        assert!(DocumentNumber::parse("20240315-0000").is_none());
    }

    #[test]
    fn test_ordering_is_date_then_sequence() {
        let a = DocumentNumber::new(date(2024, 1, 1), 9).unwrap();
        let b = DocumentNumber::new(date(2024, 1, 1), 10).unwrap();
        let c = DocumentNumber::new(date(2024, 1, 2), 1).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[tokio::test]
    async fn test_next_sequence_starts_at_one() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(
            next_sequence(&db, MovementKind::Inbound, date(2024, 1, 1)).await?,
            1
        );
        assert_eq!(
            next_sequence(&db, MovementKind::Outbound, date(2024, 1, 1)).await?,
            1
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_next_sequence_uses_max_for_the_date_only() -> Result<()> {
        let db = setup_test_db().await?;
        let staff = create_test_staff(&db, "Sato").await?;
        let pc = create_test_type(&db, crate::entities::Category::Pc, "ThinkPad").await?;

        for (product_id, number) in [
            ("A1", "20240101-0001"),
            ("A2", "20240101-0007"),
            ("A3", "20240102-0020"),
        ] {
            insert_test_product(&db, product_id, pc.id, number).await?;
            inbound_record::ActiveModel {
                product_id: Set(product_id.to_string()),
                staff_id: Set(staff.id),
                inbound_number: Set(number.to_string()),
                inbound_date: Set(date(2024, 1, 1)),
                created_at: Set(chrono::Utc::now()),
                ..Default::default()
            }
            .insert(&db)
            .await?;
        }

        assert_eq!(
            next_sequence(&db, MovementKind::Inbound, date(2024, 1, 1)).await?,
            8
        );
        assert_eq!(
            next_sequence(&db, MovementKind::Inbound, date(2024, 1, 2)).await?,
            21
        );
        // Outbound has its own namespace
        assert_eq!(
            next_sequence(&db, MovementKind::Outbound, date(2024, 1, 1)).await?,
            1
        );

        let allocated = allocate(&db, MovementKind::Inbound, date(2024, 1, 1)).await?;
        assert_eq!(allocated.to_string(), "20240101-0008");
        Ok(())
    }
}
