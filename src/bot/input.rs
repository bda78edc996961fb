//! Parsing of free-form command arguments and user-facing error messages.
//!
//! Slash commands receive product ids and dates as plain strings. The helpers here turn them
//! into engine types, rejecting malformed input before any movement starts.

use crate::{
    core::ledger::{PcDetails, ProductDetails, VestDetails},
    errors::{Error, ErrorKind, Result},
};
use chrono::NaiveDate;

/// Splits a comma, space, or newline separated list of product ids.
///
/// # Errors
/// Returns a validation error when no id is present.
pub fn parse_product_ids(raw: &str) -> Result<Vec<String>> {
    let ids: Vec<String> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        return Err(Error::validation("At least one product ID is required"));
    }
    Ok(ids)
}

/// Parses an optional `YYYY-MM-DD` date, defaulting to `today`.
pub fn parse_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match raw.map(str::trim) {
        None | Some("") => Ok(today),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            Error::validation(format!("'{value}' is not a date (expected YYYY-MM-DD)"))
        }),
    }
}

/// Parses an optional `YYYY-MM-DD` date with no default.
pub fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                Error::validation(format!("'{value}' is not a date (expected YYYY-MM-DD)"))
            }),
    }
}

/// Rejects negative warranty periods.
pub fn parse_warranty_months(months: Option<i32>) -> Result<Option<i32>> {
    match months {
        Some(months) if months < 0 => Err(Error::validation(format!(
            "Warranty period cannot be negative (got {months} months)"
        ))),
        other => Ok(other),
    }
}

/// Builds one PC detail record per item from a shared model number and per-item serials.
///
/// Without a model number no details are attached. With one, the serial list must have one
/// entry per item.
pub fn pc_details(
    model_number: Option<&str>,
    serial_numbers: Option<&str>,
    purchase_date: Option<NaiveDate>,
    warranty_period: Option<i32>,
    item_count: usize,
) -> Result<Vec<Option<ProductDetails>>> {
    let Some(model_number) = model_number.map(str::trim).filter(|m| !m.is_empty()) else {
        return Ok(vec![None; item_count]);
    };

    let serials = serial_numbers.map(parse_product_ids).transpose()?.unwrap_or_default();
    if serials.len() != item_count {
        return Err(Error::validation(format!(
            "Expected {item_count} serial numbers, got {}",
            serials.len()
        )));
    }

    Ok(serials
        .into_iter()
        .map(|serial_number| {
            Some(ProductDetails::Pc(PcDetails {
                model_number: model_number.to_string(),
                serial_number,
                purchase_date,
                warranty_period,
            }))
        })
        .collect())
}

/// Builds identical vest detail records for every item, if a vest type was given.
#[must_use]
pub fn vest_details(
    vest_type: Option<&str>,
    size: Option<&str>,
    has_logo: bool,
    item_count: usize,
) -> Vec<Option<ProductDetails>> {
    let Some(vest_type) = vest_type.map(str::trim).filter(|v| !v.is_empty()) else {
        return vec![None; item_count];
    };
    let details = ProductDetails::Vest(VestDetails {
        vest_type: vest_type.to_string(),
        size: size.map(str::trim).unwrap_or_default().to_string(),
        has_logo,
    });
    vec![Some(details); item_count]
}

/// Message shown to staff when a command fails.
#[must_use]
pub fn error_message(error: &Error) -> String {
    match error.kind() {
        ErrorKind::Validation => format!("❌ {error}"),
        ErrorKind::NotFound => format!("🔍 {error}"),
        ErrorKind::Conflict => format!("⚠️ {error}"),
        ErrorKind::EmptyResult => format!("📭 {error}"),
        ErrorKind::Storage if error.is_retryable() => {
            format!("⏳ {error}. Nothing was changed, please try again.")
        }
        ErrorKind::Storage => "💥 Something went wrong on our side. Nothing was changed.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_parse_product_ids() {
        assert_eq!(
            parse_product_ids("PC-1, PC-2\nPC-3  PC-4,,").unwrap(),
            vec!["PC-1", "PC-2", "PC-3", "PC-4"]
        );
        assert!(matches!(
            parse_product_ids(" , "),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(None, today()).unwrap(), today());
        assert_eq!(parse_date(Some(" "), today()).unwrap(), today());
        assert_eq!(
            parse_date(Some("2024-02-29"), today()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date(Some("2023-02-29"), today()).is_err());
        assert!(parse_date(Some("29/02/2024"), today()).is_err());
    }

    #[test]
    fn test_pc_details_need_one_serial_per_item() {
        let none = pc_details(None, Some("SN1"), None, None, 2).unwrap();
        assert_eq!(none, vec![None, None]);

        let details = pc_details(Some("20XW"), Some("SN1,SN2"), None, Some(12), 2).unwrap();
        assert_eq!(details.len(), 2);
        assert!(matches!(
            &details[1],
            Some(ProductDetails::Pc(pc)) if pc.serial_number == "SN2" && pc.model_number == "20XW"
        ));

        assert!(pc_details(Some("20XW"), Some("SN1"), None, None, 2).is_err());
        assert!(pc_details(Some("20XW"), None, None, None, 1).is_err());
    }

    #[test]
    fn test_pc_purchase_terms() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("  ")).unwrap(), None);
        let bought = parse_optional_date(Some("2023-11-30")).unwrap();
        assert_eq!(bought, NaiveDate::from_ymd_opt(2023, 11, 30));
        assert!(parse_optional_date(Some("30/11/2023")).is_err());

        assert_eq!(parse_warranty_months(Some(36)).unwrap(), Some(36));
        assert_eq!(parse_warranty_months(None).unwrap(), None);
        assert!(parse_warranty_months(Some(-1)).is_err());

        let details = pc_details(Some("20XW"), Some("SN1"), bought, Some(36), 1).unwrap();
        let Some(ProductDetails::Pc(pc)) = &details[0] else {
            panic!("expected PC details");
        };
        assert_eq!(pc.purchase_date, bought);
        assert_eq!(pc.warranty_period, Some(36));
    }

    #[test]
    fn test_vest_details_apply_to_every_item() {
        let details = vest_details(Some("mesh"), Some("L"), true, 3);
        assert_eq!(details.len(), 3);
        assert!(details.iter().all(Option::is_some));
        assert_eq!(vest_details(None, Some("L"), true, 2), vec![None, None]);
    }

    #[test]
    fn test_error_message_by_kind() {
        let message = error_message(&Error::EmptyRange {
            start_id: "A".to_string(),
            end_id: "B".to_string(),
        });
        assert!(message.starts_with("📭"));

        let message = error_message(&Error::Timeout { seconds: 30 });
        assert!(message.contains("try again"));

        let message = error_message(&Error::Database(sea_orm::DbErr::Custom(
            "disk I/O error".to_string(),
        )));
        assert!(!message.contains("disk"));
    }
}
