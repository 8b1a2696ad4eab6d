//! Ledger DTOs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{DateRange, LedgerEntry, LedgerTotals};
use crate::interfaces::http::common::{ApiError, ApiResult};
use crate::shared::from_minor_units;

/// `?from=&to=` RFC 3339 bounds, both optional and inclusive
#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    pub from: Option<String>,
    pub to: Option<String>,
}

fn parse_bound(name: &str, value: Option<&str>) -> ApiResult<Option<DateTime<Utc>>> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            DateTime::parse_from_rfc3339(v.trim())
                .map(|d| d.with_timezone(&Utc))
                .map_err(|_| ApiError::bad_request(format!("{} must be an RFC 3339 timestamp", name)))
        })
        .transpose()
}

impl RangeParams {
    pub fn to_range(&self) -> ApiResult<DateRange> {
        let from = parse_bound("from", self.from.as_deref())?;
        let to = parse_bound("to", self.to.as_deref())?;
        Ok(DateRange::new(from, to)?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryDto {
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub amount: Decimal,
    pub owner_id: String,
    pub owner_role: String,
    pub reservation_id: Option<String>,
    pub related_entry_id: Option<String>,
    pub offsets: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<LedgerEntry> for LedgerEntryDto {
    fn from(e: LedgerEntry) -> Self {
        Self {
            id: e.id,
            entry_type: e.entry_type.as_str().to_string(),
            amount: from_minor_units(e.amount),
            owner_id: e.owner_id,
            owner_role: e.owner_role.as_str().to_string(),
            reservation_id: e.reservation_id,
            related_entry_id: e.related_entry_id,
            offsets: e.offsets.map(|t| t.as_str().to_string()),
            created_at: e.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TypeTotalDto {
    pub count: u64,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsDto {
    pub count: u64,
    pub total_amount: Decimal,
    pub by_type: BTreeMap<String, TypeTotalDto>,
    /// Settled earnings net of refunds
    pub realized: Decimal,
    /// Earnings waiting for the tour to finish
    pub held: Decimal,
    /// Payments net of refunds
    pub net_spend: Decimal,
}

impl From<LedgerTotals> for TotalsDto {
    fn from(t: LedgerTotals) -> Self {
        Self {
            count: t.count,
            total_amount: from_minor_units(t.total_amount()),
            by_type: t
                .by_type
                .iter()
                .map(|(kind, total)| {
                    (
                        kind.as_str().to_string(),
                        TypeTotalDto {
                            count: total.count,
                            amount: from_minor_units(total.amount),
                        },
                    )
                })
                .collect(),
            realized: from_minor_units(t.realized),
            held: from_minor_units(t.held),
            net_spend: from_minor_units(t.net_spend),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionsPayload {
    pub transactions: Vec<LedgerEntryDto>,
}

#[derive(Debug, Serialize)]
pub struct TotalsPayload {
    pub totals: TotalsDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_parsing() {
        let params = RangeParams {
            from: Some("2030-01-01T00:00:00Z".into()),
            to: None,
        };
        let range = params.to_range().unwrap();
        assert_eq!(range.from.unwrap().to_rfc3339(), "2030-01-01T00:00:00+00:00");
        assert!(range.to.is_none());

        let bad = RangeParams {
            from: Some("yesterday".into()),
            to: None,
        };
        assert_eq!(
            bad.to_range().unwrap_err().message,
            "from must be an RFC 3339 timestamp"
        );

        let inverted = RangeParams {
            from: Some("2030-01-02T00:00:00Z".into()),
            to: Some("2030-01-01T00:00:00Z".into()),
        };
        assert_eq!(
            inverted.to_range().unwrap_err().status,
            axum::http::StatusCode::BAD_REQUEST
        );
    }
}
