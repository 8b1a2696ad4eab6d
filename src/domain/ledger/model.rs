//! Ledger entries and their aggregates
//!
//! Rows are append-only. Settlement and refunds are new rows that point at
//! the row they settle or offset (`related_entry_id` + `offsets`), so every
//! balance is a fold over immutable history.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::account::Role;
use crate::domain::{DomainError, DomainResult};

/// Kind of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryType {
    /// Realized driver earning
    Credit,
    /// User payment
    Debit,
    /// Driver earning held until the tour finishes
    Pendant,
    /// Refund offsetting an earlier entry
    Reversal,
}

impl EntryType {
    pub const ALL: [EntryType; 4] = [Self::Credit, Self::Debit, Self::Pendant, Self::Reversal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "CREDIT",
            Self::Debit => "DEBIT",
            Self::Pendant => "PENDANT",
            Self::Reversal => "REVERSAL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CREDIT" => Some(Self::Credit),
            "DEBIT" => Some(Self::Debit),
            "PENDANT" => Some(Self::Pendant),
            "REVERSAL" => Some(Self::Reversal),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable ledger row
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub id: String,
    pub entry_type: EntryType,
    /// Always positive, minor units
    pub amount: i64,
    pub owner_id: String,
    pub owner_role: Role,
    pub reservation_id: Option<String>,
    /// Row this one settles (CREDIT) or offsets (REVERSAL)
    pub related_entry_id: Option<String>,
    /// Type of the related row
    pub offsets: Option<EntryType>,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn new(
        entry_type: EntryType,
        owner_role: Role,
        owner_id: impl Into<String>,
        amount: i64,
        reservation_id: Option<String>,
    ) -> DomainResult<Self> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount(amount));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            entry_type,
            amount,
            owner_id: owner_id.into(),
            owner_role,
            reservation_id,
            related_entry_id: None,
            offsets: None,
            created_at: Utc::now(),
        })
    }

    /// A REVERSAL for the full amount of `self`, owned by the same party.
    pub fn reversal(&self) -> DomainResult<Self> {
        if self.entry_type == EntryType::Reversal {
            return Err(DomainError::InvalidTransition(format!(
                "entry {} is itself a reversal",
                self.id
            )));
        }
        let mut entry = Self::new(
            EntryType::Reversal,
            self.owner_role,
            self.owner_id.clone(),
            self.amount,
            self.reservation_id.clone(),
        )?;
        entry.related_entry_id = Some(self.id.clone());
        entry.offsets = Some(self.entry_type);
        Ok(entry)
    }

    /// The CREDIT that settles this PENDANT hold.
    pub fn settlement(&self) -> DomainResult<Self> {
        if self.entry_type != EntryType::Pendant {
            return Err(DomainError::InvalidTransition(format!(
                "only PENDANT entries settle, {} is {}",
                self.id, self.entry_type
            )));
        }
        let mut entry = Self::new(
            EntryType::Credit,
            self.owner_role,
            self.owner_id.clone(),
            self.amount,
            self.reservation_id.clone(),
        )?;
        entry.related_entry_id = Some(self.id.clone());
        entry.offsets = Some(EntryType::Pendant);
        Ok(entry)
    }
}

/// Optional inclusive time window for ledger queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> DomainResult<Self> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(DomainError::Validation(
                    "`from` must not be after `to`".to_string(),
                ));
            }
        }
        Ok(Self { from, to })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.map_or(true, |f| at >= f) && self.to.map_or(true, |t| at <= t)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeTotal {
    pub count: u64,
    pub amount: i64,
}

/// Per-type and derived wallet figures for one owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTotals {
    pub by_type: BTreeMap<EntryType, TypeTotal>,
    pub count: u64,
    /// CREDIT − REVERSAL of credits
    pub realized: i64,
    /// PENDANT not yet settled nor reversed; see [`LedgerTotals::tally_in`]
    pub held: i64,
    /// DEBIT − REVERSAL of debits
    pub net_spend: i64,
}

impl LedgerTotals {
    pub fn tally<'a>(entries: impl IntoIterator<Item = &'a LedgerEntry>) -> Self {
        let mut by_type: BTreeMap<EntryType, TypeTotal> =
            EntryType::ALL.iter().map(|t| (*t, TypeTotal::default())).collect();
        let mut count = 0u64;
        let mut reversed = BTreeMap::<EntryType, i64>::new();
        let mut settled = 0i64;

        for entry in entries {
            count += 1;
            let slot = by_type.entry(entry.entry_type).or_default();
            slot.count += 1;
            slot.amount += entry.amount;

            match (entry.entry_type, entry.offsets) {
                (EntryType::Reversal, Some(target)) => {
                    *reversed.entry(target).or_default() += entry.amount;
                }
                (EntryType::Credit, Some(EntryType::Pendant)) => settled += entry.amount,
                _ => {}
            }
        }

        let sum = |t: EntryType| by_type.get(&t).map(|v| v.amount).unwrap_or(0);
        let rev = |t: EntryType| reversed.get(&t).copied().unwrap_or(0);

        Self {
            realized: sum(EntryType::Credit) - rev(EntryType::Credit),
            held: sum(EntryType::Pendant) - settled - rev(EntryType::Pendant),
            net_spend: sum(EntryType::Debit) - rev(EntryType::Debit),
            by_type,
            count,
        }
    }

    /// Totals for the rows of `history` inside `range`.
    ///
    /// `held` is a balance rather than a flow, so it is taken over everything
    /// up to the end of the window. A hold created before `from` and settled
    /// inside the window then reads 0 instead of going negative.
    pub fn tally_in(history: &[LedgerEntry], range: DateRange) -> Self {
        let mut totals = Self::tally(history.iter().filter(|e| range.contains(e.created_at)));
        totals.held = Self::tally(
            history
                .iter()
                .filter(|e| range.to.map_or(true, |to| e.created_at <= to)),
        )
        .held;
        totals
    }

    pub fn total_amount(&self) -> i64 {
        self.by_type.values().map(|t| t.amount).sum()
    }
}
