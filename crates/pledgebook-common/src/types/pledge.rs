//! Pledge - the pawn transaction aggregate
//!
//! A pledge records collateral items held against a cash loan. Key
//! characteristics:
//! - `principal` is immutable once issued; renewals and partial redemptions
//!   derive amounts from it, they never rewrite it
//! - `due_date` only ever advances (renewals extend it, nothing shortens it)
//! - `status` is a denormalized display cache; the ground truth is always
//!   re-derivable from the stored dates and the shop configuration
//! - exactly one terminal outcome per pledge: redeemed or auctioned

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PledgeError;
use crate::types::id::PledgeId;

/// Logical lifecycle state of a pledge
///
/// A renewal is an event, not a resting state: it re-enters `Active` with a
/// new due date, so there is no `Renewed` variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PledgeStatus {
    /// Within the loan term
    Active,
    /// Past due date, still redeemable
    Overdue,
    /// Fully repaid, items returned (terminal)
    Redeemed,
    /// Past the forfeiture window, items auction-eligible
    Forfeited,
    /// Sold at auction (terminal)
    Auctioned,
}

impl PledgeStatus {
    /// Whether this state admits no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, PledgeStatus::Redeemed | PledgeStatus::Auctioned)
    }
}

impl std::fmt::Display for PledgeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PledgeStatus::Active => "active",
            PledgeStatus::Overdue => "overdue",
            PledgeStatus::Redeemed => "redeemed",
            PledgeStatus::Forfeited => "forfeited",
            PledgeStatus::Auctioned => "auctioned",
        };
        write!(f, "{}", s)
    }
}

/// One pawned item within a pledge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PledgeItem {
    /// Item barcode, unique within the pledge
    pub barcode: String,
    /// Item category, e.g. "necklace"
    pub category: String,
    /// Purity code referencing the shop's purity table
    pub purity_code: String,
    /// Gross weight in grams
    pub weight_grams: Decimal,
    /// Weight deducted for set stones, if any
    pub stone_deduction_grams: Option<Decimal>,
    /// Assessed value at issuance, in currency units
    pub assessed_value: Decimal,
}

impl PledgeItem {
    /// Weight counted toward valuation: gross minus stone deduction,
    /// never below zero
    pub fn net_weight(&self) -> Decimal {
        let deduction = self.stone_deduction_grams.unwrap_or(Decimal::ZERO);
        (self.weight_grams - deduction).max(Decimal::ZERO)
    }
}

/// One renewal event: interest collected, maturity extended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenewalEvent {
    /// Event id
    pub id: Uuid,
    /// Date the renewal was taken
    pub renewed_at: NaiveDate,
    /// Interest collected for the renewal
    pub interest_paid: Decimal,
    /// Due date after the extension
    pub new_due_date: NaiveDate,
}

impl RenewalEvent {
    pub fn new(renewed_at: NaiveDate, interest_paid: Decimal, new_due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::now_v7(),
            renewed_at,
            interest_paid,
            new_due_date,
        }
    }
}

/// Auction outcome recorded on a forfeited pledge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionRecord {
    /// Date the auction completed
    pub auctioned_at: NaiveDate,
    /// Hammer price
    pub price: Decimal,
    /// Buyer name or reference
    pub buyer: String,
}

/// The pawn transaction aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pledge {
    /// Human-readable id, `PLG-{year}-{sequence}`
    pub id: PledgeId,
    /// Owning customer reference
    pub customer_id: String,
    /// Collateral items, non-empty
    pub items: Vec<PledgeItem>,
    /// Loan amount disbursed at issuance; immutable thereafter
    pub principal: Decimal,
    /// Issuance date
    pub created_at: NaiveDate,
    /// Current maturity date; only ever moves forward
    pub due_date: NaiveDate,
    /// Denormalized status cache for display; never ground truth
    pub status: PledgeStatus,
    /// Renewal events, oldest first
    pub renewal_history: Vec<RenewalEvent>,
    /// Amount collected at full redemption
    pub redemption_amount: Option<Decimal>,
    /// Date of full redemption (terminal)
    pub redeemed_at: Option<NaiveDate>,
    /// Date forfeiture was recorded
    pub forfeited_at: Option<NaiveDate>,
    /// Auction outcome (terminal)
    pub auction: Option<AuctionRecord>,
}

impl Pledge {
    /// Issue a new pledge
    ///
    /// Validates the issuance invariants: positive principal, at least one
    /// item, principal within the total assessed value, and a due date no
    /// earlier than the creation date.
    pub fn issue(
        id: PledgeId,
        customer_id: impl Into<String>,
        items: Vec<PledgeItem>,
        principal: Decimal,
        created_at: NaiveDate,
        due_date: NaiveDate,
    ) -> Result<Self, PledgeError> {
        if principal <= Decimal::ZERO {
            return Err(PledgeError::InvalidPrincipal { principal });
        }
        if items.is_empty() {
            return Err(PledgeError::EmptyPledge);
        }
        let assessed: Decimal = items.iter().map(|i| i.assessed_value).sum();
        if principal > assessed {
            return Err(PledgeError::PrincipalExceedsValue {
                principal,
                assessed,
            });
        }
        if due_date < created_at {
            return Err(PledgeError::DueDateBeforeCreation {
                created_at,
                due_date,
            });
        }

        Ok(Self {
            id,
            customer_id: customer_id.into(),
            items,
            principal,
            created_at,
            due_date,
            status: PledgeStatus::Active,
            renewal_history: Vec::new(),
            redemption_amount: None,
            redeemed_at: None,
            forfeited_at: None,
            auction: None,
        })
    }

    /// Total assessed value across all items
    pub fn assessed_total(&self) -> Decimal {
        self.items.iter().map(|i| i.assessed_value).sum()
    }

    /// Number of items held
    pub fn item_count(&self) -> u32 {
        self.items.len() as u32
    }

    /// Most recent renewal, if any
    pub fn last_renewal(&self) -> Option<&RenewalEvent> {
        self.renewal_history.last()
    }

    /// Date interest accrues from: the last renewal settled interest
    /// through its date, otherwise accrual runs from issuance
    pub fn interest_basis_date(&self) -> NaiveDate {
        self.last_renewal()
            .map(|r| r.renewed_at)
            .unwrap_or(self.created_at)
    }
}

impl std::fmt::Display for Pledge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pledge({}, {} items, principal={}, due={})",
            self.id,
            self.items.len(),
            self.principal,
            self.due_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn gold_item(barcode: &str, value: Decimal) -> PledgeItem {
        PledgeItem {
            barcode: barcode.to_string(),
            category: "ring".to_string(),
            purity_code: "916".to_string(),
            weight_grams: dec!(10),
            stone_deduction_grams: None,
            assessed_value: value,
        }
    }

    #[test]
    fn test_issue_valid() {
        let pledge = Pledge::issue(
            PledgeId::new(2026, 1),
            "CUST-001",
            vec![gold_item("B1", dec!(1000))],
            dec!(700),
            date(2026, 1, 10),
            date(2026, 2, 10),
        )
        .unwrap();

        assert_eq!(pledge.status, PledgeStatus::Active);
        assert_eq!(pledge.assessed_total(), dec!(1000));
        assert!(pledge.renewal_history.is_empty());
    }

    #[test]
    fn test_issue_rejects_zero_principal() {
        let result = Pledge::issue(
            PledgeId::new(2026, 1),
            "CUST-001",
            vec![gold_item("B1", dec!(1000))],
            dec!(0),
            date(2026, 1, 10),
            date(2026, 2, 10),
        );
        assert!(matches!(result, Err(PledgeError::InvalidPrincipal { .. })));
    }

    #[test]
    fn test_issue_rejects_empty_items() {
        let result = Pledge::issue(
            PledgeId::new(2026, 1),
            "CUST-001",
            vec![],
            dec!(700),
            date(2026, 1, 10),
            date(2026, 2, 10),
        );
        assert!(matches!(result, Err(PledgeError::EmptyPledge)));
    }

    #[test]
    fn test_issue_rejects_principal_over_value() {
        let result = Pledge::issue(
            PledgeId::new(2026, 1),
            "CUST-001",
            vec![gold_item("B1", dec!(500))],
            dec!(700),
            date(2026, 1, 10),
            date(2026, 2, 10),
        );
        assert!(matches!(
            result,
            Err(PledgeError::PrincipalExceedsValue { .. })
        ));
    }

    #[test]
    fn test_net_weight_with_stone_deduction() {
        let mut item = gold_item("B1", dec!(1000));
        item.stone_deduction_grams = Some(dec!(1.5));
        assert_eq!(item.net_weight(), dec!(8.5));

        item.stone_deduction_grams = Some(dec!(12));
        assert_eq!(item.net_weight(), dec!(0));
    }

    #[test]
    fn test_interest_basis_follows_renewals() {
        let mut pledge = Pledge::issue(
            PledgeId::new(2026, 1),
            "CUST-001",
            vec![gold_item("B1", dec!(1000))],
            dec!(700),
            date(2026, 1, 10),
            date(2026, 2, 10),
        )
        .unwrap();

        assert_eq!(pledge.interest_basis_date(), date(2026, 1, 10));

        pledge.renewal_history.push(RenewalEvent::new(
            date(2026, 2, 8),
            dec!(10.5),
            date(2026, 3, 10),
        ));
        assert_eq!(pledge.interest_basis_date(), date(2026, 2, 8));
    }

    #[test]
    fn test_terminal_states() {
        assert!(PledgeStatus::Redeemed.is_terminal());
        assert!(PledgeStatus::Auctioned.is_terminal());
        assert!(!PledgeStatus::Forfeited.is_terminal());
        assert!(!PledgeStatus::Overdue.is_terminal());
    }
}
