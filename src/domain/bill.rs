use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, LiabilityId, Money};

pub type BillId = Uuid;

/// A scheduled payment. `paid` is the only status that is stored; everything
/// else about a bill's state is derived from its due date on each read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(default = "Uuid::new_v4")]
    pub id: BillId,
    pub name: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub paid: bool,
    pub category: Category,
    /// Liability this bill pays down, if any. Not owned; may dangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liability_id: Option<LiabilityId>,
}

impl Bill {
    pub fn new(name: String, amount: Money, due_date: NaiveDate, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            amount,
            due_date,
            paid: false,
            category,
            liability_id: None,
        }
    }

    pub fn with_liability(mut self, liability_id: LiabilityId) -> Self {
        self.liability_id = Some(liability_id);
        self
    }

    pub fn mark_paid(&mut self) {
        self.paid = true;
    }

    /// Classify this bill relative to `today`.
    pub fn status(&self, today: NaiveDate) -> BillStatus {
        if self.paid {
            return BillStatus::Paid;
        }

        let days = (self.due_date - today).num_days();
        match days {
            d if d < 0 => BillStatus::Overdue { days: -d },
            0 => BillStatus::DueToday,
            d => BillStatus::Upcoming { days: d },
        }
    }

    /// Unpaid and due within `[today, today + horizon_days]`, both ends inclusive.
    /// A horizon past the last representable date reaches `NaiveDate::MAX`.
    pub fn is_upcoming(&self, today: NaiveDate, horizon_days: u32) -> bool {
        let horizon = today
            .checked_add_days(Days::new(u64::from(horizon_days)))
            .unwrap_or(NaiveDate::MAX);
        !self.paid && self.due_date >= today && self.due_date <= horizon
    }
}

/// Derived state of a bill on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum BillStatus {
    Paid,
    Overdue { days: i64 },
    DueToday,
    Upcoming { days: i64 },
}

impl BillStatus {
    pub fn is_overdue(&self) -> bool {
        matches!(self, BillStatus::Overdue { .. })
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BillStatus::Paid => write!(f, "paid"),
            BillStatus::Overdue { days: 1 } => write!(f, "1 day overdue"),
            BillStatus::Overdue { days } => write!(f, "{} days overdue", days),
            BillStatus::DueToday => write!(f, "due today"),
            BillStatus::Upcoming { days: 1 } => write!(f, "1 day left"),
            BillStatus::Upcoming { days } => write!(f, "{} days left", days),
        }
    }
}

/// Start a new billing cycle: every paid bill becomes unpaid again.
/// Returns how many bills changed.
pub fn reset_bills(bills: &mut [Bill]) -> usize {
    let mut reset = 0;
    for bill in bills.iter_mut().filter(|b| b.paid) {
        bill.paid = false;
        reset += 1;
    }
    reset
}
