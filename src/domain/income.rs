use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Money;

pub type IncomeStreamId = Uuid;

/// How often an income stream pays out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Schedule {
    Weekly,
    BiWeekly,
    SemiMonthly,
    Monthly,
    Quarterly,
    SemiAnnually,
    Yearly,
    OneTime,
    /// A label we don't know how to normalize. Contributes nothing monthly.
    Unknown(String),
}

impl Schedule {
    pub const KNOWN: [Schedule; 8] = [
        Schedule::Weekly,
        Schedule::BiWeekly,
        Schedule::SemiMonthly,
        Schedule::Monthly,
        Schedule::Quarterly,
        Schedule::SemiAnnually,
        Schedule::Yearly,
        Schedule::OneTime,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Schedule::Weekly => "Weekly",
            Schedule::BiWeekly => "Bi-Weekly",
            Schedule::SemiMonthly => "Semi-Monthly",
            Schedule::Monthly => "Monthly",
            Schedule::Quarterly => "Quarterly",
            Schedule::SemiAnnually => "Semi-Annually",
            Schedule::Yearly => "Yearly",
            Schedule::OneTime => "One-Time",
            Schedule::Unknown(label) => label,
        }
    }

    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        Self::KNOWN
            .iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| Schedule::Unknown(trimmed.to_string()))
    }

    /// Scale one payment to its monthly equivalent.
    /// Multiplies before dividing so that e.g. a yearly 12X comes back as exactly X.
    pub fn monthly_equivalent(&self, amount: Money) -> Money {
        match self {
            Schedule::Weekly => amount * dec!(52) / dec!(12),
            Schedule::BiWeekly => amount * dec!(26) / dec!(12),
            Schedule::SemiMonthly => amount * dec!(2),
            Schedule::Monthly => amount,
            Schedule::Quarterly => amount / dec!(3),
            Schedule::SemiAnnually => amount / dec!(6),
            Schedule::Yearly => amount / dec!(12),
            Schedule::OneTime | Schedule::Unknown(_) => Money::ZERO,
        }
    }
}

impl From<String> for Schedule {
    fn from(s: String) -> Self {
        Schedule::parse(&s)
    }
}

impl From<Schedule> for String {
    fn from(schedule: Schedule) -> Self {
        match schedule {
            Schedule::Unknown(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A recurring source of income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStream {
    #[serde(default = "Uuid::new_v4")]
    pub id: IncomeStreamId,
    pub name: String,
    pub amount: Money,
    pub schedule: Schedule,
}

impl IncomeStream {
    pub fn new(name: String, amount: Money, schedule: Schedule) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            amount,
            schedule,
        }
    }

    pub fn monthly_amount(&self) -> Money {
        self.schedule.monthly_equivalent(self.amount)
    }
}
