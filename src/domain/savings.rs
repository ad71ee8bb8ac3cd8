use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Money;

pub type SavingsGoalId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    #[serde(default = "Uuid::new_v4")]
    pub id: SavingsGoalId,
    pub name: String,
    pub target_amount: Money,
    #[serde(default)]
    pub current_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

impl SavingsGoal {
    pub fn new(name: String, target_amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            target_amount,
            current_amount: Money::ZERO,
            target_date: None,
        }
    }

    pub fn with_current_amount(mut self, current_amount: Money) -> Self {
        self.current_amount = current_amount;
        self
    }

    pub fn with_target_date(mut self, target_date: NaiveDate) -> Self {
        self.target_date = Some(target_date);
        self
    }

    /// Put money towards the goal. The saved amount only ever grows, and may
    /// pass the target.
    pub fn add_funds(&mut self, amount: Money) -> Result<Money, AddFundsError> {
        if amount <= Money::ZERO {
            return Err(AddFundsError::NonPositiveAmount(amount));
        }
        self.current_amount += amount;
        Ok(self.current_amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddFundsError {
    NonPositiveAmount(Money),
}

impl std::fmt::Display for AddFundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddFundsError::NonPositiveAmount(amount) => {
                write!(f, "amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for AddFundsError {}
