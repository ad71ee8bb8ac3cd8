use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, Money};

pub type ExpenseId = Uuid;

/// A single incurred spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default = "Uuid::new_v4")]
    pub id: ExpenseId,
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: Category,
}

impl Expense {
    pub fn new(description: String, amount: Money, date: NaiveDate, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            amount,
            date,
            category,
        }
    }

    /// Calendar month bucket, used to count months that have activity.
    pub fn month_key(&self) -> (i32, u32) {
        (self.date.year(), self.date.month())
    }

    /// Same spend recorded twice: everything but the id matches.
    pub fn is_duplicate_of(&self, other: &Expense) -> bool {
        self.description == other.description
            && self.amount == other.amount
            && self.date == other.date
            && self.category == other.category
    }
}
