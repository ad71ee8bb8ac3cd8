use thiserror::Error;
use uuid::Uuid;

use crate::domain::{AddFundsError, Category, Money};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bill not found: {0}")]
    BillNotFound(String),

    #[error("Bill is already paid: {0}")]
    BillAlreadyPaid(String),

    #[error("Savings goal not found: {0}")]
    GoalNotFound(String),

    #[error("Savings goal already exists: {0}")]
    GoalAlreadyExists(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Liability not found: {0}")]
    LiabilityNotFound(String),

    #[error("Income stream not found: {0}")]
    IncomeStreamNotFound(String),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),

    #[error("Unknown income schedule: {0}")]
    UnknownSchedule(String),

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Budget not found for category: {0}")]
    BudgetNotFound(Category),

    #[error("Budget already exists for category: {0}")]
    BudgetAlreadyExists(Category),

    #[error("Invalid amount: {0}")]
    InvalidAmount(Money),

    #[error("Data error: {0}")]
    Data(#[from] anyhow::Error),
}

impl From<AddFundsError> for AppError {
    fn from(err: AddFundsError) -> Self {
        match err {
            AddFundsError::NonPositiveAmount(amount) => AppError::InvalidAmount(amount),
        }
    }
}
