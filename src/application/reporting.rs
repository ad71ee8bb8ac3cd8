use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Asset, Bill, BillStatus, BudgetProgress, Category, CategorySpend, Expense, GoalProgress,
    IncomeStream, Liability, MonthlyExpenses, Money, NetWorth, NetWorthChange, Runway,
    SavingsGoal,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub as_of: NaiveDate,
    pub cash_on_hand: Money,
    pub daily_income_pace: Money,
    pub daily_spending_pace: Money,
    pub upcoming_bills_total: Money,
    pub horizon_days: u32,
    pub next_bills: Vec<BillLine>,
    pub recent_expenses: Vec<Expense>,
    pub goals: Vec<GoalLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillLine {
    pub bill: Bill,
    pub status: BillStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalLine {
    pub goal: SavingsGoal,
    pub progress: GoalProgress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthReport {
    pub totals: NetWorth,
    pub change: NetWorthChange,
    pub assets: Vec<Asset>,
    pub liabilities: Vec<Liability>,
    /// Oldest first, for charting.
    pub history: Vec<NetWorthPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthPoint {
    pub date: DateTime<Utc>,
    pub name: Option<String>,
    pub net_worth: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunwayReport {
    pub monthly_income: Money,
    pub monthly_fixed: Money,
    /// Averaged over the months in the trailing window that have expenses.
    pub monthly_variable_average: Money,
    pub monthly_total: Money,
    /// Actual fixed and variable spend in the current calendar month.
    pub this_month: MonthlyExpenses,
    pub savings_velocity: Money,
    pub burn_rate: Money,
    pub runway: Runway,
    pub cash_on_hand: Money,
    pub trailing_months: u32,
    pub income_streams: Vec<IncomeStream>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillsReport {
    pub as_of: NaiveDate,
    /// Unpaid bills by due date, then paid bills by due date.
    pub bills: Vec<BillLine>,
    pub overdue_total: Money,
    pub upcoming_total: Money,
    pub horizon_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    pub month_start: NaiveDate,
    pub budgets: Vec<BudgetProgress>,
    pub total_allocated: Money,
    pub total_spent: Money,
}

/// The structured fields the external advice prompt is filled from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsInput {
    pub cash_left: Money,
    pub spending_pace: Money,
    pub upcoming_bills: Vec<UpcomingBill>,
    pub savings_progress: Money,
    pub monthly_budget: Money,
    pub expenses: Vec<CategoryAmount>,
    pub net_worth: Money,
    pub runway: Runway,
    pub burn_rate: Money,
    pub savings_velocity: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingBill {
    pub name: String,
    pub amount: Money,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAmount {
    pub category: Category,
    pub amount: Money,
}

impl From<CategorySpend> for CategoryAmount {
    fn from(spend: CategorySpend) -> Self {
        Self {
            category: spend.category,
            amount: spend.total,
        }
    }
}
