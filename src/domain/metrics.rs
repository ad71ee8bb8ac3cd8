//! Derived dashboard numbers.
//!
//! Every function here is a pure computation over collections the caller has
//! already loaded and windowed. None of them can fail: zero divisors, empty
//! inputs and quotients too large for a `Decimal` resolve to a documented
//! fallback value instead.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::ops::Add;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{
    Asset, Bill, BillStatus, BudgetAllocation, Category, Expense, IncomeStream, Liability, Money,
    NetWorthSnapshot, SavingsGoal, Schedule,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorth {
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub net_worth: Money,
}

impl Add for NetWorth {
    type Output = NetWorth;

    fn add(self, other: NetWorth) -> NetWorth {
        NetWorth {
            total_assets: self.total_assets + other.total_assets,
            total_liabilities: self.total_liabilities + other.total_liabilities,
            net_worth: self.net_worth + other.net_worth,
        }
    }
}

/// Totals assets and liabilities. Net worth may be negative.
pub fn compute_net_worth(assets: &[Asset], liabilities: &[Liability]) -> NetWorth {
    let total_assets: Money = assets.iter().map(|a| a.value).sum();
    let total_liabilities: Money = liabilities.iter().map(|l| l.value).sum();

    NetWorth {
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
    }
}

/// Sum of cash-type assets, i.e. what is actually spendable.
pub fn total_cash(assets: &[Asset]) -> Money {
    assets.iter().filter(|a| a.is_cash()).map(|a| a.value).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthChange {
    pub change: Money,
    pub change_percent: Money,
}

/// The most recent snapshot by timestamp, ties broken by insertion sequence.
pub fn latest_snapshot(snapshots: &[NetWorthSnapshot]) -> Option<&NetWorthSnapshot> {
    snapshots.iter().max_by_key(|s| s.recency_key())
}

/// Change of `current_net_worth` against the latest snapshot.
///
/// With no snapshot the whole current value is the change and the percentage
/// is zero. A snapshot whose net worth is exactly zero also yields zero percent.
/// When the base is so small the percentage overflows, it saturates to
/// `Money::MAX` or `Money::MIN` following the sign of the change.
pub fn compute_net_worth_change(
    current_net_worth: Money,
    snapshots: &[NetWorthSnapshot],
) -> NetWorthChange {
    let Some(previous) = latest_snapshot(snapshots).map(NetWorthSnapshot::net_worth) else {
        return NetWorthChange {
            change: current_net_worth,
            change_percent: Money::ZERO,
        };
    };

    let change = current_net_worth - previous;
    let change_percent = if previous.is_zero() {
        Money::ZERO
    } else {
        percent_of(change, previous.abs()).unwrap_or(if change.is_sign_negative() {
            Money::MIN
        } else {
            Money::MAX
        })
    };

    NetWorthChange {
        change,
        change_percent,
    }
}

/// Recurring income normalized to a month. One-time and unknown schedules
/// contribute nothing.
pub fn compute_monthly_income(income_streams: &[IncomeStream]) -> Money {
    income_streams
        .iter()
        .map(|stream| {
            if let Schedule::Unknown(label) = &stream.schedule {
                tracing::warn!(
                    stream = %stream.name,
                    schedule = %label,
                    "unknown income schedule, counting it as zero"
                );
            }
            stream.monthly_amount()
        })
        .sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyExpenses {
    pub fixed: Money,
    pub variable: Money,
    pub total: Money,
}

/// Fixed = every bill, paid or not. Variable = the expenses passed in, which
/// the caller has already restricted to the month it cares about.
pub fn compute_monthly_expenses(bills: &[Bill], expenses: &[Expense]) -> MonthlyExpenses {
    let fixed: Money = bills.iter().map(|b| b.amount).sum();
    let variable: Money = expenses.iter().map(|e| e.amount).sum();

    MonthlyExpenses {
        fixed,
        variable,
        total: fixed + variable,
    }
}

/// Average monthly variable spend across the months that actually have
/// expenses. Months before tracking started don't dilute the average.
pub fn average_monthly_variable(expenses: &[Expense]) -> Money {
    let months: HashSet<(i32, u32)> = expenses.iter().map(Expense::month_key).collect();
    if months.is_empty() {
        return Money::ZERO;
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    total / Money::from(months.len())
}

/// Positive means saving, negative means eating into savings.
pub fn compute_savings_velocity(monthly_income: Money, monthly_expenses_total: Money) -> Money {
    monthly_income - monthly_expenses_total
}

/// How long cash on hand lasts at the current burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "months", rename_all = "camelCase")]
pub enum Runway {
    /// Income covers spending; cash never runs out.
    Infinite,
    Months(Money),
}

impl Runway {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Runway::Infinite)
    }

    pub fn months(&self) -> Option<Money> {
        match self {
            Runway::Infinite => None,
            Runway::Months(m) => Some(*m),
        }
    }
}

impl std::fmt::Display for Runway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Runway::Infinite => write!(f, "infinite"),
            Runway::Months(m) => write!(f, "{:.1} months", m.round_dp(1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnRate {
    pub burn_rate: Money,
    pub runway: Runway,
}

/// Burn is total monthly spend minus income. Runway is infinite when burn is
/// not positive, and also when cash divided by a vanishingly small burn no
/// longer fits in a `Decimal`.
pub fn compute_burn_rate_and_runway(
    monthly_income: Money,
    monthly_fixed: Money,
    monthly_variable_average: Money,
    cash_on_hand: Money,
) -> BurnRate {
    let burn_rate = (monthly_fixed + monthly_variable_average) - monthly_income;

    let runway = if burn_rate <= Money::ZERO {
        Runway::Infinite
    } else if cash_on_hand <= Money::ZERO {
        Runway::Months(Money::ZERO)
    } else {
        cash_on_hand
            .checked_div(burn_rate)
            .map_or(Runway::Infinite, Runway::Months)
    };

    BurnRate { burn_rate, runway }
}

/// Average spend per elapsed day. Day zero yields zero.
pub fn compute_spending_pace(month_to_date_total: Money, day_of_month: u32) -> Money {
    daily_pace(month_to_date_total, day_of_month)
}

/// Monthly income spread over the elapsed days of the month.
pub fn compute_income_pace(monthly_income: Money, day_of_month: u32) -> Money {
    daily_pace(monthly_income, day_of_month)
}

fn daily_pace(total: Money, day_of_month: u32) -> Money {
    if day_of_month == 0 {
        return Money::ZERO;
    }
    total / Money::from(day_of_month)
}

/// Unpaid bills due from today through `today + horizon_days`.
/// Overdue bills are not included.
pub fn compute_upcoming_bills_total(bills: &[Bill], today: NaiveDate, horizon_days: u32) -> Money {
    bills
        .iter()
        .filter(|b| b.is_upcoming(today, horizon_days))
        .map(|b| b.amount)
        .sum()
}

pub fn compute_overdue_bills_total(bills: &[Bill], today: NaiveDate) -> Money {
    bills
        .iter()
        .filter(|b| b.status(today).is_overdue())
        .map(|b| b.amount)
        .sum()
}

pub fn classify_bill_status(bill: &Bill, today: NaiveDate) -> BillStatus {
    bill.status(today)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub category: Category,
    pub allocated: Money,
    pub spent: Money,
    /// Unclamped; above 100 when overspent.
    pub percent: Money,
    pub is_overspent: bool,
}

impl BudgetProgress {
    pub fn remaining(&self) -> Money {
        self.allocated - self.spent
    }

    /// Percent clamped to 100 for progress bars.
    pub fn display_percent(&self) -> Money {
        self.percent.min(dec!(100))
    }
}

/// Spend per allocation, in allocation order. Expenses must already be
/// limited to the month being reported.
pub fn compute_budget_progress(
    allocations: &[BudgetAllocation],
    expenses: &[Expense],
) -> Vec<BudgetProgress> {
    allocations
        .iter()
        .map(|allocation| {
            let spent: Money = expenses
                .iter()
                .filter(|e| e.category == allocation.category)
                .map(|e| e.amount)
                .sum();

            // Overflow only happens with a tiny allocation, which is overspent
            let percent = if allocation.allocated > Money::ZERO {
                percent_of(spent, allocation.allocated).unwrap_or(Money::MAX)
            } else {
                Money::ZERO
            };

            BudgetProgress {
                category: allocation.category.clone(),
                allocated: allocation.allocated,
                spent,
                percent,
                is_overspent: percent > dec!(100),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// Unclamped; 200 means twice the target is saved.
    pub percent: Money,
    /// Never negative.
    pub remaining: Money,
    pub is_complete: bool,
}

pub fn compute_savings_goal_progress(goal: &SavingsGoal) -> GoalProgress {
    let percent = if goal.target_amount > Money::ZERO {
        percent_of(goal.current_amount, goal.target_amount).unwrap_or(Money::MAX)
    } else {
        Money::ZERO
    };

    GoalProgress {
        percent,
        remaining: (goal.target_amount - goal.current_amount).max(Money::ZERO),
        is_complete: percent >= dec!(100),
    }
}

/// `part / whole * 100`, or `None` when the result does not fit.
fn percent_of(part: Money, whole: Money) -> Option<Money> {
    part.checked_div(whole)?.checked_mul(dec!(100))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category: Category,
    pub total: Money,
    pub count: usize,
}

/// Expense totals grouped by category, largest first.
pub fn spending_by_category(expenses: &[Expense]) -> Vec<CategorySpend> {
    let mut grouped: BTreeMap<&Category, (Money, usize)> = BTreeMap::new();
    for expense in expenses {
        let entry = grouped.entry(&expense.category).or_insert((Money::ZERO, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut spends: Vec<CategorySpend> = grouped
        .into_iter()
        .map(|(category, (total, count))| CategorySpend {
            category: category.clone(),
            total,
            count,
        })
        .collect();

    spends.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    spends
}
