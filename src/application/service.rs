use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::path::Path;
use uuid::Uuid;

use crate::domain::{
    average_monthly_variable, compute_budget_progress, compute_burn_rate_and_runway,
    compute_income_pace, compute_monthly_expenses, compute_monthly_income, compute_net_worth,
    compute_net_worth_change, compute_overdue_bills_total, compute_savings_goal_progress,
    compute_savings_velocity, compute_spending_pace, compute_upcoming_bills_total,
    current_month, reset_bills, spending_by_category, total_cash, trailing_months, Asset,
    AssetType, Bill, BudgetAllocation, Category, Expense, IncomeStream, Liability, LiabilityType,
    Money, NetWorthSnapshot, SavingsGoal, Schedule,
};
use crate::io::Dataset;

use super::{
    AppError, BillLine, BillsReport, BudgetReport, CategoryAmount, DashboardOverview, GoalLine,
    InsightsInput, NetWorthPoint, NetWorthReport, RunwayReport, UpcomingBill,
};

/// Knobs for how the dashboard windows and trims its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Days ahead that count as "upcoming" for bills.
    pub horizon_days: u32,
    /// Calendar months of expenses averaged into the variable monthly spend.
    pub trailing_months: u32,
    pub overview_bills: usize,
    pub overview_expenses: usize,
    pub overview_goals: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            horizon_days: 30,
            trailing_months: 3,
            overview_bills: 5,
            overview_expenses: 5,
            overview_goals: 3,
        }
    }
}

/// Application service providing the dashboard views over one dataset.
/// This is the caller the metrics functions expect: it picks the windows,
/// filters the collections and hands plain slices to the calculations.
pub struct DashboardService {
    dataset: Dataset,
    today: NaiveDate,
    config: DashboardConfig,
}

impl DashboardService {
    pub fn new(dataset: Dataset, today: NaiveDate) -> Self {
        Self {
            dataset,
            today,
            config: DashboardConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the data file at `path`.
    pub fn open(path: &Path, today: NaiveDate) -> Result<Self, AppError> {
        let dataset = Dataset::load(path)?;
        tracing::debug!(
            path = %path.display(),
            records = dataset.record_count(),
            "dataset loaded"
        );
        Ok(Self::new(dataset, today))
    }

    pub fn save(&mut self, path: &Path) -> Result<(), AppError> {
        self.dataset.save(path)?;
        Ok(())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn dataset_mut(&mut self) -> &mut Dataset {
        &mut self.dataset
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    // ========================
    // Windows
    // ========================

    /// Expenses dated within the current calendar month.
    fn expenses_this_month(&self) -> Vec<Expense> {
        let (start, end) = current_month(self.today);
        self.dataset
            .expenses
            .iter()
            .filter(|e| e.date >= start && e.date < end)
            .cloned()
            .collect()
    }

    /// Expenses within the trailing window used for the variable average.
    fn trailing_expenses(&self) -> Vec<Expense> {
        let (start, end) = trailing_months(self.today, self.config.trailing_months);
        self.dataset
            .expenses
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect()
    }

    fn unpaid_bills_by_due_date(&self) -> Vec<&Bill> {
        let mut unpaid: Vec<&Bill> = self.dataset.bills.iter().filter(|b| !b.paid).collect();
        unpaid.sort_by_key(|b| b.due_date);
        unpaid
    }

    fn bill_line(&self, bill: &Bill) -> BillLine {
        BillLine {
            bill: bill.clone(),
            status: bill.status(self.today),
        }
    }

    fn cash_on_hand(&self) -> Money {
        total_cash(&self.dataset.assets)
    }

    // ========================
    // Reports
    // ========================

    pub fn overview(&self) -> DashboardOverview {
        let day = self.today.day();
        let month_expenses = self.expenses_this_month();
        let month_total: Money = month_expenses.iter().map(|e| e.amount).sum();
        let monthly_income = compute_monthly_income(&self.dataset.income_streams);

        let next_bills = self
            .unpaid_bills_by_due_date()
            .into_iter()
            .take(self.config.overview_bills)
            .map(|b| self.bill_line(b))
            .collect();

        let mut recent_expenses = self.month_expenses();
        recent_expenses.truncate(self.config.overview_expenses);

        let goals = self
            .dataset
            .savings_goals
            .iter()
            .take(self.config.overview_goals)
            .map(|goal| GoalLine {
                goal: goal.clone(),
                progress: compute_savings_goal_progress(goal),
            })
            .collect();

        DashboardOverview {
            as_of: self.today,
            cash_on_hand: self.cash_on_hand(),
            daily_income_pace: compute_income_pace(monthly_income, day),
            daily_spending_pace: compute_spending_pace(month_total, day),
            upcoming_bills_total: compute_upcoming_bills_total(
                &self.dataset.bills,
                self.today,
                self.config.horizon_days,
            ),
            horizon_days: self.config.horizon_days,
            next_bills,
            recent_expenses,
            goals,
        }
    }

    pub fn net_worth_report(&self) -> NetWorthReport {
        let totals = compute_net_worth(&self.dataset.assets, &self.dataset.liabilities);
        let change = compute_net_worth_change(totals.net_worth, &self.dataset.net_worth_snapshots);

        let mut snapshots: Vec<&NetWorthSnapshot> =
            self.dataset.net_worth_snapshots.iter().collect();
        snapshots.sort_by_key(|s| s.recency_key());
        let history = snapshots
            .into_iter()
            .map(|s| NetWorthPoint {
                date: s.taken_at,
                name: s.name.clone(),
                net_worth: s.net_worth(),
            })
            .collect();

        NetWorthReport {
            totals,
            change,
            assets: self.dataset.assets.clone(),
            liabilities: self.dataset.liabilities.clone(),
            history,
        }
    }

    pub fn runway_report(&self) -> RunwayReport {
        let monthly_income = compute_monthly_income(&self.dataset.income_streams);
        let this_month = compute_monthly_expenses(&self.dataset.bills, &self.expenses_this_month());
        let variable_average = average_monthly_variable(&self.trailing_expenses());
        let monthly_total = this_month.fixed + variable_average;
        let cash_on_hand = self.cash_on_hand();

        let burn = compute_burn_rate_and_runway(
            monthly_income,
            this_month.fixed,
            variable_average,
            cash_on_hand,
        );

        RunwayReport {
            monthly_income,
            monthly_fixed: this_month.fixed,
            monthly_variable_average: variable_average,
            monthly_total,
            this_month,
            savings_velocity: compute_savings_velocity(monthly_income, monthly_total),
            burn_rate: burn.burn_rate,
            runway: burn.runway,
            cash_on_hand,
            trailing_months: self.config.trailing_months,
            income_streams: self.dataset.income_streams.clone(),
        }
    }

    pub fn bills_report(&self) -> BillsReport {
        let mut paid: Vec<&Bill> = self.dataset.bills.iter().filter(|b| b.paid).collect();
        paid.sort_by_key(|b| b.due_date);

        let bills = self
            .unpaid_bills_by_due_date()
            .into_iter()
            .chain(paid)
            .map(|b| self.bill_line(b))
            .collect();

        BillsReport {
            as_of: self.today,
            bills,
            overdue_total: compute_overdue_bills_total(&self.dataset.bills, self.today),
            upcoming_total: compute_upcoming_bills_total(
                &self.dataset.bills,
                self.today,
                self.config.horizon_days,
            ),
            horizon_days: self.config.horizon_days,
        }
    }

    pub fn budget_report(&self) -> BudgetReport {
        let (month_start, _) = current_month(self.today);
        let budgets = compute_budget_progress(&self.dataset.budgets, &self.expenses_this_month());

        BudgetReport {
            month_start,
            total_allocated: budgets.iter().map(|b| b.allocated).sum(),
            total_spent: budgets.iter().map(|b| b.spent).sum(),
            budgets,
        }
    }

    /// This month's expenses, newest first.
    pub fn month_expenses(&self) -> Vec<Expense> {
        let mut expenses = self.expenses_this_month();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses
    }

    pub fn savings_report(&self) -> Vec<GoalLine> {
        self.dataset
            .savings_goals
            .iter()
            .map(|goal| GoalLine {
                goal: goal.clone(),
                progress: compute_savings_goal_progress(goal),
            })
            .collect()
    }

    /// Fields for the external advice prompt, computed from live data.
    pub fn insights_input(&self) -> InsightsInput {
        let month_expenses = self.expenses_this_month();
        let month_total: Money = month_expenses.iter().map(|e| e.amount).sum();
        let runway = self.runway_report();
        let net_worth = compute_net_worth(&self.dataset.assets, &self.dataset.liabilities);

        InsightsInput {
            cash_left: self.cash_on_hand(),
            spending_pace: compute_spending_pace(month_total, self.today.day()),
            upcoming_bills: self
                .unpaid_bills_by_due_date()
                .into_iter()
                .map(|b| UpcomingBill {
                    name: b.name.clone(),
                    amount: b.amount,
                    due_date: b.due_date,
                })
                .collect(),
            savings_progress: self
                .dataset
                .savings_goals
                .iter()
                .map(|g| g.current_amount)
                .sum(),
            monthly_budget: self.dataset.budgets.iter().map(|b| b.allocated).sum(),
            expenses: spending_by_category(&month_expenses)
                .into_iter()
                .map(CategoryAmount::from)
                .collect(),
            net_worth: net_worth.net_worth,
            runway: runway.runway,
            burn_rate: runway.burn_rate,
            savings_velocity: runway.savings_velocity,
        }
    }

    // ========================
    // User actions
    // ========================

    /// Record the current net worth as a new snapshot.
    pub fn take_snapshot(
        &mut self,
        name: Option<String>,
        taken_at: DateTime<Utc>,
    ) -> NetWorthSnapshot {
        let totals = compute_net_worth(&self.dataset.assets, &self.dataset.liabilities);
        let mut snapshot = NetWorthSnapshot::capture(
            totals.total_assets,
            totals.total_liabilities,
            taken_at,
            self.dataset.next_sequence(),
        );
        if let Some(name) = name {
            snapshot = snapshot.with_name(name);
        }

        tracing::info!(
            sequence = snapshot.sequence,
            net_worth = %snapshot.net_worth(),
            "net worth snapshot taken"
        );
        self.dataset.net_worth_snapshots.push(snapshot.clone());
        snapshot
    }

    /// Mark the earliest-due unpaid bill with this name as paid.
    pub fn mark_bill_paid(&mut self, name: &str) -> Result<Bill, AppError> {
        let known = self
            .dataset
            .bills
            .iter()
            .any(|b| b.name.eq_ignore_ascii_case(name));
        let bill = self
            .dataset
            .bills
            .iter_mut()
            .filter(|b| b.name.eq_ignore_ascii_case(name) && !b.paid)
            .min_by_key(|b| b.due_date);

        match bill {
            Some(bill) => {
                bill.mark_paid();
                tracing::debug!(bill = %bill.name, due = %bill.due_date, "bill marked paid");
                Ok(bill.clone())
            }
            None if known => Err(AppError::BillAlreadyPaid(name.to_string())),
            None => Err(AppError::BillNotFound(name.to_string())),
        }
    }

    /// Start a new billing cycle. Returns how many bills were reset.
    pub fn reset_bills(&mut self) -> usize {
        let reset = reset_bills(&mut self.dataset.bills);
        tracing::debug!(reset, "bills reset to unpaid");
        reset
    }

    pub fn add_funds(&mut self, goal_name: &str, amount: Money) -> Result<GoalLine, AppError> {
        let goal = self
            .dataset
            .savings_goals
            .iter_mut()
            .find(|g| g.name.eq_ignore_ascii_case(goal_name))
            .ok_or_else(|| AppError::GoalNotFound(goal_name.to_string()))?;

        goal.add_funds(amount)?;
        tracing::debug!(goal = %goal.name, %amount, "funds added to goal");

        Ok(GoalLine {
            goal: goal.clone(),
            progress: compute_savings_goal_progress(goal),
        })
    }

    /// Create a budget for `category`, or update it when `replace` is set.
    /// Categories are unique across budgets.
    pub fn set_budget(
        &mut self,
        category: Category,
        allocated: Money,
        replace: bool,
    ) -> Result<BudgetAllocation, AppError> {
        let allocated = non_negative(allocated)?;

        match self
            .dataset
            .budgets
            .iter_mut()
            .find(|b| b.category == category)
        {
            Some(_) if !replace => Err(AppError::BudgetAlreadyExists(category)),
            Some(existing) => {
                existing.allocated = allocated;
                Ok(existing.clone())
            }
            None => {
                let budget = BudgetAllocation::new(category, allocated);
                self.dataset.budgets.push(budget.clone());
                Ok(budget)
            }
        }
    }

    pub fn remove_budget(&mut self, category: &Category) -> Result<BudgetAllocation, AppError> {
        let index = self
            .dataset
            .budgets
            .iter()
            .position(|b| &b.category == category)
            .ok_or_else(|| AppError::BudgetNotFound(category.clone()))?;
        Ok(self.dataset.budgets.remove(index))
    }

    // ========================
    // Records
    // ========================

    pub fn add_asset(
        &mut self,
        name: &str,
        value: Money,
        asset_type: AssetType,
    ) -> Result<Asset, AppError> {
        let asset = Asset::new(non_empty(name)?, non_negative(value)?, asset_type);
        tracing::debug!(asset = %asset.name, value = %asset.value, "asset added");
        self.dataset.assets.push(asset.clone());
        Ok(asset)
    }

    pub fn remove_asset(&mut self, name: &str) -> Result<Asset, AppError> {
        let asset = remove_named(&mut self.dataset.assets, |a| &a.name, name)
            .ok_or_else(|| AppError::AssetNotFound(name.to_string()))?;
        tracing::debug!(asset = %asset.name, "asset removed");
        Ok(asset)
    }

    pub fn add_liability(
        &mut self,
        name: &str,
        value: Money,
        liability_type: LiabilityType,
    ) -> Result<Liability, AppError> {
        let liability = Liability::new(non_empty(name)?, non_negative(value)?, liability_type);
        tracing::debug!(liability = %liability.name, value = %liability.value, "liability added");
        self.dataset.liabilities.push(liability.clone());
        Ok(liability)
    }

    /// Remove a liability. Bills that pointed at it keep their amount but lose
    /// the link.
    pub fn remove_liability(&mut self, name: &str) -> Result<Liability, AppError> {
        let liability = remove_named(&mut self.dataset.liabilities, |l| &l.name, name)
            .ok_or_else(|| AppError::LiabilityNotFound(name.to_string()))?;
        for bill in &mut self.dataset.bills {
            if bill.liability_id == Some(liability.id) {
                bill.liability_id = None;
            }
        }
        tracing::debug!(liability = %liability.name, "liability removed");
        Ok(liability)
    }

    pub fn add_income(
        &mut self,
        name: &str,
        amount: Money,
        schedule: Schedule,
    ) -> Result<IncomeStream, AppError> {
        if let Schedule::Unknown(label) = schedule {
            return Err(AppError::UnknownSchedule(label));
        }
        let stream = IncomeStream::new(non_empty(name)?, non_negative(amount)?, schedule);
        tracing::debug!(income = %stream.name, amount = %stream.amount, "income stream added");
        self.dataset.income_streams.push(stream.clone());
        Ok(stream)
    }

    pub fn remove_income(&mut self, name: &str) -> Result<IncomeStream, AppError> {
        let stream = remove_named(&mut self.dataset.income_streams, |s| &s.name, name)
            .ok_or_else(|| AppError::IncomeStreamNotFound(name.to_string()))?;
        tracing::debug!(income = %stream.name, "income stream removed");
        Ok(stream)
    }

    /// Create an empty savings goal. Goal names are unique, ignoring case.
    pub fn add_goal(
        &mut self,
        name: &str,
        target: Money,
        target_date: Option<NaiveDate>,
    ) -> Result<GoalLine, AppError> {
        let name = non_empty(name)?;
        if self
            .dataset
            .savings_goals
            .iter()
            .any(|g| g.name.eq_ignore_ascii_case(&name))
        {
            return Err(AppError::GoalAlreadyExists(name));
        }

        let mut goal = SavingsGoal::new(name, non_negative(target)?);
        if let Some(date) = target_date {
            goal = goal.with_target_date(date);
        }
        tracing::debug!(goal = %goal.name, target = %goal.target_amount, "savings goal added");
        self.dataset.savings_goals.push(goal.clone());

        Ok(GoalLine {
            progress: compute_savings_goal_progress(&goal),
            goal,
        })
    }

    pub fn remove_goal(&mut self, name: &str) -> Result<SavingsGoal, AppError> {
        let goal = remove_named(&mut self.dataset.savings_goals, |g| &g.name, name)
            .ok_or_else(|| AppError::GoalNotFound(name.to_string()))?;
        tracing::debug!(goal = %goal.name, "savings goal removed");
        Ok(goal)
    }

    pub fn add_expense(
        &mut self,
        description: &str,
        amount: Money,
        date: NaiveDate,
        category: Category,
    ) -> Result<Expense, AppError> {
        let expense = Expense::new(non_empty(description)?, non_negative(amount)?, date, category);
        tracing::debug!(
            expense = %expense.description,
            amount = %expense.amount,
            date = %expense.date,
            "expense added"
        );
        self.dataset.expenses.push(expense.clone());
        Ok(expense)
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Result<Expense, AppError> {
        let index = self
            .dataset
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(AppError::ExpenseNotFound(id))?;
        let expense = self.dataset.expenses.remove(index);
        tracing::debug!(expense = %expense.description, "expense removed");
        Ok(expense)
    }

    /// Add a bill, optionally linked to a liability by name.
    pub fn add_bill(
        &mut self,
        name: &str,
        amount: Money,
        due_date: NaiveDate,
        category: Category,
        liability: Option<&str>,
    ) -> Result<Bill, AppError> {
        let mut bill = Bill::new(non_empty(name)?, non_negative(amount)?, due_date, category);
        if let Some(liability_name) = liability {
            let liability = self
                .dataset
                .liabilities
                .iter()
                .find(|l| l.name.eq_ignore_ascii_case(liability_name.trim()))
                .ok_or_else(|| AppError::LiabilityNotFound(liability_name.to_string()))?;
            bill = bill.with_liability(liability.id);
        }

        tracing::debug!(bill = %bill.name, amount = %bill.amount, due = %bill.due_date, "bill added");
        self.dataset.bills.push(bill.clone());
        Ok(bill)
    }

    /// Remove every bill with this name, paid or not.
    pub fn remove_bill(&mut self, name: &str) -> Result<Vec<Bill>, AppError> {
        let name = name.trim();
        let (removed, kept): (Vec<Bill>, Vec<Bill>) = std::mem::take(&mut self.dataset.bills)
            .into_iter()
            .partition(|b| b.name.eq_ignore_ascii_case(name));
        self.dataset.bills = kept;

        if removed.is_empty() {
            return Err(AppError::BillNotFound(name.to_string()));
        }
        tracing::debug!(bill = name, count = removed.len(), "bills removed");
        Ok(removed)
    }
}

fn non_empty(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::EmptyName);
    }
    Ok(name.to_string())
}

fn non_negative(amount: Money) -> Result<Money, AppError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppError::InvalidAmount(amount));
    }
    Ok(amount)
}

/// Remove the first record whose name matches, ignoring case.
fn remove_named<T>(records: &mut Vec<T>, name_of: impl Fn(&T) -> &String, name: &str) -> Option<T> {
    let name = name.trim();
    let index = records
        .iter()
        .position(|r| name_of(r).eq_ignore_ascii_case(name))?;
    Some(records.remove(index))
}
