mod common;

use anyhow::Result;
use common::{Household, at, day, temp_data_file};
use pocketdash::application::{AppError, DashboardConfig, DashboardService};
use pocketdash::domain::{AssetType, BillStatus, Category, LiabilityType, Money, Runway, Schedule};
use rust_decimal_macros::dec;

#[test]
fn test_overview() {
    let service = Household::service("2024-03-15");
    let overview = service.overview();

    assert_eq!(overview.as_of, day("2024-03-15"));
    assert_eq!(overview.cash_on_hand, dec!(4000));
    assert_eq!(overview.daily_spending_pace, dec!(20));
    assert_eq!(overview.daily_income_pace, dec!(200));
    assert_eq!(overview.upcoming_bills_total, dec!(360));
    assert_eq!(overview.horizon_days, 30);

    let bill_names: Vec<&str> = overview
        .next_bills
        .iter()
        .map(|l| l.bill.name.as_str())
        .collect();
    assert_eq!(bill_names, vec!["Rent", "Power", "Internet", "Car Payment"]);
    assert_eq!(overview.next_bills[0].status, BillStatus::Overdue { days: 14 });
    assert_eq!(overview.next_bills[2].status, BillStatus::Upcoming { days: 5 });

    // February's bus pass is outside the month
    let descriptions: Vec<&str> = overview
        .recent_expenses
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["Groceries", "Pizza night", "Groceries"]);
    assert_eq!(overview.recent_expenses[0].date, day("2024-03-12"));

    assert_eq!(overview.goals.len(), 2);
    assert_eq!(overview.goals[0].progress.percent, dec!(25));
}

#[test]
fn test_overview_respects_list_sizes() {
    let config = DashboardConfig {
        overview_bills: 1,
        overview_expenses: 2,
        overview_goals: 1,
        ..DashboardConfig::default()
    };
    let service = Household::service("2024-03-15").with_config(config);
    let overview = service.overview();

    assert_eq!(overview.next_bills.len(), 1);
    assert_eq!(overview.recent_expenses.len(), 2);
    assert_eq!(overview.goals.len(), 1);
}

#[test]
fn test_net_worth_report_and_snapshots() {
    let mut service = Household::service("2024-03-15");

    let report = service.net_worth_report();
    assert_eq!(report.totals.net_worth, dec!(7500));
    // Nothing to compare against yet
    assert_eq!(report.change.change, dec!(7500));
    assert_eq!(report.change.change_percent, Money::ZERO);
    assert!(report.history.is_empty());

    let first = service.take_snapshot(Some("March".into()), at("2024-03-15"));
    assert_eq!(first.sequence, 1);
    assert_eq!(first.net_worth(), dec!(7500));

    service.dataset_mut().assets[0].value = dec!(4750);
    let second = service.take_snapshot(None, at("2024-03-15"));
    assert_eq!(second.sequence, 2);

    let report = service.net_worth_report();
    assert_eq!(report.totals.net_worth, dec!(8250));
    assert_eq!(report.change.change, Money::ZERO);
    assert_eq!(report.history.len(), 2);
    assert_eq!(report.history[0].name.as_deref(), Some("March"));
    assert_eq!(report.history[1].net_worth, dec!(8250));
}

#[test]
fn test_net_worth_change_against_previous_snapshot() {
    let mut service = Household::service("2024-03-15");
    service.take_snapshot(None, at("2024-02-01"));

    service.dataset_mut().assets[1].value = dec!(6750);
    let report = service.net_worth_report();
    assert_eq!(report.change.change, dec!(750));
    assert_eq!(report.change.change_percent, dec!(10));
}

#[test]
fn test_runway_report() {
    let service = Household::service("2024-03-15");
    let report = service.runway_report();

    assert_eq!(report.monthly_income, dec!(3000));
    // Every bill counts as fixed, paid or not
    assert_eq!(report.monthly_fixed, dec!(1690));
    // 360 spent over two active months in the window
    assert_eq!(report.monthly_variable_average, dec!(180));
    assert_eq!(report.monthly_total, dec!(1870));
    assert_eq!(report.this_month.variable, dec!(300));
    assert_eq!(report.savings_velocity, dec!(1130));
    assert_eq!(report.burn_rate, dec!(-1130));
    assert_eq!(report.runway, Runway::Infinite);
    assert_eq!(report.cash_on_hand, dec!(4000));
    assert_eq!(report.trailing_months, 3);
}

#[test]
fn test_runway_report_with_burn() {
    let mut service = Household::service("2024-03-15");
    service.dataset_mut().income_streams.clear();

    let report = service.runway_report();
    assert_eq!(report.burn_rate, dec!(1870));
    let months = report.runway.months().unwrap();
    assert_eq!(months.round_dp(2), dec!(2.14));
}

#[test]
fn test_bills_report() {
    let service = Household::service("2024-03-15");
    let report = service.bills_report();

    let names: Vec<&str> = report.bills.iter().map(|l| l.bill.name.as_str()).collect();
    assert_eq!(names, vec!["Rent", "Power", "Internet", "Car Payment", "Gym"]);
    assert_eq!(report.bills[3].bill.liability_id, Some(service.dataset().liabilities[0].id));
    assert_eq!(report.bills[4].status, BillStatus::Paid);
    assert_eq!(report.overdue_total, dec!(1290));
    assert_eq!(report.upcoming_total, dec!(360));
}

#[test]
fn test_budget_report() {
    let service = Household::service("2024-03-15");
    let report = service.budget_report();

    assert_eq!(report.month_start, day("2024-03-01"));
    assert_eq!(report.budgets.len(), 2);

    let food = &report.budgets[0];
    assert_eq!(food.category, Category::Food);
    assert_eq!(food.spent, dec!(255));
    assert_eq!(food.percent, dec!(127.5));
    assert!(food.is_overspent);
    assert_eq!(food.display_percent(), dec!(100));

    let dining = &report.budgets[1];
    assert_eq!(dining.percent, dec!(45));
    assert!(!dining.is_overspent);

    assert_eq!(report.total_allocated, dec!(300));
    assert_eq!(report.total_spent, dec!(300));
}

#[test]
fn test_insights_input() {
    let service = Household::service("2024-03-15");
    let input = service.insights_input();

    assert_eq!(input.cash_left, dec!(4000));
    assert_eq!(input.spending_pace, dec!(20));
    assert_eq!(input.upcoming_bills.len(), 4);
    assert_eq!(input.savings_progress, dec!(1500));
    assert_eq!(input.monthly_budget, dec!(300));
    assert_eq!(input.expenses[0].category, Category::Food);
    assert_eq!(input.expenses[0].amount, dec!(255));
    assert_eq!(input.net_worth, dec!(7500));
    assert!(input.runway.is_infinite());
}

#[test]
fn test_mark_bill_paid() -> Result<()> {
    let mut service = Household::service("2024-03-15");

    let paid = service.mark_bill_paid("internet")?;
    assert_eq!(paid.name, "Internet");
    assert!(paid.paid);
    assert_eq!(service.bills_report().upcoming_total, dec!(300));

    let again = service.mark_bill_paid("Internet");
    assert!(matches!(again, Err(AppError::BillAlreadyPaid(_))));

    let missing = service.mark_bill_paid("Netflix");
    assert!(matches!(missing, Err(AppError::BillNotFound(_))));

    Ok(())
}

#[test]
fn test_reset_bills() -> Result<()> {
    let mut service = Household::service("2024-03-15");
    service.mark_bill_paid("Rent")?;

    assert_eq!(service.reset_bills(), 2);
    assert!(service.dataset().bills.iter().all(|b| !b.paid));
    Ok(())
}

#[test]
fn test_add_funds() -> Result<()> {
    let mut service = Household::service("2024-03-15");

    let line = service.add_funds("vacation", dec!(1500))?;
    assert_eq!(line.goal.current_amount, dec!(2000));
    assert!(line.progress.is_complete);

    let rejected = service.add_funds("Vacation", dec!(-5));
    assert!(matches!(rejected, Err(AppError::InvalidAmount(_))));

    let missing = service.add_funds("House", dec!(5));
    assert!(matches!(missing, Err(AppError::GoalNotFound(_))));
    Ok(())
}

#[test]
fn test_set_and_remove_budget() -> Result<()> {
    let mut service = Household::service("2024-03-15");

    let duplicate = service.set_budget(Category::Food, dec!(250), false);
    assert!(matches!(duplicate, Err(AppError::BudgetAlreadyExists(_))));

    let updated = service.set_budget(Category::Food, dec!(250), true)?;
    assert_eq!(updated.allocated, dec!(250));
    assert_eq!(service.dataset().budgets.len(), 2);

    service.set_budget(Category::parse("Pet Care"), dec!(40), false)?;
    assert_eq!(service.dataset().budgets.len(), 3);

    let negative = service.set_budget(Category::Health, dec!(-1), false);
    assert!(matches!(negative, Err(AppError::InvalidAmount(_))));

    let removed = service.remove_budget(&Category::DiningOut)?;
    assert_eq!(removed.allocated, dec!(100));
    let missing = service.remove_budget(&Category::DiningOut);
    assert!(matches!(missing, Err(AppError::BudgetNotFound(_))));
    Ok(())
}

#[test]
fn test_add_and_remove_asset() -> Result<()> {
    let mut service = Household::service("2024-03-15");

    let asset = service.add_asset("  Savings Account ", dec!(1500), AssetType::Cash)?;
    assert_eq!(asset.name, "Savings Account");
    assert_eq!(service.overview().cash_on_hand, dec!(5500));
    assert_eq!(service.net_worth_report().assets.len(), 3);

    let blank = service.add_asset("   ", dec!(10), AssetType::Other);
    assert!(matches!(blank, Err(AppError::EmptyName)));
    let negative = service.add_asset("Boat", dec!(-10), AssetType::Other);
    assert!(matches!(negative, Err(AppError::InvalidAmount(_))));

    let removed = service.remove_asset("savings account")?;
    assert_eq!(removed.id, asset.id);
    assert_eq!(service.net_worth_report().totals.net_worth, dec!(7500));

    let missing = service.remove_asset("Savings Account");
    assert!(matches!(missing, Err(AppError::AssetNotFound(_))));
    Ok(())
}

#[test]
fn test_add_and_remove_liability() -> Result<()> {
    let mut service = Household::service("2024-03-15");

    service.add_liability("Visa", dec!(500), LiabilityType::CreditCard)?;
    assert_eq!(service.net_worth_report().totals.total_liabilities, dec!(3000));

    let negative = service.add_liability("Visa", dec!(-1), LiabilityType::CreditCard);
    assert!(matches!(negative, Err(AppError::InvalidAmount(_))));

    // Bills linked to a removed liability stay, without the link
    let removed = service.remove_liability("car loan")?;
    assert_eq!(removed.name, "Car Loan");
    assert!(service.dataset().bills.iter().all(|b| b.liability_id.is_none()));
    assert_eq!(service.dataset().bills.len(), 5);

    let missing = service.remove_liability("Car Loan");
    assert!(matches!(missing, Err(AppError::LiabilityNotFound(_))));
    Ok(())
}

#[test]
fn test_add_and_remove_income() -> Result<()> {
    let mut service = Household::service("2024-03-15");

    let stream = service.add_income("Side gig", dec!(1200), Schedule::Yearly)?;
    assert_eq!(stream.monthly_amount(), dec!(100));
    let report = service.runway_report();
    assert_eq!(report.monthly_income, dec!(3100));
    assert_eq!(report.income_streams.len(), 2);

    let unknown = service.add_income("Lottery", dec!(5), Schedule::parse("Whenever"));
    assert!(matches!(unknown, Err(AppError::UnknownSchedule(label)) if label == "Whenever"));

    service.remove_income("SALARY")?;
    assert_eq!(service.runway_report().monthly_income, dec!(100));

    let missing = service.remove_income("Salary");
    assert!(matches!(missing, Err(AppError::IncomeStreamNotFound(_))));
    Ok(())
}

#[test]
fn test_add_and_remove_goal() -> Result<()> {
    let mut service = Household::service("2024-03-15");

    let line = service.add_goal("New Car", dec!(8000), Some(day("2025-01-01")))?;
    assert_eq!(line.goal.current_amount, Money::ZERO);
    assert_eq!(line.goal.target_date, Some(day("2025-01-01")));
    assert_eq!(line.progress.percent, Money::ZERO);
    assert_eq!(service.savings_report().len(), 3);

    let duplicate = service.add_goal("vacation", dec!(100), None);
    assert!(matches!(duplicate, Err(AppError::GoalAlreadyExists(_))));
    let negative = service.add_goal("House", dec!(-100), None);
    assert!(matches!(negative, Err(AppError::InvalidAmount(_))));

    let removed = service.remove_goal("Vacation")?;
    assert_eq!(removed.current_amount, dec!(500));
    assert_eq!(service.insights_input().savings_progress, dec!(1000));

    let missing = service.remove_goal("Vacation");
    assert!(matches!(missing, Err(AppError::GoalNotFound(_))));
    Ok(())
}

#[test]
fn test_add_and_remove_expense() -> Result<()> {
    let mut service = Household::service("2024-03-15");

    let expense = service.add_expense("Cinema", dec!(30), day("2024-03-14"), Category::Entertainment)?;
    let listed = service.month_expenses();
    assert_eq!(listed.len(), 4);
    assert_eq!(listed[0].id, expense.id);
    assert_eq!(service.runway_report().this_month.variable, dec!(330));

    let blank = service.add_expense("", dec!(5), day("2024-03-14"), Category::Other);
    assert!(matches!(blank, Err(AppError::EmptyName)));
    let negative = service.add_expense("Refund", dec!(-5), day("2024-03-14"), Category::Other);
    assert!(matches!(negative, Err(AppError::InvalidAmount(_))));

    let removed = service.remove_expense(expense.id)?;
    assert_eq!(removed.description, "Cinema");
    assert_eq!(service.month_expenses().len(), 3);

    let missing = service.remove_expense(expense.id);
    assert!(matches!(missing, Err(AppError::ExpenseNotFound(id)) if id == expense.id));
    Ok(())
}

#[test]
fn test_add_and_remove_bill() -> Result<()> {
    let mut service = Household::service("2024-03-15");

    let bill = service.add_bill(
        "Phone",
        dec!(35),
        day("2024-03-25"),
        Category::Mobile,
        None,
    )?;
    assert!(!bill.paid);
    assert_eq!(service.bills_report().upcoming_total, dec!(395));

    let linked = service.add_bill(
        "Car Payment",
        dec!(300),
        day("2024-05-05"),
        Category::LoanPayment,
        Some("car loan"),
    )?;
    assert_eq!(linked.liability_id, Some(service.dataset().liabilities[0].id));

    let unlinked = service.add_bill("Card", dec!(20), day("2024-03-25"), Category::Other, Some("Visa"));
    assert!(matches!(unlinked, Err(AppError::LiabilityNotFound(_))));
    let negative = service.add_bill("Card", dec!(-20), day("2024-03-25"), Category::Other, None);
    assert!(matches!(negative, Err(AppError::InvalidAmount(_))));

    // Every bill with the name goes
    let removed = service.remove_bill("car payment")?;
    assert_eq!(removed.len(), 2);
    assert_eq!(service.dataset().bills.len(), 5);

    let missing = service.remove_bill("Car Payment");
    assert!(matches!(missing, Err(AppError::BillNotFound(_))));
    Ok(())
}

#[test]
fn test_open_and_save_round_trip() -> Result<()> {
    let mut dataset = Household::full();
    let (path, _temp) = temp_data_file(&mut dataset)?;

    let mut service = DashboardService::open(&path, day("2024-03-15"))?;
    service.mark_bill_paid("Power")?;
    service.take_snapshot(None, at("2024-03-15"));
    service.save(&path)?;

    let reopened = DashboardService::open(&path, day("2024-03-15"))?;
    assert_eq!(reopened.dataset().net_worth_snapshots.len(), 1);
    assert_eq!(reopened.bills_report().overdue_total, dec!(1200));
    Ok(())
}

#[test]
fn test_open_missing_file_fails() {
    let temp = tempfile::TempDir::new().unwrap();
    let result = DashboardService::open(&temp.path().join("missing.json"), day("2024-03-15"));
    assert!(matches!(result, Err(AppError::Data(_))));
}
