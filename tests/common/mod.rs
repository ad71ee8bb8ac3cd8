// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use pocketdash::application::DashboardService;
use pocketdash::domain::{
    Asset, AssetType, Bill, BudgetAllocation, Category, Expense, IncomeStream, Liability,
    LiabilityType, Money, SavingsGoal, Schedule,
};
use pocketdash::io::Dataset;
use rust_decimal_macros::dec;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to parse a date string into NaiveDate
pub fn day(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Helper to parse a date string into a midnight UTC timestamp
pub fn at(date_str: &str) -> DateTime<Utc> {
    day(date_str).and_hms_opt(0, 0, 0).unwrap().and_utc()
}

pub fn bill(name: &str, amount: Money, due: &str, category: Category) -> Bill {
    Bill::new(name.to_string(), amount, day(due), category)
}

pub fn expense(description: &str, amount: Money, date: &str, category: Category) -> Expense {
    Expense::new(description.to_string(), amount, day(date), category)
}

/// Helper to create a data file in a temporary directory
pub fn temp_data_file(dataset: &mut Dataset) -> Result<(PathBuf, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("pocketdash.json");
    dataset.save(&path)?;
    Ok((path, temp_dir))
}

/// Test fixture: a household with income, holdings, bills and March spending
pub struct Household;

impl Household {
    /// Cash 4000 + investments 6000, one 2500 loan. 3000/month salary.
    pub fn holdings_and_income() -> Dataset {
        let mut dataset = Dataset::new();
        dataset.assets.push(Asset::new(
            "Checking".into(),
            dec!(4000),
            AssetType::Cash,
        ));
        dataset.assets.push(Asset::new(
            "Index Fund".into(),
            dec!(6000),
            AssetType::Investment,
        ));
        dataset.liabilities.push(Liability::new(
            "Car Loan".into(),
            dec!(2500),
            LiabilityType::Loan,
        ));
        dataset.income_streams.push(IncomeStream::new(
            "Salary".into(),
            dec!(3000),
            Schedule::Monthly,
        ));
        dataset
    }

    /// Holdings and income plus bills, expenses, budgets and goals around
    /// March 2024.
    pub fn full() -> Dataset {
        let mut dataset = Self::holdings_and_income();

        dataset
            .bills
            .push(bill("Rent", dec!(1200), "2024-03-01", Category::Housing));
        let loan_id = dataset.liabilities[0].id;
        dataset.bills.push(
            bill("Car Payment", dec!(300), "2024-04-05", Category::LoanPayment)
                .with_liability(loan_id),
        );
        dataset
            .bills
            .push(bill("Internet", dec!(60), "2024-03-20", Category::Internet));
        dataset
            .bills
            .push(bill("Power", dec!(90), "2024-03-10", Category::Electricity));
        let mut gym = bill("Gym", dec!(40), "2024-03-05", Category::Gym);
        gym.mark_paid();
        dataset.bills.push(gym);

        dataset.expenses.push(expense(
            "Groceries",
            dec!(150),
            "2024-03-02",
            Category::Food,
        ));
        dataset.expenses.push(expense(
            "Pizza night",
            dec!(45),
            "2024-03-08",
            Category::DiningOut,
        ));
        dataset.expenses.push(expense(
            "Groceries",
            dec!(105),
            "2024-03-12",
            Category::Food,
        ));
        dataset.expenses.push(expense(
            "Bus pass",
            dec!(60),
            "2024-02-15",
            Category::Transportation,
        ));

        dataset
            .budgets
            .push(BudgetAllocation::new(Category::Food, dec!(200)));
        dataset
            .budgets
            .push(BudgetAllocation::new(Category::DiningOut, dec!(100)));

        dataset.savings_goals.push(
            SavingsGoal::new("Vacation".into(), dec!(2000))
                .with_current_amount(dec!(500))
                .with_target_date(day("2024-08-01")),
        );
        dataset
            .savings_goals
            .push(SavingsGoal::new("Emergency".into(), dec!(1000)).with_current_amount(dec!(1000)));

        dataset
    }

    pub fn service(today: &str) -> DashboardService {
        DashboardService::new(Self::full(), day(today))
    }
}
