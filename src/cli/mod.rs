use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::application::{
    BillsReport, BudgetReport, DashboardConfig, DashboardOverview, DashboardService, GoalLine,
    NetWorthReport, RunwayReport,
};
use crate::domain::{
    format_money, format_percent, parse_amount, AssetType, Category, Expense, LiabilityType,
    Money, Schedule,
};
use crate::io::{Dataset, ImportOptions, ImportResult, Importer};

/// Pocketdash - Personal Finance Dashboard
#[derive(Parser)]
#[command(name = "pocketdash")]
#[command(about = "Net worth, runway, burn rate, bills and budgets from a local data file")]
#[command(version)]
pub struct Cli {
    /// Data file path
    #[arg(short, long, default_value = "pocketdash.json", env = "POCKETDASH_DATA")]
    pub data: PathBuf,

    /// Reference date for all calculations (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Days ahead that count as upcoming for bills
    #[arg(long, global = true, default_value = "30")]
    pub horizon_days: u32,

    /// Months of expenses averaged for the variable monthly spend
    #[arg(long, global = true, default_value = "3")]
    pub trailing_months: u32,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty data file
    Init,

    /// Cash on hand, daily pace, upcoming bills and goals at a glance
    Overview {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Assets, liabilities and change since the last snapshot
    NetWorth {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Record the current net worth as a snapshot
    Snapshot {
        /// Optional label for the snapshot
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Monthly income, burn rate, savings velocity and runway
    Runway {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// All bills with their status
    Bills {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Mark the next unpaid bill with this name as paid
    PayBill {
        /// Bill name
        name: String,
    },

    /// Start a new billing cycle: mark every bill unpaid
    ResetBills,

    /// Add or remove bills
    #[command(subcommand)]
    Bill(BillCommands),

    /// Log, list or remove expenses
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Add or remove assets
    #[command(subcommand)]
    Asset(AssetCommands),

    /// Add or remove liabilities
    #[command(subcommand)]
    Liability(LiabilityCommands),

    /// Add or remove income streams
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Savings(SavingsCommands),

    /// Print the structured input for the financial advice prompt (JSON)
    Insights,

    /// Import data from CSV
    Import {
        /// What to import: expenses, bills
        import_type: String,

        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Preview without importing
        #[arg(long)]
        dry_run: bool,

        /// Skip duplicate records
        #[arg(long)]
        skip_duplicates: bool,
    },
}

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show this month's spending against each budget
    Show {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Set the monthly allocation for a category
    Set {
        /// Category (e.g., "Food", "Dining Out")
        category: String,

        /// Monthly allocation (e.g., "400.00" or "400"); 0 tracks without a limit
        amount: String,

        /// Update the allocation if the category already has a budget
        #[arg(long)]
        replace: bool,
    },

    /// Remove the budget for a category
    Remove {
        /// Category
        category: String,
    },
}

#[derive(Subcommand)]
pub enum SavingsCommands {
    /// Show progress on every goal
    Show {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Add funds to a goal
    AddFunds {
        /// Goal name
        goal: String,

        /// Amount to add (e.g., "50.00" or "50")
        amount: String,
    },

    /// Create a new goal
    Add {
        /// Goal name
        name: String,

        /// Target amount
        target: String,

        /// Date to reach the target by (YYYY-MM-DD)
        #[arg(long)]
        target_date: Option<String>,
    },

    /// Delete a goal
    Remove {
        /// Goal name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum BillCommands {
    /// Add a bill
    Add {
        /// Bill name
        name: String,

        /// Amount due
        amount: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,

        /// Category (e.g., "Rent", "Electricity")
        #[arg(short, long, default_value = "Other")]
        category: String,

        /// Liability this bill pays down
        #[arg(long)]
        liability: Option<String>,
    },

    /// Remove every bill with this name
    Remove {
        /// Bill name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Log an expense
    Add {
        /// What the money went on
        description: String,

        /// Amount spent
        amount: String,

        /// Category (e.g., "Food", "Dining Out")
        #[arg(short, long, default_value = "Other")]
        category: String,

        /// Date of the expense (YYYY-MM-DD, defaults to the reference date)
        #[arg(long)]
        date: Option<String>,
    },

    /// List this month's expenses
    List {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Remove an expense by id
    Remove {
        /// Expense id, as shown by `expense list`
        id: String,
    },
}

#[derive(Subcommand)]
pub enum AssetCommands {
    /// Add an asset
    Add {
        /// Asset name
        name: String,

        /// Current value
        value: String,

        /// Type: cash, investment, property, other
        #[arg(short = 't', long = "type", default_value = "cash")]
        asset_type: String,
    },

    /// Remove an asset
    Remove {
        /// Asset name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum LiabilityCommands {
    /// Add a liability
    Add {
        /// Liability name
        name: String,

        /// Amount owed
        value: String,

        /// Type: mortgage, loan, credit-card, other
        #[arg(short = 't', long = "type", default_value = "loan")]
        liability_type: String,
    },

    /// Remove a liability
    Remove {
        /// Liability name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Add an income stream
    Add {
        /// Income name
        name: String,

        /// Amount per payment
        amount: String,

        /// Schedule: Weekly, Bi-Weekly, Semi-Monthly, Monthly, Quarterly, Semi-Annually, Yearly, One-Time
        #[arg(short, long, default_value = "Monthly")]
        schedule: String,
    },

    /// Remove an income stream
    Remove {
        /// Income name
        name: String,
    },
}

impl Cli {
    fn reference_date(&self) -> Result<NaiveDate> {
        match &self.today {
            Some(date_str) => parse_date(date_str),
            None => Ok(Local::now().date_naive()),
        }
    }

    fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            horizon_days: self.horizon_days,
            trailing_months: self.trailing_months,
            ..DashboardConfig::default()
        }
    }

    pub fn run(self) -> Result<()> {
        if matches!(self.command, Commands::Init) {
            Dataset::init(&self.data)?;
            println!("Data file initialized: {}", self.data.display());
            return Ok(());
        }

        let today = self.reference_date()?;
        let mut service =
            DashboardService::open(&self.data, today)?.with_config(self.dashboard_config());

        match self.command {
            Commands::Init => unreachable!("handled above"),

            Commands::Overview { format } => {
                let overview = service.overview();
                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&overview)?),
                    _ => print_overview(&overview),
                }
            }

            Commands::NetWorth { format } => {
                let report = service.net_worth_report();
                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                    _ => print_net_worth(&report),
                }
            }

            Commands::Snapshot { name } => {
                let snapshot = service.take_snapshot(name, Utc::now());
                service.save(&self.data)?;
                println!(
                    "Snapshot #{} recorded: net worth {} (assets {}, liabilities {})",
                    snapshot.sequence,
                    format_money(snapshot.net_worth()),
                    format_money(snapshot.assets),
                    format_money(snapshot.liabilities)
                );
            }

            Commands::Runway { format } => {
                let report = service.runway_report();
                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                    _ => print_runway(&report),
                }
            }

            Commands::Bills { format } => {
                let report = service.bills_report();
                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                    _ => print_bills(&report),
                }
            }

            Commands::PayBill { name } => {
                let bill = service.mark_bill_paid(&name)?;
                service.save(&self.data)?;
                println!(
                    "Marked paid: {} ({}, due {})",
                    bill.name,
                    format_money(bill.amount),
                    bill.due_date
                );
            }

            Commands::ResetBills => {
                let reset = service.reset_bills();
                service.save(&self.data)?;
                println!("Reset {} bill(s) to unpaid", reset);
            }

            Commands::Bill(bill_cmd) => {
                run_bill_command(&mut service, bill_cmd, &self.data)?;
            }

            Commands::Expense(expense_cmd) => {
                run_expense_command(&mut service, expense_cmd, &self.data)?;
            }

            Commands::Asset(asset_cmd) => {
                run_asset_command(&mut service, asset_cmd, &self.data)?;
            }

            Commands::Liability(liability_cmd) => {
                run_liability_command(&mut service, liability_cmd, &self.data)?;
            }

            Commands::Income(income_cmd) => {
                run_income_command(&mut service, income_cmd, &self.data)?;
            }

            Commands::Budget(budget_cmd) => {
                run_budget_command(&mut service, budget_cmd, &self.data)?;
            }

            Commands::Savings(savings_cmd) => {
                run_savings_command(&mut service, savings_cmd, &self.data)?;
            }

            Commands::Insights => {
                let input = service.insights_input();
                println!("{}", serde_json::to_string_pretty(&input)?);
            }

            Commands::Import {
                import_type,
                input,
                dry_run,
                skip_duplicates,
            } => {
                let options = ImportOptions {
                    dry_run,
                    skip_duplicates,
                };
                let reader = open_input(input.as_deref())?;
                let result = {
                    let mut importer = Importer::new(service.dataset_mut());
                    match import_type.as_str() {
                        "expenses" => importer.import_expenses_csv(reader, &options)?,
                        "bills" => importer.import_bills_csv(reader, &options)?,
                        other => bail!("Unknown import type '{}'. Valid types: expenses, bills", other),
                    }
                };
                if !dry_run {
                    service.save(&self.data)?;
                }
                print_import_result(&result, dry_run);
            }
        }

        Ok(())
    }
}

fn run_budget_command(
    service: &mut DashboardService,
    cmd: BudgetCommands,
    data: &Path,
) -> Result<()> {
    match cmd {
        BudgetCommands::Show { format } => {
            let report = service.budget_report();
            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&report)?),
                _ => print_budgets(&report),
            }
        }

        BudgetCommands::Set {
            category,
            amount,
            replace,
        } => {
            let allocated =
                parse_amount(&amount).context("Invalid amount format. Use '400.00' or '400'")?;
            let category = Category::parse(&category);
            if !category.is_recognized() {
                eprintln!("Note: '{}' is not a standard category", category);
            }

            let budget = service.set_budget(category, allocated, replace)?;
            service.save(data)?;
            if budget.is_tracking_only() {
                println!("Budget set: {} (tracking only, no limit)", budget.category);
            } else {
                println!(
                    "Budget set: {} ({} per month)",
                    budget.category,
                    format_money(budget.allocated)
                );
            }
        }

        BudgetCommands::Remove { category } => {
            let removed = service.remove_budget(&Category::parse(&category))?;
            service.save(data)?;
            println!("Removed budget: {}", removed.category);
        }
    }

    Ok(())
}

fn run_savings_command(
    service: &mut DashboardService,
    cmd: SavingsCommands,
    data: &Path,
) -> Result<()> {
    match cmd {
        SavingsCommands::Show { format } => {
            let goals = service.savings_report();
            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&goals)?),
                _ => print_goals(&goals),
            }
        }

        SavingsCommands::AddFunds { goal, amount } => {
            let amount = parse_amount(&amount).context("Invalid amount format. Use '50.00' or '50'")?;
            let line = service.add_funds(&goal, amount)?;
            service.save(data)?;
            println!(
                "Added {} to {}: {} / {} ({})",
                format_money(amount),
                line.goal.name,
                format_money(line.goal.current_amount),
                format_money(line.goal.target_amount),
                format_percent(line.progress.percent)
            );
        }

        SavingsCommands::Add {
            name,
            target,
            target_date,
        } => {
            let target = parse_amount(&target).context("Invalid amount format. Use '1000.00' or '1000'")?;
            let target_date = target_date.as_deref().map(parse_date).transpose()?;
            let line = service.add_goal(&name, target, target_date)?;
            service.save(data)?;
            println!(
                "Goal created: {} (target {})",
                line.goal.name,
                format_money(line.goal.target_amount)
            );
        }

        SavingsCommands::Remove { name } => {
            let goal = service.remove_goal(&name)?;
            service.save(data)?;
            println!("Removed goal: {}", goal.name);
        }
    }

    Ok(())
}

fn run_bill_command(service: &mut DashboardService, cmd: BillCommands, data: &Path) -> Result<()> {
    match cmd {
        BillCommands::Add {
            name,
            amount,
            due,
            category,
            liability,
        } => {
            let amount = parse_amount(&amount).context("Invalid amount format. Use '50.00' or '50'")?;
            let due_date = parse_date(&due)?;
            let category = Category::parse(&category);
            if !category.is_recognized() {
                eprintln!("Note: '{}' is not a standard category", category);
            }

            let bill = service.add_bill(&name, amount, due_date, category, liability.as_deref())?;
            service.save(data)?;
            println!(
                "Bill added: {} ({}, due {})",
                bill.name,
                format_money(bill.amount),
                bill.due_date
            );
        }

        BillCommands::Remove { name } => {
            let removed = service.remove_bill(&name)?;
            service.save(data)?;
            println!("Removed {} bill(s) named {}", removed.len(), name.trim());
        }
    }

    Ok(())
}

fn run_expense_command(
    service: &mut DashboardService,
    cmd: ExpenseCommands,
    data: &Path,
) -> Result<()> {
    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            date,
        } => {
            let amount = parse_amount(&amount).context("Invalid amount format. Use '12.50' or '12'")?;
            let date = match date {
                Some(date_str) => parse_date(&date_str)?,
                None => service.today(),
            };
            let category = Category::parse(&category);
            if !category.is_recognized() {
                eprintln!("Note: '{}' is not a standard category", category);
            }

            let expense = service.add_expense(&description, amount, date, category)?;
            service.save(data)?;
            println!(
                "Expense logged: {} {} on {} ({})",
                expense.description,
                format_money(expense.amount),
                expense.date,
                expense.id
            );
        }

        ExpenseCommands::List { format } => {
            let expenses = service.month_expenses();
            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&expenses)?),
                _ => print_expenses(&expenses),
            }
        }

        ExpenseCommands::Remove { id } => {
            let id = Uuid::parse_str(id.trim()).with_context(|| format!("Invalid expense id '{}'", id))?;
            let expense = service.remove_expense(id)?;
            service.save(data)?;
            println!(
                "Removed expense: {} ({})",
                expense.description,
                format_money(expense.amount)
            );
        }
    }

    Ok(())
}

fn run_asset_command(service: &mut DashboardService, cmd: AssetCommands, data: &Path) -> Result<()> {
    match cmd {
        AssetCommands::Add {
            name,
            value,
            asset_type,
        } => {
            let value = parse_amount(&value).context("Invalid amount format. Use '1000.00' or '1000'")?;
            let Some(asset_type) = AssetType::from_str(&asset_type) else {
                bail!(
                    "Unknown asset type '{}'. Valid types: cash, investment, property, other",
                    asset_type
                );
            };
            let asset = service.add_asset(&name, value, asset_type)?;
            service.save(data)?;
            println!(
                "Asset added: {} ({}, {})",
                asset.name,
                asset.asset_type,
                format_money(asset.value)
            );
        }

        AssetCommands::Remove { name } => {
            let asset = service.remove_asset(&name)?;
            service.save(data)?;
            println!("Removed asset: {}", asset.name);
        }
    }

    Ok(())
}

fn run_liability_command(
    service: &mut DashboardService,
    cmd: LiabilityCommands,
    data: &Path,
) -> Result<()> {
    match cmd {
        LiabilityCommands::Add {
            name,
            value,
            liability_type,
        } => {
            let value = parse_amount(&value).context("Invalid amount format. Use '1000.00' or '1000'")?;
            let Some(liability_type) = LiabilityType::from_str(&liability_type) else {
                bail!(
                    "Unknown liability type '{}'. Valid types: mortgage, loan, credit-card, other",
                    liability_type
                );
            };
            let liability = service.add_liability(&name, value, liability_type)?;
            service.save(data)?;
            println!(
                "Liability added: {} ({}, {})",
                liability.name,
                liability.liability_type,
                format_money(liability.value)
            );
        }

        LiabilityCommands::Remove { name } => {
            let liability = service.remove_liability(&name)?;
            service.save(data)?;
            println!("Removed liability: {}", liability.name);
        }
    }

    Ok(())
}

fn run_income_command(
    service: &mut DashboardService,
    cmd: IncomeCommands,
    data: &Path,
) -> Result<()> {
    match cmd {
        IncomeCommands::Add {
            name,
            amount,
            schedule,
        } => {
            let amount = parse_amount(&amount).context("Invalid amount format. Use '3000.00' or '3000'")?;
            let stream = service.add_income(&name, amount, Schedule::parse(&schedule))?;
            service.save(data)?;
            println!(
                "Income added: {} ({} {}, {} per month)",
                stream.name,
                format_money(stream.amount),
                stream.schedule,
                format_money(stream.monthly_amount())
            );
        }

        IncomeCommands::Remove { name } => {
            let stream = service.remove_income(&name)?;
            service.save(data)?;
            println!("Removed income: {}", stream.name);
        }
    }

    Ok(())
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD", date_str))
}

fn open_input(path: Option<&str>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdin())),
    }
}

fn print_overview(overview: &DashboardOverview) {
    println!("Dashboard ({})", overview.as_of);
    println!();
    println!("  Cash on hand:        {:>15}", format_money(overview.cash_on_hand));
    println!("  Daily income pace:   {:>15}", format_money(overview.daily_income_pace));
    println!("  Daily spending pace: {:>15}", format_money(overview.daily_spending_pace));
    println!(
        "  Upcoming bills:      {:>15}  (next {} days)",
        format_money(overview.upcoming_bills_total),
        overview.horizon_days
    );

    println!();
    println!("Upcoming Bills:");
    if overview.next_bills.is_empty() {
        println!("  No upcoming bills.");
    }
    for line in &overview.next_bills {
        println!(
            "  {:<25} {:<18} {:>12}",
            line.bill.name,
            line.status.to_string(),
            format_money(line.bill.amount)
        );
    }

    println!();
    println!("Recent Expenses:");
    if overview.recent_expenses.is_empty() {
        println!("  No expenses logged this month.");
    }
    for expense in &overview.recent_expenses {
        println!(
            "  {:<10} {:<25} {:<18} {:>12}",
            expense.date.format("%b %d"),
            expense.description,
            expense.category,
            format_money(expense.amount)
        );
    }

    println!();
    println!("Savings Goals:");
    if overview.goals.is_empty() {
        println!("  No savings goals set up yet.");
    }
    for line in &overview.goals {
        print_goal_line(line);
    }
}

fn print_net_worth(report: &NetWorthReport) {
    println!("Net Worth Report");
    println!();
    if !report.assets.is_empty() {
        println!("Assets:");
        for asset in &report.assets {
            println!(
                "  {:<25} {:<12} {:>15}",
                asset.name,
                asset.asset_type,
                format_money(asset.value)
            );
        }
        println!();
    }
    if !report.liabilities.is_empty() {
        println!("Liabilities:");
        for liability in &report.liabilities {
            println!(
                "  {:<25} {:<12} {:>15}",
                liability.name,
                liability.liability_type,
                format_money(liability.value)
            );
        }
        println!();
    }
    println!("Total Assets:       {:>15}", format_money(report.totals.total_assets));
    println!("Total Liabilities:  {:>15}", format_money(report.totals.total_liabilities));
    println!("{}", "-".repeat(35));
    println!("Net Worth:          {:>15}", format_money(report.totals.net_worth));

    let sign = if report.change.change >= Money::ZERO {
        "+"
    } else {
        ""
    };
    println!(
        "Change:             {:>15}  ({})",
        format!("{}{}", sign, format_money(report.change.change)),
        format_percent(report.change.change_percent)
    );

    if !report.history.is_empty() {
        println!();
        println!("History:");
        println!("  {:<12} {:<20} {:>15}", "DATE", "NAME", "NET WORTH");
        println!("  {}", "-".repeat(49));
        for point in &report.history {
            println!(
                "  {:<12} {:<20} {:>15}",
                point.date.format("%Y-%m-%d"),
                point.name.as_deref().unwrap_or(""),
                format_money(point.net_worth)
            );
        }
    }
}

fn print_runway(report: &RunwayReport) {
    println!("Personal Runway");
    println!();
    for stream in &report.income_streams {
        println!(
            "  {:<25} {:>12} {:<10} {:>12}/mo",
            stream.name,
            format_money(stream.amount),
            stream.schedule,
            format_money(stream.monthly_amount())
        );
    }
    if !report.income_streams.is_empty() {
        println!();
    }
    println!("Monthly Income:           {:>15}", format_money(report.monthly_income));
    println!("Fixed Expenses (Bills):   {:>15}", format_money(report.monthly_fixed));
    println!(
        "Variable Expenses (Avg.): {:>15}  ({}-month window)",
        format_money(report.monthly_variable_average),
        report.trailing_months
    );
    println!("Total Expenses:           {:>15}", format_money(report.monthly_total));
    println!("{}", "-".repeat(41));
    println!("Savings Velocity:         {:>15}", format_money(report.savings_velocity));
    println!(
        "Monthly Burn Rate:        {:>15}  ({})",
        format_money(report.burn_rate),
        if report.burn_rate > Money::ZERO {
            "cash flow negative"
        } else {
            "cash flow positive"
        }
    );
    println!("Cash on Hand:             {:>15}", format_money(report.cash_on_hand));
    println!("Runway:                   {:>15}", report.runway.to_string());
    println!();
    println!(
        "This month so far: fixed {}, variable {}, total {}",
        format_money(report.this_month.fixed),
        format_money(report.this_month.variable),
        format_money(report.this_month.total)
    );
}

fn print_bills(report: &BillsReport) {
    if report.bills.is_empty() {
        println!("No bills found.");
        return;
    }

    println!(
        "{:<25} {:<18} {:<12} {:<18} {:>12}",
        "BILL", "CATEGORY", "DUE", "STATUS", "AMOUNT"
    );
    println!("{}", "-".repeat(89));
    for line in &report.bills {
        println!(
            "{:<25} {:<18} {:<12} {:<18} {:>12}",
            line.bill.name,
            line.bill.category,
            line.bill.due_date.to_string(),
            line.status.to_string(),
            format_money(line.bill.amount)
        );
    }
    println!("{}", "-".repeat(89));
    println!("{:<25} {:>63}", "Overdue", format_money(report.overdue_total));
    println!(
        "{:<25} {:>63}",
        format!("Upcoming ({} days)", report.horizon_days),
        format_money(report.upcoming_total)
    );
}

fn print_expenses(expenses: &[Expense]) {
    if expenses.is_empty() {
        println!("No expenses logged this month.");
        return;
    }

    println!(
        "{:<36} {:<12} {:<25} {:<18} {:>12}",
        "ID", "DATE", "DESCRIPTION", "CATEGORY", "AMOUNT"
    );
    println!("{}", "-".repeat(107));
    for expense in expenses {
        println!(
            "{:<36} {:<12} {:<25} {:<18} {:>12}",
            expense.id.to_string(),
            expense.date.to_string(),
            expense.description,
            expense.category,
            format_money(expense.amount)
        );
    }
    println!("{}", "-".repeat(107));
    println!(
        "{:<36} {:>70}",
        "TOTAL",
        format_money(expenses.iter().map(|e| e.amount).sum())
    );
}

fn print_budgets(report: &BudgetReport) {
    if report.budgets.is_empty() {
        println!("No budgets found.");
        return;
    }

    println!("Budgets for {}", report.month_start.format("%B %Y"));
    println!();
    println!(
        "{:<20} {:>12} {:>12} {:>12} {:>10}",
        "CATEGORY", "LIMIT", "SPENT", "REMAINING", "USED"
    );
    println!("{}", "-".repeat(70));
    for budget in &report.budgets {
        let marker = if budget.is_overspent { " !" } else { "" };
        println!(
            "{:<20} {:>12} {:>12} {:>12} {:>10}{}",
            budget.category,
            format_money(budget.allocated),
            format_money(budget.spent),
            format_money(budget.remaining()),
            format_percent(budget.percent),
            marker
        );
    }
    println!("{}", "-".repeat(70));
    println!(
        "{:<20} {:>12} {:>12}",
        "TOTAL",
        format_money(report.total_allocated),
        format_money(report.total_spent)
    );
}

fn print_goals(goals: &[GoalLine]) {
    if goals.is_empty() {
        println!("No savings goals found.");
        return;
    }
    for line in goals {
        print_goal_line(line);
    }
}

fn print_goal_line(line: &GoalLine) {
    let done = if line.progress.is_complete { " (complete)" } else { "" };
    println!(
        "  {:<25} {:>12} / {:<12} {:>9}{}",
        line.goal.name,
        format_money(line.goal.current_amount),
        format_money(line.goal.target_amount),
        format_percent(line.progress.percent),
        done
    );
}

fn print_import_result(result: &ImportResult, dry_run: bool) {
    if dry_run {
        println!("Dry run complete");
    } else {
        println!("Import complete");
    }
    println!("  Imported: {}", result.imported);
    println!("  Skipped:  {}", result.skipped);
    println!("  Errors:   {}", result.errors.len());

    if !result.errors.is_empty() {
        println!("\nErrors:");
        for error in result.errors.iter().take(10) {
            println!(
                "  Line {}: {}{}",
                error.line,
                error
                    .field
                    .as_ref()
                    .map(|f| format!("[{}] ", f))
                    .unwrap_or_default(),
                error.error
            );
        }
        if result.errors.len() > 10 {
            println!("  ... and {} more errors", result.errors.len() - 10);
        }
    }
}
