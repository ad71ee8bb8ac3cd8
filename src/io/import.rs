use anyhow::Result;
use chrono::NaiveDate;
use std::io::Read;

use crate::domain::{self, Bill, Category, Expense, Money};
use crate::io::Dataset;

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

impl ImportError {
    fn at(line: usize, field: &str, error: impl Into<String>) -> Self {
        Self {
            line,
            field: Some(field.to_string()),
            error: error.into(),
        }
    }
}

/// Options for import operations
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub dry_run: bool,
    pub skip_duplicates: bool,
}

/// Importer for loading CSV rows into a dataset.
///
/// Expenses: `date,description,amount,category`
/// Bills: `name,amount,due_date,category,paid`
pub struct Importer<'a> {
    dataset: &'a mut Dataset,
}

impl<'a> Importer<'a> {
    pub fn new(dataset: &'a mut Dataset) -> Self {
        Self { dataset }
    }

    /// Import expenses from CSV
    pub fn import_expenses_csv<R: Read>(
        &mut self,
        reader: R,
        options: &ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut result = ImportResult::empty();

        for (line_num, record) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    result.errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let date = match parse_date(record.get(0).unwrap_or("")) {
                Ok(d) => d,
                Err(e) => {
                    result.errors.push(ImportError::at(line, "date", e));
                    continue;
                }
            };

            let description = record.get(1).unwrap_or("").trim().to_string();
            if description.is_empty() {
                result
                    .errors
                    .push(ImportError::at(line, "description", "Description is required"));
                continue;
            }

            let amount = match parse_amount(record.get(2).unwrap_or("")) {
                Ok(a) => a,
                Err(e) => {
                    result.errors.push(ImportError::at(line, "amount", e));
                    continue;
                }
            };

            let category = Category::parse(record.get(3).unwrap_or("Other"));
            let expense = Expense::new(description, amount, date, category);

            if options.skip_duplicates
                && self
                    .dataset
                    .expenses
                    .iter()
                    .any(|existing| existing.is_duplicate_of(&expense))
            {
                result.skipped += 1;
                continue;
            }

            if !options.dry_run {
                self.dataset.expenses.push(expense);
            }
            result.imported += 1;
        }

        tracing::debug!(
            imported = result.imported,
            skipped = result.skipped,
            errors = result.errors.len(),
            "expense import finished"
        );
        Ok(result)
    }

    /// Import bills from CSV
    pub fn import_bills_csv<R: Read>(
        &mut self,
        reader: R,
        options: &ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut result = ImportResult::empty();

        for (line_num, record) in csv_reader.records().enumerate() {
            let line = line_num + 2;

            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    result.errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let name = record.get(0).unwrap_or("").trim().to_string();
            if name.is_empty() {
                result
                    .errors
                    .push(ImportError::at(line, "name", "Name is required"));
                continue;
            }

            let amount = match parse_amount(record.get(1).unwrap_or("")) {
                Ok(a) => a,
                Err(e) => {
                    result.errors.push(ImportError::at(line, "amount", e));
                    continue;
                }
            };

            let due_date = match parse_date(record.get(2).unwrap_or("")) {
                Ok(d) => d,
                Err(e) => {
                    result.errors.push(ImportError::at(line, "due_date", e));
                    continue;
                }
            };

            let category = Category::parse(record.get(3).unwrap_or("Other"));

            let paid = match parse_paid(record.get(4).unwrap_or("")) {
                Ok(p) => p,
                Err(e) => {
                    result.errors.push(ImportError::at(line, "paid", e));
                    continue;
                }
            };

            let mut bill = Bill::new(name, amount, due_date, category);
            if paid {
                bill.mark_paid();
            }

            if options.skip_duplicates
                && self.dataset.bills.iter().any(|existing| {
                    existing.name == bill.name
                        && existing.due_date == bill.due_date
                        && existing.amount == bill.amount
                })
            {
                result.skipped += 1;
                continue;
            }

            if !options.dry_run {
                self.dataset.bills.push(bill);
            }
            result.imported += 1;
        }

        tracing::debug!(
            imported = result.imported,
            skipped = result.skipped,
            errors = result.errors.len(),
            "bill import finished"
        );
        Ok(result)
    }
}

impl ImportResult {
    fn empty() -> Self {
        Self {
            imported: 0,
            skipped: 0,
            errors: Vec::new(),
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn parse_amount(s: &str) -> Result<Money, String> {
    domain::parse_amount(s).map_err(|e| format!("Invalid amount '{}': {}", s, e))
}

fn parse_paid(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "" | "false" | "no" | "0" => Ok(false),
        "true" | "yes" | "1" => Ok(true),
        other => Err(format!("Invalid paid flag '{}'", other)),
    }
}
