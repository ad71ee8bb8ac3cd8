use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::domain::{
    Asset, Bill, BudgetAllocation, Expense, IncomeStream, Liability, NetWorthSnapshot, SavingsGoal,
};

pub const DATASET_VERSION: &str = "1";

fn default_version() -> String {
    DATASET_VERSION.to_string()
}

/// Every collection the dashboard reads, kept together in one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub liabilities: Vec<Liability>,
    #[serde(default)]
    pub income_streams: Vec<IncomeStream>,
    #[serde(default)]
    pub budgets: Vec<BudgetAllocation>,
    #[serde(default)]
    pub savings_goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub net_worth_snapshots: Vec<NetWorthSnapshot>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

impl Dataset {
    pub fn new() -> Self {
        Self {
            version: default_version(),
            saved_at: None,
            bills: Vec::new(),
            expenses: Vec::new(),
            assets: Vec::new(),
            liabilities: Vec::new(),
            income_streams: Vec::new(),
            budgets: Vec::new(),
            savings_goals: Vec::new(),
            net_worth_snapshots: Vec::new(),
        }
    }

    /// Create an empty data file. Refuses to overwrite an existing one.
    pub fn init(path: &Path) -> Result<Self> {
        if path.exists() {
            bail!("Data file already exists: {}", path.display());
        }
        let mut dataset = Self::new();
        dataset.save(path)?;
        Ok(dataset)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open data file {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to read data file {}", path.display()))
    }

    /// Write the dataset next to `path` and move it into place, so a failed
    /// write never leaves a truncated data file behind.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.saved_at = Some(Utc::now());
        write_atomically(path, |writer| self.to_writer(writer))
            .with_context(|| format!("Failed to write data file {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dataset: Dataset = serde_json::from_reader(reader).context("Invalid dataset JSON")?;
        if dataset.version != DATASET_VERSION {
            bail!(
                "Unsupported dataset version {} (expected {})",
                dataset.version,
                DATASET_VERSION
            );
        }
        Ok(dataset)
    }

    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Sequence number for the next snapshot.
    pub fn next_sequence(&self) -> i64 {
        self.net_worth_snapshots
            .iter()
            .map(|s| s.sequence)
            .max()
            .map_or(1, |max| max + 1)
    }

    pub fn record_count(&self) -> usize {
        self.bills.len()
            + self.expenses.len()
            + self.assets.len()
            + self.liabilities.len()
            + self.income_streams.len()
            + self.budgets.len()
            + self.savings_goals.len()
            + self.net_worth_snapshots.len()
    }
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    {
        let mut writer = BufWriter::new(&mut temp);
        write(&mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path)?;
    Ok(())
}
