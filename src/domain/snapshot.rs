use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Money;

pub type SnapshotId = Uuid;

/// A point-in-time record of net worth. Snapshots are immutable once taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetWorthSnapshot {
    #[serde(default = "Uuid::new_v4")]
    pub id: SnapshotId,
    /// Monotonically increasing insertion order; breaks ties between
    /// snapshots taken at the same instant.
    #[serde(default)]
    pub sequence: i64,
    #[serde(rename = "date")]
    pub taken_at: DateTime<Utc>,
    pub assets: Money,
    pub liabilities: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl NetWorthSnapshot {
    /// Sequence number must be assigned by the dataset.
    pub fn capture(
        assets: Money,
        liabilities: Money,
        taken_at: DateTime<Utc>,
        sequence: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence,
            taken_at,
            assets,
            liabilities,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn net_worth(&self) -> Money {
        self.assets - self.liabilities
    }

    /// Ordering key: a greater key is more recent.
    pub fn recency_key(&self) -> (DateTime<Utc>, i64) {
        (self.taken_at, self.sequence)
    }
}
