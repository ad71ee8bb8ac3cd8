use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Category, Money};

pub type BudgetId = Uuid;

/// Monthly spending ceiling for one category.
/// An allocation of zero is valid and means "track only".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAllocation {
    #[serde(default = "Uuid::new_v4")]
    pub id: BudgetId,
    pub category: Category,
    pub allocated: Money,
}

impl BudgetAllocation {
    pub fn new(category: Category, allocated: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            allocated,
        }
    }

    pub fn is_tracking_only(&self) -> bool {
        self.allocated.is_zero()
    }
}
