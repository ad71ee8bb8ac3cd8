use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Money;

pub type AssetId = Uuid;
pub type LiabilityId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    /// Checking, savings, cash in hand. Counts as cash on hand for runway.
    Cash,
    Investment,
    Property,
    #[serde(other)]
    Other,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Cash => "Cash",
            AssetType::Investment => "Investment",
            AssetType::Property => "Property",
            AssetType::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(AssetType::Cash),
            "investment" => Some(AssetType::Investment),
            "property" => Some(AssetType::Property),
            "other" => Some(AssetType::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiabilityType {
    Mortgage,
    Loan,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(other)]
    Other,
}

impl LiabilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiabilityType::Mortgage => "Mortgage",
            LiabilityType::Loan => "Loan",
            LiabilityType::CreditCard => "Credit Card",
            LiabilityType::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "mortgage" => Some(LiabilityType::Mortgage),
            "loan" => Some(LiabilityType::Loan),
            "credit card" | "creditcard" => Some(LiabilityType::CreditCard),
            "other" => Some(LiabilityType::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for LiabilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Something you own, at its current value. No transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(default = "Uuid::new_v4")]
    pub id: AssetId,
    pub name: String,
    pub value: Money,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
}

impl Asset {
    pub fn new(name: String, value: Money, asset_type: AssetType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            value,
            asset_type,
        }
    }

    pub fn is_cash(&self) -> bool {
        self.asset_type == AssetType::Cash
    }
}

/// Something you owe, at its current balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liability {
    #[serde(default = "Uuid::new_v4")]
    pub id: LiabilityId,
    pub name: String,
    pub value: Money,
    #[serde(rename = "type")]
    pub liability_type: LiabilityType,
}

impl Liability {
    pub fn new(name: String, value: Money, liability_type: LiabilityType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            value,
            liability_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_roundtrip() {
        for at in [
            AssetType::Cash,
            AssetType::Investment,
            AssetType::Property,
            AssetType::Other,
        ] {
            assert_eq!(AssetType::from_str(at.as_str()), Some(at));
        }
    }

    #[test]
    fn test_liability_type_from_str() {
        assert_eq!(LiabilityType::from_str("credit-card"), Some(LiabilityType::CreditCard));
        assert_eq!(LiabilityType::from_str("Credit Card"), Some(LiabilityType::CreditCard));
        assert_eq!(LiabilityType::from_str("MORTGAGE"), Some(LiabilityType::Mortgage));
        assert_eq!(LiabilityType::from_str("payday"), None);
    }

    #[test]
    fn test_unknown_liability_type_reads_as_other() {
        let parsed: LiabilityType = serde_json::from_str("\"Payday Loan\"").unwrap();
        assert_eq!(parsed, LiabilityType::Other);

        let card: LiabilityType = serde_json::from_str("\"Credit Card\"").unwrap();
        assert_eq!(card, LiabilityType::CreditCard);
    }
}
