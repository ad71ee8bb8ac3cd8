use serde::{Deserialize, Serialize};

/// Spending category shared by bills, expenses and budget allocations.
///
/// The named variants are the labels the app offers. Anything else is kept
/// verbatim in `Unrecognized` so the record still counts in every total and
/// can still be matched against a budget with the same label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    // Bill categories
    Electricity,
    Gas,
    Gym,
    HealthInsurance,
    Housing,
    Internet,
    LoanPayment,
    Mobile,
    Subscriptions,
    Water,

    // Expense categories
    Food,
    DiningOut,
    Transportation,
    Household,
    Education,
    Health,
    Beauty,
    Gifts,
    SelfDevelopment,
    Entertainment,

    Other,
    Unrecognized(String),
}

impl Category {
    pub const BILL: [Category; 11] = [
        Category::Electricity,
        Category::Gas,
        Category::Gym,
        Category::HealthInsurance,
        Category::Housing,
        Category::Internet,
        Category::LoanPayment,
        Category::Mobile,
        Category::Subscriptions,
        Category::Water,
        Category::Other,
    ];

    pub const EXPENSE: [Category; 11] = [
        Category::Food,
        Category::DiningOut,
        Category::Transportation,
        Category::Household,
        Category::Education,
        Category::Health,
        Category::Beauty,
        Category::Gifts,
        Category::SelfDevelopment,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Electricity => "Electricity",
            Category::Gas => "Gas",
            Category::Gym => "Gym",
            Category::HealthInsurance => "Health Insurance",
            Category::Housing => "Housing",
            Category::Internet => "Internet",
            Category::LoanPayment => "Loan Payment",
            Category::Mobile => "Mobile",
            Category::Subscriptions => "Subscriptions",
            Category::Water => "Water",
            Category::Food => "Food",
            Category::DiningOut => "Dining Out",
            Category::Transportation => "Transportation",
            Category::Household => "Household",
            Category::Education => "Education",
            Category::Health => "Health",
            Category::Beauty => "Beauty",
            Category::Gifts => "Gifts",
            Category::SelfDevelopment => "Self-development",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
            Category::Unrecognized(label) => label,
        }
    }

    /// Parse a label, case-insensitively. Never fails.
    ///
    /// Unrecognized labels are stored title-cased with single spaces, so
    /// "pets", "PETS" and " Pets " all compare equal.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        Self::BILL
            .iter()
            .chain(Self::EXPENSE.iter())
            .find(|known| known.as_str().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| Category::Unrecognized(normalize_label(trimmed)))
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }
}

fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::parse(&s)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Unrecognized(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in Category::BILL.iter().chain(Category::EXPENSE.iter()) {
            assert_eq!(&Category::parse(category.as_str()), category);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Category::parse("dining out"), Category::DiningOut);
        assert_eq!(Category::parse("  HEALTH INSURANCE "), Category::HealthInsurance);
    }

    #[test]
    fn test_unrecognized_keeps_label() {
        let category = Category::parse("Pets");
        assert_eq!(category, Category::Unrecognized("Pets".to_string()));
        assert!(!category.is_recognized());
        assert_eq!(category.as_str(), "Pets");
    }

    #[test]
    fn test_unrecognized_labels_ignore_case() {
        let pets = Category::parse("Pets");
        assert_eq!(Category::parse("pets"), pets);
        assert_eq!(Category::parse("  PETS "), pets);
        assert_eq!(
            Category::parse("pet   care"),
            Category::Unrecognized("Pet Care".to_string())
        );
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&Category::LoanPayment).unwrap();
        assert_eq!(json, "\"Loan Payment\"");

        let parsed: Category = serde_json::from_str("\"Vet\"").unwrap();
        assert_eq!(parsed, Category::Unrecognized("Vet".to_string()));
    }
}
