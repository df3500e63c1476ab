//! Category names grouped by transaction type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const DEFAULT_INCOME: [&str; 5] = ["Salary", "Bonus", "Freelance", "Investment", "Gift"];
const DEFAULT_EXPENSE: [&str; 5] = ["Food", "Transport", "Rent", "Utilities", "Entertainment"];

/// Mapping from transaction type name to its ordered, duplicate-free category names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTaxonomy(BTreeMap<String, Vec<String>>);

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        let mut groups = BTreeMap::new();
        groups.insert(
            "Income".to_string(),
            DEFAULT_INCOME.iter().map(|name| name.to_string()).collect(),
        );
        groups.insert(
            "Expense".to_string(),
            DEFAULT_EXPENSE.iter().map(|name| name.to_string()).collect(),
        );
        Self(groups)
    }
}

impl CategoryTaxonomy {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, kind: &str) -> Option<&[String]> {
        self.0.get(kind).map(Vec::as_slice)
    }

    pub fn contains(&self, kind: &str, name: &str) -> bool {
        self.get(kind)
            .map_or(false, |names| names.iter().any(|existing| existing == name))
    }

    /// Ensures `kind` has an entry, then appends `name` unless already present.
    /// Returns whether the name was appended.
    pub fn insert(&mut self, kind: &str, name: &str) -> bool {
        let names = self.0.entry(kind.to_string()).or_default();
        if names.iter().any(|existing| existing == name) {
            return false;
        }
        names.push(name.to_string());
        true
    }

    /// Removes `name` from `kind`; an unknown `kind` is left absent.
    pub fn remove(&mut self, kind: &str, name: &str) -> bool {
        match self.0.get_mut(kind) {
            Some(names) => {
                let before = names.len();
                names.retain(|existing| existing != name);
                names.len() != before
            }
            None => false,
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(kind, names)| (kind.as_str(), names.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hold_both_builtin_types() {
        let taxonomy = CategoryTaxonomy::default();
        assert_eq!(taxonomy.get("Income").unwrap()[0], "Salary");
        assert_eq!(taxonomy.get("Expense").unwrap().len(), 5);
        assert!(taxonomy.contains("Expense", "Rent"));
        assert!(!taxonomy.contains("Expense", "rent"));
    }

    #[test]
    fn insert_creates_missing_type_and_skips_duplicates() {
        let mut taxonomy = CategoryTaxonomy::empty();
        assert!(taxonomy.insert("Transfer", "Savings"));
        assert!(!taxonomy.insert("Transfer", "Savings"));
        assert_eq!(taxonomy.get("Transfer").unwrap(), ["Savings".to_string()]);
    }

    #[test]
    fn remove_on_unknown_type_does_not_create_it() {
        let mut taxonomy = CategoryTaxonomy::empty();
        assert!(!taxonomy.remove("Expense", "Food"));
        assert!(taxonomy.is_empty());
    }

    #[test]
    fn serializes_as_plain_object() {
        let json = serde_json::to_string(&CategoryTaxonomy::default()).unwrap();
        assert!(json.starts_with("{\"Expense\":[\"Food\""));
    }
}
