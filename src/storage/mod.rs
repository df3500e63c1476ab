pub mod json_backend;
pub mod memory;

use serde::de::DeserializeOwned;

use crate::{
    domain::{CategoryTaxonomy, LedgerState, Transaction, DEFAULT_CURRENCY},
    errors::Result,
};

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const CATEGORIES_KEY: &str = "categories";
pub const CURRENCY_KEY: &str = "currency";

/// Synchronous string key-value surface the ledger is persisted to.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes every entry or none of them.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value.to_string())])
    }
}

/// Outcome of reading the ledger back from a persistence surface.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub state: LedgerState,
    /// One entry per value that was present but unusable and got defaulted.
    pub warnings: Vec<String>,
}

/// Reads all three values, substituting the default for any that is absent or unusable.
pub fn hydrate(storage: &dyn KeyValueStore) -> LoadReport {
    let mut warnings = Vec::new();
    let defaults = LedgerState::default();

    let transactions = read_value::<Vec<Transaction>>(storage, TRANSACTIONS_KEY, &mut warnings)
        .unwrap_or(defaults.transactions);
    let categories = read_value::<CategoryTaxonomy>(storage, CATEGORIES_KEY, &mut warnings)
        .unwrap_or(defaults.categories);
    let currency = read_value::<String>(storage, CURRENCY_KEY, &mut warnings)
        .filter(|symbol| !symbol.is_empty())
        .unwrap_or(defaults.currency);

    LoadReport {
        state: LedgerState {
            transactions,
            categories,
            currency,
        },
        warnings,
    }
}

/// Serializes the full state and writes it as one batch.
pub fn persist(storage: &dyn KeyValueStore, state: &LedgerState) -> Result<()> {
    let entries = [
        (TRANSACTIONS_KEY, serde_json::to_string(&state.transactions)?),
        (CATEGORIES_KEY, serde_json::to_string(&state.categories)?),
        (CURRENCY_KEY, serde_json::to_string(&state.currency)?),
    ];
    storage.set_many(&entries)
}

fn read_value<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no persisted value, using default");
            return None;
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "unreadable persisted value, using default");
            warnings.push(format!("{key}: {err}"));
            return None;
        }
    };
    // `null` counts as absent.
    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "malformed persisted value, using default");
            warnings.push(format!("{key}: {err}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_surface_hydrates_defaults_without_warnings() {
        let storage = MemoryStore::new();
        let report = hydrate(&storage);
        assert_eq!(report.state, LedgerState::default());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn each_key_falls_back_independently() {
        let storage = MemoryStore::new();
        storage.set(TRANSACTIONS_KEY, "{not json").unwrap();
        storage.set(CATEGORIES_KEY, r#"{"Income":["Salary"]}"#).unwrap();
        storage.set(CURRENCY_KEY, "42").unwrap();

        let report = hydrate(&storage);
        assert!(report.state.transactions.is_empty());
        assert_eq!(
            report.state.categories.get("Income").unwrap(),
            ["Salary".to_string()]
        );
        assert!(report.state.categories.get("Expense").is_none());
        assert_eq!(report.state.currency, DEFAULT_CURRENCY);
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn null_and_empty_currency_use_defaults() {
        let storage = MemoryStore::new();
        storage.set(TRANSACTIONS_KEY, "null").unwrap();
        storage.set(CURRENCY_KEY, "\"\"").unwrap();
        let report = hydrate(&storage);
        assert!(report.state.transactions.is_empty());
        assert_eq!(report.state.currency, "$");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn persist_writes_all_keys_in_one_batch() {
        let storage = MemoryStore::new();
        let mut state = LedgerState::default();
        state.currency = "€".into();
        persist(&storage, &state).unwrap();

        assert_eq!(storage.write_count(), 1);
        assert_eq!(storage.get(CURRENCY_KEY).unwrap().as_deref(), Some("\"€\""));
        assert_eq!(hydrate(&storage).state, state);
    }
}
