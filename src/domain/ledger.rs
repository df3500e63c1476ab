use serde::{Deserialize, Serialize};

use crate::domain::{
    category::CategoryTaxonomy,
    transaction::{Transaction, TransactionKind},
    TransactionId,
};

pub const DEFAULT_CURRENCY: &str = "$";

/// Everything the store owns, persisted as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    pub transactions: Vec<Transaction>,
    pub categories: CategoryTaxonomy,
    pub currency: String,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            categories: CategoryTaxonomy::default(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Totals derived from the current transactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub transaction_count: usize,
}

impl LedgerState {
    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn max_transaction_id(&self) -> Option<TransactionId> {
        self.transactions.iter().map(|txn| txn.id).max()
    }

    pub fn total_for(&self, kind: &TransactionKind) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| txn.is_kind(kind))
            .map(|txn| txn.amount)
            .sum()
    }

    pub fn total_income(&self) -> f64 {
        self.total_for(&TransactionKind::Income)
    }

    pub fn total_expenses(&self) -> f64 {
        self.total_for(&TransactionKind::Expense)
    }

    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expenses()
    }

    pub fn summary(&self) -> Summary {
        let total_income = self.total_income();
        let total_expenses = self.total_expenses();
        Summary {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            transaction_count: self.transactions.len(),
        }
    }

    /// Per-category sums for one type: taxonomy categories first (zero when
    /// unused), then names only seen on transactions in first-seen order.
    pub fn totals_by_category(&self, kind: &TransactionKind) -> Vec<(String, f64)> {
        let mut totals: Vec<(String, f64)> = self
            .categories
            .get(kind.as_str())
            .unwrap_or_default()
            .iter()
            .map(|name| (name.clone(), 0.0))
            .collect();

        for txn in self.transactions.iter().filter(|txn| txn.is_kind(kind)) {
            match totals.iter_mut().find(|(name, _)| name == &txn.category) {
                Some((_, total)) => *total += txn.amount,
                None => totals.push((txn.category.clone(), txn.amount)),
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::TransactionDraft;

    fn record(id: TransactionId, kind: &str, category: &str, amount: f64) -> Transaction {
        Transaction::from_draft(id, TransactionDraft::new(kind, category, amount), amount)
    }

    #[test]
    fn totals_split_by_type() {
        let mut state = LedgerState::default();
        state.transactions.push(record(1, "Income", "Salary", 1000.0));
        state.transactions.push(record(2, "Expense", "Food", 200.0));
        state.transactions.push(record(3, "Transfer", "Savings", 50.0));

        let summary = state.summary();
        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.total_expenses, 200.0);
        assert_eq!(summary.balance, 800.0);
        assert_eq!(summary.transaction_count, 3);
    }

    #[test]
    fn category_breakdown_keeps_taxonomy_order() {
        let mut state = LedgerState::default();
        state.transactions.push(record(1, "Expense", "Rent", 900.0));
        state.transactions.push(record(2, "Expense", "Food", 20.0));
        state.transactions.push(record(3, "Expense", "Food", 5.5));
        state.transactions.push(record(4, "Expense", "", 3.0));

        let totals = state.totals_by_category(&TransactionKind::Expense);
        let names: Vec<&str> = totals.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            ["Food", "Transport", "Rent", "Utilities", "Entertainment", ""]
        );
        assert_eq!(totals[0].1, 25.5);
        assert_eq!(totals[1].1, 0.0);
        assert_eq!(totals[5].1, 3.0);
    }

    #[test]
    fn empty_state_sums_to_zero() {
        let state = LedgerState::default();
        assert_eq!(state.balance(), 0.0);
        assert!(state.totals_by_category(&TransactionKind::Other("Gift".into())).is_empty());
    }
}
