//! The ledger store: transactions, category taxonomy and currency, kept in
//! sync with a key-value persistence surface.
//!
//! Every mutator works on a copy of the state, persists the copy, and only
//! then swaps it in. When the write fails the error is returned and the
//! in-memory state is untouched, so memory and storage never diverge.

use crate::{
    currency,
    domain::{
        AmountPolicy, CategoryTaxonomy, LedgerState, Summary, Transaction, TransactionDraft,
        TransactionId, TransactionKind,
    },
    errors::Result,
    storage::{self, KeyValueStore},
    time::{self, Clock, SystemClock},
};

pub struct LedgerStore {
    state: LedgerState,
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    policy: AmountPolicy,
    last_id: Option<TransactionId>,
    load_warnings: Vec<String>,
}

impl LedgerStore {
    /// Hydrates from `storage` with the system clock and the strict amount policy.
    pub fn open(storage: Box<dyn KeyValueStore>) -> Self {
        Self::with_options(storage, Box::new(SystemClock), AmountPolicy::default())
    }

    pub fn with_options(
        storage: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
        policy: AmountPolicy,
    ) -> Self {
        let report = storage::hydrate(storage.as_ref());
        tracing::info!(
            transactions = report.state.transactions.len(),
            category_types = report.state.categories.kinds().count(),
            defaulted = report.warnings.len(),
            "ledger store opened"
        );
        Self {
            last_id: report.state.max_transaction_id(),
            state: report.state,
            storage,
            clock,
            policy,
            load_warnings: report.warnings,
        }
    }

    /// Appends a transaction built from `draft` and returns its new id.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<TransactionId> {
        let amount = draft.amount.coerce(self.policy)?;
        let id = time::next_transaction_id(self.clock.as_ref(), self.last_id)?;
        let mut next = self.state.clone();
        next.transactions.push(Transaction::from_draft(id, draft, amount));
        self.commit(next)?;
        self.last_id = Some(id);
        tracing::debug!(id, amount, "transaction added");
        Ok(id)
    }

    /// Replaces the transaction with `id` wholesale. Returns `false` without
    /// writing anything when no transaction has that id.
    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        replacement: Transaction,
    ) -> Result<bool> {
        let Some(index) = self.state.transactions.iter().position(|txn| txn.id == id) else {
            tracing::debug!(id, "update ignored, no such transaction");
            return Ok(false);
        };
        let replacement_id = replacement.id;
        let mut next = self.state.clone();
        next.transactions[index] = replacement;
        self.commit(next)?;
        self.last_id = self.last_id.max(Some(replacement_id));
        tracing::debug!(id, "transaction updated");
        Ok(true)
    }

    /// Removes every transaction with `id` and returns how many went. Persists
    /// even when nothing matched.
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<usize> {
        let mut next = self.state.clone();
        next.transactions.retain(|txn| txn.id != id);
        let removed = self.state.transactions.len() - next.transactions.len();
        self.commit(next)?;
        tracing::debug!(id, removed, "transaction deleted");
        Ok(removed)
    }

    /// Adds `name` under `kind` unless it is already there. Persists only on change.
    pub fn add_category(&mut self, kind: &str, name: &str) -> Result<bool> {
        if self.state.categories.contains(kind, name) {
            return Ok(false);
        }
        let mut next = self.state.clone();
        next.categories.insert(kind, name);
        self.commit(next)?;
        tracing::debug!(kind, name, "category added");
        Ok(true)
    }

    /// Removes `name` from `kind` and clears it from matching transactions,
    /// which are kept. Returns how many transactions were cleared. Always persists.
    pub fn delete_category(&mut self, kind: &str, name: &str) -> Result<usize> {
        let mut next = self.state.clone();
        next.categories.remove(kind, name);
        let mut cleared = 0;
        for txn in next
            .transactions
            .iter_mut()
            .filter(|txn| txn.kind.as_str() == kind && txn.category == name)
        {
            txn.category.clear();
            cleared += 1;
        }
        self.commit(next)?;
        tracing::debug!(kind, name, cleared, "category deleted");
        Ok(cleared)
    }

    pub fn set_currency(&mut self, symbol: impl Into<String>) -> Result<()> {
        let mut next = self.state.clone();
        next.currency = symbol.into();
        self.commit(next)?;
        tracing::debug!(currency = %self.state.currency, "currency set");
        Ok(())
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.state.transaction(id)
    }

    pub fn categories(&self) -> &CategoryTaxonomy {
        &self.state.categories
    }

    pub fn categories_for(&self, kind: &str) -> &[String] {
        self.state.categories.get(kind).unwrap_or_default()
    }

    pub fn currency(&self) -> &str {
        &self.state.currency
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn amount_policy(&self) -> AmountPolicy {
        self.policy
    }

    /// Values that were present in storage but unusable and got defaulted at open.
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn total_income(&self) -> f64 {
        self.state.total_income()
    }

    pub fn total_expenses(&self) -> f64 {
        self.state.total_expenses()
    }

    pub fn balance(&self) -> f64 {
        self.state.balance()
    }

    pub fn summary(&self) -> Summary {
        self.state.summary()
    }

    pub fn totals_by_category(&self, kind: &TransactionKind) -> Vec<(String, f64)> {
        self.state.totals_by_category(kind)
    }

    /// `amount` rendered with the current currency symbol.
    pub fn format_amount(&self, amount: f64) -> String {
        currency::format_amount(&self.state.currency, amount)
    }

    fn commit(&mut self, next: LedgerState) -> Result<()> {
        storage::persist(self.storage.as_ref(), &next)?;
        self.state = next;
        Ok(())
    }
}
