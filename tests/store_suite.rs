mod common;

use std::fs;

use common::{ledger_path, open_store, setup_test_env, temp_base};
use tally::{
    storage::{JsonFileStore, KeyValueStore, CATEGORIES_KEY, CURRENCY_KEY, TRANSACTIONS_KEY},
    TransactionDraft, TransactionKind,
};

#[test]
fn reopened_store_sees_the_previous_session() {
    let (mut store, _config, base) = setup_test_env();
    let draft = TransactionDraft::new("Income", "Salary", "1000").with_detail("date", "2024-05-01");
    let salary = store.add_transaction(draft).unwrap();
    store.add_transaction(TransactionDraft::new("Expense", "Food", "200")).unwrap();
    store.add_category("Expense", "Pets").unwrap();
    store.set_currency("€").unwrap();
    let before = store.state().clone();
    drop(store);

    let reopened = open_store(&base);
    assert_eq!(reopened.state(), &before);
    assert!(reopened.load_warnings().is_empty());
    assert_eq!(reopened.balance(), 800.0);
    assert_eq!(
        reopened.transaction(salary).and_then(|txn| txn.detail("date")),
        Some(&serde_json::Value::from("2024-05-01"))
    );
    assert_eq!(reopened.format_amount(reopened.balance()), "€800.00");
}

#[test]
fn ids_keep_increasing_across_sessions() {
    let base = temp_base();
    let mut first = open_store(&base);
    let a = first.add_transaction(TransactionDraft::new("Income", "Gift", 5.0)).unwrap();
    drop(first);

    let mut second = open_store(&base);
    let b = second.add_transaction(TransactionDraft::new("Income", "Gift", 5.0)).unwrap();
    assert!(b > a);
}

#[test]
fn all_three_keys_land_in_one_document() {
    let (mut store, _config, base) = setup_test_env();
    store.add_transaction(TransactionDraft::new("Expense", "Rent", "750")).unwrap();

    let raw = fs::read_to_string(ledger_path(&base)).unwrap();
    let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&raw).unwrap();
    for key in [TRANSACTIONS_KEY, CATEGORIES_KEY, CURRENCY_KEY] {
        assert!(document.get(key).is_some_and(|value| value.is_string()), "{key}");
    }
    assert!(!ledger_path(&base).with_extension("json.tmp").exists());
}

#[test]
fn corrupt_file_hydrates_defaults_and_is_replaced_on_write() {
    let base = temp_base();
    fs::write(ledger_path(&base), "{{ definitely not json").unwrap();

    let mut store = open_store(&base);
    assert!(store.transactions().is_empty());
    assert_eq!(store.currency(), "$");
    assert_eq!(store.load_warnings().len(), 3);

    store.add_transaction(TransactionDraft::new("Income", "Bonus", "50")).unwrap();
    let reopened = open_store(&base);
    assert!(reopened.load_warnings().is_empty());
    assert_eq!(reopened.total_income(), 50.0);
}

#[test]
fn a_single_bad_key_only_resets_itself() {
    let base = temp_base();
    let storage = JsonFileStore::new(ledger_path(&base)).unwrap();
    storage
        .set(TRANSACTIONS_KEY, r#"[{"id":1,"type":"Expense","category":"Food","amount":9.5}]"#)
        .unwrap();
    storage.set(CATEGORIES_KEY, "[1, 2, 3]").unwrap();
    storage.set(CURRENCY_KEY, r#""£""#).unwrap();

    let store = open_store(&base);
    assert_eq!(store.total_expenses(), 9.5);
    assert_eq!(store.currency(), "£");
    assert_eq!(store.categories_for("Income").len(), 5);
    assert_eq!(store.load_warnings().len(), 1);
}

#[test]
fn deleting_a_category_survives_a_reopen() {
    let (mut store, _config, base) = setup_test_env();
    store.add_transaction(TransactionDraft::new("Expense", "Food", "10")).unwrap();
    store.add_transaction(TransactionDraft::new("Expense", "Food", "15")).unwrap();
    assert_eq!(store.delete_category("Expense", "Food").unwrap(), 2);

    let reopened = open_store(&base);
    assert!(!reopened.categories_for("Expense").contains(&"Food".to_string()));
    assert!(reopened
        .transactions()
        .iter()
        .all(|txn| txn.kind == TransactionKind::Expense && txn.category.is_empty()));
    assert_eq!(reopened.total_expenses(), 25.0);
}
