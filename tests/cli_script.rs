mod common;

use std::{fs, path::Path};

use assert_cmd::Command;
use common::{open_store, temp_base};
use predicates::str::contains;
use tally::config::{AmountPolicy, Config, ConfigManager};

fn script(home: &Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("tally_cli")
        .unwrap()
        .env("TALLY_HOME", home)
        .env("TALLY_CLI_SCRIPT", "1")
        .write_stdin(input)
        .assert()
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = temp_base();
    script(
        &home,
        "add Income Salary 1000\nadd Expense Food 200 note=groceries\nsummary\nexit\n",
    )
    .success()
    .stdout(contains("Added"))
    .stdout(contains("Balance      : $800.00"));

    let store = open_store(&home);
    assert_eq!(store.transactions().len(), 2);
    assert_eq!(store.balance(), 800.0);
}

#[test]
fn currency_change_persists_between_runs() {
    let home = temp_base();
    script(&home, "currency €\nadd income Bonus 1234.5\n").success();
    script(&home, "currency\nsummary\n")
        .success()
        .stdout(contains("Currency: €"))
        .stdout(contains("€1,234.50"));
}

#[test]
fn category_commands_cascade_into_transactions() {
    let home = temp_base();
    script(
        &home,
        "add Expense Food 10\nadd Expense Food 5\nadd-category Expense Food\n\
         remove-category expense Food\ncategories Expense\n",
    )
    .success()
    .stdout(contains("Expense already has category Food."))
    .stdout(contains("2 transaction(s) uncategorized"));

    let store = open_store(&home);
    assert!(store.transactions().iter().all(|txn| txn.category.is_empty()));
    assert!(!store.categories_for("Expense").contains(&"Food".to_string()));
}

#[test]
fn edit_and_delete_by_id() {
    let home = temp_base();
    script(&home, "add Expense Rent 700\n").success();
    let id = open_store(&home).transactions()[0].id;

    script(&home, &format!("edit {id} amount=750 category=Utilities\nlist\n"))
        .success()
        .stdout(contains(format!("Updated transaction {id}.")))
        .stdout(contains("Utilities"));
    assert_eq!(open_store(&home).total_expenses(), 750.0);

    script(&home, &format!("delete {id}\ndelete {id}\n"))
        .success()
        .stdout(contains(format!("Deleted transaction {id}.")))
        .stdout(contains(format!("No transaction with id {id}.")));
    assert!(open_store(&home).transactions().is_empty());
}

#[test]
fn bad_input_is_reported_and_the_shell_continues() {
    let home = temp_base();
    script(&home, "add Expense Food lots\nsumary\nadd Expense Food 4\n")
        .success()
        .stdout(contains("Invalid amount"))
        .stdout(contains("Did you mean `summary`?"));

    let store = open_store(&home);
    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.total_expenses(), 4.0);
}

#[test]
fn lenient_config_admits_unparsable_amounts() {
    let home = temp_base();
    let manager = ConfigManager::with_base_dir(home.clone()).unwrap();
    manager
        .save(&Config {
            amount_policy: AmountPolicy::Lenient,
            ..Config::default()
        })
        .unwrap();

    script(&home, "add Expense Food 12abc\nadd Expense Food abc\nsummary\n")
        .success()
        .stdout(contains("Expenses     : NaN"));

    let store = open_store(&home);
    assert_eq!(store.transactions()[0].amount, 12.0);
    assert!(store.transactions()[1].amount.is_nan());
}

#[test]
fn corrupt_ledger_warns_and_falls_back() {
    let home = temp_base();
    fs::write(home.join("ledger.json"), "garbage").unwrap();
    script(&home, "summary\n")
        .success()
        .stdout(contains("[!] transactions:"))
        .stdout(contains("Transactions : 0"));
}

#[test]
fn help_lists_every_command() {
    let home = temp_base();
    script(&home, "help\nhelp breakdown\n")
        .success()
        .stdout(contains("add-category <type> <name>"))
        .stdout(contains("remove-category <type> <name>"))
        .stdout(contains("usage: breakdown <type>"));
}
