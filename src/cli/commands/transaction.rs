use serde_json::Value;

use crate::cli::commands::{parse_pairs, usage_error, CommandDefinition, CommandResult, LoopControl};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::domain::{
    AmountInput, AmountPolicy, Displayable, Transaction, TransactionDraft, TransactionId,
    TransactionKind,
};
use crate::errors::CliError;

const ADD_USAGE: &str = "add <type> <category> <amount> [key=value ...]";
const EDIT_USAGE: &str = "edit <id> <field=value ...>";
const DELETE_USAGE: &str = "delete <id>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("add", "Record a transaction", ADD_USAGE, cmd_add),
        CommandDefinition::new("edit", "Change fields of a transaction", EDIT_USAGE, cmd_edit),
        CommandDefinition::new("delete", "Remove a transaction", DELETE_USAGE, cmd_delete),
        CommandDefinition::new("list", "List transactions", "list", cmd_list),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, category, amount, extra @ ..] = args else {
        return Err(usage_error(ADD_USAGE));
    };
    let mut draft = TransactionDraft::new(TransactionKind::from_input(kind), *category, *amount);
    for (key, value) in parse_pairs(extra)? {
        draft = draft.with_detail(key, value);
    }

    let id = context.store.add_transaction(draft)?;
    let label = context
        .store
        .transaction(id)
        .map(Displayable::display_label)
        .unwrap_or_else(|| format!("#{id}"));
    output::success(format!("Added {label}"));
    Ok(LoopControl::Continue)
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id, fields @ ..] = args else {
        return Err(usage_error(EDIT_USAGE));
    };
    if fields.is_empty() {
        return Err(usage_error(EDIT_USAGE));
    }
    let id = parse_id(raw_id)?;
    let Some(current) = context.store.transaction(id) else {
        output::warning(format!("No transaction with id {id}."));
        return Ok(LoopControl::Continue);
    };

    let policy = context.store.amount_policy();
    let mut replacement = current.clone();
    for (field, value) in parse_pairs(fields)? {
        apply_field(&mut replacement, field, value, policy)?;
    }

    if context.store.update_transaction(id, replacement)? {
        output::success(format!("Updated transaction {id}."));
    }
    Ok(LoopControl::Continue)
}

fn apply_field(
    txn: &mut Transaction,
    field: &str,
    value: &str,
    policy: AmountPolicy,
) -> Result<(), CliError> {
    match field {
        "id" => return Err(CliError::Input("the id of a transaction cannot change".into())),
        "type" => txn.kind = TransactionKind::from_input(value),
        "category" => txn.category = value.to_string(),
        "amount" => txn.amount = AmountInput::from(value).coerce(policy)?,
        _ => {
            txn.details.insert(field.to_string(), Value::String(value.to_string()));
        }
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id] = args else {
        return Err(usage_error(DELETE_USAGE));
    };
    let id = parse_id(raw_id)?;
    match context.store.delete_transaction(id)? {
        0 => output::warning(format!("No transaction with id {id}.")),
        _ => output::success(format!("Deleted transaction {id}.")),
    }
    Ok(LoopControl::Continue)
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let store = &context.store;
    if store.transactions().is_empty() {
        output::info("No transactions recorded.");
        return Ok(LoopControl::Continue);
    }

    output::section("Transactions");
    for txn in store.transactions() {
        let mut line = format!(
            "  {:<16} {:<8} {:<16} {:>14}",
            txn.id,
            txn.kind.as_str(),
            if txn.category.is_empty() { "-" } else { txn.category.as_str() },
            store.format_amount(txn.amount),
        );
        for (key, value) in &txn.details {
            line.push_str(&format!("  {}={}", key, detail_text(value)));
        }
        output::info(line);
    }
    Ok(LoopControl::Continue)
}

fn detail_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn parse_id(raw: &str) -> Result<TransactionId, CliError> {
    raw.trim()
        .parse::<TransactionId>()
        .map_err(|_| CliError::Input(format!("`{}` is not a transaction id", raw)))
}
