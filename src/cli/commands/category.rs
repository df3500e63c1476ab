use crate::cli::commands::{usage_error, CommandDefinition, CommandResult, LoopControl};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::domain::TransactionKind;

const CATEGORIES_USAGE: &str = "categories [type]";
const ADD_USAGE: &str = "add-category <type> <name>";
const REMOVE_USAGE: &str = "remove-category <type> <name>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "categories",
            "Show category names per type",
            CATEGORIES_USAGE,
            cmd_categories,
        ),
        CommandDefinition::new("add-category", "Add a category name", ADD_USAGE, cmd_add),
        CommandDefinition::new(
            "remove-category",
            "Remove a category and clear it from transactions",
            REMOVE_USAGE,
            cmd_remove,
        ),
    ]
}

/// Canonical spelling of a typed type name, so `expense` files under `Expense`.
fn kind_name(raw: &str) -> String {
    TransactionKind::from_input(raw).as_str().to_string()
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let taxonomy = context.store.categories();
    match args {
        [] => {
            output::section("Categories");
            if taxonomy.is_empty() {
                output::info("  (none)");
            }
            for (kind, names) in taxonomy.iter() {
                output::info(format!("  {}: {}", kind, names.join(", ")));
            }
        }
        [kind] => {
            let kind = kind_name(kind);
            let names = context.store.categories_for(&kind);
            output::section(format!("{} categories", kind));
            if names.is_empty() {
                output::info("  (none)");
            }
            for name in names {
                output::info(format!("  {}", name));
            }
        }
        _ => return Err(usage_error(CATEGORIES_USAGE)),
    }
    Ok(LoopControl::Continue)
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, name] = args else {
        return Err(usage_error(ADD_USAGE));
    };
    let kind = kind_name(kind);
    if context.store.add_category(&kind, name)? {
        output::success(format!("Added category {} to {}.", name, kind));
    } else {
        output::warning(format!("{} already has category {}.", kind, name));
    }
    Ok(LoopControl::Continue)
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, name] = args else {
        return Err(usage_error(REMOVE_USAGE));
    };
    let kind = kind_name(kind);
    let cleared = context.store.delete_category(&kind, name)?;
    output::success(format!(
        "Removed category {} from {} ({} transaction(s) uncategorized).",
        name, kind, cleared
    ));
    Ok(LoopControl::Continue)
}
