use crate::cli::commands::{usage_error, CommandDefinition, CommandResult, LoopControl};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::domain::TransactionKind;
use crate::errors::CliError;

const CURRENCY_USAGE: &str = "currency [symbol]";
const BREAKDOWN_USAGE: &str = "breakdown <type>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "currency",
            "Show or set the currency symbol",
            CURRENCY_USAGE,
            cmd_currency,
        ),
        CommandDefinition::new("summary", "Show totals and balance", "summary", cmd_summary),
        CommandDefinition::new(
            "breakdown",
            "Show totals per category for a type",
            BREAKDOWN_USAGE,
            cmd_breakdown,
        ),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandDefinition::new("quit", "Exit the shell", "quit", cmd_exit),
    ]
}

fn cmd_currency(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => output::info(format!("Currency: {}", context.store.currency())),
        [symbol] => {
            let symbol = symbol.trim();
            if symbol.is_empty() {
                return Err(CliError::Input("currency symbol cannot be empty".into()));
            }
            context.store.set_currency(symbol)?;
            output::success(format!("Currency set to {}.", symbol));
        }
        _ => return Err(usage_error(CURRENCY_USAGE)),
    }
    Ok(LoopControl::Continue)
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let store = &context.store;
    let summary = store.summary();
    output::section("Summary");
    output::info(format!("  Transactions : {}", summary.transaction_count));
    output::info(format!("  Income       : {}", store.format_amount(summary.total_income)));
    output::info(format!("  Expenses     : {}", store.format_amount(summary.total_expenses)));
    output::info(format!("  Balance      : {}", store.format_amount(summary.balance)));
    Ok(LoopControl::Continue)
}

fn cmd_breakdown(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind] = args else {
        return Err(usage_error(BREAKDOWN_USAGE));
    };
    let kind = TransactionKind::from_input(kind);
    let store = &context.store;
    let totals = store.totals_by_category(&kind);
    output::section(format!("{} by category", kind));
    if totals.is_empty() {
        output::info("  (none)");
    }
    for (category, total) in totals {
        let label = if category.is_empty() {
            "(uncategorized)".to_string()
        } else {
            category
        };
        output::info(format!("  {:<18} {:>14}", label, store.format_amount(total)));
    }
    Ok(LoopControl::Continue)
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section(format!("Tally {}", env!("CARGO_PKG_VERSION")));
    output::info(format!("  Build hash : {}", env!("TALLY_BUILD_HASH")));
    output::info(format!("  Built at   : {}", env!("TALLY_BUILD_TIMESTAMP")));
    output::info(format!("  Profile    : {}", env!("TALLY_BUILD_PROFILE")));
    output::info(format!("  Rustc      : {}", env!("TALLY_BUILD_RUSTC")));
    Ok(LoopControl::Continue)
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.registry.get(&name.to_lowercase()) {
            Some(command) => {
                output::section(command.name);
                output::info(format!("  {}", command.description));
                output::info(format!("  usage: {}", command.usage));
            }
            None => context.suggest_command(name),
        }
        return Ok(LoopControl::Continue);
    }

    output::section("Commands");
    for command in context.registry.iter() {
        output::info(format!("  {:<36} {}", command.usage, command.description));
    }
    Ok(LoopControl::Continue)
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Ok(LoopControl::Exit)
}
