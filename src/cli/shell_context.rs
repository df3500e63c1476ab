use std::fmt;

use crate::cli::commands::{CommandRegistry, CommandResult, LoopControl, REGISTRY};
use crate::cli::output;
use crate::config::ConfigManager;
use crate::errors::CliError;
use crate::storage::JsonFileStore;
use crate::store::LedgerStore;
use crate::time::SystemClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub(crate) store: LedgerStore,
    pub(crate) registry: &'static CommandRegistry,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        if mode == CliMode::Script || !config.ui_color_enabled {
            output::disable_color();
        }

        let ledger_path = config.ledger_path(manager.base_dir());
        let storage = JsonFileStore::new(&ledger_path)?;
        let store = LedgerStore::with_options(
            Box::new(storage),
            Box::new(SystemClock),
            config.amount_policy,
        );
        for warning in store.load_warnings() {
            output::warning(warning);
        }
        tracing::debug!(path = %ledger_path.display(), ?mode, "shell context ready");

        Ok(Self::from_store(store))
    }

    pub(crate) fn from_store(store: LedgerStore) -> Self {
        Self {
            store,
            registry: &REGISTRY,
            running: true,
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    pub(crate) fn prompt(&self) -> String {
        format!("tally ({})> ", self.store.currency())
    }

    pub(crate) fn dispatch(&mut self, command: &str, raw: &str, args: &[&str]) -> CommandResult {
        let registry = self.registry;
        match registry.get(command) {
            Some(definition) => (definition.handler)(self, args),
            None => {
                self.suggest_command(raw);
                Ok(LoopControl::Continue)
            }
        }
    }

    pub(crate) fn suggest_command(&self, raw: &str) {
        match self.registry.suggest(raw) {
            Some(name) => output::warning(format!(
                "Unknown command `{}`. Did you mean `{}`?",
                raw, name
            )),
            None => output::warning(format!(
                "Unknown command `{}`. Type `help` for a list of commands.",
                raw
            )),
        }
    }

    /// Prints a command failure. Terminal failures end the session.
    pub(crate) fn report_error(&self, err: CliError) -> Result<(), CliError> {
        match err {
            CliError::Terminal(_) => Err(err),
            other => {
                tracing::debug!(error = %other, "command failed");
                output::error(&other);
                Ok(())
            }
        }
    }

    pub(crate) fn print_warning(&self, message: impl fmt::Display) {
        output::warning(message);
    }
}
