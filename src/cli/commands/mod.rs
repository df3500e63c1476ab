use std::collections::HashMap;

use once_cell::sync::Lazy;
use strsim::levenshtein;

pub mod category;
pub mod system;
pub mod transaction;

use crate::cli::shell_context::ShellContext;
use crate::errors::CliError;

/// Most edits a mistyped command may be away from a suggestion.
const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<LoopControl, CliError>;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order.iter().filter_map(|name| self.commands.get(name))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.order.clone()
    }

    /// Closest registered name to `input`, if any is near enough.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.order
            .iter()
            .map(|name| (levenshtein(&needle, name), *name))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(transaction::definitions());
    commands.extend(category::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) static REGISTRY: Lazy<CommandRegistry> =
    Lazy::new(|| CommandRegistry::new(all_definitions()));

/// Splits `key=value` arguments, rejecting anything without `=`.
pub(crate) fn parse_pairs<'a>(args: &[&'a str]) -> Result<Vec<(&'a str, &'a str)>, CliError> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .ok_or_else(|| CliError::Input(format!("expected key=value, got `{}`", arg)))
        })
        .collect()
}

pub(crate) fn usage_error(usage: &str) -> CliError {
    CliError::Input(format!("usage: {}", usage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_keeps_registration_order() {
        let names = REGISTRY.names();
        assert_eq!(names.first(), Some(&"add"));
        assert!(names.contains(&"summary"));
        assert!(REGISTRY.get("remove-category").is_some());
        assert_eq!(REGISTRY.iter().count(), names.len());
    }

    #[test]
    fn suggests_near_misses_only() {
        assert_eq!(REGISTRY.suggest("sumary"), Some("summary"));
        assert_eq!(REGISTRY.suggest("LIST"), Some("list"));
        assert_eq!(REGISTRY.suggest("completely-different"), None);
    }

    #[test]
    fn pairs_need_an_equals_sign() {
        let pairs = parse_pairs(&["date=2024-01-01", "note=a=b"]).unwrap();
        assert_eq!(pairs, [("date", "2024-01-01"), ("note", "a=b")]);
        assert!(parse_pairs(&["oops"]).is_err());
        assert!(parse_pairs(&["=value"]).is_err());
    }
}
