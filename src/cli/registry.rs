//! The command registry: the table of subcommands the front end can dispatch to.
//!
//! Commands are registered once at startup. The front end asks the registry for
//! the sorted list of names (help text, error messages) and resolves the chosen
//! name to its handler.

use crate::api::LocationClient;
use crate::cli::commands::{
    AddLocation, InspectLocation, ListLocations, RemoveLocation, UpdateLocation,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use clap::{ArgMatches, Command};
use std::collections::BTreeMap;
use tracing::debug;

/// A dispatchable subcommand.
#[async_trait]
pub trait LocationCommand: Send + Sync {
    /// Name used on the command line.
    fn name(&self) -> &'static str;

    /// One-line description shown in `--help`.
    fn about(&self) -> &'static str;

    /// Declares the command's arguments on its `clap` subcommand.
    fn augment(&self, cmd: Command) -> Command;

    /// Runs the command and returns the text to print on success.
    async fn run(&self, client: &LocationClient, matches: &ArgMatches) -> Result<String>;
}

/// Name-keyed table of commands. Iteration order is the sorted name order.
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn LocationCommand>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// The registry holding every location command.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ListLocations));
        registry.register(Box::new(InspectLocation));
        registry.register(Box::new(AddLocation));
        registry.register(Box::new(RemoveLocation));
        registry.register(Box::new(UpdateLocation));
        registry
    }

    /// Adds a command.
    ///
    /// # Panics
    /// If a command with the same name is already registered.
    pub fn register(&mut self, command: Box<dyn LocationCommand>) {
        let name = command.name();
        debug!("Registering command {}", name);
        let previous = self.commands.insert(name, command);
        assert!(previous.is_none(), "command `{}` registered twice", name);
    }

    /// Names of all registered commands, sorted.
    pub fn list_commands(&self) -> Vec<&'static str> {
        self.commands.keys().copied().collect()
    }

    /// Resolves `name` to its command.
    pub fn get_command(&self, name: &str) -> Result<&dyn LocationCommand> {
        self.commands
            .get(name)
            .map(|command| command.as_ref())
            .ok_or_else(|| AppError::CommandNotFound {
                name: name.to_string(),
                available: self
                    .list_commands()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
    }

    /// Registered commands in name order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn LocationCommand> {
        self.commands.values().map(|command| command.as_ref())
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Dummy(&'static str);

    #[async_trait]
    impl LocationCommand for Dummy {
        fn name(&self) -> &'static str {
            self.0
        }

        fn about(&self) -> &'static str {
            "dummy"
        }

        fn augment(&self, cmd: Command) -> Command {
            cmd
        }

        async fn run(&self, _client: &LocationClient, _matches: &ArgMatches) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_list_commands_sorted() {
        let registry = CommandRegistry::builtin();
        assert_eq!(
            registry.list_commands(),
            vec!["add", "inspect", "ls", "rm", "update"]
        );
        // Listing is stable across calls.
        assert_eq!(registry.list_commands(), registry.list_commands());
    }

    #[test]
    fn test_registration_order_does_not_matter() {
        let mut registry = CommandRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(Box::new(Dummy(name)));
        }
        assert_eq!(registry.list_commands(), vec!["alpha", "mid", "zeta"]);
        let iterated: Vec<_> = registry.iter().map(|c| c.name()).collect();
        assert_eq!(iterated, registry.list_commands());
    }

    #[rstest]
    #[case("ls")]
    #[case("inspect")]
    #[case("add")]
    #[case("rm")]
    #[case("update")]
    fn test_get_command_resolves(#[case] name: &str) {
        let registry = CommandRegistry::builtin();
        let command = registry.get_command(name).unwrap();
        assert_eq!(command.name(), name);
        assert!(!command.about().is_empty());
    }

    #[test]
    fn test_unknown_command_lists_alternatives() {
        let registry = CommandRegistry::builtin();
        let err = registry.get_command("list").err().unwrap();
        match &err {
            AppError::CommandNotFound { name, available } => {
                assert_eq!(name, "list");
                assert_eq!(available, &registry.list_commands());
            },
            other => panic!("Expected CommandNotFound, got {:?}", other),
        }
        let msg = err.to_string();
        assert!(msg.contains("list"));
        assert!(msg.contains(r#"["add", "inspect", "ls", "rm", "update"]"#));
    }

    #[test]
    fn test_unknown_command_reflects_current_registry() {
        let mut registry = CommandRegistry::builtin();
        registry.register(Box::new(Dummy("export")));
        let msg = registry.get_command("nope").err().unwrap().to_string();
        assert!(msg.contains(r#"["add", "export", "inspect", "ls", "rm", "update"]"#));
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn test_duplicate_registration_panics() {
        let mut registry = CommandRegistry::builtin();
        registry.register(Box::new(Dummy("ls")));
    }
}
