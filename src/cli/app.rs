use crate::api::{LocationClient, DEFAULT_BASE_URL};
use crate::cli::registry::CommandRegistry;
use crate::error::{AppError, Result};
use clap::{ArgMatches, Command};
use std::env;
use tracing::info;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "LOCCTL_API_URL";

/// CLI application
pub struct App {
    registry: CommandRegistry,
    client: LocationClient,
}

impl App {
    /// Create a new CLI application
    pub fn new() -> Result<Self> {
        // Load environment variables
        dotenv::dotenv().ok();

        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(&base_url)
    }

    /// Create a CLI application talking to `base_url`.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = LocationClient::new(base_url)?;
        info!("Using location API at {}", client.base_url());
        Ok(Self {
            registry: CommandRegistry::builtin(),
            client,
        })
    }

    /// Builds the argument parser from the registered commands.
    ///
    /// Unknown subcommands are let through so `dispatch` can report them
    /// together with the available names.
    pub fn command(&self) -> Command {
        let root = Command::new(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .about("Command-line tool that manages locations registered with the slice manager")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .allow_external_subcommands(true);

        self.registry.iter().fold(root, |root, entry| {
            root.subcommand(entry.augment(Command::new(entry.name()).about(entry.about())))
        })
    }

    /// Resolves the parsed subcommand through the registry and runs it.
    pub async fn dispatch(&self, matches: &ArgMatches) -> Result<String> {
        let (name, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| AppError::Usage("No command given".to_string()))?;

        let command = self.registry.get_command(name)?;
        info!("Running command {}", name);
        command.run(&self.client, sub_matches).await
    }
}
