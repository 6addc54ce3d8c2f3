use crate::api::LocationClient;
use crate::cli::registry::LocationCommand;
use crate::error::{AppError, Result};
use crate::models::{Location, LocationPayload};
use async_trait::async_trait;
use clap::{ArgMatches, Args, Command, FromArgMatches};
use comfy_table::{presets, Table};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Column headers of the `ls` table.
pub const LIST_HEADER: [&str; 3] = ["DB_ID", "LOCATION_ID", "CREATED AT"];

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Location identifier
    pub id: String,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// File with location details (YAML)
    #[arg(short, long)]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// File with location details (YAML)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Location identifier
    pub id: String,
}

/// `ls`: list registered locations.
pub struct ListLocations;

/// `inspect <id>`: show one location as JSON.
pub struct InspectLocation;

/// `add -f <file>`: register a new location.
pub struct AddLocation;

/// `rm <id>`: remove a location.
pub struct RemoveLocation;

/// `update -f <file> <id>`: replace a location's details.
pub struct UpdateLocation;

#[async_trait]
impl LocationCommand for ListLocations {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn about(&self) -> &'static str {
        "List registered locations"
    }

    fn augment(&self, cmd: Command) -> Command {
        cmd
    }

    async fn run(&self, client: &LocationClient, _matches: &ArgMatches) -> Result<String> {
        let locations = client.list_locations().await?;
        Ok(render_locations(&locations))
    }
}

#[async_trait]
impl LocationCommand for InspectLocation {
    fn name(&self) -> &'static str {
        "inspect"
    }

    fn about(&self) -> &'static str {
        "Display detailed information of a specific location"
    }

    fn augment(&self, cmd: Command) -> Command {
        IdArgs::augment_args(cmd)
    }

    async fn run(&self, client: &LocationClient, matches: &ArgMatches) -> Result<String> {
        let args = IdArgs::from_arg_matches(matches)?;
        match client.get_location(&args.id).await? {
            Some(record) => Ok(serde_json::to_string_pretty(&record)?),
            None => Ok(format!("Error: No such location: {}", args.id)),
        }
    }
}

#[async_trait]
impl LocationCommand for AddLocation {
    fn name(&self) -> &'static str {
        "add"
    }

    fn about(&self) -> &'static str {
        "Add new location"
    }

    fn augment(&self, cmd: Command) -> Command {
        AddArgs::augment_args(cmd)
    }

    async fn run(&self, client: &LocationClient, matches: &ArgMatches) -> Result<String> {
        let args = AddArgs::from_arg_matches(matches)?;
        let payload = read_payload(&args.file)?;
        client.create_location(&payload).await
    }
}

#[async_trait]
impl LocationCommand for RemoveLocation {
    fn name(&self) -> &'static str {
        "rm"
    }

    fn about(&self) -> &'static str {
        "Remove a registered location"
    }

    fn augment(&self, cmd: Command) -> Command {
        IdArgs::augment_args(cmd)
    }

    async fn run(&self, client: &LocationClient, matches: &ArgMatches) -> Result<String> {
        let args = IdArgs::from_arg_matches(matches)?;
        client.delete_location(&args.id).await
    }
}

#[async_trait]
impl LocationCommand for UpdateLocation {
    fn name(&self) -> &'static str {
        "update"
    }

    fn about(&self) -> &'static str {
        "Update a registered location"
    }

    fn augment(&self, cmd: Command) -> Command {
        UpdateArgs::augment_args(cmd)
    }

    async fn run(&self, client: &LocationClient, matches: &ArgMatches) -> Result<String> {
        let args = UpdateArgs::from_arg_matches(matches)?;
        let payload = read_payload(&args.file)?;
        client.update_location(&args.id, &payload).await
    }
}

/// Renders locations as a borderless table with one header row.
pub fn render_locations(locations: &[Location]) -> String {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING).set_header(LIST_HEADER);

    for location in locations {
        table.add_row(vec![
            location.db_id.clone(),
            location.id.clone(),
            location.created_at_local(),
        ]);
    }

    table.to_string()
}

/// Reads a YAML location description from `path`.
fn read_payload(path: &Path) -> Result<LocationPayload> {
    info!("Reading location details from {}", path.display());

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(AppError::Usage(format!("File {} not found", path.display())));
        },
        Err(e) => return Err(e.into()),
    };

    let payload = LocationPayload::from_yaml(&source)?;
    debug!("Loaded payload with {} fields", payload.fields.len());
    Ok(payload)
}
