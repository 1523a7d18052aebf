//! Container Management Commands
//!
//! `cosmo containers list|create|delete|show`

use clap::Subcommand;
use serde_json::json;

use crate::commands::{repository, CommandOutcome};
use crate::confirm::require_confirmation;
use crate::error::Result;
use crate::output::{containers_table, Metadata, OutputAdapter};
use crate::repository::DEFAULT_THROUGHPUT;
use crate::transport::ContainerProperties;

/// Container lifecycle subcommands
#[derive(Subcommand, Debug)]
pub enum ContainersCommand {
    /// List all containers in the database
    List,

    /// Create a new container with the specified partition key
    Create {
        /// Container name
        name: String,

        /// Partition key path (e.g. /category)
        #[arg(long = "partition-key")]
        partition_key: String,

        /// Provisioned throughput in RU/s
        #[arg(long, default_value_t = DEFAULT_THROUGHPUT)]
        throughput: u32,
    },

    /// Delete a container (asks for confirmation unless --yes)
    Delete {
        /// Container name to delete
        name: String,
    },

    /// Show properties of a single container
    Show {
        /// Container name
        name: String,
    },
}

impl ContainersCommand {
    /// Stable command label used in output envelopes
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::List => "containers list",
            Self::Create { .. } => "containers create",
            Self::Delete { .. } => "containers delete",
            Self::Show { .. } => "containers show",
        }
    }
}

/// JSON summary of one container descriptor
fn summary(properties: &ContainerProperties) -> serde_json::Value {
    json!({
        "name": properties.id,
        "partition_key": properties.partition_key_path(),
        "throughput": properties.throughput,
    })
}

/// Execute one container subcommand
pub fn run(command: ContainersCommand, output: &OutputAdapter, yes: bool) -> Result<CommandOutcome> {
    match command {
        ContainersCommand::List => {
            let repo = repository()?;
            let containers = repo.list_containers()?;

            let data = json!({
                "containers": containers.iter().map(summary).collect::<Vec<_>>(),
            });
            let human = if containers.is_empty() {
                "No containers found".to_string()
            } else {
                containers_table(&containers)
            };
            output.success(
                "containers list",
                &data,
                Metadata::with_count(containers.len()),
                &human,
            );
            Ok(CommandOutcome::Completed)
        }

        ContainersCommand::Create { name, partition_key, throughput } => {
            let repo = repository()?;
            let created = repo.create_container(&name, &partition_key, throughput)?;

            output.success(
                "containers create",
                &json!({ "container": summary(&created) }),
                Metadata::new(),
                &format!(
                    "Created container '{name}' with partition key '{partition_key}' \
                     ({throughput} RU/s)"
                ),
            );
            Ok(CommandOutcome::Completed)
        }

        ContainersCommand::Delete { name } => {
            let message = format!("Delete container '{name}'? This cannot be undone.");
            if !require_confirmation(&message, yes) {
                return Ok(CommandOutcome::Aborted);
            }

            let repo = repository()?;
            repo.delete_container(&name)?;

            output.success(
                "containers delete",
                &json!({ "status": "deleted", "container": name }),
                Metadata::new(),
                &format!("Deleted container '{name}'"),
            );
            Ok(CommandOutcome::Completed)
        }

        ContainersCommand::Show { name } => {
            let repo = repository()?;
            let properties = repo.get_container_properties(&name)?;

            let throughput = properties
                .throughput
                .map_or_else(|| "-".to_string(), |ru| format!("{ru} RU/s"));
            let human = format!(
                "Name:          {}\nPartition key: {}\nThroughput:    {}",
                properties.id,
                properties.partition_key_path(),
                throughput,
            );
            output.success(
                "containers show",
                &json!({ "container": summary(&properties) }),
                Metadata::new(),
                &human,
            );
            Ok(CommandOutcome::Completed)
        }
    }
}
