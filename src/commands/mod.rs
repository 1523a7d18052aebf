//! CLI Command Groups
//!
//! Thin command handlers over the repository: parse input, obtain a
//! repository from a fresh factory, invoke one operation, render the result.
//! All real decisions (validation, error translation, idempotency) live in
//! the repository layer.

use crate::config::Settings;
use crate::error::Result;
use crate::factory::RepositoryFactory;
use crate::repository::ContainerRepository;

pub mod containers;
pub mod items;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The operation ran (successfully) to completion
    Completed,
    /// The user declined a confirmation prompt
    Aborted,
}

/// Load settings and produce a repository from a fresh factory
///
/// One factory per process invocation: the CLI issues a single logical
/// operation per run, so the factory's cached handle lives exactly as long
/// as that operation.
pub(crate) fn repository() -> Result<ContainerRepository> {
    let settings = Settings::load()?;
    let factory = RepositoryFactory::new(settings);
    factory.get_container_repository()
}
