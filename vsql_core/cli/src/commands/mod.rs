mod rows;
mod say;
mod stats;
mod tables;

pub use rows::{handle_row, RowSubcommand};
pub use say::{handle_say, SayArgs};
pub use stats::{handle_stats, StatsArgs};
pub use tables::{handle_table, TableSubcommand};

use crate::error::CliError;
use common::config::{read_config, AppConfig};
use common::types::TableDefinition;
use engine::CommandEngine;
use store::{MemoryStore, TableStore};
use std::path::PathBuf;

/// Everything a command handler needs: loaded config and an engine over the
/// JSON-backed store.
pub struct AppContext {
    pub config: AppConfig,
    pub engine: CommandEngine<MemoryStore>,
}

pub fn open(config_path: Option<PathBuf>) -> Result<AppContext, CliError> {
    let config = read_config(config_path)?;
    let store = MemoryStore::load_from(&config.store.path)?;
    Ok(AppContext {
        engine: CommandEngine::new(store),
        config,
    })
}

impl AppContext {
    /// Persist the store back to disk. Called after every mutating command.
    pub fn flush(&self) -> Result<(), CliError> {
        self.engine.store().flush_to(&self.config.store.path)?;
        Ok(())
    }

    pub fn table(&self, name: &str) -> Result<TableDefinition, CliError> {
        Ok(self.engine.store().get_table_by_name(name)?)
    }
}
