use crate::commands::Commands;
use stardata_config::StoreConfiguration;
use stardata_storage::JsonStore;
use std::sync::Arc;

impl Commands {
    pub async fn execute(
        self,
        store: Arc<JsonStore>,
        config: &StoreConfiguration,
    ) -> eyre::Result<()> {
        match self {
            Commands::Write { path, input } => {
                crate::commands::write::execute(store, &path, input.as_deref()).await
            }
            Commands::Read { path, pretty } => {
                crate::commands::read::execute(store, &path, pretty).await
            }
            Commands::Level => crate::commands::level::execute(config),
        }
    }
}
