use stardata_storage::JsonStore;
use std::path::Path;
use std::sync::Arc;

pub async fn execute(store: Arc<JsonStore>, path: &Path, pretty: bool) -> eyre::Result<()> {
    let value = store.read_value(path).await?;

    let output = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{output}");
    Ok(())
}
