use eyre::WrapErr;
use stardata_storage::JsonStore;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

pub async fn execute(
    store: Arc<JsonStore>,
    path: &Path,
    input: Option<&Path>,
) -> eyre::Result<()> {
    let text = match input {
        Some(file) => tokio::fs::read_to_string(file)
            .await
            .wrap_err_with(|| format!("failed to read input file '{}'", file.display()))?,
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .wrap_err("failed to read JSON from stdin")?;
            text
        }
    };

    let value: serde_json::Value =
        serde_json::from_str(&text).wrap_err("input is not valid JSON")?;

    store.write(path, &value).await?;

    tracing::info!(
        "Wrote {} (level {}, codec {})",
        path.display(),
        store.compression_level(),
        store.codec_name()
    );
    Ok(())
}
