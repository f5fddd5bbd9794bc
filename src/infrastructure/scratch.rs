use crate::config::AppConfig;
use anyhow::Context;
use tracing::info;

/// Create the scratch directory at process start. Idempotent; the directory
/// is never torn down, only individual files are removed after processing.
pub async fn setup_scratch(config: &AppConfig) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&config.scratch_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create scratch directory {}",
                config.scratch_dir.display()
            )
        })?;

    info!("📂 Scratch directory ready: {}", config.scratch_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_scratch_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            scratch_dir: dir.path().join("scratch"),
            ..AppConfig::development()
        };

        setup_scratch(&config).await.unwrap();
        setup_scratch(&config).await.unwrap();
        assert!(config.scratch_dir.is_dir());
    }
}
