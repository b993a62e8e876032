use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over `--log-level` when set.
pub fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level.trim())
            .with_context(|| format!("invalid log level: {level}"))?,
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
