//! Process-wide tracing subscriber.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over `cfg.level`.
///
/// # Errors
/// Fails if the level directive is malformed or a subscriber is already set.
pub fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&cfg.level)?,
    };

    let json = cfg.json.then(|| fmt::layer().json().with_current_span(true));
    let text = (!cfg.json).then(fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .try_init()?;

    tracing::debug!(level = %cfg.level, json = cfg.json, "logging initialized");
    Ok(())
}
