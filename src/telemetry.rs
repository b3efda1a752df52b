//! Tracing setup shared by both binaries.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize console tracing.
///
/// The filter comes from `RUST_LOG` when set, otherwise `default_directive`
/// (e.g. `"warn"` for the release tool, `"info"` for the server).
pub fn init_tracing(default_directive: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
