use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Log lines go to stderr so command output on
/// stdout stays clean; `RUST_LOG` overrides `default_filter`.
pub fn init_tracing(default_filter: &str) -> Result<()> {
    let fmt_layer = fmt::layer().compact().with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
