mod cli;

use color_eyre::eyre::{Result, eyre};
use dentbook_adapters::{ClientSettings, init_tracing, parse_base_url};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let matches = cli::commands::new().get_matches();
    init_tracing(cli::dispatch::log_filter(&matches))?;

    let mut settings = ClientSettings::load()?;
    if let Some(api_url) = matches.get_one::<String>("api-url") {
        settings.api.base_url = parse_base_url(api_url).map_err(|e| eyre!(e))?;
    }
    tracing::debug!(base_url = %settings.api.base_url, "Settings loaded");

    let action = cli::dispatch::handler(&matches)?;
    cli::actions::handle(action, &settings).await
}
