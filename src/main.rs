use clap::Parser;

mod app;
mod config;
mod draw;
mod input;
mod predict;
mod ui;

use config::Config;
use predict::RecognizerMode;

#[derive(Parser, Debug)]
#[command(name = "digitscribe")]
#[command(version, about = "Handwritten digit sketchpad with remote recognition")]
struct Cli {
    /// Prediction service base URL (overrides the config file)
    #[arg(long, short = 'e', value_name = "URL")]
    endpoint: Option<String>,

    /// Initial recognition mode (single or multi)
    #[arg(long, short = 'm', value_name = "MODE")]
    mode: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = Config::load()?;

    if let Some(endpoint) = cli.endpoint {
        config.backend.base_url = endpoint;
    }

    if let Some(mode) = cli.mode {
        if RecognizerMode::parse(&mode).is_none() {
            anyhow::bail!("Invalid mode '{mode}' (expected 'single' or 'multi')");
        }
        config.ui.default_mode = mode.to_lowercase();
    }

    log::info!("Starting digitscribe");
    log::info!("Prediction backend: {}", config.backend.base_url);
    log::info!("Draw on the canvas; a prediction fires when the stroke ends.");

    app::run(config).map_err(|err| anyhow::anyhow!("Failed to run the sketchpad window: {err}"))
}
