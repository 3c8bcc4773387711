use anyhow::Context;
use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::NyayaApp;

#[derive(Parser, Debug)]
#[command(name = "nyaya-gui", about = "Desktop section suggester for incident narratives")]
struct Args {
    /// Overrides the analysis service url from nyaya.toml / environment.
    #[arg(long)]
    api_base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load client settings")?;
    if let Some(url) = args.api_base_url.as_deref() {
        settings = settings
            .with_api_base_url(url)
            .context("invalid --api-base-url")?;
    }
    let base_url = settings.api_base_url.clone();
    tracing::info!(%base_url, "starting desktop gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("NyayaSahayak")
            .with_inner_size([1180.0, 780.0])
            .with_min_inner_size([860.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "NyayaSahayak",
        options,
        Box::new(|_cc| Ok(Box::new(NyayaApp::new(cmd_tx, ui_rx, base_url)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop gui exited with error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_flag_ignores_the_environment() {
        std::env::set_var("NYAYA_API_BASE_URL", "");

        let args = Args::try_parse_from(["nyaya-gui"]).expect("parse");
        assert_eq!(args.api_base_url, None);

        let args = Args::try_parse_from(["nyaya-gui", "--api-base-url", "http://flag:2"])
            .expect("parse");
        assert_eq!(args.api_base_url.as_deref(), Some("http://flag:2"));
    }
}
