mod api;
mod config;
mod models;
mod state;
mod views;

use anyhow::Context as _;
use api::MemeForgeService;
use config::Config;
use gpui::prelude::*;
use gpui::*;
use reqwest_client::ReqwestClient;
use state::AppState;
use std::sync::Arc;
use views::root::RootView;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    log::info!("using backend at {}", config.api_url);

    let service = MemeForgeService::new(&config)?;
    let image_client =
        ReqwestClient::user_agent("meme-forge-gui").context("failed to build image client")?;

    Application::new().run(move |cx: &mut App| {
        cx.set_http_client(Arc::new(image_client));
        cx.set_global(AppState::new(service, config));

        let bounds = Bounds::centered(None, size(px(1100.0), px(820.0)), cx);
        cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some(SharedString::from("Meme Forge")),
                    ..Default::default()
                }),
                ..Default::default()
            },
            |window, cx| cx.new(|cx| RootView::new(cx, window)),
        )
        .expect("failed to open window");
    });

    Ok(())
}
