mod api;
mod app;
mod config;
mod controller;
mod error;
mod markup;
mod model;

use app::{App, AppProps};
use config::ClientConfig;

fn main() {
    let loaded = ClientConfig::from_dom();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
    if let Err(e) = &loaded {
        log::warn!("Using default config: {e}");
    }
    log::info!("Activity signup client starting (api base {:?})", config.api_base);

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
