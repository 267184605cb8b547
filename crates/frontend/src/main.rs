mod app;
mod client;
mod components;
mod config;
mod guards;
mod pages;
mod services;
mod session;
mod storage;

use app::App;
use config::BackendConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());

    tracing_subscriber::registry()
        .with(EnvFilter::new(BackendConfig::LOG_FILTER))
        .with(fmt_layer)
        .init();
}

fn main() {
    console_error_panic_hook::set_once();
    init_tracing();

    client::capture_oauth_redirect();
    yew::Renderer::<App>::new().render();
}
