//! Taskboard Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod dispatch;
mod error;
mod level;
mod models;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();

    tracing::info!("starting taskboard frontend");
    mount_to_body(App);
}
