//! QuickCart Frontend Entry Point

mod api;
mod app;
mod cart;
mod components;
mod config;
mod context;
mod error;
mod events;
mod models;
mod payment;
mod split;
mod storage;
mod store;
mod validation;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if ring_logger::init(log::LevelFilter::Debug, ring_logger::DEFAULT_CAPACITY).is_err() {
        web_sys::console::warn_1(&"[APP] logger already installed".into());
    }
    log::info!("[APP] starting QuickCart");
    mount_to_body(App);
}
