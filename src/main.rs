#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod core;
mod theme;

use app::Win98ShellApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Win98 Storefront"),
        ..Default::default()
    };

    eframe::run_native(
        "Win98 Shell",
        options,
        Box::new(|cc| {
            theme::apply_win98_theme(&cc.egui_ctx);
            Ok(Box::new(Win98ShellApp::new(cc)))
        }),
    )
}
