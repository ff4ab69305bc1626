#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use sketchpad::{PaintApp, SketchConfig};

    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = SketchConfig::from_env().unwrap_or_else(|err| {
        log::error!("{err}, falling back to the default config");
        SketchConfig::default()
    });

    let side = config.surface_size as f32;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sketchpad")
            .with_inner_size([side + 240.0, side + 32.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "sketchpad",
        native_options,
        Box::new(|cc| Ok(Box::new(PaintApp::new(cc, config)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
