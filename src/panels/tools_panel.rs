use egui::{Color32, Sense, Slider, Stroke, vec2};

use crate::PaintApp;
use crate::input::ControlEvent;
use crate::state::Tool;

const SWATCH_SIZE: f32 = 28.0;

/// What the panel asked for this frame, applied once the UI closure returns
enum PanelAction {
    Control(ControlEvent),
    Save,
    OpenImage,
}

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let paint = *app.sketchpad().paint_state();
    let palette: Vec<Color32> = app.config().palette_colors().collect();
    let history_len = app.sketchpad().history().len();
    let mut actions = Vec::new();

    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Sketchpad");
            ui.separator();

            ui.label("Color");
            ui.horizontal_wrapped(|ui| {
                for color in &palette {
                    let (rect, response) =
                        ui.allocate_exact_size(vec2(SWATCH_SIZE, SWATCH_SIZE), Sense::click());
                    let outline = if *color == paint.color() {
                        Stroke::new(2.0, ui.visuals().selection.stroke.color)
                    } else {
                        Stroke::new(1.0, Color32::GRAY)
                    };
                    ui.painter().circle(rect.center(), SWATCH_SIZE / 2.0 - 2.0, *color, outline);
                    if response.clicked() {
                        actions.push(PanelAction::Control(ControlEvent::SelectColor(*color)));
                    }
                }
            });
            ui.horizontal(|ui| {
                ui.label("Custom:");
                let mut custom = paint.color();
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut custom,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    actions.push(PanelAction::Control(ControlEvent::SelectColor(custom)));
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Brush size:");
                let mut width = i64::from(paint.stroke_width());
                if ui.add(Slider::new(&mut width, 1..=50)).changed() {
                    actions.push(PanelAction::Control(ControlEvent::SetStrokeWidth(width)));
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                // labels name the mode a click switches to
                let fill_label = if paint.tool() == Tool::Fill { "Paint" } else { "Fill" };
                if ui.button(fill_label).clicked() {
                    actions.push(PanelAction::Control(ControlEvent::ToggleFill));
                }
                let erase_label = if paint.tool() == Tool::Erase { "Paint" } else { "Erase" };
                if ui.button(erase_label).clicked() {
                    actions.push(PanelAction::Control(ControlEvent::ToggleErase));
                }
            });
            ui.label(format!("Mode: {}", paint.tool().name()));

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(history_len > 0, egui::Button::new("Undo"))
                    .clicked()
                {
                    actions.push(PanelAction::Control(ControlEvent::Undo));
                }
                if ui.button("Clear").clicked() {
                    actions.push(PanelAction::Control(ControlEvent::Clear));
                }
            });
            ui.label(format!("Undo steps: {history_len}"));

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    actions.push(PanelAction::Save);
                }
                if ui.button("Open image…").clicked() {
                    actions.push(PanelAction::OpenImage);
                }
            });
            ui.small("Or drop an image file onto the window.");
        });

    for action in actions {
        match action {
            PanelAction::Control(event) => {
                log::debug!("Control: {event:?}");
                app.apply_control(event);
            }
            PanelAction::Save => app.open_save_prompt(),
            PanelAction::OpenImage => open_image(app),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_image(app: &mut PaintApp) {
    app.open_image_file();
}

#[cfg(target_arch = "wasm32")]
fn open_image(_app: &mut PaintApp) {
    log::warn!("File picker is not available on the web, drop a file instead");
}
