use crate::PaintApp;
use crate::state::Tool;

/// The drawing surface, drawn at its native pixel size (shrunk to fit if the
/// window is smaller) and fed with pointer input.
pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    let eraser_radius = app.config().eraser_radius;
    egui::CentralPanel::default().show(ctx, |ui| {
        let (renderer, input, pad) = app.renderer_and_input();

        let surface_size = egui::vec2(pad.surface().width() as f32, pad.surface().height() as f32);
        let available = ui.available_size();
        let scale = (available.x / surface_size.x)
            .min(available.y / surface_size.y)
            .min(1.0)
            .max(0.1);

        let (rect, response) =
            ui.allocate_exact_size(surface_size * scale, egui::Sense::click_and_drag());

        for event in input.process(ctx, &response, surface_size) {
            pad.handle_input(event);
        }

        renderer.paint(ctx, ui.painter(), rect, pad.surface());

        if pad.paint_state().tool() == Tool::Erase && response.hovered() {
            if let Some(pos) = response.hover_pos() {
                let radius = eraser_radius * scale;
                ui.painter().circle_stroke(
                    pos,
                    radius,
                    egui::Stroke::new(1.0, egui::Color32::GRAY),
                );
            }
        }
    });
}
