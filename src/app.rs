use crate::config::SketchConfig;
use crate::error::SketchError;
use crate::event::NoticeBoard;
use crate::file_handler::{self, FileHandler};
use crate::input::{ControlEvent, InputHandler};
use crate::panels;
use crate::renderer::Renderer;
use crate::sketchpad::Sketchpad;
use crate::state::PaintState;

/// Storage key for the persisted paint settings
const PAINT_STATE_KEY: &str = "sketchpad_paint_state";

/// How long a notice stays on screen, in seconds
const NOTICE_SECONDS: f64 = 5.0;

/// The eframe application hosting one sketchpad.
pub struct PaintApp {
    config: SketchConfig,
    pad: Sketchpad,
    renderer: Renderer,
    input: InputHandler,
    files: FileHandler,
    notices: NoticeBoard,
    /// Visible notices and the time they expire
    visible_notices: Vec<(String, f64)>,
    /// Name buffer of the open save prompt, if any
    save_prompt: Option<String>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Self {
        let mut app = Self::with_config(config);
        if let Some(state) = cc
            .storage
            .and_then(|storage| eframe::get_value::<PaintState>(storage, PAINT_STATE_KEY))
        {
            log::info!("Restoring paint settings: {state:?}");
            app.pad.restore_paint_state(state);
        }
        app
    }

    /// Build the app without an eframe context
    pub fn with_config(config: SketchConfig) -> Self {
        let mut pad = Sketchpad::new(&config);
        let notices = NoticeBoard::new();
        pad.subscribe(Box::new(notices.clone()));

        Self {
            config,
            pad,
            renderer: Renderer::new(),
            input: InputHandler::new(),
            files: FileHandler::new(),
            notices,
            visible_notices: Vec::new(),
            save_prompt: None,
        }
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn sketchpad(&self) -> &Sketchpad {
        &self.pad
    }

    pub(crate) fn renderer_and_input(&mut self) -> (&mut Renderer, &mut InputHandler, &mut Sketchpad) {
        (&mut self.renderer, &mut self.input, &mut self.pad)
    }

    /// Apply a control event; failures are logged or shown, never propagated
    pub fn apply_control(&mut self, event: ControlEvent) {
        if let Err(err) = self.pad.handle_control(event) {
            self.report(&err);
        }
    }

    pub fn open_save_prompt(&mut self) {
        self.save_prompt.get_or_insert_with(String::new);
    }

    /// Finish the save prompt. `None` means the user cancelled.
    pub fn finish_save(&mut self, name: Option<&str>) {
        self.save_prompt = None;
        match file_handler::save_png(&self.pad, name, &self.config.save_dir) {
            Ok(path) => self.notices.post(format!("Saved {}", path.display())),
            Err(err) => self.report(&err),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_image_file(&mut self) {
        match self.files.pick_image() {
            Ok(Some(file)) => self.apply_control(ControlEvent::LoadImage(file.bytes)),
            Ok(None) => log::debug!("Open image cancelled"),
            Err(err) => self.report(&err),
        }
    }

    fn report(&self, err: &SketchError) {
        match err {
            // the sketchpad already raised a notice through its event handlers
            SketchError::ImageDecode(_) => {}
            err if err.is_user_visible() => {
                log::error!("{err}");
                self.notices.post(err.to_string());
            }
            err => log::debug!("Ignored: {err}"),
        }
    }

    fn load_dropped_files(&mut self, ctx: &egui::Context) {
        for file in self.files.take_dropped_images(ctx) {
            log::info!("Loading dropped image {}", file.name);
            self.apply_control(ControlEvent::LoadImage(file.bytes));
        }
    }

    fn save_prompt_window(&mut self, ctx: &egui::Context) {
        let Some(mut name) = self.save_prompt.take() else {
            return;
        };

        let mut outcome = None;
        egui::Window::new("Save as PNG")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Enter a name:");
                let edit = ui.text_edit_singleline(&mut name);
                edit.request_focus();
                let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() || submitted {
                        outcome = Some(Some(name.clone()));
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = Some(None);
                    }
                });
            });

        match outcome {
            Some(name) => self.finish_save(name.as_deref()),
            None => self.save_prompt = Some(name),
        }
    }

    fn notices_window(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        for notice in self.notices.drain() {
            self.visible_notices.push((notice, now + NOTICE_SECONDS));
        }
        self.visible_notices.retain(|(_, expires)| *expires > now);
        if self.visible_notices.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("sketchpad_notices"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    for (notice, _) in &self.visible_notices {
                        ui.label(notice);
                    }
                });
            });
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, PAINT_STATE_KEY, self.pad.paint_state());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.load_dropped_files(ctx);

        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx);

        self.save_prompt_window(ctx);
        self.notices_window(ctx);
    }
}
