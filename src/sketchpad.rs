use egui::{Color32, Pos2};

use crate::config::SketchConfig;
use crate::controller::SurfaceController;
use crate::error::SketchResult;
use crate::event::{EventBus, EventHandler, SketchEvent};
use crate::history::{Snapshot, SnapshotHistory};
use crate::input::{ControlEvent, InputEvent};
use crate::state::{PaintState, Tool};
use crate::surface::RasterSurface;

/// One drawing widget: a surface controller, its undo history and the handlers
/// listening to it. Instances share nothing.
#[derive(Debug)]
pub struct Sketchpad {
    controller: SurfaceController,
    history: SnapshotHistory,
    events: EventBus,
}

impl Sketchpad {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            controller: SurfaceController::new(config),
            history: SnapshotHistory::new(config.history_capacity),
            events: EventBus::new(),
        }
    }

    /// Register a handler for [`SketchEvent`]s
    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub fn surface(&self) -> &RasterSurface {
        self.controller.surface()
    }

    pub fn paint_state(&self) -> &PaintState {
        self.controller.paint_state()
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Apply a previously persisted paint state
    pub fn restore_paint_state(&mut self, state: PaintState) {
        self.controller.set_color(state.color());
        if let Err(err) = self.set_stroke_width(i64::from(state.stroke_width())) {
            log::warn!("Ignoring persisted stroke width: {err}");
        }
        self.controller.set_tool(state.tool());
    }

    /// Dispatch one pointer event
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { position } => self.begin_stroke(position),
            InputEvent::PointerMove { position } => {
                self.extend_stroke(position);
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => self.end_stroke(),
            InputEvent::Click { position } => {
                self.click_fill(position);
            }
            InputEvent::SecondaryClick => log::trace!("Context menu suppressed"),
        }
    }

    /// Dispatch one control event.
    ///
    /// Every error leaves the surface and paint state as they were.
    pub fn handle_control(&mut self, event: ControlEvent) -> SketchResult<()> {
        match event {
            ControlEvent::SelectColor(color) => self.set_color(color),
            ControlEvent::SetStrokeWidth(width) => self.set_stroke_width(width)?,
            ControlEvent::SetTool(tool) => self.set_tool(tool),
            ControlEvent::ToggleFill => self.toggle_fill(),
            ControlEvent::ToggleErase => self.toggle_erase(),
            ControlEvent::Undo => self.undo()?,
            ControlEvent::Clear => self.clear(),
            ControlEvent::LoadImage(bytes) => self.load_image(&bytes)?,
        }
        Ok(())
    }

    pub fn begin_stroke(&mut self, position: Pos2) {
        self.controller.begin_stroke(position);
    }

    pub fn extend_stroke(&mut self, position: Pos2) -> bool {
        self.controller.extend_stroke(position)
    }

    /// Close the open stroke. If it changed the surface, the pre-stroke state
    /// becomes the newest checkpoint.
    pub fn end_stroke(&mut self) {
        let Some(session) = self.controller.end_stroke() else {
            return;
        };
        if session.is_empty() {
            return;
        }
        let marks = session.marks();
        self.history.push(session.into_baseline());
        self.events.emit(SketchEvent::StrokeCompleted { marks });
    }

    /// Fill the whole surface if the Fill tool is active. Returns true if it filled.
    pub fn click_fill(&mut self, position: Pos2) -> bool {
        if self.paint_state().tool() != Tool::Fill {
            return false;
        }
        self.end_stroke();
        self.history.checkpoint(self.controller.surface());
        let filled = self.controller.click_fill(position);
        if filled {
            let color = self.paint_state().color();
            self.events.emit(SketchEvent::Filled { color });
        }
        filled
    }

    pub fn clear(&mut self) {
        self.end_stroke();
        self.history.checkpoint(self.controller.surface());
        self.controller.clear();
        self.events.emit(SketchEvent::Cleared);
    }

    /// Decode and draw an image over the whole surface. A file that fails to
    /// decode is reported to handlers and leaves surface and history untouched.
    pub fn load_image(&mut self, bytes: &[u8]) -> SketchResult<()> {
        self.end_stroke();
        let baseline = Snapshot::capture(self.controller.surface());
        match self.controller.load_image(bytes) {
            Ok((width, height)) => {
                self.history.push(baseline);
                log::info!("Loaded {width}x{height} image onto surface");
                self.events.emit(SketchEvent::ImageLoaded { width, height });
                Ok(())
            }
            Err(err) => {
                log::warn!("Rejected image upload ({} bytes): {err}", bytes.len());
                self.events.emit(SketchEvent::ImageRejected {
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Restore the most recent checkpoint
    pub fn undo(&mut self) -> SketchResult<()> {
        self.end_stroke();
        self.history.undo(self.controller.surface_mut())?;
        let remaining = self.history.len();
        self.events.emit(SketchEvent::Undone { remaining });
        Ok(())
    }

    /// The surface encoded as PNG
    pub fn export_png(&self) -> SketchResult<Vec<u8>> {
        self.controller.export_image()
    }

    pub fn set_color(&mut self, color: Color32) {
        self.controller.set_color(color);
    }

    pub fn set_stroke_width(&mut self, width: i64) -> SketchResult<()> {
        self.controller.set_stroke_width(width)
    }

    pub fn set_tool(&mut self, tool: Tool) {
        let old = self.paint_state().tool();
        if old == tool {
            return;
        }
        self.controller.set_tool(tool);
        log::info!("Tool changed: {} -> {}", old.name(), tool.name());
        self.events.emit(SketchEvent::ToolChanged { old, new: tool });
    }

    pub fn toggle_fill(&mut self) {
        let tool = self.paint_state().tool().toggled_fill();
        self.set_tool(tool);
    }

    pub fn toggle_erase(&mut self) {
        let tool = self.paint_state().tool().toggled_erase();
        self.set_tool(tool);
    }
}
