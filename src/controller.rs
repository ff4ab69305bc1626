use egui::{Color32, Pos2};

use crate::config::SketchConfig;
use crate::error::{SketchError, SketchResult};
use crate::history::Snapshot;
use crate::state::{PaintState, Tool};
use crate::stroke::StrokeSession;
use crate::surface::RasterSurface;

/// Owns the raster surface and the paint state, and turns pointer and control
/// input into raster operations.
#[derive(Debug)]
pub struct SurfaceController {
    surface: RasterSurface,
    paint: PaintState,
    eraser_radius: f32,
    /// Some while the pointer is down
    session: Option<StrokeSession>,
}

impl SurfaceController {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            surface: RasterSurface::new(config.surface_size, config.background_color()),
            paint: PaintState::new(config.initial_color(), config.initial_stroke_width),
            eraser_radius: config.eraser_radius,
            session: None,
        }
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Mutable access for whole-surface restores that bypass the drawing path
    pub(crate) fn surface_mut(&mut self) -> &mut RasterSurface {
        &mut self.surface
    }

    pub fn paint_state(&self) -> &PaintState {
        &self.paint
    }

    pub fn is_pointer_down(&self) -> bool {
        self.session.is_some()
    }

    pub fn set_color(&mut self, color: Color32) {
        self.paint.set_color(color);
    }

    pub fn set_stroke_width(&mut self, width: i64) -> SketchResult<()> {
        self.paint.set_stroke_width(width)
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.paint.set_tool(tool);
    }

    /// Pointer went down over the surface. Opens a new path at `position`;
    /// nothing is drawn until the pointer moves.
    pub fn begin_stroke(&mut self, position: Pos2) {
        if self.session.is_some() {
            log::debug!("begin_stroke while a stroke is open, restarting at {position:?}");
        }
        self.session = Some(StrokeSession::new(position, Snapshot::capture(&self.surface)));
    }

    /// Pointer moved while down. In Erase mode this stamps a background-colored
    /// dab at `position`; otherwise it draws a segment from the last point.
    ///
    /// Returns true if the surface changed. Moves without a pressed pointer are ignored.
    pub fn extend_stroke(&mut self, position: Pos2) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let changed = match self.paint.tool() {
            Tool::Erase => {
                let background = self.surface.background();
                self.surface.fill_circle(position, self.eraser_radius, background)
            }
            Tool::Paint | Tool::Fill => self.surface.stroke_segment(
                session.last_point(),
                position,
                self.paint.stroke_width() as f32,
                self.paint.color(),
            ),
        };

        session.advance_to(position);
        if changed {
            session.record_mark();
        }
        changed
    }

    /// Pointer released or left the surface. Hands back the finished session,
    /// if one was open, so the caller can checkpoint it.
    pub fn end_stroke(&mut self) -> Option<StrokeSession> {
        self.session.take()
    }

    /// Click on the surface. In Fill mode the whole surface is overwritten with
    /// the current color; otherwise nothing happens. Returns true if it filled.
    pub fn click_fill(&mut self, _position: Pos2) -> bool {
        if self.paint.tool() != Tool::Fill {
            return false;
        }
        self.surface.fill(self.paint.color());
        true
    }

    /// Reset the surface to the background, regardless of mode
    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Decode `bytes` and draw the image scaled over the full surface.
    ///
    /// On decode failure the surface is left untouched. Returns the decoded
    /// image's original dimensions.
    pub fn load_image(&mut self, bytes: &[u8]) -> SketchResult<(u32, u32)> {
        let image = image::load_from_memory(bytes).map_err(SketchError::ImageDecode)?;
        let dimensions = (image.width(), image.height());
        self.surface.blit_image(&image);
        Ok(dimensions)
    }

    /// The surface encoded as PNG
    pub fn export_image(&self) -> SketchResult<Vec<u8>> {
        self.surface.encode_png()
    }
}
