use egui::{Color32, Pos2, Rect, Response, Vec2, pos2};

use crate::state::Tool;

/// Pointer input on the surface. Positions are in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the surface
    PointerDown { position: Pos2 },
    /// Pointer moved over the surface, pressed or not
    PointerMove { position: Pos2 },
    /// Primary button released
    PointerUp { position: Pos2 },
    /// Pointer left the surface
    PointerLeave,
    /// Primary click (press and release without a drag)
    Click { position: Pos2 },
    /// Right click; never acted on
    SecondaryClick,
}

/// Discrete and continuous inputs from the control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SelectColor(Color32),
    /// Raw range-input value; must be positive
    SetStrokeWidth(i64),
    SetTool(Tool),
    ToggleFill,
    ToggleErase,
    Undo,
    Clear,
    /// Encoded image file contents to draw over the surface
    LoadImage(Vec<u8>),
}

/// Turns egui pointer state over the canvas widget into [`InputEvent`]s in
/// surface coordinates.
#[derive(Debug, Default)]
pub struct InputHandler {
    pointer_down: bool,
    inside: bool,
    last_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's pointer input for the canvas `response`.
    ///
    /// `surface_size` is the surface's pixel size; the canvas rect may be drawn
    /// at a different scale.
    pub fn process(
        &mut self,
        ctx: &egui::Context,
        response: &Response,
        surface_size: Vec2,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let rect = response.rect;
        let inside = response.contains_pointer();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();

            if inside {
                if let Some(pos) = hover {
                    let position = to_surface(pos, rect, surface_size);
                    if input.pointer.primary_pressed() {
                        self.pointer_down = true;
                        events.push(InputEvent::PointerDown { position });
                    } else if self.last_pos != Some(pos) {
                        events.push(InputEvent::PointerMove { position });
                    }
                }
            }

            if self.pointer_down && input.pointer.primary_released() {
                self.pointer_down = false;
                let position = hover
                    .map(|pos| to_surface(pos, rect, surface_size))
                    .unwrap_or_default();
                events.push(InputEvent::PointerUp { position });
            }

            self.last_pos = hover;
        });

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(InputEvent::Click {
                    position: to_surface(pos, rect, surface_size),
                });
            }
        }
        if response.secondary_clicked() {
            events.push(InputEvent::SecondaryClick);
        }

        if self.inside && !inside {
            self.pointer_down = false;
            events.push(InputEvent::PointerLeave);
        }
        self.inside = inside;

        events
    }
}

/// Map a screen position inside `rect` to surface pixel coordinates
pub fn to_surface(pos: Pos2, rect: Rect, surface_size: Vec2) -> Pos2 {
    let scale_x = if rect.width() > 0.0 { surface_size.x / rect.width() } else { 1.0 };
    let scale_y = if rect.height() > 0.0 { surface_size.y / rect.height() } else { 1.0 };
    pos2((pos.x - rect.min.x) * scale_x, (pos.y - rect.min.y) * scale_y)
}
