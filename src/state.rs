use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{SketchError, SketchResult};

/// What pointer input does on the surface.
///
/// | tool  | drag           | click             |
/// |-------|----------------|-------------------|
/// | Paint | freehand line  | nothing           |
/// | Fill  | freehand line  | fill whole surface|
/// | Erase | eraser dabs    | nothing           |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Paint,
    Fill,
    Erase,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Paint => "Paint",
            Self::Fill => "Fill",
            Self::Erase => "Erase",
        }
    }

    /// The Fill/Paint toggle: Fill goes back to Paint, anything else enters Fill
    pub fn toggled_fill(self) -> Self {
        match self {
            Self::Fill => Self::Paint,
            _ => Self::Fill,
        }
    }

    /// The Erase/Paint toggle: Erase goes back to Paint, anything else enters Erase
    pub fn toggled_erase(self) -> Self {
        match self {
            Self::Erase => Self::Paint,
            _ => Self::Erase,
        }
    }
}

/// Current color, stroke width and tool of one widget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintState {
    color: Color32,
    stroke_width: u32,
    tool: Tool,
}

impl PaintState {
    pub fn new(color: Color32, stroke_width: u32) -> Self {
        Self {
            color: opaque(color),
            stroke_width: stroke_width.max(1),
            tool: Tool::Paint,
        }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Set the pen and fill color. Alpha is dropped; the surface is always opaque.
    pub fn set_color(&mut self, color: Color32) {
        self.color = opaque(color);
    }

    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    /// Set the stroke width in pixels. Non-positive values are rejected and the
    /// previous width is kept.
    pub fn set_stroke_width(&mut self, width: i64) -> SketchResult<()> {
        let width = u32::try_from(width)
            .ok()
            .filter(|w| *w > 0)
            .ok_or_else(|| {
                SketchError::InvalidArgument(format!("stroke width must be positive, got {width}"))
            })?;
        self.stroke_width = width;
        Ok(())
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }
}

fn opaque(color: Color32) -> Color32 {
    Color32::from_rgb(color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_width() {
        let mut state = PaintState::new(Color32::BLACK, 5);
        assert!(matches!(state.set_stroke_width(0), Err(SketchError::InvalidArgument(_))));
        assert!(matches!(state.set_stroke_width(-3), Err(SketchError::InvalidArgument(_))));
        assert_eq!(state.stroke_width(), 5);

        state.set_stroke_width(12).unwrap();
        assert_eq!(state.stroke_width(), 12);
    }

    #[test]
    fn test_color_forced_opaque() {
        let mut state = PaintState::new(Color32::BLACK, 5);
        state.set_color(Color32::from_rgba_unmultiplied(255, 0, 0, 10));
        assert_eq!(state.color().a(), 255);
    }

    #[test]
    fn test_toggles() {
        assert_eq!(Tool::Paint.toggled_fill(), Tool::Fill);
        assert_eq!(Tool::Fill.toggled_fill(), Tool::Paint);
        assert_eq!(Tool::Erase.toggled_fill(), Tool::Fill);
        assert_eq!(Tool::Paint.toggled_erase(), Tool::Erase);
        assert_eq!(Tool::Erase.toggled_erase(), Tool::Paint);
        assert_eq!(Tool::Fill.toggled_erase(), Tool::Erase);
    }
}
