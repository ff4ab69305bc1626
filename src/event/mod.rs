//! Outbound notifications from a sketchpad to explicitly registered handlers.

mod bus;
mod notice;

pub use bus::EventBus;
pub use notice::NoticeBoard;

use egui::Color32;

use crate::state::Tool;

/// Something that happened to a sketchpad's surface or paint state
#[derive(Debug, Clone, PartialEq)]
pub enum SketchEvent {
    /// A stroke that changed the surface finished and was checkpointed
    StrokeCompleted { marks: usize },
    Filled { color: Color32 },
    Cleared,
    ImageLoaded { width: u32, height: u32 },
    /// An uploaded file could not be decoded; the surface is unchanged
    ImageRejected { reason: String },
    Undone { remaining: usize },
    ToolChanged { old: Tool, new: Tool },
}

/// Receives every event emitted on the bus it is registered with
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &SketchEvent);
}
