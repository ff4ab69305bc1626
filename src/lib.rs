#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod sketchpad;
pub mod state;
pub mod stroke;
pub mod surface;

pub use app::PaintApp;
pub use config::SketchConfig;
pub use controller::SurfaceController;
pub use error::{SketchError, SketchResult};
pub use event::{EventHandler, NoticeBoard, SketchEvent};
pub use history::{Snapshot, SnapshotHistory};
pub use input::{ControlEvent, InputEvent};
pub use renderer::Renderer;
pub use sketchpad::Sketchpad;
pub use state::{PaintState, Tool};
pub use surface::RasterSurface;
