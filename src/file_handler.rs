use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SketchError, SketchResult};
use crate::sketchpad::Sketchpad;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// An image file picked or dropped by the user, read into memory
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Collects image files dropped onto the window
#[derive(Debug, Default)]
pub struct FileHandler;

impl FileHandler {
    pub fn new() -> Self {
        Self
    }

    /// Read any files dropped this frame. Non-image files are skipped with a warning.
    pub fn take_dropped_images(&mut self, ctx: &egui::Context) -> Vec<ImageFile> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        dropped.iter().filter_map(read_dropped_file).collect()
    }

    /// Show the native file picker and read the chosen image.
    ///
    /// Returns `Ok(None)` if the user cancelled.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn pick_image(&self) -> SketchResult<Option<ImageFile>> {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Open Image")
            .add_filter("Image", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return Ok(None);
        };

        let bytes = fs::read(&path)?;
        log::info!("Read image {} ({} bytes)", path.display(), bytes.len());
        Ok(Some(ImageFile {
            name: path.display().to_string(),
            bytes,
        }))
    }
}

fn read_dropped_file(file: &egui::DroppedFile) -> Option<ImageFile> {
    let name = match &file.path {
        Some(path) => path.display().to_string(),
        None if !file.name.is_empty() => file.name.clone(),
        None => "unknown".to_owned(),
    };

    if !is_image_file(file) {
        log::warn!("Dropped file is not a supported type: {name}");
        return None;
    }

    if let Some(bytes) = &file.bytes {
        return Some(ImageFile {
            name,
            bytes: bytes.to_vec(),
        });
    }

    let path = file.path.as_ref()?;
    match fs::read(path) {
        Ok(bytes) => Some(ImageFile { name, bytes }),
        Err(err) => {
            log::error!("Failed to read dropped file {name}: {err}");
            None
        }
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = file
        .path
        .as_deref()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&file.name));
    has_image_extension(&name)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// File name for a save request. A cancelled prompt (`None`) or an empty name
/// aborts the save.
pub fn save_file_name(name: Option<&str>) -> SketchResult<String> {
    match name {
        Some(name) if !name.is_empty() => Ok(format!("{name}.png")),
        _ => Err(SketchError::SaveAborted),
    }
}

/// Encode the surface as PNG and write it to `<dir>/<name>.png`
pub fn save_png(pad: &Sketchpad, name: Option<&str>, dir: &Path) -> SketchResult<PathBuf> {
    let file_name = save_file_name(name)?;
    let png = pad.export_png()?;
    let path = dir.join(file_name);
    fs::write(&path, &png)?;
    log::info!("Saved {} ({} bytes)", path.display(), png.len());
    Ok(path)
}
