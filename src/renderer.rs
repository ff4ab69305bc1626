use egui::{Color32, ColorImage, Rect, TextureHandle, TextureOptions, pos2};

use crate::surface::RasterSurface;

/// Presents a [`RasterSurface`] as an egui texture
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    /// Surface revision currently held by the texture
    uploaded_revision: Option<u64>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploaded_revision", &self.uploaded_revision)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload the surface if it changed since the last upload and return the texture
    pub fn sync(&mut self, ctx: &egui::Context, surface: &RasterSurface) -> &TextureHandle {
        let revision = surface.revision();
        if let Some(texture) = &mut self.texture {
            if self.uploaded_revision != Some(revision) {
                texture.set(to_color_image(surface), TextureOptions::NEAREST);
            }
        }
        self.uploaded_revision = Some(revision);

        self.texture.get_or_insert_with(|| {
            ctx.load_texture("sketchpad_surface", to_color_image(surface), TextureOptions::NEAREST)
        })
    }

    /// Draw the surface stretched over `rect`
    pub fn paint(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        rect: Rect,
        surface: &RasterSurface,
    ) {
        let texture = self.sync(ctx, surface);
        painter.image(
            texture.id(),
            rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        );
    }

    pub fn uploaded_revision(&self) -> Option<u64> {
        self.uploaded_revision
    }
}

fn to_color_image(surface: &RasterSurface) -> ColorImage {
    let size = [surface.width() as usize, surface.height() as usize];
    ColorImage::from_rgb(size, surface.pixels().as_raw())
}
