//! Fixed-size opaque raster surface and the immediate-mode drawing primitives
//! that mutate it.

use std::io::Cursor;

use egui::{Color32, Pos2, pos2};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::error::{SketchError, SketchResult};

/// Square RGB pixel buffer. Every pixel is opaque; the buffer is never resized.
#[derive(Clone)]
pub struct RasterSurface {
    pixels: RgbImage,
    background: Rgb<u8>,
    /// Bumped on every mutation so presenters know when to re-upload
    revision: u64,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("background", &self.background)
            .field("revision", &self.revision)
            .finish()
    }
}

impl RasterSurface {
    /// Create a `size` x `size` surface filled with the background color
    pub fn new(size: u32, background: Color32) -> Self {
        let background = to_rgb(background);
        Self {
            pixels: RgbImage::from_pixel(size, size, background),
            background,
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn background(&self) -> Color32 {
        to_color32(self.background)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Raw pixel contents
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Color at (x, y), or None outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixels.get_pixel_checked(x, y).map(|p| to_color32(*p))
    }

    /// Overwrite every pixel with `color`
    pub fn fill(&mut self, color: Color32) {
        let color = to_rgb(color);
        self.pixels.pixels_mut().for_each(|p| *p = color);
        self.touch();
    }

    /// Overwrite every pixel with the background color
    pub fn clear(&mut self) {
        self.fill(self.background());
    }

    /// Rasterize a straight segment of the given width with round ends.
    ///
    /// A pixel is covered when its center lies within `width / 2` of the segment,
    /// edge included, so a 1px line on a pixel boundary still shows up.
    /// Parts outside the surface are clipped. Returns true if any pixel was covered.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) -> bool {
        let radius = width / 2.0;
        let min = pos2(from.x.min(to.x) - radius, from.y.min(to.y) - radius);
        let max = pos2(from.x.max(to.x) + radius, from.y.max(to.y) + radius);
        self.paint_covered(min, max, to_rgb(color), |p| {
            distance_to_segment(p, from, to) <= radius
        })
    }

    /// Paint a filled disc. Returns true if any pixel was covered.
    pub fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) -> bool {
        let min = pos2(center.x - radius, center.y - radius);
        let max = pos2(center.x + radius, center.y + radius);
        self.paint_covered(min, max, to_rgb(color), |p| p.distance(center) <= radius)
    }

    /// Scale `image` to the full surface (aspect ratio is not kept) and composite
    /// it source-over onto the current contents.
    pub fn blit_image(&mut self, image: &DynamicImage) {
        let scaled = image
            .resize_exact(self.width(), self.height(), FilterType::Triangle)
            .to_rgba8();

        for (dst, src) in self.pixels.pixels_mut().zip(scaled.pixels()) {
            let alpha = u32::from(src[3]);
            for channel in 0..3 {
                let blended =
                    u32::from(src[channel]) * alpha + u32::from(dst[channel]) * (255 - alpha);
                dst[channel] = ((blended + 127) / 255) as u8;
            }
        }
        self.touch();
    }

    /// Encode the current contents as PNG
    pub fn encode_png(&self) -> SketchResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(SketchError::ImageEncode)?;
        Ok(bytes)
    }

    /// Replace the whole buffer. Dimensions must match.
    pub(crate) fn replace_pixels(&mut self, pixels: &RgbImage) {
        debug_assert_eq!(pixels.dimensions(), self.pixels.dimensions());
        self.pixels.clone_from(pixels);
        self.touch();
    }

    fn paint_covered(
        &mut self,
        min: Pos2,
        max: Pos2,
        color: Rgb<u8>,
        covers: impl Fn(Pos2) -> bool,
    ) -> bool {
        let (width, height) = self.pixels.dimensions();
        let x_start = clamp_coord(min.x.floor(), width);
        let y_start = clamp_coord(min.y.floor(), height);
        let x_end = clamp_coord(max.x.ceil() + 1.0, width);
        let y_end = clamp_coord(max.y.ceil() + 1.0, height);

        let mut painted = false;
        for y in y_start..y_end {
            for x in x_start..x_end {
                let center = pos2(x as f32 + 0.5, y as f32 + 0.5);
                if covers(center) {
                    self.pixels.put_pixel(x, y, color);
                    painted = true;
                }
            }
        }
        if painted {
            self.touch();
        }
        painted
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn clamp_coord(value: f32, limit: u32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        (value as u32).min(limit)
    }
}

/// Distance from a point to a line segment
pub(crate) fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let line = end - start;
    let to_point = point - start;

    let len_sq = line.length_sq();
    if len_sq == 0.0 {
        return to_point.length();
    }

    let t = (to_point.dot(line) / len_sq).clamp(0.0, 1.0);
    (point - (start + line * t)).length()
}

pub(crate) fn to_rgb(color: Color32) -> Rgb<u8> {
    Rgb([color.r(), color.g(), color.b()])
}

pub(crate) fn to_color32(Rgb([r, g, b]): Rgb<u8>) -> Color32 {
    Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn white_surface(size: u32) -> RasterSurface {
        RasterSurface::new(size, Color32::WHITE)
    }

    fn count_color(surface: &RasterSurface, color: Color32) -> usize {
        let rgb = to_rgb(color);
        surface.pixels().pixels().filter(|p| **p == rgb).count()
    }

    #[test]
    fn test_new_surface_is_background() {
        let surface = white_surface(16);
        assert_eq!(surface.width(), 16);
        assert_eq!(surface.height(), 16);
        assert_eq!(count_color(&surface, Color32::WHITE), 256);
        assert_eq!(surface.pixel(16, 0), None);
    }

    #[test]
    fn test_vertical_segment_band() {
        let mut surface = white_surface(100);
        assert!(surface.stroke_segment(pos2(10.0, 10.0), pos2(10.0, 50.0), 5.0, Color32::BLACK));

        for y in 10..50 {
            for x in 7..=12 {
                assert_eq!(surface.pixel(x, y), Some(Color32::BLACK), "({x}, {y})");
            }
            assert_eq!(surface.pixel(6, y), Some(Color32::WHITE));
            assert_eq!(surface.pixel(13, y), Some(Color32::WHITE));
        }
        assert_eq!(surface.pixel(10, 60), Some(Color32::WHITE));
        assert_eq!(surface.pixel(10, 3), Some(Color32::WHITE));
    }

    #[test]
    fn test_thin_segment_on_pixel_boundary_is_drawn() {
        let mut surface = white_surface(20);
        assert!(surface.stroke_segment(pos2(10.0, 2.0), pos2(10.0, 18.0), 1.0, Color32::BLACK));
        assert_eq!(surface.pixel(9, 10), Some(Color32::BLACK));
        assert_eq!(surface.pixel(10, 10), Some(Color32::BLACK));
        assert_eq!(surface.pixel(8, 10), Some(Color32::WHITE));
        assert_eq!(surface.pixel(11, 10), Some(Color32::WHITE));
    }

    #[test]
    fn test_segment_clipped_at_edges() {
        let mut surface = white_surface(20);
        assert!(surface.stroke_segment(pos2(-30.0, 5.0), pos2(50.0, 5.0), 3.0, Color32::RED));
        assert_eq!(surface.pixel(0, 5), Some(Color32::RED));
        assert_eq!(surface.pixel(19, 5), Some(Color32::RED));

        let revision = surface.revision();
        assert!(!surface.stroke_segment(pos2(-30.0, -30.0), pos2(-20.0, -20.0), 3.0, Color32::RED));
        assert_eq!(surface.revision(), revision);
    }

    #[test]
    fn test_fill_circle_radius() {
        let mut surface = white_surface(100);
        surface.fill(Color32::BLACK);
        assert!(surface.fill_circle(pos2(50.0, 50.0), 18.0, Color32::WHITE));

        assert_eq!(surface.pixel(50, 50), Some(Color32::WHITE));
        assert_eq!(surface.pixel(50 + 16, 50), Some(Color32::WHITE));
        assert_eq!(surface.pixel(50, 50 - 17), Some(Color32::WHITE));
        assert_eq!(surface.pixel(50 + 20, 50), Some(Color32::BLACK));
        // corner of the bounding box lies outside the disc
        assert_eq!(surface.pixel(50 + 15, 50 + 15), Some(Color32::BLACK));
    }

    #[test]
    fn test_fill_and_clear() {
        let mut surface = white_surface(8);
        surface.fill(Color32::BLUE);
        assert_eq!(count_color(&surface, Color32::BLUE), 64);
        surface.clear();
        assert_eq!(count_color(&surface, Color32::WHITE), 64);
    }

    #[test]
    fn test_blit_scales_to_full_surface() {
        let mut surface = white_surface(32);
        let source = RgbaImage::from_pixel(4, 2, Rgba([0, 0, 255, 255]));
        surface.blit_image(&DynamicImage::ImageRgba8(source));
        assert_eq!(count_color(&surface, Color32::BLUE), 32 * 32);
    }

    #[test]
    fn test_blit_transparent_keeps_underlying_pixels() {
        let mut surface = white_surface(8);
        surface.fill(Color32::RED);
        let source = RgbaImage::from_pixel(8, 8, Rgba([0, 255, 0, 0]));
        surface.blit_image(&DynamicImage::ImageRgba8(source));
        assert_eq!(count_color(&surface, Color32::RED), 64);
    }

    #[test]
    fn test_encode_png_roundtrips_pixels() {
        let mut surface = white_surface(12);
        surface.stroke_segment(pos2(0.0, 0.0), pos2(12.0, 12.0), 2.0, Color32::BLACK);
        let png = surface.encode_png().unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(&decoded, surface.pixels());
    }

    #[test]
    fn test_distance_to_degenerate_segment() {
        let d = distance_to_segment(pos2(3.0, 4.0), pos2(0.0, 0.0), pos2(0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-6);
    }
}
