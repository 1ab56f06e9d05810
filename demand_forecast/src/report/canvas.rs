//! Minimal raster drawing on top of `image`

use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use std::path::Path;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const GRID: Rgb<u8> = Rgb([228, 228, 228]);
pub const AXIS: Rgb<u8> = Rgb([120, 120, 120]);
pub const HISTORY: Rgb<u8> = Rgb([31, 119, 180]);
pub const FORECAST: Rgb<u8> = Rgb([214, 39, 40]);
pub const TRIM_MARK: Rgb<u8> = Rgb([255, 160, 60]);
pub const TEXT: Rgb<u8> = Rgb([33, 33, 33]);

/// Pixel canvas with clipped drawing primitives
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: f64) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(pixel) = self.image.get_pixel_mut_checked(x as u32, y as u32) {
            for (channel, &target) in pixel.0.iter_mut().zip(color.0.iter()) {
                let mixed = f64::from(*channel) * (1.0 - alpha) + f64::from(target) * alpha;
                *channel = mixed.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    /// Fill the rectangle spanning `(x0, y0)` to `(x1, y1)` inclusive
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                self.put(x, y, color);
            }
        }
    }

    pub fn outline_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        self.fill_rect(x0, y0, x1, y0, color);
        self.fill_rect(x0, y1, x1, y1, color);
        self.fill_rect(x0, y0, x0, y1, color);
        self.fill_rect(x1, y0, x1, y1, color);
    }

    /// Straight line of the given thickness
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), thickness: u32, color: Rgb<u8>) {
        self.stroke(from, to, thickness, color, None);
    }

    /// Line drawn as alternating `dash` and `gap` pixel runs
    pub fn dashed_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        thickness: u32,
        color: Rgb<u8>,
        dash: u32,
        gap: u32,
    ) {
        self.stroke(from, to, thickness, color, Some((dash, gap)));
    }

    fn stroke(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        thickness: u32,
        color: Rgb<u8>,
        pattern: Option<(u32, u32)>,
    ) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
        let half = (thickness.max(1) as i64 - 1) / 2;
        let extra = (thickness.max(1) as i64 - 1) - half;

        for step in 0..=steps {
            if let Some((dash, gap)) = pattern {
                let period = (dash + gap).max(1);
                if step % period >= dash {
                    continue;
                }
            }
            let t = f64::from(step) / f64::from(steps);
            let x = (from.0 + dx * t).round() as i64;
            let y = (from.1 + dy * t).round() as i64;
            self.fill_rect(x - half, y - half, x + extra, y + extra, color);
        }
    }

    /// Filled circle
    pub fn dot(&mut self, center: (f64, f64), radius: u32, color: Rgb<u8>) {
        let (cx, cy) = (center.0.round() as i64, center.1.round() as i64);
        let r = i64::from(radius);
        for y in -r..=r {
            for x in -r..=r {
                if x * x + y * y <= r * r {
                    self.put(cx + x, cy + y, color);
                }
            }
        }
    }

    /// Translucent band between two polylines sharing the same x positions
    pub fn band(&mut self, xs: &[f64], lower: &[f64], upper: &[f64], color: Rgb<u8>, alpha: f64) {
        let points = xs.len().min(lower.len()).min(upper.len());
        for i in 1..points {
            let (x0, x1) = (xs[i - 1], xs[i]);
            let start = x0.round() as i64;
            let end = x1.round() as i64;
            for x in start..=end {
                // Shared columns between segments would otherwise blend twice
                if x == start && i > 1 {
                    continue;
                }
                let t = if end == start {
                    0.0
                } else {
                    (x - start) as f64 / (end - start) as f64
                };
                let lo = lower[i - 1] + (lower[i] - lower[i - 1]) * t;
                let hi = upper[i - 1] + (upper[i] - upper[i - 1]) * t;
                for y in hi.min(lo).round() as i64..=hi.max(lo).round() as i64 {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`
    pub fn text(
        &mut self,
        font: &FontRef<'_>,
        size: f32,
        (x, y): (i64, i64),
        color: Rgb<u8>,
        text: &str,
    ) {
        draw_text_mut(&mut self.image, color, x as i32, y as i32, PxScale::from(size), font, text);
    }

    /// Width and height `text` occupies at `size`
    pub fn measure(font: &FontRef<'_>, size: f32, text: &str) -> (i64, i64) {
        let (width, height) = imageproc::drawing::text_size(PxScale::from(size), font, text);
        (i64::from(width), i64::from(height))
    }

    /// Draw `text` horizontally centred on `center_x`
    pub fn centered_text(
        &mut self,
        font: &FontRef<'_>,
        size: f32,
        (center_x, y): (i64, i64),
        color: Rgb<u8>,
        text: &str,
    ) {
        let (width, _) = Self::measure(font, size, text);
        self.text(font, size, (center_x - width / 2, y), color, text);
    }

    /// Copy another canvas onto this one with its top-left corner at `(x, y)`
    pub fn paste(&mut self, other: &Canvas, x: i64, y: i64) {
        image::imageops::replace(&mut self.image, &other.image, x, y);
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.image.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::font::chart_font;

    #[test]
    fn test_drawing_outside_is_clipped() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        canvas.fill_rect(-5, -5, 2, 2, AXIS);
        canvas.line((-20.0, 5.0), (40.0, 5.0), 1, HISTORY);
        assert_eq!(canvas.pixel(0, 0), Some(AXIS));
        assert_eq!(canvas.pixel(9, 5), Some(HISTORY));
        assert_eq!(canvas.pixel(9, 9), Some(WHITE));
    }

    #[test]
    fn test_dashed_line_leaves_gaps() {
        let mut canvas = Canvas::new(40, 3, WHITE);
        canvas.dashed_line((0.0, 1.0), (39.0, 1.0), 1, FORECAST, 4, 4);
        assert_eq!(canvas.pixel(0, 1), Some(FORECAST));
        assert_eq!(canvas.pixel(5, 1), Some(WHITE));
        assert_eq!(canvas.pixel(8, 1), Some(FORECAST));
    }

    #[test]
    fn test_band_blends_with_background() {
        let mut canvas = Canvas::new(20, 20, WHITE);
        canvas.band(&[0.0, 19.0], &[15.0, 15.0], &[5.0, 5.0], FORECAST, 0.5);
        let inside = canvas.pixel(10, 10).unwrap();
        assert_ne!(inside, WHITE);
        assert_ne!(inside, FORECAST);
        assert_eq!(canvas.pixel(10, 2), Some(WHITE));
    }

    #[test]
    fn test_text_leaves_ink_inside_its_box() {
        let font = chart_font().unwrap();
        let mut canvas = Canvas::new(120, 40, WHITE);
        canvas.text(&font, 20.0, (4, 4), TEXT, "Avg: 3.5");

        let (width, height) = Canvas::measure(&font, 20.0, "Avg: 3.5");
        assert!(width > 0 && height > 0);
        let image = canvas.into_image();
        assert!(image.pixels().any(|p| p.0.iter().all(|&c| c < 128)));
        assert_eq!(image.get_pixel(119, 39), &WHITE);
    }
}
