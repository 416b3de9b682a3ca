//! Image frames, loading, and sampling.
//!
//! This module provides:
//! - A floating-point RGBA frame type filters operate on
//! - Texture-style coordinate mapping and clamp-to-edge sampling
//! - Single-channel planes for luminance-based filters
//! - Image file loading/saving via the `image` crate
//! - Synthetic test images

pub mod loader;
pub mod synth;

pub use loader::{load_image, save_image, FrameError};
pub use synth::{
    generate_checkerboard, generate_color_bars, generate_horizontal_gradient, generate_noise,
    generate_solid, generate_vertical_gradient,
};

use crate::color::luminance;

/// RGBA pixel with channels in 0.0..=1.0.
pub type Rgba = [f32; 4];

/// An RGBA image held in floating point, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Frame {
    /// Create a frame filled with a single colour.
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width as usize) * (height as usize)],
        }
    }

    /// Create a frame from existing pixel data.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::Empty);
        }
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(FrameError::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a frame from tightly packed RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, FrameError> {
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| {
                [
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                    p[3] as f32 / 255.0,
                ]
            })
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    /// Tightly packed RGBA8 bytes (rounded, clamped).
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| p.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
            .collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texture dimensions as a float vector.
    pub fn dimensions(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at (x, y). Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        self.pixels[self.index(x, y)]
    }

    /// Pixel at (x, y) with coordinates clamped to the image edge.
    pub fn get_clamped(&self, x: i64, y: i64) -> Rgba {
        let cx = x.clamp(0, self.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.height as i64 - 1) as u32;
        self.get(cx, cy)
    }

    pub fn set(&mut self, x: u32, y: u32, rgba: Rgba) {
        let idx = self.index(x, y);
        self.pixels[idx] = rgba;
    }

    /// Nearest-texel sample at a normalized texture coordinate.
    pub fn sample(&self, texcoord: [f32; 2]) -> Rgba {
        let [x, y] = texel_coord(texcoord, self.dimensions());
        self.get(x, y)
    }

    /// Apply an independent per-pixel transform.
    pub fn map_pixels<F>(&self, mut f: F) -> Frame
    where
        F: FnMut(u32, u32, Rgba) -> Rgba,
    {
        let width = self.width;
        let pixels = self
            .pixels
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let x = (i % width as usize) as u32;
                let y = (i / width as usize) as u32;
                f(x, y, p)
            })
            .collect();
        Frame {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Rec. 709 luminance of every pixel.
    pub fn luminance_plane(&self) -> Plane {
        Plane {
            width: self.width,
            height: self.height,
            data: self
                .pixels
                .iter()
                .map(|p| luminance([p[0], p[1], p[2]]))
                .collect(),
        }
    }

    /// Replace RGB with a grey plane, keeping this frame's alpha.
    pub fn with_gray(&self, plane: &Plane) -> Frame {
        self.map_pixels(|x, y, p| {
            let v = plane.get(x as i64, y as i64).clamp(0.0, 1.0);
            [v, v, v, p[3]]
        })
    }

    /// Composite onto an opaque background colour.
    pub fn flatten_onto(&self, background: [f32; 3]) -> Frame {
        self.map_pixels(|_, _, p| {
            let a = p[3].clamp(0.0, 1.0);
            [
                p[0] * a + background[0] * (1.0 - a),
                p[1] * a + background[1] * (1.0 - a),
                p[2] * a + background[2] * (1.0 - a),
                1.0,
            ]
        })
    }

    /// Convert to an 8-bit `image` buffer.
    pub fn to_image(&self) -> image::RgbaImage {
        // Length always matches width * height * 4.
        image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8())
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }
}

impl TryFrom<&image::DynamicImage> for Frame {
    type Error = FrameError;

    fn try_from(img: &image::DynamicImage) -> Result<Self, Self::Error> {
        let rgba = img.to_rgba8();
        Frame::from_rgba8(rgba.width(), rgba.height(), rgba.as_raw())
    }
}

/// Integer texel for a normalized texture coordinate: `floor(texcoord * dims)`,
/// clamped into the image.
pub fn texel_coord(texcoord: [f32; 2], dims: [f32; 2]) -> [u32; 2] {
    let fx = (texcoord[0] * dims[0]).floor();
    let fy = (texcoord[1] * dims[1]).floor();
    [
        fx.clamp(0.0, (dims[0] - 1.0).max(0.0)) as u32,
        fy.clamp(0.0, (dims[1] - 1.0).max(0.0)) as u32,
    ]
}

/// Texture coordinate of a texel's centre.
pub fn texel_center(x: u32, y: u32, dims: [f32; 2]) -> [f32; 2] {
    [(x as f32 + 0.5) / dims[0], (y as f32 + 0.5) / dims[1]]
}

/// Single-channel float image.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl Plane {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width as usize) * (height as usize)],
        }
    }

    /// Value at (x, y), clamped to the edge.
    pub fn get(&self, x: i64, y: i64) -> f32 {
        let cx = x.clamp(0, self.width as i64 - 1) as usize;
        let cy = y.clamp(0, self.height as i64 - 1) as usize;
        self.data[cy * self.width as usize + cx]
    }

    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = value;
    }

    /// Bilinear sample at a pixel-space position (pixel centres at integers).
    pub fn sample_bilinear(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let tx = x - x0;
        let ty = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let a = self.get(x0, y0);
        let b = self.get(x0 + 1, y0);
        let c = self.get(x0, y0 + 1);
        let d = self.get(x0 + 1, y0 + 1);

        let top = a + (b - a) * tx;
        let bottom = c + (d - c) * tx;
        top + (bottom - top) * ty
    }

    /// Build a plane by evaluating `f` at every position.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> f32,
    {
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_rejects_bad_length() {
        let result = Frame::from_pixels(4, 4, vec![[0.0; 4]; 15]);
        assert!(matches!(
            result,
            Err(FrameError::InvalidDimensions { len: 15, .. })
        ));
        assert!(matches!(Frame::from_pixels(0, 4, vec![]), Err(FrameError::Empty)));
    }

    #[test]
    fn test_texel_coord_floors() {
        let dims = [8.0, 4.0];
        assert_eq!(texel_coord([0.0, 0.0], dims), [0, 0]);
        assert_eq!(texel_coord([0.5, 0.5], dims), [4, 2]);
        assert_eq!(texel_coord([0.124, 0.99], dims), [0, 3]);
        // Out of range coordinates clamp to the edge
        assert_eq!(texel_coord([1.0, 1.0], dims), [7, 3]);
        assert_eq!(texel_coord([-0.3, 2.0], dims), [0, 3]);
    }

    #[test]
    fn test_texel_center_round_trips() {
        let dims = [13.0, 7.0];
        for y in 0..7 {
            for x in 0..13 {
                assert_eq!(texel_coord(texel_center(x, y, dims), dims), [x, y]);
            }
        }
    }

    #[test]
    fn test_rgba8_conversion() {
        let bytes = vec![255, 0, 128, 255, 0, 0, 0, 0];
        let frame = Frame::from_rgba8(2, 1, &bytes).unwrap();
        assert_eq!(frame.get(0, 0)[0], 1.0);
        assert_eq!(frame.to_rgba8(), bytes);
    }

    #[test]
    fn test_get_clamped() {
        let frame = generate_horizontal_gradient(4, 1);
        assert_eq!(frame.get_clamped(-5, 0), frame.get(0, 0));
        assert_eq!(frame.get_clamped(100, 3), frame.get(3, 0));
    }

    #[test]
    fn test_flatten_onto_background() {
        let frame = Frame::new(2, 2, [1.0, 1.0, 1.0, 0.0]);
        let flat = frame.flatten_onto([0.0, 0.0, 1.0]);
        assert_eq!(flat.get(1, 1), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_plane_bilinear() {
        let plane = Plane::from_fn(2, 1, |x, _| x as f32);
        assert!((plane.sample_bilinear(0.5, 0.0) - 0.5).abs() < 1e-6);
        assert_eq!(plane.sample_bilinear(5.0, 0.0), 1.0);
    }
}
