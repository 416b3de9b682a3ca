//! Luminance-biased ordered dithering.
//!
//! Each pixel is handled independently:
//! 1. Map the pixel to its integer texel coordinate and tile it over the image
//! 2. Look up a dither value from the threshold table
//! 3. Derive a threshold from the pixel's Rec. 709 luminance
//! 4. Quantize red, green and blue, rounding up where the ordered offset
//!    clears the threshold
//!
//! Brighter pixels get a higher threshold, so highlights round down more often
//! than shadows round up.

use super::{BayerDitherParams, DitherMatrix, Filter, FilterParams, FilterType};
use crate::color::luminance;
use crate::frame::{Frame, Rgba};

/// Luminance dither table: 16 rows of 4 thresholds.
pub const EXTENDED_MATRIX: [[f32; 4]; 16] = [
    [0.0078, 0.1406, 0.2734, 0.4062],
    [0.4390, 0.5718, 0.7046, 0.8374],
    [0.8702, 0.0039, 0.1367, 0.2795],
    [0.4023, 0.5351, 0.6679, 0.8007],
    [0.8335, 0.9663, 0.0991, 0.2319],
    [0.3667, 0.4995, 0.6323, 0.7651],
    [0.7019, 0.8347, 0.9675, 0.1003],
    [0.3347, 0.4675, 0.6003, 0.7331],
    [0.6691, 0.8019, 0.9347, 0.0675],
    [0.3019, 0.4347, 0.5675, 0.7003],
    [0.6367, 0.7695, 0.9023, 0.0351],
    [0.2695, 0.4023, 0.5351, 0.6679],
    [0.6043, 0.7371, 0.8699, 0.0027],
    [0.2371, 0.3700, 0.5028, 0.6356],
    [0.5718, 0.7046, 0.8374, 0.9702],
    [0.2046, 0.3374, 0.4702, 0.6030],
];

/// Bayer matrix 2x2, ranks 0-3.
pub const BAYER_2X2: [[u8; 2]; 2] = [[0, 2], [3, 1]];

/// Bayer matrix 4x4, ranks 0-15.
pub const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Bayer matrix 8x8, ranks 0-63.
pub const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Tile a texel coordinate over a repeat of four times the image size.
#[inline]
fn tile_coord(coord: [u32; 2], dims: [f32; 2]) -> [u32; 2] {
    let span_x = (4.0 * dims[0]).max(1.0) as u32;
    let span_y = (4.0 * dims[1]).max(1.0) as u32;
    [coord[0] % span_x, coord[1] % span_y]
}

/// Dither value in 0.0..1.0 for a tiled coordinate.
///
/// The extended table is indexed by row `y % 16` and column `x % 4`. Classic
/// Bayer ranks are normalized to `(rank + 0.5) / n²`.
#[inline]
pub fn dither_value(matrix: DitherMatrix, x: u32, y: u32) -> f32 {
    match matrix {
        DitherMatrix::Extended => EXTENDED_MATRIX[(y % 16) as usize][(x % 4) as usize],
        DitherMatrix::Bayer2 => (BAYER_2X2[(y % 2) as usize][(x % 2) as usize] as f32 + 0.5) / 4.0,
        DitherMatrix::Bayer4 => {
            (BAYER_4X4[(y % 4) as usize][(x % 4) as usize] as f32 + 0.5) / 16.0
        }
        DitherMatrix::Bayer8 => {
            (BAYER_8X8[(y % 8) as usize][(x % 8) as usize] as f32 + 0.5) / 64.0
        }
    }
}

/// Threshold for a given luminance: `threshold_base + luminance * luminance_factor`.
///
/// With the defaults this spans 0.5..=0.7 over luminance 0.0..=1.0.
#[inline]
pub fn dither_threshold(luminance: f32, params: &BayerDitherParams) -> f32 {
    params.threshold_base + luminance * params.luminance_factor
}

#[inline]
fn dither_channel(value: f32, dither: f32, threshold: f32, levels: u32) -> f32 {
    let steps = (levels - 1) as f32;
    let scaled = value.clamp(0.0, 1.0) * steps;
    let base = scaled.floor();
    let frac = scaled - base;

    let level = if frac + (0.5 - dither) > threshold {
        base + 1.0
    } else {
        base
    };
    level.min(steps) / steps
}

/// Dither one pixel at texel `coord` of an image with dimensions `dims`.
pub fn dither_pixel(
    color: Rgba,
    coord: [u32; 2],
    dims: [f32; 2],
    params: &BayerDitherParams,
) -> Rgba {
    let [tx, ty] = tile_coord(coord, dims);
    let dither = dither_value(params.matrix, tx, ty);
    let threshold = dither_threshold(luminance([color[0], color[1], color[2]]), params);
    let levels = params.levels.max(2);

    [
        dither_channel(color[0], dither, threshold, levels),
        dither_channel(color[1], dither, threshold, levels),
        dither_channel(color[2], dither, threshold, levels),
        color[3],
    ]
}

/// Ordered dither filter.
pub struct BayerDitherFilter;

impl Filter for BayerDitherFilter {
    fn apply(&self, frame: &Frame, params: &FilterParams) -> Frame {
        let defaults = BayerDitherParams::default();
        let p = match params {
            FilterParams::BayerDither(p) => p,
            _ => &defaults,
        };
        let dims = frame.dimensions();
        frame.map_pixels(|x, y, color| dither_pixel(color, [x, y], dims, p))
    }

    fn filter_type(&self) -> FilterType {
        FilterType::BayerDither
    }
}
