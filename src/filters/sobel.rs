//! Sobel edge detection on luminance.

use super::kernels::sobel_at;
use super::{Filter, FilterParams, FilterType, SobelParams};
use crate::frame::{Frame, Plane};

pub struct SobelFilter;

impl Filter for SobelFilter {
    fn apply(&self, frame: &Frame, params: &FilterParams) -> Frame {
        let gain = match params {
            FilterParams::Sobel(p) => p.gain,
            _ => SobelParams::default().gain,
        };
        let lum = frame.luminance_plane();
        let magnitude = Plane::from_fn(frame.width(), frame.height(), |x, y| {
            let (gx, gy) = sobel_at(&lum, x as i64, y as i64);
            (gx * gx + gy * gy).sqrt() * gain
        });
        frame.with_gray(&magnitude)
    }

    fn filter_type(&self) -> FilterType {
        FilterType::Sobel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{generate_checkerboard, generate_solid};

    #[test]
    fn test_flat_image_has_no_edges() {
        let frame = generate_solid(8, 8, [0.3, 0.6, 0.9, 1.0]);
        let out = SobelFilter.apply(&frame, &FilterParams::Sobel(SobelParams::default()));
        assert!(out.pixels().iter().all(|p| p[0] < 1e-5));
    }

    #[test]
    fn test_edges_found_at_cell_borders() {
        let frame = generate_checkerboard(16, 16, 8);
        let out = SobelFilter.apply(&frame, &FilterParams::Sobel(SobelParams::default()));
        assert_eq!(out.get(7, 2)[0], 1.0);
        assert_eq!(out.get(3, 3)[0], 0.0);
    }
}
