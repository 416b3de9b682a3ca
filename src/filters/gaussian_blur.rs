//! Separable gaussian blur.

use super::kernels::blur_frame;
use super::{Filter, FilterParams, FilterType, GaussianBlurParams};
use crate::frame::Frame;

pub struct GaussianBlurFilter;

impl Filter for GaussianBlurFilter {
    fn apply(&self, frame: &Frame, params: &FilterParams) -> Frame {
        let sigma = match params {
            FilterParams::GaussianBlur(p) => p.sigma,
            _ => GaussianBlurParams::default().sigma,
        };
        let blurred = blur_frame(frame, sigma);
        // Alpha is carried through unblurred
        blurred.map_pixels(|x, y, p| {
            [
                p[0].clamp(0.0, 1.0),
                p[1].clamp(0.0, 1.0),
                p[2].clamp(0.0, 1.0),
                frame.get(x, y)[3],
            ]
        })
    }

    fn filter_type(&self) -> FilterType {
        FilterType::GaussianBlur
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::generate_checkerboard;

    fn variance(frame: &Frame) -> f32 {
        let n = frame.len() as f32;
        let mean = frame.pixels().iter().map(|p| p[0]).sum::<f32>() / n;
        frame.pixels().iter().map(|p| (p[0] - mean).powi(2)).sum::<f32>() / n
    }

    #[test]
    fn test_blur_reduces_variance() {
        let frame = generate_checkerboard(32, 32, 2);
        let params = FilterParams::GaussianBlur(GaussianBlurParams { sigma: 2.0 });
        let out = GaussianBlurFilter.apply(&frame, &params);
        assert!(variance(&out) < variance(&frame) * 0.25);
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        let frame = generate_checkerboard(8, 8, 1);
        let params = FilterParams::GaussianBlur(GaussianBlurParams { sigma: 0.0 });
        assert_eq!(GaussianBlurFilter.apply(&frame, &params), frame);
    }
}
