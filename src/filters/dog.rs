//! Thresholded difference of gaussians.

use super::kernels::blur_plane;
use super::{DogParams, Filter, FilterParams, FilterType};
use crate::frame::{Frame, Plane};

/// Raw DoG response `G(sigma) - G(k * sigma)` of a luminance plane.
///
/// Negative on the dark side of an edge, zero on flat regions.
pub fn dog_response(lum: &Plane, params: &DogParams) -> Plane {
    let narrow = blur_plane(lum, params.sigma);
    let wide = blur_plane(lum, params.sigma * params.k);
    Plane {
        width: lum.width,
        height: lum.height,
        data: narrow
            .data
            .iter()
            .zip(&wide.data)
            .map(|(n, w)| n - w)
            .collect(),
    }
}

pub struct DogFilter;

impl Filter for DogFilter {
    fn apply(&self, frame: &Frame, params: &FilterParams) -> Frame {
        let defaults = DogParams::default();
        let p = match params {
            FilterParams::DifferenceOfGaussians(p) => p,
            _ => &defaults,
        };
        let mut response = dog_response(&frame.luminance_plane(), p);
        response
            .data
            .iter_mut()
            .for_each(|d| *d = if *d >= -p.tau { 1.0 } else { 0.0 });
        frame.with_gray(&response)
    }

    fn filter_type(&self) -> FilterType {
        FilterType::DifferenceOfGaussians
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{generate_checkerboard, generate_solid};

    #[test]
    fn test_flat_regions_are_white() {
        let frame = generate_solid(16, 16, [0.5, 0.5, 0.5, 1.0]);
        let out = DogFilter.apply(&frame, &FilterParams::DifferenceOfGaussians(DogParams::default()));
        assert!(out.pixels().iter().all(|p| p[0] == 1.0));
    }

    #[test]
    fn test_edges_are_drawn_dark() {
        let frame = generate_checkerboard(32, 32, 16);
        let out = DogFilter.apply(&frame, &FilterParams::DifferenceOfGaussians(DogParams::default()));
        let dark = out.pixels().iter().filter(|p| p[0] == 0.0).count();
        assert!(dark > 0, "expected dark edge pixels");
        // Far from any edge stays white
        assert_eq!(out.get(4, 4)[0], 1.0);
    }

    #[test]
    fn test_tau_filters_weak_edges() {
        // Contrast 0.2 undershoots by about 0.02, well inside the default tau
        let weak = Frame::new(32, 32, [0.0; 4]).map_pixels(|x, _, _| {
            let v = if x < 16 { 0.4 } else { 0.6 };
            [v, v, v, 1.0]
        });
        let params = DogParams::default();
        let out = DogFilter.apply(&weak, &FilterParams::DifferenceOfGaussians(params.clone()));
        assert!(out.pixels().iter().all(|p| p[0] == 1.0));

        let strict = DogParams { tau: 0.0, ..params };
        let out = DogFilter.apply(&weak, &FilterParams::DifferenceOfGaussians(strict));
        assert!(out.pixels().iter().any(|p| p[0] == 0.0));
    }

    #[test]
    fn test_huge_sigma_on_tiny_frame() {
        let frame = generate_checkerboard(4, 4, 2);
        let params = DogParams {
            sigma: 20_000.0,
            ..Default::default()
        };
        let out = DogFilter.apply(&frame, &FilterParams::DifferenceOfGaussians(params));
        assert_eq!((out.width(), out.height()), (4, 4));
        assert!(out.pixels().iter().all(|p| p[0] == 0.0 || p[0] == 1.0));
    }
}
