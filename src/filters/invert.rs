//! Colour negative and passthrough.

use super::{Filter, FilterParams, FilterType};
use crate::frame::Frame;

/// Invert red, green and blue.
pub struct InvertFilter;

impl Filter for InvertFilter {
    fn apply(&self, frame: &Frame, _params: &FilterParams) -> Frame {
        frame.map_pixels(|_, _, p| [1.0 - p[0], 1.0 - p[1], 1.0 - p[2], p[3]])
    }

    fn filter_type(&self) -> FilterType {
        FilterType::Invert
    }
}

/// Leaves the frame untouched.
pub struct PassthroughFilter;

impl Filter for PassthroughFilter {
    fn apply(&self, frame: &Frame, _params: &FilterParams) -> Frame {
        frame.clone()
    }

    fn filter_type(&self) -> FilterType {
        FilterType::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::generate_noise;

    #[test]
    fn test_invert_twice_is_identity() {
        let frame = generate_noise(8, 8, 3);
        let twice = InvertFilter.apply(&InvertFilter.apply(&frame, &FilterParams::Invert), &FilterParams::Invert);
        for (a, b) in frame.pixels().iter().zip(twice.pixels()) {
            for c in 0..4 {
                assert!((a[c] - b[c]).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_invert_keeps_alpha() {
        let frame = Frame::new(1, 1, [0.2, 0.0, 1.0, 0.5]);
        let out = InvertFilter.apply(&frame, &FilterParams::Invert);
        assert_eq!(out.get(0, 0), [0.8, 1.0, 0.0, 0.5]);
    }
}
