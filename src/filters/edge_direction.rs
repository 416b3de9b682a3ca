//! Gradient direction visualisation.
//!
//! Hue encodes the gradient angle, brightness the gradient magnitude.

use std::f32::consts::PI;

use super::kernels::sobel_at;
use super::{EdgeDirectionParams, Filter, FilterParams, FilterType};
use crate::color::hsv_to_rgb;
use crate::frame::Frame;

/// Gradient angle mapped onto 0.0..1.0.
#[inline]
pub fn angle_to_hue(gx: f32, gy: f32) -> f32 {
    (gy.atan2(gx) + PI) / (2.0 * PI)
}

pub struct EdgeDirectionFilter;

impl Filter for EdgeDirectionFilter {
    fn apply(&self, frame: &Frame, params: &FilterParams) -> Frame {
        let min_magnitude = match params {
            FilterParams::EdgeDirection(p) => p.min_magnitude,
            _ => EdgeDirectionParams::default().min_magnitude,
        };
        let lum = frame.luminance_plane();

        frame.map_pixels(|x, y, p| {
            let (gx, gy) = sobel_at(&lum, x as i64, y as i64);
            let magnitude = (gx * gx + gy * gy).sqrt();
            if magnitude < min_magnitude {
                return [0.0, 0.0, 0.0, p[3]];
            }
            let [r, g, b] = hsv_to_rgb(angle_to_hue(gx, gy), 1.0, magnitude.min(1.0));
            [r, g, b, p[3]]
        })
    }

    fn filter_type(&self) -> FilterType {
        FilterType::EdgeDirection
    }
}
