//! Per-channel colour quantization.

use super::{Filter, FilterParams, FilterType, QuantizationParams};
use crate::frame::Frame;

/// Snap a channel to one of `colors` evenly spaced levels.
#[inline]
pub fn quantize_channel(value: f32, colors: u32) -> f32 {
    let steps = (colors.max(2) - 1) as f32;
    (value.clamp(0.0, 1.0) * steps).round() / steps
}

/// Posterize each colour channel.
pub struct QuantizationFilter;

impl Filter for QuantizationFilter {
    fn apply(&self, frame: &Frame, params: &FilterParams) -> Frame {
        let colors = match params {
            FilterParams::Quantization(p) => p.colors,
            _ => QuantizationParams::default().colors,
        };
        frame.map_pixels(|_, _, p| {
            [
                quantize_channel(p[0], colors),
                quantize_channel(p[1], colors),
                quantize_channel(p[2], colors),
                p[3],
            ]
        })
    }

    fn filter_type(&self) -> FilterType {
        FilterType::Quantization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::generate_horizontal_gradient;

    #[test]
    fn test_quantize_channel() {
        assert_eq!(quantize_channel(0.0, 4), 0.0);
        assert_eq!(quantize_channel(1.0, 4), 1.0);
        assert!((quantize_channel(0.4, 4) - 1.0 / 3.0).abs() < 1e-6);
        // Fewer than two levels clamps to two
        assert_eq!(quantize_channel(0.7, 0), 1.0);
        assert_eq!(quantize_channel(0.3, 1), 0.0);
    }

    #[test]
    fn test_gradient_collapses_to_levels() {
        let frame = generate_horizontal_gradient(100, 1);
        let params = FilterParams::Quantization(QuantizationParams { colors: 3 });
        let out = QuantizationFilter.apply(&frame, &params);

        let mut values: Vec<u32> = out.pixels().iter().map(|p| (p[0] * 2.0).round() as u32).collect();
        values.dedup();
        assert_eq!(values, vec![0, 1, 2]);
    }

    #[test]
    fn test_fewer_than_two_colors_posterizes_as_two() {
        let frame = generate_horizontal_gradient(50, 2);
        let with_colors = |colors| {
            QuantizationFilter.apply(&frame, &FilterParams::Quantization(QuantizationParams { colors }))
        };
        let two = with_colors(2);
        assert_eq!(with_colors(0), two);
        assert_eq!(with_colors(1), two);
        assert!(two.pixels().iter().all(|p| p[0] == 0.0 || p[0] == 1.0));
    }
}
