//! Shared test fixtures for filter tests.

#![allow(dead_code)]

use rts_filters::filters::{create_filter, default_params, Filter, FilterType};
use rts_filters::frame::{Frame, Rgba};

/// A small frame with a soft gradient and a hard vertical edge.
pub fn test_frame() -> Frame {
    Frame::new(48, 32, [0.0; 4]).map_pixels(|x, y, _| {
        let ramp = y as f32 / 31.0;
        let v = if x < 24 { ramp * 0.4 } else { 0.6 + ramp * 0.4 };
        [v, v * 0.8, 1.0 - v, 1.0]
    })
}

/// A frame with a half-transparent right side.
pub fn translucent_frame() -> Frame {
    Frame::new(16, 16, [0.0; 4]).map_pixels(|x, _, _| {
        if x < 8 {
            [0.2, 0.4, 0.6, 1.0]
        } else {
            [0.8, 0.6, 0.4, 0.5]
        }
    })
}

/// Assert every channel of every pixel is inside 0.0..=1.0.
pub fn assert_in_unit_range(frame: &Frame) {
    for (i, p) in frame.pixels().iter().enumerate() {
        for c in p {
            assert!(
                (0.0..=1.0).contains(c),
                "pixel {} has out-of-range channel {}",
                i,
                c
            );
        }
    }
}

/// Mean of the red channel.
pub fn mean_red(frame: &Frame) -> f32 {
    frame.pixels().iter().map(|p| p[0]).sum::<f32>() / frame.len() as f32
}

/// Fraction of pixels whose red channel is above 0.5.
pub fn lit_fraction(pixels: &[Rgba]) -> f32 {
    pixels.iter().filter(|p| p[0] > 0.5).count() as f32 / pixels.len() as f32
}

/// Round-trip a frame through 8-bit storage, as a GPU upload does.
pub fn quantize_to_8bit(frame: &Frame) -> Frame {
    Frame::from_rgba8(frame.width(), frame.height(), &frame.to_rgba8()).unwrap()
}

/// Verify that a filter runs with its defaults and keeps the frame's shape.
pub fn verify_filter_keeps_shape(filter_type: FilterType, frame: &Frame) -> Frame {
    let filter = create_filter(filter_type);
    let out = filter.apply(frame, &default_params(filter_type));
    assert_eq!(out.width(), frame.width(), "{:?} changed width", filter_type);
    assert_eq!(out.height(), frame.height(), "{:?} changed height", filter_type);
    assert_in_unit_range(&out);
    out
}
