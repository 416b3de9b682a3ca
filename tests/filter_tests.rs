//! Integration tests for the filter catalogue.

mod filter_fixtures;

use filter_fixtures::*;
use rts_filters::filters::{
    create_filter, default_params, DogParams, Filter, FilterParams, FilterType, GaussianBlurParams,
    QuantizationParams, SobelParams, XdogParams,
};
use rts_filters::frame::synth::{generate_checkerboard, generate_solid};

// ==================== Registry Integration Tests ====================

#[test]
fn test_all_filter_types_can_be_created() {
    for filter_type in FilterType::all() {
        let filter = create_filter(*filter_type);
        assert_eq!(filter.filter_type(), *filter_type);
    }
}

#[test]
fn test_all_filter_types_have_matching_default_params() {
    for filter_type in FilterType::all() {
        assert_eq!(default_params(*filter_type).filter_type(), *filter_type);
    }
}

#[test]
fn test_every_filter_keeps_shape_and_range() {
    let frame = test_frame();
    for filter_type in FilterType::all() {
        verify_filter_keeps_shape(*filter_type, &frame);
    }
}

#[test]
fn test_filter_names_round_trip() {
    for filter_type in FilterType::all() {
        assert_eq!(FilterType::from_str(filter_type.name()), Some(*filter_type));
        assert!(!filter_type.description().is_empty());
    }
    assert_eq!(FilterType::from_str("Blur"), Some(FilterType::GaussianBlur));
    assert_eq!(FilterType::from_str("sparkle"), None);
}

// ==================== Point Filters ====================

#[test]
fn test_passthrough_is_identity() {
    let frame = test_frame();
    let out = create_filter(FilterType::None).apply(&frame, &FilterParams::None);
    assert_eq!(out, frame);
}

#[test]
fn test_invert_twice_is_identity() {
    let frame = test_frame();
    let invert = create_filter(FilterType::Invert);
    let twice = invert.apply(&invert.apply(&frame, &FilterParams::Invert), &FilterParams::Invert);
    for (a, b) in twice.pixels().iter().zip(frame.pixels()) {
        for c in 0..4 {
            assert!((a[c] - b[c]).abs() < 1e-6);
        }
    }
}

#[test]
fn test_invert_keeps_alpha() {
    let frame = translucent_frame();
    let out = create_filter(FilterType::Invert).apply(&frame, &FilterParams::Invert);
    assert_eq!(out.get(12, 3)[3], 0.5);
    assert!((out.get(12, 3)[0] - 0.2).abs() < 1e-6);
}

#[test]
fn test_quantization_levels() {
    let frame = test_frame();
    let params = FilterParams::Quantization(QuantizationParams { colors: 3 });
    let out = create_filter(FilterType::Quantization).apply(&frame, &params);
    for p in out.pixels() {
        for c in &p[..3] {
            assert!([0.0, 0.5, 1.0].iter().any(|l| (l - c).abs() < 1e-6));
        }
    }
}

// ==================== Neighbourhood Filters ====================

#[test]
fn test_blur_smooths_edge() {
    let frame = generate_checkerboard(32, 32, 16);
    let params = FilterParams::GaussianBlur(GaussianBlurParams { sigma: 2.0 });
    let out = create_filter(FilterType::GaussianBlur).apply(&frame, &params);

    // Far from the edges the cells stay flat
    assert!((out.get(4, 4)[0] - 1.0).abs() < 1e-4);
    // At the boundary the value sits in between
    let edge = out.get(16, 4)[0];
    assert!(edge > 0.1 && edge < 0.9, "edge value {}", edge);
    // Mean brightness is preserved
    assert!((mean_red(&out) - mean_red(&frame)).abs() < 0.02);
}

#[test]
fn test_sobel_finds_only_the_edge() {
    let frame = test_frame();
    let params = FilterParams::Sobel(SobelParams { gain: 1.0 });
    let out = create_filter(FilterType::Sobel).apply(&frame, &params);
    let edge = out.get(24, 16)[0];
    let flat = out.get(8, 16)[0];
    assert!(edge > 0.5, "edge response {}", edge);
    assert!(flat < 0.1, "flat response {}", flat);
}

#[test]
fn test_dog_flat_is_white_edges_dark() {
    let dog = create_filter(FilterType::DifferenceOfGaussians);
    let params = FilterParams::DifferenceOfGaussians(DogParams::default());

    let flat = dog.apply(&generate_solid(16, 16, [0.3, 0.3, 0.3, 1.0]), &params);
    assert!(flat.pixels().iter().all(|p| p[0] == 1.0));

    let edges = dog.apply(&generate_checkerboard(32, 32, 16), &params);
    assert!(edges.pixels().iter().any(|p| p[0] == 0.0));
    assert!(edges.pixels().iter().all(|p| p[0] == 0.0 || p[0] == 1.0));
}

#[test]
fn test_xdog_draws_line_along_edge() {
    let frame = test_frame();
    let params = FilterParams::Xdog(XdogParams::default());
    let out = create_filter(FilterType::Xdog).apply(&frame, &params);

    // Undershoot on the dark side of the edge
    let near_edge = (20..24)
        .flat_map(|x| (8..24).map(move |y| (x, y)))
        .map(|(x, y)| out.get(x, y)[0])
        .fold(f32::INFINITY, f32::min);
    assert!(near_edge < 0.05, "no line near the edge: {}", near_edge);
    // Bright flat region stays white
    assert_eq!(out.get(44, 16)[0], 1.0);
}

#[test]
fn test_edge_direction_black_on_flat() {
    let frame = generate_solid(8, 8, [0.5, 0.2, 0.7, 1.0]);
    let out = create_filter(FilterType::EdgeDirection)
        .apply(&frame, &default_params(FilterType::EdgeDirection));
    assert!(out.pixels().iter().all(|p| p[..3] == [0.0, 0.0, 0.0]));
}

#[test]
fn test_huge_sigmas_keep_tiny_frames_intact() {
    let frame = generate_checkerboard(4, 4, 1);
    let cases = [
        FilterParams::GaussianBlur(GaussianBlurParams { sigma: 20_000.0 }),
        FilterParams::DifferenceOfGaussians(DogParams {
            sigma: 20_000.0,
            ..Default::default()
        }),
        FilterParams::Xdog(XdogParams {
            sigma: 20_000.0,
            flow_sigma: 20_000.0,
            ..Default::default()
        }),
    ];
    for params in cases {
        let out = create_filter(params.filter_type()).apply(&frame, &params);
        assert_eq!((out.width(), out.height()), (4, 4));
        assert_in_unit_range(&out);
    }
}
