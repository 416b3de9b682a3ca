//! Filter registry and factory functions.
//!
//! Provides a centralized way to create filter instances and get their default parameters.

use super::params::*;
use super::{
    BayerDitherFilter, DogFilter, EdgeDirectionFilter, Filter, FilterParams, FilterType,
    GaussianBlurFilter, InvertFilter, PassthroughFilter, QuantizationFilter, SobelFilter,
    XdogFilter,
};

/// Create a filter instance from type.
///
/// # Example
/// ```
/// use rts_filters::filters::{create_filter, Filter, FilterType};
///
/// let filter = create_filter(FilterType::BayerDither);
/// assert_eq!(filter.filter_type(), FilterType::BayerDither);
/// ```
pub fn create_filter(filter_type: FilterType) -> Box<dyn Filter> {
    match filter_type {
        FilterType::None => Box::new(PassthroughFilter),
        FilterType::Invert => Box::new(InvertFilter),
        FilterType::GaussianBlur => Box::new(GaussianBlurFilter),
        FilterType::Quantization => Box::new(QuantizationFilter),
        FilterType::Sobel => Box::new(SobelFilter),
        FilterType::DifferenceOfGaussians => Box::new(DogFilter),
        FilterType::Xdog => Box::new(XdogFilter),
        FilterType::EdgeDirection => Box::new(EdgeDirectionFilter),
        FilterType::BayerDither => Box::new(BayerDitherFilter),
    }
}

/// Get default params for a filter type.
///
/// # Example
/// ```
/// use rts_filters::filters::{default_params, FilterParams, FilterType};
///
/// let params = default_params(FilterType::Quantization);
/// assert!(matches!(params, FilterParams::Quantization(_)));
/// ```
pub fn default_params(filter_type: FilterType) -> FilterParams {
    match filter_type {
        FilterType::None => FilterParams::None,
        FilterType::Invert => FilterParams::Invert,
        FilterType::GaussianBlur => FilterParams::GaussianBlur(GaussianBlurParams::default()),
        FilterType::Quantization => FilterParams::Quantization(QuantizationParams::default()),
        FilterType::Sobel => FilterParams::Sobel(SobelParams::default()),
        FilterType::DifferenceOfGaussians => {
            FilterParams::DifferenceOfGaussians(DogParams::default())
        }
        FilterType::Xdog => FilterParams::Xdog(XdogParams::default()),
        FilterType::EdgeDirection => FilterParams::EdgeDirection(EdgeDirectionParams::default()),
        FilterType::BayerDither => FilterParams::BayerDither(BayerDitherParams::default()),
    }
}
