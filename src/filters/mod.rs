//! Image filter catalogue.
//!
//! Provides the filters of the real-time shader viewer as CPU implementations:
//! - None: Passthrough
//! - Invert: Colour negative
//! - GaussianBlur: Separable gaussian blur
//! - Quantization: Per-channel posterization
//! - Sobel: Luminance gradient magnitude
//! - DifferenceOfGaussians: Thresholded DoG edges
//! - Xdog: Flow-based extended DoG line drawing
//! - EdgeDirection: Gradient angle as hue
//! - BayerDither: Luminance-biased ordered dithering

mod bayer_dither;
mod dog;
mod edge_direction;
mod gaussian_blur;
mod invert;
pub mod kernels;
mod params;
pub mod processor;
mod quantization;
mod registry;
mod sobel;
mod xdog;

pub use bayer_dither::{
    dither_pixel, dither_threshold, dither_value, BayerDitherFilter, BAYER_2X2, BAYER_4X4,
    BAYER_8X8, EXTENDED_MATRIX,
};
pub use dog::DogFilter;
pub use edge_direction::EdgeDirectionFilter;
pub use gaussian_blur::GaussianBlurFilter;
pub use invert::{InvertFilter, PassthroughFilter};
pub use params::*;
pub use processor::{
    CpuProcessor, DynamicProcessor, FrameProcess, GpuProcessorWrapper, ProcessError,
};
pub use quantization::QuantizationFilter;
pub use registry::{create_filter, default_params};
pub use sobel::SobelFilter;
pub use xdog::XdogFilter;

use crate::frame::Frame;

/// Available filter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    None,
    Invert,
    GaussianBlur,
    Quantization,
    Sobel,
    DifferenceOfGaussians,
    Xdog,
    EdgeDirection,
    BayerDither,
}

impl FilterType {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" | "passthrough" | "identity" => Some(Self::None),
            "invert" | "negative" => Some(Self::Invert),
            "gaussian-blur" | "gaussianblur" | "gaussian" | "blur" => Some(Self::GaussianBlur),
            "quantization" | "quantize" | "posterize" => Some(Self::Quantization),
            "sobel" | "sobel-edge-detection" | "edges" => Some(Self::Sobel),
            "difference-of-gaussians" | "differenceofgaussians" | "dog" => {
                Some(Self::DifferenceOfGaussians)
            }
            "xdog" | "flow-xdog" | "flow-based-xdog" => Some(Self::Xdog),
            "edge-direction" | "edgedirection" | "direction" => Some(Self::EdgeDirection),
            "bayer-dither" | "bayerdither" | "bayer" | "dither" => Some(Self::BayerDither),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Invert => "invert",
            Self::GaussianBlur => "gaussian-blur",
            Self::Quantization => "quantization",
            Self::Sobel => "sobel",
            Self::DifferenceOfGaussians => "difference-of-gaussians",
            Self::Xdog => "xdog",
            Self::EdgeDirection => "edge-direction",
            Self::BayerDither => "bayer-dither",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::None => "Passthrough",
            Self::Invert => "Colour negative",
            Self::GaussianBlur => "Separable gaussian blur",
            Self::Quantization => "Reduce each channel to a fixed number of levels",
            Self::Sobel => "Sobel edge magnitude of luminance",
            Self::DifferenceOfGaussians => "Thresholded difference of gaussians",
            Self::Xdog => "Flow-based extended difference of gaussians",
            Self::EdgeDirection => "Gradient direction shown as hue",
            Self::BayerDither => "Luminance-biased ordered dithering",
        }
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::None,
            Self::Invert,
            Self::GaussianBlur,
            Self::Quantization,
            Self::Sobel,
            Self::DifferenceOfGaussians,
            Self::Xdog,
            Self::EdgeDirection,
            Self::BayerDither,
        ]
    }
}

impl FilterParams {
    /// The filter these parameters belong to.
    pub fn filter_type(&self) -> FilterType {
        match self {
            Self::None => FilterType::None,
            Self::Invert => FilterType::Invert,
            Self::GaussianBlur(_) => FilterType::GaussianBlur,
            Self::Quantization(_) => FilterType::Quantization,
            Self::Sobel(_) => FilterType::Sobel,
            Self::DifferenceOfGaussians(_) => FilterType::DifferenceOfGaussians,
            Self::Xdog(_) => FilterType::Xdog,
            Self::EdgeDirection(_) => FilterType::EdgeDirection,
            Self::BayerDither(_) => FilterType::BayerDither,
        }
    }
}

/// Trait for image filters.
///
/// Filters never change frame dimensions or alpha. Parameters of the wrong
/// variant are ignored in favour of the filter's defaults.
pub trait Filter: Send + Sync {
    /// Run the filter over a frame.
    fn apply(&self, frame: &Frame, params: &FilterParams) -> Frame;

    /// Filter type identifier.
    fn filter_type(&self) -> FilterType;
}
