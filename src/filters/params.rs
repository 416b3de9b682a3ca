//! Filter parameter types.
//!
//! Contains all configuration parameters for each filter.

use serde::{Deserialize, Serialize};

/// Filter-specific parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "filter", rename_all = "kebab-case")]
pub enum FilterParams {
    None,
    Invert,
    GaussianBlur(GaussianBlurParams),
    Quantization(QuantizationParams),
    Sobel(SobelParams),
    DifferenceOfGaussians(DogParams),
    Xdog(XdogParams),
    EdgeDirection(EdgeDirectionParams),
    BayerDither(BayerDitherParams),
}

impl Default for FilterParams {
    fn default() -> Self {
        Self::BayerDither(BayerDitherParams::default())
    }
}

// ============================================================================
// Dithering
// ============================================================================

/// Threshold table used for ordered dithering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DitherMatrix {
    /// The 16-row by 4-column luminance table.
    #[default]
    Extended,
    Bayer2,
    Bayer4,
    Bayer8,
}

impl DitherMatrix {
    /// Numeric id passed to the GPU.
    pub fn id(&self) -> u32 {
        match self {
            Self::Extended => 0,
            Self::Bayer2 => 1,
            Self::Bayer4 => 2,
            Self::Bayer8 => 3,
        }
    }
}

/// Parameters for luminance-biased ordered dithering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BayerDitherParams {
    /// Output levels per channel (2 = pure on/off).
    pub levels: u32,
    /// Threshold at zero luminance.
    pub threshold_base: f32,
    /// How much luminance raises the threshold.
    pub luminance_factor: f32,
    pub matrix: DitherMatrix,
}

impl Default for BayerDitherParams {
    fn default() -> Self {
        Self {
            levels: 2,
            threshold_base: 0.5,
            luminance_factor: 0.2,
            matrix: DitherMatrix::Extended,
        }
    }
}

// ============================================================================
// Point filters
// ============================================================================

/// Parameters for colour quantization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizationParams {
    /// Levels per channel.
    pub colors: u32,
}

impl Default for QuantizationParams {
    fn default() -> Self {
        Self { colors: 32 }
    }
}

// ============================================================================
// Blur and edge filters
// ============================================================================

/// Parameters for gaussian blur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianBlurParams {
    /// Standard deviation in pixels. Zero or less disables the blur.
    pub sigma: f32,
}

impl Default for GaussianBlurParams {
    fn default() -> Self {
        Self { sigma: 4.75 }
    }
}

/// Parameters for sobel edge detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SobelParams {
    /// Multiplier applied to the gradient magnitude.
    pub gain: f32,
}

impl Default for SobelParams {
    fn default() -> Self {
        Self { gain: 1.0 }
    }
}

/// Parameters for edge direction visualisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeDirectionParams {
    /// Gradient magnitudes below this are drawn black.
    pub min_magnitude: f32,
}

impl Default for EdgeDirectionParams {
    fn default() -> Self {
        Self {
            min_magnitude: 0.05,
        }
    }
}

/// Parameters for difference of gaussians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DogParams {
    pub sigma: f32,
    /// Ratio of the wide gaussian to the narrow one.
    pub k: f32,
    /// Pixels where the wide blur exceeds the narrow one by more than this are black.
    pub tau: f32,
}

impl Default for DogParams {
    fn default() -> Self {
        Self {
            sigma: 4.75,
            k: 1.6,
            tau: 0.075,
        }
    }
}

/// Parameters for flow-based extended difference of gaussians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XdogParams {
    /// Narrow gaussian across edges.
    pub sigma: f32,
    pub k: f32,
    /// Sharpening strength.
    pub p: f32,
    /// Soft threshold position.
    pub epsilon: f32,
    /// Soft threshold steepness.
    pub phi: f32,
    /// Smoothing along the edge tangent flow.
    pub flow_sigma: f32,
    /// Diffusion passes over the structure tensor.
    pub tensor_iterations: u32,
    /// Apply the soft threshold; otherwise output the raw response.
    pub threshold: bool,
}

impl Default for XdogParams {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            k: 1.6,
            p: 20.0,
            epsilon: 0.0001,
            phi: 8.0,
            flow_sigma: 4.75,
            tensor_iterations: 15,
            threshold: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_json_is_tagged() {
        let params = FilterParams::Quantization(QuantizationParams { colors: 8 });
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"filter":"quantization","colors":8}"#);

        let back: FilterParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let params: FilterParams =
            serde_json::from_str(r#"{"filter":"bayer-dither","levels":4}"#).unwrap();
        match params {
            FilterParams::BayerDither(p) => {
                assert_eq!(p.levels, 4);
                assert_eq!(p.threshold_base, 0.5);
                assert_eq!(p.matrix, DitherMatrix::Extended);
            }
            other => panic!("unexpected params {:?}", other),
        }

        let unit: FilterParams = serde_json::from_str(r#"{"filter":"invert"}"#).unwrap();
        assert_eq!(unit, FilterParams::Invert);
    }

    #[test]
    fn test_defaults_match_viewer_controls() {
        assert_eq!(GaussianBlurParams::default().sigma, 4.75);

        let dog = DogParams::default();
        assert_eq!((dog.sigma, dog.tau), (4.75, 0.075));

        let xdog = XdogParams::default();
        assert_eq!(xdog.flow_sigma, 4.75);
        assert_eq!(xdog.epsilon, 0.0001);
        assert_eq!(xdog.phi, 8.0);
        assert_eq!(xdog.tensor_iterations, 15);
        assert!(xdog.threshold);

        assert_eq!(QuantizationParams::default().colors, 32);
    }
}
