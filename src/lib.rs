//! RTS Filters Core
//!
//! Image filter library built around luminance-biased ordered dithering.
//!
//! # Features
//!
//! - Frame loading and saving (PNG, JPEG, BMP and friends) via `image`
//! - CPU implementations of every filter: invert, gaussian blur, quantization,
//!   Sobel, difference of gaussians, flow-based XDoG, edge direction and
//!   Bayer dithering
//! - Headless GPU filtering via wgpu (Metal on macOS, Vulkan on Linux) with
//!   CPU fallback
//! - JSON filter presets
//! - Python bindings via PyO3 (when `python` feature is enabled)

pub mod color;
pub mod filters;
pub mod frame;
pub mod gpu;
pub mod pipeline;

// Re-export commonly used types
pub use color::{hsv_to_rgb, luminance};
pub use filters::{
    create_filter, default_params, BayerDitherParams, CpuProcessor, DitherMatrix,
    DynamicProcessor, Filter, FilterParams, FilterType, FrameProcess, ProcessError,
};
pub use frame::{load_image, save_image, Frame, FrameError, Plane};
pub use gpu::{GpuContext, GpuError, GpuFilterRenderer};
pub use pipeline::{
    apply_chain, load_preset, parse_filter_chain, parse_hex_color, process_image_file,
    save_preset, FilterPreset, PipelineConfig, PipelineError,
};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
#[allow(deprecated)] // PyO3 0.27 deprecations - APIs still functional
mod python_bindings {
    use crate::frame::{self, synth};
    use crate::pipeline::{self, PipelineConfig};
    use pyo3::exceptions::PyRuntimeError;
    use pyo3::prelude::*;

    /// Filter an image file through a comma separated chain or a JSON preset.
    #[pyfunction]
    #[pyo3(signature = (input_path, output_path, filters="bayer-dither", preset=None, background=None, use_gpu=false))]
    fn apply_filter_file(
        py: Python<'_>,
        input_path: &str,
        output_path: &str,
        filters: &str,
        preset: Option<&str>,
        background: Option<&str>,
        use_gpu: bool,
    ) -> PyResult<()> {
        let steps = match preset {
            Some(path) => {
                pipeline::load_preset(path)
                    .map_err(|e| PyRuntimeError::new_err(e.to_string()))?
                    .steps
            }
            None => pipeline::parse_filter_chain(filters)
                .map_err(|e| PyRuntimeError::new_err(e.to_string()))?,
        };

        let background = background
            .map(|hex| {
                pipeline::parse_hex_color(hex)
                    .ok_or_else(|| PyRuntimeError::new_err(format!("Invalid background: {}", hex)))
            })
            .transpose()?;

        let config = PipelineConfig {
            steps,
            background,
            use_gpu,
        };

        let input = input_path.to_string();
        let output = output_path.to_string();

        let result = py.allow_threads(|| {
            pollster::block_on(async {
                pipeline::process_image_file(&input, &output, &config).await
            })
        });

        result.map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// Parse hex color string to RGB tuple.
    #[pyfunction]
    fn parse_color(hex: &str) -> PyResult<(f32, f32, f32)> {
        let rgb = pipeline::parse_hex_color(hex)
            .ok_or_else(|| PyRuntimeError::new_err(format!("Invalid color: {}", hex)))?;
        Ok((rgb[0], rgb[1], rgb[2]))
    }

    /// Generate a synthetic test image and save it.
    #[pyfunction]
    #[pyo3(signature = (output_path, kind="gradient", width=256, height=256, seed=0))]
    fn generate_test_image(
        output_path: &str,
        kind: &str,
        width: u32,
        height: u32,
        seed: u64,
    ) -> PyResult<()> {
        let image = match kind {
            "gradient" => synth::generate_horizontal_gradient(width, height),
            "vertical-gradient" => synth::generate_vertical_gradient(width, height),
            "checkerboard" => synth::generate_checkerboard(width, height, 16),
            "color-bars" => synth::generate_color_bars(width, height),
            "noise" => synth::generate_noise(width, height, seed),
            _ => {
                return Err(PyRuntimeError::new_err(format!(
                    "Unknown test image: {}. Available: gradient, vertical-gradient, checkerboard, color-bars, noise",
                    kind
                )))
            }
        };
        frame::save_image(&image, output_path).map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// List all available filters.
    #[pyfunction]
    fn list_filters() -> Vec<(String, String)> {
        crate::filters::FilterType::all()
            .iter()
            .map(|f| (f.name().to_string(), f.description().to_string()))
            .collect()
    }

    /// Default parameters of a filter as JSON.
    #[pyfunction]
    fn filter_defaults(name: &str) -> PyResult<String> {
        let filter_type = crate::filters::FilterType::from_str(name)
            .ok_or_else(|| PyRuntimeError::new_err(format!("Unknown filter: {}", name)))?;
        serde_json::to_string_pretty(&crate::filters::default_params(filter_type))
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    /// RTS Filters Python module
    #[pymodule]
    pub fn rts_filters(m: &Bound<'_, PyModule>) -> PyResult<()> {
        let _ = env_logger::try_init();
        m.add("__version__", env!("CARGO_PKG_VERSION"))?;
        m.add_function(wrap_pyfunction!(apply_filter_file, m)?)?;
        m.add_function(wrap_pyfunction!(parse_color, m)?)?;
        m.add_function(wrap_pyfunction!(generate_test_image, m)?)?;
        m.add_function(wrap_pyfunction!(list_filters, m)?)?;
        m.add_function(wrap_pyfunction!(filter_defaults, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python_bindings::*;
