//! Image pipeline: load, flatten, run a filter chain, save.

use crate::filters::{default_params, DynamicProcessor, FilterParams, FilterType, FrameProcess, ProcessError};
use crate::frame::{load_image, save_image, Frame, FrameError};
use crate::gpu::GpuContext;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration for filtering an image file.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Filters applied in order.
    pub steps: Vec<FilterParams>,
    /// Composite transparent pixels onto this colour before filtering.
    pub background: Option<[f32; 3]>,
    /// Run supported filters on the GPU when an adapter is available.
    pub use_gpu: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            steps: vec![FilterParams::default()],
            background: None,
            use_gpu: false,
        }
    }
}

impl PipelineConfig {
    /// Build a config from a named preset.
    pub fn from_preset(preset: &FilterPreset) -> Self {
        Self {
            steps: preset.steps.clone(),
            ..Default::default()
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),
    #[error("Processing error: {0}")]
    Process(#[from] ProcessError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),
}

/// Parse hex color to RGB floats (accepts 6-char RGB or 8-char RGBA, alpha is ignored).
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Parse a comma separated list of filter names into default-parameter steps.
///
/// ```
/// use rts_filters::pipeline::parse_filter_chain;
///
/// let steps = parse_filter_chain("blur, bayer-dither").unwrap();
/// assert_eq!(steps.len(), 2);
/// ```
pub fn parse_filter_chain(chain: &str) -> Result<Vec<FilterParams>, PipelineError> {
    chain
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            FilterType::from_str(name)
                .map(default_params)
                .ok_or_else(|| PipelineError::UnknownFilter(name.to_string()))
        })
        .collect()
}

/// A named, saved filter chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPreset {
    pub name: String,
    pub steps: Vec<FilterParams>,
}

/// Load a preset from a JSON file.
pub fn load_preset<P: AsRef<Path>>(path: P) -> Result<FilterPreset, PipelineError> {
    let json = std::fs::read_to_string(path.as_ref())?;
    let preset: FilterPreset = serde_json::from_str(&json)?;
    log::debug!(
        "Loaded preset '{}' with {} steps",
        preset.name,
        preset.steps.len()
    );
    Ok(preset)
}

/// Save a preset as pretty-printed JSON.
pub fn save_preset<P: AsRef<Path>>(preset: &FilterPreset, path: P) -> Result<(), PipelineError> {
    let json = serde_json::to_string_pretty(preset)?;
    std::fs::write(path.as_ref(), json)?;
    Ok(())
}

/// Run `steps` over a frame in order.
pub fn apply_chain<P: FrameProcess + ?Sized>(
    frame: &Frame,
    steps: &[FilterParams],
    processor: &mut P,
) -> Result<Frame, PipelineError> {
    let mut current = frame.clone();
    for step in steps {
        current = processor.apply(&current, step)?;
    }
    Ok(current)
}

/// Create the processor a config asks for.
///
/// A GPU request falls back to the CPU when no adapter can be created, so
/// GPU setup never fails the pipeline.
pub async fn create_processor(config: &PipelineConfig) -> DynamicProcessor {
    if !config.use_gpu {
        return DynamicProcessor::cpu();
    }
    let ctx = match GpuContext::new().await {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            log::warn!("GPU unavailable ({}), using CPU filters", e);
            None
        }
    };
    DynamicProcessor::gpu_with_fallback(ctx)
}

/// Filter an image file and write the result.
pub async fn process_image_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input_path: P,
    output_path: Q,
    config: &PipelineConfig,
) -> Result<(), PipelineError> {
    let mut frame = load_image(input_path.as_ref())?;
    if let Some(background) = config.background {
        frame = frame.flatten_onto(background);
    }

    let mut processor = create_processor(config).await;
    if processor.is_gpu() {
        log::info!("Using GPU filters");
    } else {
        log::info!("Using CPU filters");
    }

    let output = apply_chain(&frame, &config.steps, &mut processor)?;
    save_image(&output, output_path.as_ref())?;

    log::info!(
        "Wrote {}x{} image to {}",
        output.width(),
        output.height(),
        output_path.as_ref().display()
    );
    Ok(())
}
