//! Unified frame processor trait for CPU and GPU implementations.
//!
//! Every filter has a CPU implementation. The GPU backend covers the point
//! and 3x3 neighbourhood filters; the rest fall back to the CPU.

use super::{create_filter, Filter, FilterParams, FilterType};
use crate::frame::Frame;
use crate::gpu::{GpuContext, GpuError, GpuFilterRenderer};

/// Error type for frame processing.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("GPU error: {0}")]
    Gpu(String),
    #[error("Filter '{}' is not supported by this backend", .0.name())]
    Unsupported(FilterType),
}

impl From<GpuError> for ProcessError {
    fn from(err: GpuError) -> Self {
        match err {
            GpuError::UnsupportedFilter(filter_type) => ProcessError::Unsupported(filter_type),
            other => ProcessError::Gpu(other.to_string()),
        }
    }
}

/// Trait for backends that can run a filter over a frame.
pub trait FrameProcess {
    /// Apply one filter.
    fn apply(&mut self, frame: &Frame, params: &FilterParams) -> Result<Frame, ProcessError>;

    /// Whether the backend runs `filter_type` natively.
    fn supports(&self, filter_type: FilterType) -> bool;

    /// Short backend name for logging.
    fn backend_name(&self) -> &'static str;
}

/// CPU processor. Caches one filter instance per type.
#[derive(Default)]
pub struct CpuProcessor {
    filters: Vec<Box<dyn Filter>>,
}

impl CpuProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    fn filter_for(&mut self, filter_type: FilterType) -> &dyn Filter {
        let index = match self
            .filters
            .iter()
            .position(|f| f.filter_type() == filter_type)
        {
            Some(index) => index,
            None => {
                self.filters.push(create_filter(filter_type));
                self.filters.len() - 1
            }
        };
        self.filters[index].as_ref()
    }
}

impl FrameProcess for CpuProcessor {
    fn apply(&mut self, frame: &Frame, params: &FilterParams) -> Result<Frame, ProcessError> {
        let filter = self.filter_for(params.filter_type());
        Ok(filter.apply(frame, params))
    }

    fn supports(&self, _filter_type: FilterType) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "cpu"
    }
}

/// Wrapper around GpuFilterRenderer that implements FrameProcess.
///
/// Filters without a GPU pass run on an internal CPU processor.
pub struct GpuProcessorWrapper {
    inner: GpuFilterRenderer,
    fallback: CpuProcessor,
}

impl GpuProcessorWrapper {
    /// Create a GPU processor on an existing context.
    pub fn new(ctx: GpuContext) -> Self {
        Self {
            inner: GpuFilterRenderer::with_context(ctx),
            fallback: CpuProcessor::new(),
        }
    }

    /// Get a reference to the underlying renderer.
    pub fn inner(&self) -> &GpuFilterRenderer {
        &self.inner
    }
}

impl FrameProcess for GpuProcessorWrapper {
    fn apply(&mut self, frame: &Frame, params: &FilterParams) -> Result<Frame, ProcessError> {
        let filter_type = params.filter_type();
        if !self.inner.supports(filter_type) {
            log::debug!("{} has no GPU pass, running on CPU", filter_type.name());
            return self.fallback.apply(frame, params);
        }
        match self.inner.apply(frame, params) {
            Err(GpuError::EmptyFrame { width, height }) => {
                log::debug!("{}x{} frame has no pixels, running on CPU", width, height);
                self.fallback.apply(frame, params)
            }
            Err(GpuError::FrameTooLarge {
                width,
                height,
                limit,
            }) => {
                log::warn!(
                    "{}x{} exceeds GPU texture limit {}, running on CPU",
                    width,
                    height,
                    limit
                );
                self.fallback.apply(frame, params)
            }
            result => result.map_err(ProcessError::from),
        }
    }

    fn supports(&self, filter_type: FilterType) -> bool {
        self.inner.supports(filter_type)
    }

    fn backend_name(&self) -> &'static str {
        "gpu"
    }
}

/// Enum to hold either processor for runtime selection.
pub enum DynamicProcessor {
    Cpu(CpuProcessor),
    Gpu(Box<GpuProcessorWrapper>),
}

impl DynamicProcessor {
    /// Create a CPU processor.
    pub fn cpu() -> Self {
        DynamicProcessor::Cpu(CpuProcessor::new())
    }

    /// Create a GPU processor on an existing context.
    pub fn gpu(ctx: GpuContext) -> Self {
        DynamicProcessor::Gpu(Box::new(GpuProcessorWrapper::new(ctx)))
    }

    /// Use the GPU when a context is available, otherwise the CPU.
    pub fn gpu_with_fallback(ctx: Option<GpuContext>) -> Self {
        match ctx {
            Some(ctx) => Self::gpu(ctx),
            None => Self::cpu(),
        }
    }

    /// Check if this processor is using the GPU.
    pub fn is_gpu(&self) -> bool {
        matches!(self, DynamicProcessor::Gpu(_))
    }
}

impl FrameProcess for DynamicProcessor {
    fn apply(&mut self, frame: &Frame, params: &FilterParams) -> Result<Frame, ProcessError> {
        match self {
            DynamicProcessor::Cpu(p) => p.apply(frame, params),
            DynamicProcessor::Gpu(p) => p.apply(frame, params),
        }
    }

    fn supports(&self, filter_type: FilterType) -> bool {
        match self {
            DynamicProcessor::Cpu(p) => p.supports(filter_type),
            DynamicProcessor::Gpu(p) => p.supports(filter_type),
        }
    }

    fn backend_name(&self) -> &'static str {
        match self {
            DynamicProcessor::Cpu(p) => p.backend_name(),
            DynamicProcessor::Gpu(p) => p.backend_name(),
        }
    }
}
