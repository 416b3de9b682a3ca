//! GPU filtering using wgpu.
//!
//! Provides headless GPU execution of the point and 3x3 neighbourhood
//! filters as fullscreen fragment passes, using the Metal backend on macOS
//! and Vulkan/GL elsewhere.

pub mod context;
pub mod filter_renderer;
pub mod layouts;
pub mod pipelines;
pub mod textures;

pub use context::{GpuContext, GpuError};
pub use filter_renderer::{fragment_entry, FilterUniforms, GpuFilterRenderer};
