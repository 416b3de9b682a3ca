//! Headless filter renderer.
//!
//! Uploads a frame, runs one fullscreen fragment pass and reads the result back.

use std::collections::HashMap;

use wgpu::{BindGroupLayout, Buffer, RenderPipeline};

use super::{
    context::{GpuContext, GpuError},
    layouts::create_filter_layout,
    pipelines::{create_fullscreen_pipeline, create_pipeline_layout},
    textures::{ReadbackBuffer, RenderTarget},
};
use crate::filters::{
    BayerDitherParams, EdgeDirectionParams, FilterParams, FilterType, QuantizationParams,
    SobelParams,
};
use crate::frame::Frame;

/// Uniform data passed to the filter shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FilterUniforms {
    pub width: f32,
    pub height: f32,
    pub levels: f32,
    pub threshold_base: f32,
    pub luminance_factor: f32,
    pub matrix_kind: u32,
    pub edge_threshold: f32,
    pub gain: f32,
}

impl FilterUniforms {
    /// Pack parameters for a frame of the given size.
    pub fn new(width: u32, height: u32, params: &FilterParams) -> Self {
        let dither = BayerDitherParams::default();
        let mut uniforms = Self {
            width: width as f32,
            height: height as f32,
            levels: QuantizationParams::default().colors as f32,
            threshold_base: dither.threshold_base,
            luminance_factor: dither.luminance_factor,
            matrix_kind: dither.matrix.id(),
            edge_threshold: EdgeDirectionParams::default().min_magnitude,
            gain: SobelParams::default().gain,
        };

        match params {
            FilterParams::Quantization(p) => uniforms.levels = p.colors as f32,
            FilterParams::Sobel(p) => uniforms.gain = p.gain,
            FilterParams::EdgeDirection(p) => uniforms.edge_threshold = p.min_magnitude,
            FilterParams::BayerDither(p) => {
                uniforms.levels = p.levels as f32;
                uniforms.threshold_base = p.threshold_base;
                uniforms.luminance_factor = p.luminance_factor;
                uniforms.matrix_kind = p.matrix.id();
            }
            _ => {}
        }
        uniforms
    }
}

/// Fragment entry point for a filter, if it runs on the GPU.
pub fn fragment_entry(filter_type: FilterType) -> Option<&'static str> {
    match filter_type {
        FilterType::None => Some("fs_passthrough"),
        FilterType::Invert => Some("fs_invert"),
        FilterType::Quantization => Some("fs_quantize"),
        FilterType::Sobel => Some("fs_sobel"),
        FilterType::EdgeDirection => Some("fs_edge_direction"),
        FilterType::BayerDither => Some("fs_bayer_dither"),
        FilterType::GaussianBlur | FilterType::DifferenceOfGaussians | FilterType::Xdog => None,
    }
}

/// Headless GPU filter renderer.
pub struct GpuFilterRenderer {
    ctx: GpuContext,
    bind_group_layout: BindGroupLayout,
    pipelines: HashMap<FilterType, RenderPipeline>,
    uniform_buffer: Buffer,
}

impl GpuFilterRenderer {
    /// Create a renderer on a fresh GPU context.
    pub async fn new() -> Result<Self, GpuError> {
        let ctx = GpuContext::new().await?;
        Ok(Self::with_context(ctx))
    }

    /// Create a renderer sharing an existing context.
    pub fn with_context(ctx: GpuContext) -> Self {
        let device = &ctx.device;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("filter_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/filters.wgsl").into()),
        });

        let bind_group_layout = create_filter_layout(device);
        let pipeline_layout =
            create_pipeline_layout(device, "filter_pipeline_layout", &[&bind_group_layout]);

        let pipelines = FilterType::all()
            .iter()
            .filter_map(|&filter_type| {
                fragment_entry(filter_type).map(|entry| {
                    let pipeline = create_fullscreen_pipeline(
                        device,
                        "filter_pipeline",
                        &pipeline_layout,
                        &shader,
                        entry,
                        wgpu::TextureFormat::Rgba8Unorm,
                    );
                    (filter_type, pipeline)
                })
            })
            .collect();

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("filter_uniforms"),
            size: std::mem::size_of::<FilterUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            ctx,
            bind_group_layout,
            pipelines,
            uniform_buffer,
        }
    }

    /// Whether `filter_type` has a GPU pass.
    pub fn supports(&self, filter_type: FilterType) -> bool {
        self.pipelines.contains_key(&filter_type)
    }

    /// Run one filter over a frame.
    pub fn apply(&self, frame: &Frame, params: &FilterParams) -> Result<Frame, GpuError> {
        let filter_type = params.filter_type();
        let pipeline = self
            .pipelines
            .get(&filter_type)
            .ok_or(GpuError::UnsupportedFilter(filter_type))?;

        let (width, height) = (frame.width(), frame.height());
        if width == 0 || height == 0 {
            return Err(GpuError::EmptyFrame { width, height });
        }
        let limit = self.ctx.max_texture_dimension();
        if width > limit || height > limit {
            return Err(GpuError::FrameTooLarge {
                width,
                height,
                limit,
            });
        }

        let device = &self.ctx.device;
        let queue = &self.ctx.queue;

        let uniforms = FilterUniforms::new(width, height, params);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let source = RenderTarget::for_source(device, "filter_source", width, height);
        source.write_rgba8(queue, &frame.to_rgba8());
        let output = RenderTarget::for_output(device, "filter_output", width, height);
        let readback = ReadbackBuffer::new(device, width, height);

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("filter_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(source.view()),
                },
            ],
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("filter_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("filter_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: output.view(),
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        readback.copy_from(&mut encoder, &output);
        queue.submit(std::iter::once(encoder.finish()));

        let pixels = readback.read_pixels(device)?;
        log::debug!("GPU {} on {}x{}", filter_type.name(), width, height);

        Frame::from_rgba8(width, height, &pixels).map_err(|e| GpuError::BufferMap(e.to_string()))
    }

    /// Get the shared GPU context.
    pub fn context(&self) -> &GpuContext {
        &self.ctx
    }

    /// Get GPU adapter info.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.ctx.adapter_info()
    }
}
