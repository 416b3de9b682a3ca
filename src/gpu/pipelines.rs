//! Render pipeline builders for GPU filtering.
//!
//! Every filter pass is a fullscreen triangle; only the fragment entry point differs.

use wgpu::{
    BindGroupLayout, ColorTargetState, Device, PipelineLayout, RenderPipeline, ShaderModule,
    TextureFormat,
};

/// Builder for fullscreen filter pipelines.
pub struct FullscreenPipelineBuilder<'a> {
    label: Option<&'static str>,
    layout: Option<&'a PipelineLayout>,
    shader: &'a ShaderModule,
    vertex_entry: &'static str,
    fragment_entry: &'static str,
    format: TextureFormat,
}

impl<'a> FullscreenPipelineBuilder<'a> {
    /// Create a new builder for the given shader module.
    pub fn new(label: &'static str, shader: &'a ShaderModule) -> Self {
        Self {
            label: Some(label),
            layout: None,
            shader,
            vertex_entry: "vs_fullscreen",
            fragment_entry: "fs_passthrough",
            format: TextureFormat::Rgba8Unorm,
        }
    }

    /// Set the pipeline layout.
    pub fn layout(mut self, layout: &'a PipelineLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Set the fragment shader entry point.
    pub fn fragment_entry(mut self, entry: &'static str) -> Self {
        self.fragment_entry = entry;
        self
    }

    /// Set the target texture format.
    pub fn format(mut self, format: TextureFormat) -> Self {
        self.format = format;
        self
    }

    /// Build the render pipeline.
    pub fn build(self, device: &Device) -> RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: self.label,
            layout: self.layout,
            vertex: wgpu::VertexState {
                module: self.shader,
                entry_point: Some(self.vertex_entry),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: self.shader,
                entry_point: Some(self.fragment_entry),
                targets: &[Some(ColorTargetState {
                    format: self.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}

/// Create a pipeline layout from bind group layouts.
pub fn create_pipeline_layout(
    device: &Device,
    label: &'static str,
    layouts: &[&BindGroupLayout],
) -> PipelineLayout {
    device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: layouts,
        immediate_size: 0,
    })
}

/// Create a fullscreen filter pipeline (no vertex buffers, draws 3 vertices).
pub fn create_fullscreen_pipeline(
    device: &Device,
    label: &'static str,
    layout: &PipelineLayout,
    shader: &ShaderModule,
    fragment_entry: &'static str,
    format: TextureFormat,
) -> RenderPipeline {
    FullscreenPipelineBuilder::new(label, shader)
        .layout(layout)
        .fragment_entry(fragment_entry)
        .format(format)
        .build(device)
}
