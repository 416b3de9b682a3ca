//! Bind group layout builders for GPU pipelines.
//!
//! Provides reusable helpers for creating wgpu bind group layouts.

use wgpu::{BindGroupLayout, BindGroupLayoutEntry, Device, ShaderStages};

/// Builder for creating bind group layouts with common patterns.
pub struct BindGroupLayoutBuilder {
    label: Option<&'static str>,
    entries: Vec<BindGroupLayoutEntry>,
}

impl BindGroupLayoutBuilder {
    /// Create a new bind group layout builder.
    pub fn new(label: &'static str) -> Self {
        Self {
            label: Some(label),
            entries: Vec::new(),
        }
    }

    /// Add a uniform buffer entry.
    pub fn uniform(mut self, binding: u32, visibility: ShaderStages) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
        self
    }

    /// Add a 2D float texture entry read with `textureLoad`.
    pub fn texture_2d(mut self, binding: u32, visibility: ShaderStages) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        });
        self
    }

    /// Number of entries added so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the bind group layout.
    pub fn build(self, device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: self.label,
            entries: &self.entries,
        })
    }
}

/// Create the filter bind group layout (uniforms, source texture).
pub fn create_filter_layout(device: &Device) -> BindGroupLayout {
    filter_layout_builder().build(device)
}

fn filter_layout_builder() -> BindGroupLayoutBuilder {
    BindGroupLayoutBuilder::new("filter_bind_group_layout")
        .uniform(0, ShaderStages::FRAGMENT)
        .texture_2d(1, ShaderStages::FRAGMENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::GpuContext;

    #[test]
    fn test_filter_layout_entries() {
        let builder = filter_layout_builder();
        assert_eq!(builder.len(), 2);
        assert_eq!(builder.entries[0].binding, 0);
        assert_eq!(builder.entries[1].binding, 1);
    }

    #[tokio::test]
    async fn test_filter_layout_creation() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return, // Skip if no GPU
        };

        let _layout = create_filter_layout(&ctx.device);
    }
}
