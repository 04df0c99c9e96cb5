use crate::window::Size;

pub const SAMPLE_COUNT: u32 = 4;

/// Offscreen color buffer the particle pass draws into.
pub struct RenderTarget {
    pub format: wgpu::TextureFormat,
    pub texture: wgpu::Texture,
    pub texture_view: wgpu::TextureView,
}

impl RenderTarget {
    /// Multisampled attachment, resolved either into the surface texture or into
    /// a [`RenderTarget::resolve`] target.
    pub fn multisampled(
        device: &wgpu::Device,
        label: &str,
        format: wgpu::TextureFormat,
        size: Size,
    ) -> Self {
        Self::new(
            device,
            label,
            format,
            size,
            SAMPLE_COUNT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        )
    }

    /// Single-sampled resolve target that can be sampled by a later pass.
    pub fn resolve(
        device: &wgpu::Device,
        label: &str,
        format: wgpu::TextureFormat,
        size: Size,
    ) -> Self {
        Self::new(
            device,
            label,
            format,
            size,
            1,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        )
    }

    fn new(
        device: &wgpu::Device,
        label: &str,
        format: wgpu::TextureFormat,
        size: Size,
        sample_count: u32,
        usage: wgpu::TextureUsages,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
        });
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            format,
            texture,
            texture_view,
        }
    }
}

impl Drop for RenderTarget {
    fn drop(&mut self) {
        self.texture.destroy();
    }
}
