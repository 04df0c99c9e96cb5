use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::{
    entity::Scene,
    particles::ParticleBuffer,
    renderer::{
        copy::CopyRenderPass,
        particle::{ParticleRenderer, ParticleRendererBuilder},
        render_target::{RenderTarget, SAMPLE_COUNT},
        SceneRenderer,
    },
    viewport::Metrics,
    window::{Size, Window},
};

/// wgpu backend drawing the particle cloud onto a window surface with 4x MSAA.
///
/// The surface always matches the window's drawable size. When the pixel ratio
/// is capped below the scale factor, the scene is drawn into a smaller target
/// and stretched over the surface.
///
/// Dropping the renderer releases the device, the surface and every buffer it
/// created.
pub struct Renderer {
    particle_renderer: ParticleRenderer,
    targets: Targets,
    surface_format: wgpu::TextureFormat,
    metrics: Metrics,
    queue: wgpu::Queue,
    device: wgpu::Device,
    surface: wgpu::Surface,
}

struct Targets {
    msaa: RenderTarget,
    upscale: Option<Upscale>,
}

struct Upscale {
    copy_pass: CopyRenderPass,
    resolve: RenderTarget,
}

impl Targets {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat, metrics: &Metrics) -> Self {
        let render_size = metrics.render_size();
        let msaa = RenderTarget::multisampled(device, "MSAA Color Target", format, render_size);
        let upscale = (render_size != metrics.surface_size).then(|| {
            let resolve = RenderTarget::resolve(device, "Resolve Color Target", format, render_size);
            let copy_pass = CopyRenderPass::new(device, &resolve.texture_view, format);
            Upscale { copy_pass, resolve }
        });
        Self { msaa, upscale }
    }
}

impl Renderer {
    pub async fn new(
        window: &impl Window,
        scene: &Scene,
        particles: &ParticleBuffer,
        metrics: &Metrics,
    ) -> Result<Self> {
        let instance = wgpu::Instance::new(wgpu::Backends::PRIMARY);
        let surface = unsafe { instance.create_surface(window) };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No adapter found")?;
        info!("Using adapter {:?}", adapter.get_info());

        let surface_format = surface
            .get_preferred_format(&adapter)
            .context("No preferred format found")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default(), None)
            .await
            .context("No device found")?;

        Self::configure_surface(&surface, &device, surface_format, metrics.surface_size);
        let targets = Targets::new(&device, surface_format, metrics);

        let particle_renderer = ParticleRendererBuilder::new(scene, particles)
            .color_target_format(targets.msaa.format)
            .sample_count(SAMPLE_COUNT)
            .build(&device);

        Ok(Self {
            particle_renderer,
            targets,
            surface_format,
            metrics: *metrics,
            queue,
            device,
            surface,
        })
    }

    fn configure_surface(
        surface: &wgpu::Surface,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: Size,
    ) {
        if size.is_empty() {
            return;
        }
        surface.configure(
            device,
            &wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format,
                width: size.width,
                height: size.height,
                present_mode: wgpu::PresentMode::Fifo,
            },
        )
    }

    fn reconfigure(&mut self) {
        Self::configure_surface(
            &self.surface,
            &self.device,
            self.surface_format,
            self.metrics.surface_size,
        );
        self.targets = Targets::new(&self.device, self.surface_format, &self.metrics);
    }
}

impl SceneRenderer for Renderer {
    fn resize(&mut self, metrics: &Metrics) {
        self.metrics = *metrics;
        self.reconfigure();
        debug!(
            "Surface resized to {:?}, drawing at {:?}",
            metrics.surface_size,
            metrics.render_size()
        );
    }

    fn upload_positions(&mut self, positions: &[f32]) {
        self.particle_renderer.upload_positions(&self.queue, positions);
    }

    fn render(&mut self, scene: &Scene) -> Result<()> {
        if self.metrics.surface_size.is_empty() {
            return Ok(());
        }

        self.particle_renderer.update(&self.queue, scene);

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring");
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out waiting for the next surface texture");
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to get next surface texture"),
        };

        let surface_texture_view = surface_texture.texture.create_view(&Default::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Particle Command Encoder"),
            });

        let resolve_target = match &self.targets.upscale {
            Some(upscale) => &upscale.resolve.texture_view,
            None => &surface_texture_view,
        };
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Particle Render Pass"),
                color_attachments: &[wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa.texture_view,
                    resolve_target: Some(resolve_target),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: true,
                    },
                }],
                depth_stencil_attachment: None,
            });
            self.particle_renderer.draw(&mut rpass);
        }

        if let Some(upscale) = &self.targets.upscale {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Upscale Render Pass"),
                color_attachments: &[wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: true,
                    },
                }],
                depth_stencil_attachment: None,
            });
            upscale.copy_pass.draw(&mut rpass);
        }

        self.queue.submit(Some(encoder.finish()));

        surface_texture.present();

        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.particle_renderer.destroy();
        debug!("Released particle GPU resources");
    }
}
