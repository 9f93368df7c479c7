//! Shared GPU types and the instanced-quad pipeline used by the SDF shape renderers.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::{Rect, Viewport};
use crate::render::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn new(viewport: Viewport) -> Self {
        Self { viewport: viewport.clamped(), _pad: [0.0; 2] }
    }

    pub(super) fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<Self>() as u64)
            .expect("ViewportUniform has non-zero size by construction")
    }
}

// ── unit quad ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

pub(super) fn create_quad_buffers(device: &wgpu::Device, name: &str) -> (wgpu::Buffer, wgpu::Buffer) {
    let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("meridian {name} quad vbo")),
        contents: bytemuck::cast_slice(&QUAD_VERTICES),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("meridian {name} quad ibo")),
        contents: bytemuck::cast_slice(&QUAD_INDICES),
        usage: wgpu::BufferUsages::INDEX,
    });
    (vbo, ibo)
}

pub(super) fn quad_primitive() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

// ── scissor rect ──────────────────────────────────────────────────────────

/// Converts a logical-pixel clip rect to physical scissor arguments.
///
/// `None` clip means the full viewport. Returns `None` when the clipped area is
/// empty so the caller can skip the draw.
pub(crate) fn logical_clip_to_scissor(
    clip: Option<Rect>,
    viewport: Viewport,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_vw = (viewport.width * scale).max(1.0) as u32;
    let phys_vh = (viewport.height * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_vw, phys_vh),
        Some(r) => {
            let max = r.max();
            let x = ((r.origin.x * scale).max(0.0) as u32).min(phys_vw);
            let y = ((r.origin.y * scale).max(0.0) as u32).min(phys_vh);
            let x2 = ((max.x * scale).max(0.0) as u32).min(phys_vw);
            let y2 = ((max.y * scale).max(0.0) as u32).min(phys_vh);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

// ── instanced SDF pipeline ────────────────────────────────────────────────

/// Lazily built pipeline drawing one unit quad per instance, with a viewport
/// uniform at `@group(0) @binding(0)`.
///
/// Circle and segment renderers differ only in their instance layout and WGSL.
pub(super) struct InstancedQuadPipeline {
    name: &'static str,
    shader_src: &'static str,
    instance_layout: fn() -> wgpu::VertexBufferLayout<'static>,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad: Option<(wgpu::Buffer, wgpu::Buffer)>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
}

impl InstancedQuadPipeline {
    pub(super) fn new(
        name: &'static str,
        shader_src: &'static str,
        instance_layout: fn() -> wgpu::VertexBufferLayout<'static>,
    ) -> Self {
        Self {
            name,
            shader_src,
            instance_layout,
            pipeline_format: None,
            pipeline: None,
            bind_group: None,
            viewport_ubo: None,
            quad: None,
            instance_vbo: None,
            instance_capacity: 0,
        }
    }

    /// Uploads this frame's instances, growing the instance buffer when needed.
    ///
    /// Instances are written once per frame; runs are then drawn from ranges of
    /// this buffer so interleaved layers never overwrite each other.
    pub(super) fn upload<I: Pod>(&mut self, ctx: &RenderCtx<'_>, instances: &[I]) {
        if instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_instance_capacity::<I>(ctx, instances.len());

        if let Some(ubo) = self.viewport_ubo.as_ref() {
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
        }
        if let Some(vbo) = self.instance_vbo.as_ref() {
            ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(instances));
        }
    }

    /// Records a draw of `range` from the uploaded instances.
    pub(super) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        let (Some(pipeline), Some(bind_group), Some((quad_vbo, quad_ibo)), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.bind_group.as_ref(),
            self.quad.as_ref(),
            self.instance_vbo.as_ref(),
        ) else {
            return;
        };

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, range);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let name = self.name;
        let device = ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("meridian {name} shader")),
            source: wgpu::ShaderSource::Wgsl(self.shader_src.into()),
        });

        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("meridian {name} bgl")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(ViewportUniform::min_binding_size()),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("meridian {name} pipeline layout")),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("meridian {name} pipeline")),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), (self.instance_layout)()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: quad_primitive(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("meridian {name} viewport ubo")),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("meridian {name} bind group")),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        if self.quad.is_none() {
            self.quad = Some(create_quad_buffers(device, name));
        }

        log::debug!("built {name} pipeline for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group = Some(bind_group);
        self.viewport_ubo = Some(viewport_ubo);
    }

    fn ensure_instance_capacity<I: Pod>(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("meridian {} instance vbo", self.name)),
            size: (new_cap * std::mem::size_of::<I>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_clip_covers_physical_viewport() {
        let vp = Viewport::new(100.0, 50.0);
        assert_eq!(logical_clip_to_scissor(None, vp, 2.0), Some((0, 0, 200, 100)));
    }

    #[test]
    fn clip_is_scaled_and_clamped() {
        let vp = Viewport::new(100.0, 100.0);
        let clip = Rect::new(80.0, 10.0, 40.0, 20.0);
        assert_eq!(logical_clip_to_scissor(Some(clip), vp, 1.0), Some((80, 10, 20, 20)));
    }

    #[test]
    fn empty_clip_skips_draw() {
        let vp = Viewport::new(100.0, 100.0);
        let clip = Rect::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(logical_clip_to_scissor(Some(clip), vp, 1.0), None);
    }
}
