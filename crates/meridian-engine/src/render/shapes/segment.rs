use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::SegmentCmd;

use super::common::InstancedQuadPipeline;

/// Renderer for `DrawCmd::Segment`: straight lines with butt caps.
///
/// Each segment is an oriented quad expanded by one pixel on every side for
/// antialiasing; coverage is computed from the distance to the segment axis.
pub struct SegmentRenderer {
    pipeline: InstancedQuadPipeline,
    instances: Vec<SegmentInstance>,
}

impl Default for SegmentRenderer {
    fn default() -> Self {
        Self {
            pipeline: InstancedQuadPipeline::new(
                "segment",
                include_str!("shaders/segment.wgsl"),
                SegmentInstance::layout,
            ),
            instances: Vec::new(),
        }
    }
}

impl SegmentRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn begin(&mut self) {
        self.instances.clear();
    }

    pub(crate) fn len(&self) -> u32 {
        self.instances.len() as u32
    }

    pub(crate) fn push(&mut self, cmd: &SegmentCmd) {
        if cmd.width <= 0.0 || !cmd.color.is_visible() || cmd.length() <= f32::EPSILON {
            return;
        }
        self.instances.push(SegmentInstance {
            from: [cmd.from.x, cmd.from.y],
            to: [cmd.to.x, cmd.to.y],
            color: cmd.color.to_array(),
            width: cmd.width,
            _pad: [0.0; 3],
        });
    }

    pub(crate) fn upload(&mut self, ctx: &RenderCtx<'_>) {
        self.pipeline.upload(ctx, &self.instances);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        self.pipeline.draw(rpass, range);
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SegmentInstance {
    from: [f32; 2],
    to: [f32; 2],
    color: [f32; 4],
    width: f32,
    _pad: [f32; 3],
}

impl SegmentInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // from
        2 => Float32x2, // to
        3 => Float32x4, // color
        4 => Float32    // width
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SegmentInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    #[test]
    fn zero_length_and_zero_width_segments_are_dropped() {
        let mut r = SegmentRenderer::new();
        let white = Color::from_hex(0xffffff);
        let p = Vec2::new(3.0, 3.0);

        r.push(&SegmentCmd { from: p, to: p, width: 2.0, color: white });
        r.push(&SegmentCmd { from: p, to: Vec2::new(3.0, 9.0), width: 0.0, color: white });
        assert_eq!(r.len(), 0);

        r.push(&SegmentCmd { from: p, to: Vec2::new(3.0, 9.0), width: 1.0, color: white });
        assert_eq!(r.len(), 1);
    }
}
